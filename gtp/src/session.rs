use tracing::{debug, error, trace, trace_span, warn};

use crate::board::Board;
use crate::color::Color;
use crate::command::Command;
use crate::decode::{absent, decode, Value};
use crate::error::GtpError;
use crate::move_::{is_game_over, Move, Point, Vertex};
use crate::operation::*;
use crate::response::{read_response, Response, Status};
use crate::stream::LineStream;

/// A single conversation with an engine over an exclusively owned stream.
///
/// Every command updates the session's record of the last outcome: whether the
/// engine accepted it and, if not, the engine's message. Rejections are never
/// returned as errors. Errors are reserved for transport faults, malformed
/// responses and a desynchronized or closed session.
pub struct Session<S: LineStream> {
    stream: S,
    next_id: u32,
    last_status: Option<Status>,
    last_error: Option<String>,
    history: Vec<Move>,
    desync: Option<(u32, u32)>,
    closed: bool,
}

impl<S: LineStream> Session<S> {
    /// Binds an idle session to `stream`. Nothing is written until a command is issued.
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            next_id: 1,
            last_status: None,
            last_error: None,
            history: Vec::new(),
            desync: None,
            closed: false,
        }
    }

    /// Runs `batch` on a new session, then quits. The quit is sent even when the
    /// batch fails, unless the session can no longer talk to the engine, and the
    /// stream is closed either way.
    pub fn run<F, T>(stream: S, batch: F) -> (Self, Result<T, GtpError>)
    where
        F: FnOnce(&mut Self) -> Result<T, GtpError>,
    {
        let mut session = Self::new(stream);
        let result = batch(&mut session);

        let quit = if session.closed {
            Ok(())
        } else {
            session.quit().map(|_| ())
        };

        let result = match (result, quit) {
            (Ok(value), Ok(())) => Ok(value),
            (Err(err), _) | (Ok(_), Err(err)) => Err(err),
        };

        (session, result)
    }

    /// Whether the engine accepted the most recent command.
    pub fn success(&self) -> bool {
        self.last_status == Some(Status::Success)
    }

    /// The engine's message for the most recent command, if it was rejected.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Moves this session knows were played, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    /// Runs an operation by name with untyped arguments. A trailing `?` on the
    /// name asks for the success flag instead of the decoded value.
    pub fn execute(&mut self, name: &str, args: &[&str]) -> Result<Value, GtpError> {
        let (operation, form) =
            lookup(name).ok_or_else(|| GtpError::UnknownOperation(name.to_owned()))?;

        if *operation == QUIT {
            check_arity(operation, args)?;
            return self.quit().map(Value::Bool);
        }

        self.call(operation, args, form)
    }

    /// Sends `operation` and returns its decoded value, or the decoder's absent
    /// value if the engine rejected it.
    pub fn direct(&mut self, operation: &Operation, args: &[&str]) -> Result<Value, GtpError> {
        self.call(operation, args, Form::Direct)
    }

    /// Sends `operation` and returns only whether the engine accepted it. For
    /// `is_legal` and `known_command` that is the engine's yes or no answer.
    pub fn query(&mut self, operation: &Operation, args: &[&str]) -> Result<bool, GtpError> {
        self.call(operation, args, Form::Query)
            .map(|value| value.as_bool().unwrap_or_default())
    }

    pub fn call(
        &mut self,
        operation: &Operation,
        args: &[&str],
        form: Form,
    ) -> Result<Value, GtpError> {
        let response = self.dispatch(operation, args)?;

        if !response.is_success() {
            return Ok(match form {
                Form::Direct => absent(operation.decoder),
                Form::Query => Value::Bool(false),
            });
        }

        // A boolean operation's answer is its body, so both forms need it decoded.
        let answers_in_body = operation.decoder == Decoder::Boolean;

        let value = match (decode(operation.decoder, &response.body), form) {
            (Ok(value), _) => value,
            (Err(err), Form::Query) if !answers_in_body => {
                // The engine accepted the command, which is all a query asks.
                warn!(error = %err, operation = operation.name, "Could not decode response.");
                return Ok(Value::Bool(true));
            }
            (Err(err), _) => return Err(err),
        };
        trace!(?value, "Decoded response.");

        self.track(operation, args, &value);

        Ok(match form {
            Form::Query if !answers_in_body => Value::Bool(true),
            _ => value,
        })
    }

    fn dispatch(&mut self, operation: &Operation, args: &[&str]) -> Result<Response, GtpError> {
        let _span = trace_span!("Session::dispatch", operation = operation.name).entered();

        if self.closed {
            return Err(GtpError::SessionClosed);
        }

        if let Some((expected, received)) = self.desync {
            return Err(GtpError::ProtocolDesync { expected, received });
        }

        check_arity(operation, args)?;

        let id = self.next_id;
        self.next_id += 1;

        // Counts as failed until a matching response says otherwise.
        self.last_status = Some(Status::Failure);
        self.last_error = None;

        let command = Command::new(id, operation.wire, args.iter().copied());
        debug!(%command, "Sending command.");
        self.stream.write_line(&command.encode())?;

        let response = read_response(&mut self.stream)?;

        if response.id != id {
            error!(expected = id, received = response.id, "Response id mismatch.");
            self.desync = Some((id, response.id));
            return Err(GtpError::ProtocolDesync {
                expected: id,
                received: response.id,
            });
        }

        debug!(id, status = ?response.status, "Received response.");

        self.last_status = Some(response.status);
        self.last_error = match response.status {
            Status::Success => None,
            Status::Failure => {
                warn!(%command, message = %response.body, "Command rejected.");
                Some(response.body.clone())
            }
        };

        Ok(response)
    }

    /// Keeps the local move history in step with accepted commands.
    fn track(&mut self, operation: &Operation, args: &[&str], value: &Value) {
        match operation.name {
            "play" => {
                let player = args.first().and_then(|&a| Color::from_player(a));
                let point = args.get(1).and_then(|a| a.parse::<Point>().ok());
                if let (Some(color), Some(point)) = (player, point) {
                    self.history.push(Move::new(color, point));
                }
            }
            "genmove" => {
                let player = args.first().and_then(|&a| Color::from_player(a));
                if let (Some(color), Value::Point(point)) = (player, value) {
                    self.history.push(Move::new(color, point.clone()));
                }
            }
            "undo" => {
                self.history.pop();
            }
            "move_history" => {
                if let Value::Moves(moves) = value {
                    self.history = moves.clone();
                }
            }
            "boardsize" | "clear_board" | "loadsgf" => self.history.clear(),
            _ => (),
        }
    }

    /// Sends the terminal `quit` and closes the stream. No further commands can
    /// be sent on this session.
    pub fn quit(&mut self) -> Result<bool, GtpError> {
        if self.closed {
            return Err(GtpError::SessionClosed);
        }

        let result = self.query(&QUIT, &[]);

        self.closed = true;
        self.stream.close()?;

        result
    }

    pub fn protocol_version(&mut self) -> Result<Option<String>, GtpError> {
        Ok(self.direct(&PROTOCOL_VERSION, &[])?.into_text())
    }

    pub fn protocol_version_query(&mut self) -> Result<bool, GtpError> {
        self.query(&PROTOCOL_VERSION, &[])
    }

    pub fn name(&mut self) -> Result<Option<String>, GtpError> {
        Ok(self.direct(&NAME, &[])?.into_text())
    }

    pub fn name_query(&mut self) -> Result<bool, GtpError> {
        self.query(&NAME, &[])
    }

    pub fn version(&mut self) -> Result<Option<String>, GtpError> {
        Ok(self.direct(&VERSION, &[])?.into_text())
    }

    pub fn version_query(&mut self) -> Result<bool, GtpError> {
        self.query(&VERSION, &[])
    }

    /// `false` if the engine doesn't know the command, or rejected the question.
    pub fn known_command(&mut self, command: &str) -> Result<bool, GtpError> {
        Ok(self.direct(&KNOWN_COMMAND, &[command])?.as_bool() == Some(true))
    }

    pub fn known_command_query(&mut self, command: &str) -> Result<bool, GtpError> {
        self.query(&KNOWN_COMMAND, &[command])
    }

    pub fn list_commands(&mut self) -> Result<Option<Vec<String>>, GtpError> {
        Ok(self.direct(&LIST_COMMANDS, &[])?.into_lines())
    }

    pub fn list_commands_query(&mut self) -> Result<bool, GtpError> {
        self.query(&LIST_COMMANDS, &[])
    }

    pub fn help(&mut self) -> Result<Option<Vec<String>>, GtpError> {
        Ok(self.direct(&HELP, &[])?.into_lines())
    }

    pub fn help_query(&mut self) -> Result<bool, GtpError> {
        self.query(&HELP, &[])
    }

    pub fn boardsize(&mut self, size: usize) -> Result<bool, GtpError> {
        self.query(&BOARDSIZE, &[&size.to_string()])
    }

    pub fn clear_board(&mut self) -> Result<bool, GtpError> {
        self.query(&CLEAR_BOARD, &[])
    }

    pub fn komi(&mut self, komi: f32) -> Result<bool, GtpError> {
        self.query(&KOMI, &[&komi.to_string()])
    }

    pub fn fixed_handicap(&mut self, stones: usize) -> Result<Option<Vec<Vertex>>, GtpError> {
        Ok(self
            .direct(&FIXED_HANDICAP, &[&stones.to_string()])?
            .into_vertices())
    }

    pub fn fixed_handicap_query(&mut self, stones: usize) -> Result<bool, GtpError> {
        self.query(&FIXED_HANDICAP, &[&stones.to_string()])
    }

    pub fn place_free_handicap(&mut self, stones: usize) -> Result<Option<Vec<Vertex>>, GtpError> {
        Ok(self
            .direct(&PLACE_FREE_HANDICAP, &[&stones.to_string()])?
            .into_vertices())
    }

    pub fn place_free_handicap_query(&mut self, stones: usize) -> Result<bool, GtpError> {
        self.query(&PLACE_FREE_HANDICAP, &[&stones.to_string()])
    }

    pub fn set_free_handicap(&mut self, vertices: &[Vertex]) -> Result<bool, GtpError> {
        let args: Vec<&str> = vertices.iter().map(Vertex::as_str).collect();
        self.query(&SET_FREE_HANDICAP, &args)
    }

    pub fn play(&mut self, color: Color, point: &Point) -> Result<bool, GtpError> {
        self.query(&PLAY, &[&color.to_string(), &point.to_string()])
    }

    pub fn genmove(&mut self, color: Color) -> Result<Option<Point>, GtpError> {
        Ok(self.direct(&GENMOVE, &[&color.to_string()])?.into_point())
    }

    pub fn genmove_query(&mut self, color: Color) -> Result<bool, GtpError> {
        self.query(&GENMOVE, &[&color.to_string()])
    }

    pub fn reg_genmove(&mut self, color: Color) -> Result<Option<Point>, GtpError> {
        Ok(self.direct(&REG_GENMOVE, &[&color.to_string()])?.into_point())
    }

    pub fn reg_genmove_query(&mut self, color: Color) -> Result<bool, GtpError> {
        self.query(&REG_GENMOVE, &[&color.to_string()])
    }

    pub fn undo(&mut self) -> Result<bool, GtpError> {
        self.query(&UNDO, &[])
    }

    pub fn time_settings(
        &mut self,
        main_time: u32,
        byo_yomi_time: u32,
        byo_yomi_stones: u32,
    ) -> Result<bool, GtpError> {
        self.query(
            &TIME_SETTINGS,
            &[
                &main_time.to_string(),
                &byo_yomi_time.to_string(),
                &byo_yomi_stones.to_string(),
            ],
        )
    }

    pub fn time_left(&mut self, color: Color, time: u32, stones: u32) -> Result<bool, GtpError> {
        self.query(
            &TIME_LEFT,
            &[&color.to_string(), &time.to_string(), &stones.to_string()],
        )
    }

    pub fn final_score(&mut self) -> Result<Option<String>, GtpError> {
        Ok(self.direct(&FINAL_SCORE, &[])?.into_text())
    }

    pub fn final_score_query(&mut self) -> Result<bool, GtpError> {
        self.query(&FINAL_SCORE, &[])
    }

    /// `status` is one of the engine's stone classes, e.g. "alive", "dead" or "seki".
    pub fn final_status_list(&mut self, status: &str) -> Result<Option<Vec<Vertex>>, GtpError> {
        Ok(self.direct(&FINAL_STATUS_LIST, &[status])?.into_vertices())
    }

    pub fn final_status_list_query(&mut self, status: &str) -> Result<bool, GtpError> {
        self.query(&FINAL_STATUS_LIST, &[status])
    }

    pub fn loadsgf(
        &mut self,
        path: &str,
        move_number: Option<u32>,
    ) -> Result<Option<String>, GtpError> {
        let move_number = move_number.map(|n| n.to_string());
        let args: Vec<&str> = [Some(path), move_number.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        Ok(self.direct(&LOADSGF, &args)?.into_text())
    }

    pub fn loadsgf_query(&mut self, path: &str, move_number: Option<u32>) -> Result<bool, GtpError> {
        let move_number = move_number.map(|n| n.to_string());
        let args: Vec<&str> = [Some(path), move_number.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        self.query(&LOADSGF, &args)
    }

    pub fn printsgf(&mut self, path: Option<&str>) -> Result<Option<String>, GtpError> {
        let args: Vec<&str> = path.into_iter().collect();
        Ok(self.direct(&PRINTSGF, &args)?.into_text())
    }

    pub fn printsgf_query(&mut self, path: Option<&str>) -> Result<bool, GtpError> {
        let args: Vec<&str> = path.into_iter().collect();
        self.query(&PRINTSGF, &args)
    }

    pub fn showboard(&mut self) -> Result<Option<Board>, GtpError> {
        Ok(self.direct(&SHOWBOARD, &[])?.into_board())
    }

    pub fn showboard_query(&mut self) -> Result<bool, GtpError> {
        self.query(&SHOWBOARD, &[])
    }

    /// `false` when the move is illegal or the engine rejected the question.
    pub fn is_legal(&mut self, color: Color, vertex: &Vertex) -> Result<bool, GtpError> {
        Ok(self
            .direct(&IS_LEGAL, &[&color.to_string(), vertex.as_str()])?
            .as_bool()
            == Some(true))
    }

    pub fn is_legal_query(&mut self, color: Color, vertex: &Vertex) -> Result<bool, GtpError> {
        self.query(&IS_LEGAL, &[&color.to_string(), vertex.as_str()])
    }

    /// The stone on `vertex`, or `None` for an empty point or a rejected command.
    pub fn color(&mut self, vertex: &Vertex) -> Result<Option<Color>, GtpError> {
        Ok(self.direct(&COLOR, &[vertex.as_str()])?.as_color())
    }

    pub fn color_query(&mut self, vertex: &Vertex) -> Result<bool, GtpError> {
        self.query(&COLOR, &[vertex.as_str()])
    }

    pub fn captures(&mut self, color: Color) -> Result<Option<i64>, GtpError> {
        Ok(self
            .direct(&CAPTURES, &[&color.to_string()])?
            .as_integer())
    }

    pub fn captures_query(&mut self, color: Color) -> Result<bool, GtpError> {
        self.query(&CAPTURES, &[&color.to_string()])
    }

    pub fn last_move(&mut self) -> Result<Option<Move>, GtpError> {
        Ok(self.direct(&LAST_MOVE, &[])?.into_move())
    }

    pub fn last_move_query(&mut self) -> Result<bool, GtpError> {
        self.query(&LAST_MOVE, &[])
    }

    /// The engine's record of the game, oldest move first. Also replaces this
    /// session's local history.
    pub fn move_history(&mut self) -> Result<Option<Vec<Move>>, GtpError> {
        Ok(self.direct(&MOVE_HISTORY, &[])?.into_moves())
    }

    pub fn move_history_query(&mut self) -> Result<bool, GtpError> {
        self.query(&MOVE_HISTORY, &[])
    }

    /// Asks the engine for the move history and checks it for a resignation or
    /// two passes in a row.
    pub fn is_over(&mut self) -> Result<bool, GtpError> {
        Ok(self
            .move_history()?
            .map_or(false, |history| is_game_over(&history)))
    }

    /// Plays `vertices` in order, black first and alternating. Stops at the first
    /// move the engine rejects and returns `false`; the rejection is left in
    /// `last_error`.
    pub fn replay<I, V>(&mut self, vertices: I) -> Result<bool, GtpError>
    where
        I: IntoIterator<Item = V>,
        V: AsRef<str>,
    {
        let mut color = Color::Black;

        for vertex in vertices {
            let vertex = vertex.as_ref();

            if !self.query(&PLAY, &[&color.to_string(), vertex])? {
                debug!(%color, vertex, "Replay stopped at a rejected move.");
                return Ok(false);
            }

            color = color.other();
        }

        Ok(true)
    }
}

fn check_arity(operation: &Operation, args: &[&str]) -> Result<(), GtpError> {
    if operation.arity.accepts(args.len()) {
        Ok(())
    } else {
        Err(GtpError::InvalidArguments {
            operation: operation.name,
            arity: operation.arity,
            given: args.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor, Write};

    use super::*;
    use crate::stream::IoStream;

    use Color::*;

    type Mock = IoStream<Cursor<Vec<u8>>, Vec<u8>>;

    fn session(input: &str) -> Session<Mock> {
        Session::new(IoStream::new(
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
        ))
    }

    fn output(session: &Session<Mock>) -> String {
        String::from_utf8(session.get_ref().writer().clone()).unwrap()
    }

    /// Accepts the given number of writes, then fails like a dead engine's pipe.
    struct ClosesAfter(usize);

    impl Write for ClosesAfter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.0 == 0 {
                return Err(io::ErrorKind::BrokenPipe.into());
            }
            self.0 -= 1;
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn idle_session_writes_nothing() {
        let session = session("=1");

        assert!(output(&session).is_empty());
        assert!(!session.success());
        assert_eq!(session.last_error(), None);
    }

    #[test]
    fn run_sends_quit_after_the_batch() {
        let stream = IoStream::new(Cursor::new(b"=1".to_vec()), Vec::new());

        let mut ran = false;
        let (session, result) = Session::run(stream, |_| {
            ran = true;
            Ok(())
        });

        assert!(ran);
        assert!(result.is_ok());
        assert!(session.is_closed());
        assert!(session.get_ref().is_closed());
        assert_eq!(output(&session), "1 quit\n");
    }

    #[test]
    fn run_writes_one_line_per_command_then_quit() {
        let stream = IoStream::new(
            Cursor::new(b"=1\n\n=2\n\n=3 2\n\n=4\n\n".to_vec()),
            Vec::new(),
        );

        let (session, result) = Session::run(stream, |go| {
            go.boardsize(9)?;
            go.clear_board()?;
            go.protocol_version()
        });

        assert_eq!(result.unwrap().as_deref(), Some("2"));
        assert_eq!(
            output(&session),
            "1 boardsize 9\n2 clear_board\n3 protocol_version\n4 quit\n"
        );
    }

    #[test]
    fn run_quits_even_when_the_batch_fails() {
        let stream = IoStream::new(Cursor::new(b"=1\n\n=2\n\n".to_vec()), Vec::new());

        let (session, result) = Session::run(stream, |go| go.execute("fly", &[]));

        assert!(matches!(result, Err(GtpError::UnknownOperation(_))));
        assert!(session.is_closed());
        assert_eq!(output(&session), "1 quit\n");
    }

    #[test]
    fn sequence_ids_count_up_from_one() {
        let mut go = session("=1\n\n=2\n\n=3\n\n");

        go.clear_board().unwrap();
        go.clear_board().unwrap();
        go.clear_board().unwrap();

        assert_eq!(
            output(&go),
            "1 clear_board\n2 clear_board\n3 clear_board\n"
        );
    }

    #[test]
    fn reports_success_of_the_last_command() {
        let mut go = session("=1");

        assert!(go.clear_board().unwrap());
        assert!(go.success());
        assert_eq!(go.last_error(), None);
    }

    #[test]
    fn reports_failure_of_the_last_command() {
        let mut go = session("?1 error message");

        assert!(!go.clear_board().unwrap());
        assert!(!go.success());
        assert_eq!(go.last_error(), Some("error message"));
    }

    #[test]
    fn success_clears_an_earlier_error() {
        let mut go = session("?1 illegal move\n\n=2\n\n");

        assert!(!go.play(Black, &"A1".parse().unwrap()).unwrap());
        assert_eq!(go.last_error(), Some("illegal move"));

        assert!(go.play(Black, &"B1".parse().unwrap()).unwrap());
        assert!(go.success());
        assert_eq!(go.last_error(), None);
    }

    #[test]
    fn quit_closes_the_stream() {
        let mut go = session("=1");

        assert!(!go.get_ref().is_closed());
        assert!(go.quit().unwrap());
        assert!(go.get_ref().is_closed());
        assert!(go.is_closed());
    }

    #[test]
    fn commands_after_quit_fail() {
        let mut go = session("=1\n\n=2\n\n");
        go.quit().unwrap();

        assert!(matches!(go.clear_board(), Err(GtpError::SessionClosed)));
        assert!(matches!(go.quit(), Err(GtpError::SessionClosed)));
        assert_eq!(output(&go), "1 quit\n");
    }

    #[test]
    fn returns_data_from_commands() {
        let mut go = session("=1 2.0");

        assert_eq!(go.protocol_version().unwrap().as_deref(), Some("2.0"));
        assert!(go.success());
    }

    #[test]
    fn rejected_data_commands_return_nothing() {
        let mut go = session("?1 no moves");

        assert_eq!(go.last_move().unwrap(), None);
        assert_eq!(go.last_error(), Some("no moves"));
    }

    #[test]
    fn boolean_operations_report_success() {
        let mut go = session("=1\n\n?2 unacceptable size\n\n");

        assert_eq!(go.boardsize(9).unwrap(), go.success());
        assert!(go.success());

        let accepted = go.execute("boardsize?", &["100"]).unwrap();
        assert_eq!(accepted, Value::Bool(go.success()));
        assert!(!go.success());
    }

    #[test]
    fn vertex_lists() {
        let mut go = session("=1 A1 B2");

        assert_eq!(
            go.fixed_handicap(2).unwrap(),
            Some(vec![Vertex::new("A1"), Vertex::new("B2")])
        );
    }

    #[test]
    fn colors() {
        let mut go = session("=1 black\n\n=2 white\n\n=3 empty");

        assert_eq!(go.color(&Vertex::new("A1")).unwrap(), Some(Black));
        assert_eq!(go.color(&Vertex::new("B1")).unwrap(), Some(White));
        assert_eq!(go.color(&Vertex::new("C1")).unwrap(), None);
    }

    #[test]
    fn booleans() {
        let mut go = session("=1 1\n\n=2 0");

        assert!(go.is_legal(Black, &Vertex::new("A1")).unwrap());
        assert!(!go.is_legal(Black, &Vertex::new("B1")).unwrap());
        assert_eq!(output(&go), "1 is_legal black A1\n2 is_legal black B1\n");
    }

    #[test]
    fn last_move() {
        let mut go = session("=1 white A1");

        assert_eq!(
            go.last_move().unwrap(),
            Some(Move::new(White, Vertex::new("A1")))
        );
    }

    #[test]
    fn malformed_move_is_an_error() {
        let mut go = session("=1 white");

        assert!(matches!(
            go.last_move(),
            Err(GtpError::MalformedResponse(_))
        ));
    }

    #[test]
    fn move_history_replaces_local_history() {
        let mut go = session("=1\nwhite A1\nblack B1");

        let expected = vec![
            Move::new(White, Vertex::new("A1")),
            Move::new(Black, Vertex::new("B1")),
        ];
        assert_eq!(go.move_history().unwrap(), Some(expected.clone()));
        assert_eq!(go.history(), expected.as_slice());
    }

    #[test]
    fn board_diagrams() {
        let mut go = session("=1 board");

        assert_eq!(go.showboard().unwrap(), Some(Board::new("board")));
    }

    #[test]
    fn printsgf_keeps_the_first_line() {
        let mut go = session("=1 (;GM[1]\nSZ[9])");

        assert_eq!(go.printsgf(None).unwrap().as_deref(), Some("(;GM[1]"));
    }

    #[test]
    fn dual_interface() {
        let mut go = session("=1 board\n\n=2");

        assert_eq!(go.printsgf(None).unwrap().as_deref(), Some("board"));
        assert!(go.printsgf_query(Some("/path/to/file")).unwrap());
        assert_eq!(output(&go), "1 printsgf\n2 printsgf /path/to/file\n");
    }

    #[test]
    fn direct_and_query_forms_agree() {
        let mut go = session("=1 1\n\n=2 1\n\n?3 bad vertex\n\n?4 bad vertex\n\n");
        let vertex = Vertex::new("A1");

        assert_eq!(
            go.is_legal(Black, &vertex).unwrap(),
            go.is_legal_query(Black, &vertex).unwrap()
        );
        assert_eq!(
            go.is_legal(Black, &vertex).unwrap(),
            go.is_legal_query(Black, &vertex).unwrap()
        );
    }

    #[test]
    fn boolean_queries_return_the_answer() {
        let mut go = session("=1 1\n\n=2 0\n\n=3 0\n\n?4 bad vertex\n\n=5 maybe\n\n");
        let vertex = Vertex::new("A1");

        assert!(go.is_legal_query(Black, &vertex).unwrap());
        assert!(!go.is_legal_query(Black, &vertex).unwrap());
        assert_eq!(
            go.execute("is_legal?", &["black", "A1"]).unwrap(),
            Value::Bool(false)
        );
        assert!(go.success());

        assert!(!go.known_command_query("fly").unwrap());
        assert!(!go.success());

        assert!(matches!(
            go.is_legal_query(Black, &vertex),
            Err(GtpError::MalformedResponse(_))
        ));
    }

    #[test]
    fn line_lists() {
        let mut go = session("=1 help\nknown_command");

        assert_eq!(
            go.help().unwrap(),
            Some(vec!["help".to_owned(), "known_command".to_owned()])
        );
    }

    #[test]
    fn captures() {
        let mut go = session("=1 3");

        assert_eq!(go.captures(White).unwrap(), Some(3));
    }

    #[test]
    fn genmove_records_the_move() {
        let mut go = session("=1 D4\n\n=2 PASS\n\n");

        assert_eq!(
            go.genmove(Black).unwrap(),
            Some(Point::Vertex(Vertex::new("D4")))
        );
        assert_eq!(go.genmove(White).unwrap(), Some(Point::Pass));
        assert_eq!(
            go.history(),
            &[
                Move::new(Black, Vertex::new("D4")),
                Move {
                    color: Some(White),
                    point: Point::Pass,
                },
            ]
        );
    }

    #[test]
    fn undo_and_clear_board_update_history() {
        let mut go = session("=1\n\n=2\n\n=3\n\n=4\n\n");

        go.play(Black, &"D4".parse().unwrap()).unwrap();
        go.play(White, &"Q16".parse().unwrap()).unwrap();
        go.undo().unwrap();
        assert_eq!(go.history(), &[Move::new(Black, Vertex::new("D4"))]);

        go.clear_board().unwrap();
        assert!(go.history().is_empty());
    }

    #[test]
    fn resignation_is_game_over() {
        let mut go = session("=1 black RESIGN");

        assert!(go.is_over().unwrap());
    }

    #[test]
    fn double_pass_is_game_over() {
        let mut go = session("=1 black PASS\nwhite PASS");

        assert!(go.is_over().unwrap());
    }

    #[test]
    fn engine_players_are_read_leniently() {
        let mut go = session("=1 Black D4\nWhite PASS\nB pass");

        assert!(go.is_over().unwrap());
        assert_eq!(go.history()[1], Move::new(White, Point::Pass));
    }

    #[test]
    fn other_histories_are_not_game_over() {
        let mut go = session("=1 black E4\nwhite PASS");

        assert!(!go.is_over().unwrap());
    }

    #[test]
    fn replay() {
        let mut go = session("=1\n\n=2\n\n=3\n\n=4 black E6");

        assert!(go.replay(["E4", "E5", "E6"]).unwrap());
        assert_eq!(
            go.last_move().unwrap(),
            Some(Move::new(Black, Vertex::new("E6")))
        );
        assert_eq!(
            output(&go),
            "1 play black E4\n2 play white E5\n3 play black E6\n4 last_move\n"
        );
        assert_eq!(go.history().len(), 3);
        assert_eq!(go.history()[1], Move::new(White, Vertex::new("E5")));
    }

    #[test]
    fn replay_stops_at_the_first_rejected_move() {
        let mut go = session("=1\n\n?2 illegal move\n\n");

        assert!(!go.replay(["E4", "E4", "E6"]).unwrap());
        assert_eq!(go.last_error(), Some("illegal move"));
        assert_eq!(output(&go), "1 play black E4\n2 play white E4\n");
        assert_eq!(go.history(), &[Move::new(Black, Vertex::new("E4"))]);
    }

    #[test]
    fn mismatched_ids_desynchronize_the_session() {
        let mut go = session("=2\n\n=2\n\n");

        assert!(matches!(
            go.clear_board(),
            Err(GtpError::ProtocolDesync {
                expected: 1,
                received: 2
            })
        ));
        assert!(matches!(
            go.clear_board(),
            Err(GtpError::ProtocolDesync { .. })
        ));
        assert_eq!(output(&go), "1 clear_board\n");
    }

    #[test]
    fn malformed_status_lines_fail_the_command() {
        let mut go = session("=1\n\nnonsense\n\n");

        go.clear_board().unwrap();
        assert!(matches!(
            go.clear_board(),
            Err(GtpError::MalformedResponse(_))
        ));
        assert!(!go.success());
    }

    #[test]
    fn mismatched_ids_fail_the_command() {
        let mut go = session("=1\n\n=7\n\n");

        assert!(go.clear_board().unwrap());
        assert!(go.success());

        assert!(matches!(
            go.clear_board(),
            Err(GtpError::ProtocolDesync {
                expected: 2,
                received: 7
            })
        ));
        assert!(!go.success());
        assert_eq!(go.last_error(), None);
    }

    #[test]
    fn eof_fails_the_command() {
        let mut go = session("?1 illegal move\n\n=2\n\n");

        assert!(!go.play(Black, &"A1".parse().unwrap()).unwrap());
        assert!(go.clear_board().unwrap());
        assert!(go.success());

        assert!(matches!(go.clear_board(), Err(GtpError::UnexpectedEof)));
        assert!(!go.success());
        assert_eq!(go.last_error(), None);
    }

    #[test]
    fn write_errors_fail_the_command() {
        let stream = IoStream::new(Cursor::new(b"=1\n\n".to_vec()), ClosesAfter(1));
        let mut go = Session::new(stream);

        assert!(go.clear_board().unwrap());
        assert!(go.success());

        assert!(matches!(go.clear_board(), Err(GtpError::Io(_))));
        assert!(!go.success());
    }

    #[test]
    fn eof_is_a_transport_error() {
        let mut go = session("");

        assert!(matches!(go.clear_board(), Err(GtpError::UnexpectedEof)));
    }

    #[test]
    fn execute_checks_operations_and_arguments() {
        let mut go = session("=1 2\n\n=2\n\n");

        assert!(matches!(
            go.execute("fly", &[]),
            Err(GtpError::UnknownOperation(_))
        ));
        assert!(matches!(
            go.execute("play", &["black"]),
            Err(GtpError::InvalidArguments { given: 1, .. })
        ));
        assert!(output(&go).is_empty());

        assert_eq!(
            go.execute("protocol_version", &[]).unwrap(),
            Value::Text("2".to_owned())
        );
        assert_eq!(go.execute("quit", &[]).unwrap(), Value::Bool(true));
        assert!(go.is_closed());
    }
}
