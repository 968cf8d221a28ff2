use std::io::{self, Write};

use serde_json::json;
use tracing::error;

use gtp::{GtpError, LineStream, Session, Value};

use crate::args::ReplayConfig;
use crate::engine::EngineProcess;
use crate::game::{configure, to_json};

pub fn run_replay(config: ReplayConfig) -> bool {
    let engine = match EngineProcess::spawn(&config.engine.engine) {
        Ok(engine) => engine,
        Err(err) => {
            error!(error = %err, "Could not start the engine.");
            return false;
        }
    };

    let stdout = io::stdout();
    let mut output = stdout.lock();
    let (_, result) = Session::run(engine, |go| replay(go, &config, &mut output));

    match result {
        Ok(succeeded) => succeeded,
        Err(err) => {
            error!(error = %err, "Engine session failed.");
            false
        }
    }
}

fn replay<S: LineStream>(
    go: &mut Session<S>,
    config: &ReplayConfig,
    output: &mut impl Write,
) -> Result<bool, GtpError> {
    if !configure(go, &config.engine.game)? {
        return Ok(false);
    }

    let replayed = go.replay(&config.moves)?;
    if !replayed {
        error!(
            moves_played = go.history().len(),
            message = ?go.last_error(),
            "Engine rejected a move."
        );
    }

    let last_move = go.last_move()?;
    let board = go.showboard()?;
    let over = go.is_over()?;

    if config.engine.json {
        let report = json!({
            "replayed": replayed,
            "last_move": last_move.map(|m| m.to_string()),
            "board": board.map(|b| to_json(&Value::Board(b))),
            "over": over,
        });
        writeln!(output, "{report}")?;
    } else {
        if let Some(last_move) = last_move {
            writeln!(output, "Last move: {last_move}")?;
        }
        if let Some(board) = board {
            writeln!(output, "{board}")?;
        }
        if over {
            writeln!(output, "The game is over.")?;
        }
    }

    Ok(replayed)
}
