use std::fmt;

use crate::board::Board;
use crate::color::Color;
use crate::error::GtpError;
use crate::move_::{Move, Point, Vertex};
use crate::operation::Decoder;

/// A decoded response body.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    None,
    Bool(bool),
    Text(String),
    Integer(i64),
    Point(Point),
    Vertices(Vec<Vertex>),
    Lines(Vec<String>),
    Color(Option<Color>),
    Move(Move),
    Moves(Vec<Move>),
    Board(Board),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn into_point(self) -> Option<Point> {
        match self {
            Value::Point(point) => Some(point),
            _ => None,
        }
    }

    pub fn into_vertices(self) -> Option<Vec<Vertex>> {
        match self {
            Value::Vertices(vertices) => Some(vertices),
            _ => None,
        }
    }

    pub fn into_lines(self) -> Option<Vec<String>> {
        match self {
            Value::Lines(lines) => Some(lines),
            _ => None,
        }
    }

    /// `None` for an empty point as well as for a rejected command.
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Value::Color(color) => *color,
            _ => None,
        }
    }

    pub fn into_move(self) -> Option<Move> {
        match self {
            Value::Move(m) => Some(m),
            _ => None,
        }
    }

    pub fn into_moves(self) -> Option<Vec<Move>> {
        match self {
            Value::Moves(moves) => Some(moves),
            _ => None,
        }
    }

    pub fn into_board(self) -> Option<Board> {
        match self {
            Value::Board(board) => Some(board),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn joined<T: fmt::Display>(
            f: &mut fmt::Formatter<'_>,
            items: &[T],
            separator: &str,
        ) -> fmt::Result {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(separator)?;
                }
                write!(f, "{item}")?;
            }
            Ok(())
        }

        match self {
            Value::None => Ok(()),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Text(text) => f.write_str(text),
            Value::Integer(value) => write!(f, "{value}"),
            Value::Point(point) => write!(f, "{point}"),
            Value::Vertices(vertices) => joined(f, vertices, " "),
            Value::Lines(lines) => joined(f, lines, "\n"),
            Value::Color(Some(color)) => write!(f, "{color}"),
            Value::Color(None) => f.write_str("empty"),
            Value::Move(m) => write!(f, "{m}"),
            Value::Moves(moves) => joined(f, moves, "\n"),
            Value::Board(board) => write!(f, "{board}"),
        }
    }
}

/// The value reported in place of a body when the engine rejects a command.
pub fn absent(decoder: Decoder) -> Value {
    match decoder {
        Decoder::Status | Decoder::Boolean => Value::Bool(false),
        _ => Value::None,
    }
}

/// Decodes the body of a successful response.
pub fn decode(decoder: Decoder, body: &str) -> Result<Value, GtpError> {
    Ok(match decoder {
        Decoder::Status => Value::Bool(true),
        Decoder::Boolean => Value::Bool(boolean(body)?),
        Decoder::Scalar => Value::Text(scalar(body)),
        Decoder::Integer => Value::Integer(integer(body)?),
        Decoder::Point => Value::Point(body.parse()?),
        Decoder::VertexList => Value::Vertices(body.split_whitespace().map(Vertex::new).collect()),
        Decoder::LineList => Value::Lines(line_list(body)),
        Decoder::Color => Value::Color(body.split_whitespace().next().and_then(Color::from_token)),
        Decoder::Move => Value::Move(body.parse()?),
        Decoder::MoveHistory => Value::Moves(move_history(body)?),
        Decoder::Board => Value::Board(Board::new(body)),
    })
}

fn boolean(body: &str) -> Result<bool, GtpError> {
    match body.trim() {
        "1" => Ok(true),
        "0" => Ok(false),
        other => Err(GtpError::MalformedResponse(format!(
            "expected 1 or 0, got {other:?}"
        ))),
    }
}

fn scalar(body: &str) -> String {
    body.trim().lines().next().unwrap_or_default().trim().to_owned()
}

fn integer(body: &str) -> Result<i64, GtpError> {
    let token = body.split_whitespace().next().unwrap_or_default();
    token
        .parse()
        .map_err(|_| GtpError::MalformedResponse(format!("expected an integer, got {token:?}")))
}

fn line_list(body: &str) -> Vec<String> {
    // The first list item may start on the line after the status marker.
    let body = body.strip_prefix('\n').unwrap_or(body);
    if body.is_empty() {
        return Vec::new();
    }

    body.lines().map(str::to_owned).collect()
}

fn move_history(body: &str) -> Result<Vec<Move>, GtpError> {
    body.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::parse)
        .collect()
}
