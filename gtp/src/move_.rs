use std::fmt;
use std::str::FromStr;

use crate::color::Color;
use crate::error::GtpError;

/// A board coordinate such as "D4". Opaque beyond being a single token.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Vertex(String);

impl Vertex {
    pub fn new(value: &str) -> Self {
        Self(value.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Vertex {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Where a move went: a vertex, or one of the two non-placing moves.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Point {
    Vertex(Vertex),
    Pass,
    Resign,
}

impl Point {
    pub fn is_pass(&self) -> bool {
        matches!(self, Point::Pass)
    }

    pub fn is_resign(&self) -> bool {
        matches!(self, Point::Resign)
    }
}

impl FromStr for Point {
    type Err = GtpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();

        if token.is_empty() || token.contains(char::is_whitespace) {
            return Err(GtpError::MalformedResponse(format!("invalid point: {s:?}")));
        }

        Ok(if token.eq_ignore_ascii_case("pass") {
            Point::Pass
        } else if token.eq_ignore_ascii_case("resign") {
            Point::Resign
        } else {
            Point::Vertex(Vertex::new(token))
        })
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Point::Vertex(vertex) => write!(f, "{vertex}"),
            Point::Pass => f.write_str("PASS"),
            Point::Resign => f.write_str("RESIGN"),
        }
    }
}

impl From<Vertex> for Point {
    fn from(vertex: Vertex) -> Self {
        Point::Vertex(vertex)
    }
}

/// A move as engines report it. The player is `None` when the color token
/// isn't one the engine is expected to send; the point still counts.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Move {
    pub color: Option<Color>,
    pub point: Point,
}

impl Move {
    pub fn new(color: Color, point: impl Into<Point>) -> Self {
        Self {
            color: Some(color),
            point: point.into(),
        }
    }
}

impl FromStr for Move {
    type Err = GtpError;

    /// Parses "<color> <point>", e.g. "white A1" or "black PASS".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GtpError::MalformedResponse(format!("invalid move: {s:?}"));

        let mut parts = s.split_whitespace();
        let (color, point) = match (parts.next(), parts.next()) {
            (Some(color), Some(point)) => (color, point),
            _ => return Err(invalid()),
        };

        Ok(Self {
            color: Color::from_player(color),
            point: point.parse()?,
        })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.color {
            Some(color) => write!(f, "{color} {}", self.point),
            None => write!(f, "empty {}", self.point),
        }
    }
}

/// A game is over once the latest move is a resignation, or the latest two
/// moves are both passes. `history` runs oldest to newest.
pub fn is_game_over(history: &[Move]) -> bool {
    match history {
        [.., last] if last.point.is_resign() => true,
        [.., previous, last] => previous.point.is_pass() && last.point.is_pass(),
        _ => false,
    }
}
