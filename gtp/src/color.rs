use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn other(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Reads a stone color as the engine reports it. Anything but the exact
    /// lowercase words "black" and "white" is an empty point.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "black" => Some(Color::Black),
            "white" => Some(Color::White),
            _ => None,
        }
    }

    /// Reads a player the way engines accept one in commands and move records:
    /// any case, and "b"/"w" for short.
    pub fn from_player(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "b" | "black" => Some(Color::Black),
            "w" | "white" => Some(Color::White),
            _ => None,
        }
    }
}

impl FromStr for Color {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or("invalid color value")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::Black => "black",
            Color::White => "white",
        })
    }
}
