use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
    Between(usize, usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
            Arity::Between(min, max) => (min..=max).contains(&count),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "{n}"),
            Arity::AtLeast(n) => write!(f, "{n} or more"),
            Arity::Between(min, max) => write!(f, "{min} to {max}"),
        }
    }
}

/// How a response body is turned into a value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Decoder {
    /// No meaningful body. The value is the success flag itself.
    Status,
    Boolean,
    Scalar,
    Integer,
    Point,
    VertexList,
    LineList,
    Color,
    Move,
    MoveHistory,
    Board,
}

/// Which result the caller wants back from an operation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Form {
    Direct,
    Query,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Operation {
    pub name: &'static str,
    pub wire: &'static str,
    pub arity: Arity,
    pub decoder: Decoder,
}

macro_rules! operations {
    ($($constant:ident => $name:literal, $arity:expr, $decoder:ident;)*) => {
        $(
            pub const $constant: Operation = Operation {
                name: $name,
                wire: $name,
                arity: $arity,
                decoder: Decoder::$decoder,
            };
        )*

        pub static OPERATIONS: &[Operation] = &[$($constant),*];
    };
}

use Arity::*;

operations! {
    PROTOCOL_VERSION => "protocol_version", Exactly(0), Scalar;
    NAME => "name", Exactly(0), Scalar;
    VERSION => "version", Exactly(0), Scalar;
    KNOWN_COMMAND => "known_command", Exactly(1), Boolean;
    LIST_COMMANDS => "list_commands", Exactly(0), LineList;
    HELP => "help", Exactly(0), LineList;
    QUIT => "quit", Exactly(0), Status;
    BOARDSIZE => "boardsize", Exactly(1), Status;
    CLEAR_BOARD => "clear_board", Exactly(0), Status;
    KOMI => "komi", Exactly(1), Status;
    FIXED_HANDICAP => "fixed_handicap", Exactly(1), VertexList;
    PLACE_FREE_HANDICAP => "place_free_handicap", Exactly(1), VertexList;
    SET_FREE_HANDICAP => "set_free_handicap", AtLeast(2), Status;
    PLAY => "play", Exactly(2), Status;
    GENMOVE => "genmove", Exactly(1), Point;
    REG_GENMOVE => "reg_genmove", Exactly(1), Point;
    UNDO => "undo", Exactly(0), Status;
    TIME_SETTINGS => "time_settings", Exactly(3), Status;
    TIME_LEFT => "time_left", Exactly(3), Status;
    FINAL_SCORE => "final_score", Exactly(0), Scalar;
    FINAL_STATUS_LIST => "final_status_list", Exactly(1), VertexList;
    LOADSGF => "loadsgf", Between(1, 2), Scalar;
    PRINTSGF => "printsgf", Between(0, 1), Scalar;
    SHOWBOARD => "showboard", Exactly(0), Board;
    IS_LEGAL => "is_legal", Exactly(2), Boolean;
    COLOR => "color", Exactly(1), Color;
    CAPTURES => "captures", Exactly(1), Integer;
    LAST_MOVE => "last_move", Exactly(0), Move;
    MOVE_HISTORY => "move_history", Exactly(0), MoveHistory;
}

/// Finds an operation by name. A trailing `?` selects the query form.
pub fn lookup(name: &str) -> Option<(&'static Operation, Form)> {
    let (name, form) = match name.strip_suffix('?') {
        Some(name) => (name, Form::Query),
        None => (name, Form::Direct),
    };

    OPERATIONS
        .iter()
        .find(|operation| operation.name == name)
        .map(|operation| (operation, form))
}
