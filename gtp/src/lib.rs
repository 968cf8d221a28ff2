pub use self::board::Board;
pub use self::color::Color;
pub use self::command::Command;
pub use self::decode::{absent, decode, Value};
pub use self::error::GtpError;
pub use self::move_::{is_game_over, Move, Point, Vertex};
pub use self::operation::{lookup, Arity, Decoder, Form, Operation, OPERATIONS};
pub use self::response::{read_response, Response, Status};
pub use self::session::Session;
pub use self::stream::{IoStream, LineStream};

mod board;
mod color;
mod command;
mod decode;
mod error;
mod move_;
mod operation;
mod response;
mod session;
mod stream;
