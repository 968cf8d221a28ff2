use std::error::Error;
use std::fmt;
use std::io::Error as IoError;

use crate::operation::Arity;

#[derive(Debug)]
pub enum GtpError {
    Io(IoError),
    UnexpectedEof,
    /// The response carried a different sequence id than the command that was sent.
    /// The session can't be trusted after this.
    ProtocolDesync {
        expected: u32,
        received: u32,
    },
    MalformedResponse(String),
    SessionClosed,
    UnknownOperation(String),
    InvalidArguments {
        operation: &'static str,
        arity: Arity,
        given: usize,
    },
}

impl fmt::Display for GtpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GtpError::Io(error) => write!(f, "i/o error: {error}"),
            GtpError::UnexpectedEof => f.write_str("stream ended before a response was read"),
            GtpError::ProtocolDesync { expected, received } => write!(
                f,
                "protocol desync: expected response {expected}, received {received}"
            ),
            GtpError::MalformedResponse(reason) => write!(f, "malformed response: {reason}"),
            GtpError::SessionClosed => f.write_str("session is closed"),
            GtpError::UnknownOperation(name) => write!(f, "unknown operation: {name}"),
            GtpError::InvalidArguments {
                operation,
                arity,
                given,
            } => write!(
                f,
                "{operation} takes {arity} argument(s), {given} given"
            ),
        }
    }
}

impl Error for GtpError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GtpError::Io(error) => Some(error),
            _ => None,
        }
    }
}

impl From<IoError> for GtpError {
    fn from(error: IoError) -> Self {
        GtpError::Io(error)
    }
}
