use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::error::GtpError;
use crate::stream::LineStream;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    Success,
    Failure,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Response {
    pub id: u32,
    pub status: Status,
    pub body: String,
}

impl Response {
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    /// Parses a complete response block, status line first.
    pub fn parse(lines: &[String]) -> Result<Self, GtpError> {
        let first = lines
            .first()
            .ok_or_else(|| GtpError::MalformedResponse("empty response".to_owned()))?;

        let c = STATUS_LINE
            .captures(first)
            .ok_or_else(|| GtpError::MalformedResponse(first.clone()))?;

        let status = match c.name("status").map(|s| s.as_str()) {
            Some("=") => Status::Success,
            _ => Status::Failure,
        };

        let id = c
            .name("id")
            .and_then(|id| id.as_str().parse::<u32>().ok())
            .ok_or_else(|| GtpError::MalformedResponse(first.clone()))?;

        let mut body = c.name("body").map_or("", |b| b.as_str()).to_owned();
        for line in &lines[1..] {
            body.push('\n');
            body.push_str(line);
        }
        body.truncate(body.trim_end_matches(['\n', '\r']).len());

        Ok(Self { id, status, body })
    }
}

/// Reads one response block: every line up to the blank-line terminator.
/// End of stream also ends a block once it has started.
pub fn read_response<S: LineStream + ?Sized>(stream: &mut S) -> Result<Response, GtpError> {
    let mut lines = Vec::new();

    while let Some(line) = stream.read_line()? {
        trace!(?line, "Read response line.");

        if line.trim().is_empty() {
            if lines.is_empty() {
                continue;
            }
            break;
        }

        lines.push(line);
    }

    if lines.is_empty() {
        return Err(GtpError::UnexpectedEof);
    }

    Response::parse(&lines)
}

static STATUS_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<status>[=?])(?P<id>\d+)(?:[ \t]+(?P<body>.*))?$").unwrap());
