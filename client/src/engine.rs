use std::io::{self, BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use tracing::{debug, trace, warn};

use gtp::LineStream;

/// An engine running as a child process, spoken to over its stdin and stdout.
pub struct EngineProcess {
    child: Child,
    stdin: Option<ChildStdin>,
    stdout: BufReader<ChildStdout>,
}

impl EngineProcess {
    pub fn spawn(command_line: &str) -> io::Result<Self> {
        let mut parts = command_line.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty engine command"))?;

        debug!(program, "Spawning engine.");

        let mut child = Command::new(program)
            .args(parts)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;

        let missing = || io::Error::new(io::ErrorKind::Other, "engine pipes unavailable");
        let stdin = child.stdin.take().ok_or_else(missing)?;
        let stdout = child.stdout.take().ok_or_else(missing)?;

        Ok(Self {
            child,
            stdin: Some(stdin),
            stdout: BufReader::new(stdout),
        })
    }
}

impl LineStream for EngineProcess {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "engine stdin is closed"))?;

        trace!(line = line.trim_end(), "Writing to engine.");
        stdin.write_all(line.as_bytes())?;
        stdin.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.stdout.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn close(&mut self) -> io::Result<()> {
        // Dropping stdin signals end of input to engines that ignore quit.
        if self.stdin.take().is_some() {
            let status = self.child.wait()?;
            if !status.success() {
                warn!(%status, "Engine exited unsuccessfully.");
            }
        }
        Ok(())
    }
}
