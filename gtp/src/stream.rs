use std::io::{self, BufRead, Write};

/// A bidirectional line channel to an engine.
pub trait LineStream {
    /// Writes `line` exactly as given. Callers include the terminator.
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Reads the next line without its terminator, or `None` at end of stream.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    fn close(&mut self) -> io::Result<()>;
}

/// Adapts any buffered reader and writer pair, e.g. a child process's pipes or
/// in-memory buffers.
#[derive(Debug)]
pub struct IoStream<R, W> {
    reader: R,
    writer: W,
    closed: bool,
}

impl<R: BufRead, W: Write> IoStream<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            closed: false,
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<R: BufRead, W: Write> LineStream for IoStream<R, W> {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        if self.closed {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "write to a closed stream",
            ));
        }

        self.writer.write_all(line.as_bytes())?;
        self.writer.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }

        Ok(Some(line))
    }

    fn close(&mut self) -> io::Result<()> {
        if !self.closed {
            self.writer.flush()?;
            self.closed = true;
        }
        Ok(())
    }
}
