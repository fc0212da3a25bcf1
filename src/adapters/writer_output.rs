//! Output adapter for any `std::io::Write` sink

use std::io::Write;

use crate::ports::output::{OutputError, OutputPort};

/// Writes each line followed by `\n`, flushing after every line
pub struct WriterOutput<W: Write> {
    writer: W,
}

impl<W: Write> WriterOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Get the underlying writer back
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterOutput<std::io::Stdout> {
    /// Output to the process's stdout
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> OutputPort for WriterOutput<W> {
    fn emit(&mut self, line: &str) -> Result<(), OutputError> {
        writeln!(self.writer, "{}", line)
            .and_then(|_| self.writer.flush())
            .map_err(|e| OutputError::WriteFailed(e.to_string()))
    }
}
