//! Output port - abstraction for delivering the calibration line

use alloc::string::String;

/// Error type for output operations
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// Failed to write the line
    #[error("failed to write output: {0}")]
    WriteFailed(String),
}

/// Port for emitting the single result line
///
/// Implementations append the line terminator themselves; `line` never
/// contains one.
pub trait OutputPort {
    /// Emit one line
    fn emit(&mut self, line: &str) -> Result<(), OutputError>;
}

impl OutputPort for String {
    fn emit(&mut self, line: &str) -> Result<(), OutputError> {
        self.push_str(line);
        self.push('\n');
        Ok(())
    }
}
