//! Reading source port - abstraction for obtaining captures
//!
//! This trait allows the application to calibrate without knowing whether
//! the readings were hardcoded, typed on the command line or saved to a file.

use alloc::string::String;

use crate::domain::{CalibrationError, ReadingSet};

/// Error type for reading sources
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Captures could not be paired
    #[error(transparent)]
    Invalid(#[from] CalibrationError),
    /// Source could not be read
    #[error("failed to read {origin}: {message}")]
    Unreadable { origin: String, message: String },
    /// Source was read but is not a reading set
    #[error("malformed readings in {origin}: {message}")]
    Malformed { origin: String, message: String },
}

/// Port for obtaining a high/low capture
///
/// # Example Implementation
///
/// ```ignore
/// struct SerialCapture {
///     port: Box<dyn serialport::SerialPort>,
/// }
///
/// impl ReadingSource for SerialCapture {
///     fn load(&mut self) -> Result<ReadingSet, SourceError> {
///         let highs = self.read_raw_dump()?;
///         let lows = self.read_raw_dump()?;
///         Ok(ReadingSet::new(highs, lows)?)
///     }
///
///     fn describe(&self) -> &str { "serial" }
/// }
/// ```
pub trait ReadingSource {
    /// Produce the validated reading set
    fn load(&mut self) -> Result<ReadingSet, SourceError>;

    /// Short name of the source, for logs and error messages
    fn describe(&self) -> &str;
}

/// A reading set already in memory
impl ReadingSource for ReadingSet {
    fn load(&mut self) -> Result<ReadingSet, SourceError> {
        Ok(self.clone())
    }

    fn describe(&self) -> &str {
        "inline"
    }
}
