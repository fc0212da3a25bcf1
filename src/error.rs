//! Application error type for the host tool

use std::path::PathBuf;

use crate::domain::CalibrationError;
use crate::feature_protocol::ReportError;
use crate::ports::{OutputError, SourceError};

/// Result type alias for host operations
pub type Result<T> = std::result::Result<T, PeggyError>;

/// Errors surfaced by the calibration tool. All of them are fatal.
#[derive(Debug, thiserror::Error)]
pub enum PeggyError {
    /// Readings could not be paired
    #[error("{0}\n  → Give the same number of high and low readings, one per peg")]
    Calibration(#[from] CalibrationError),

    /// Reading source failed
    #[error("{0}")]
    Source(#[from] SourceError),

    /// Thresholds do not fit the device report
    #[error("{0}\n  → The decimal format prints any midpoint; hex and console need device-sized thresholds")]
    Report(#[from] ReportError),

    /// Output could not be written
    #[error("{0}")]
    Output(#[from] OutputError),

    /// Configuration file not found or unreadable
    #[error("Configuration file {path} could not be read: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file has invalid syntax or values
    #[error("Invalid configuration in {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Command-line arguments are inconsistent
    #[error("{0}")]
    Usage(String),
}

impl PeggyError {
    /// Stable code for the error category
    pub fn code(&self) -> &'static str {
        match self {
            Self::Calibration(_) => "E001",
            Self::Source(_) => "E010",
            Self::Report(_) => "E020",
            Self::Output(_) => "E030",
            Self::ConfigRead { .. } => "E040",
            Self::ConfigParse { .. } => "E041",
            Self::Usage(_) => "E050",
        }
    }

    /// True when the bad input came from the operator
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::Calibration(CalibrationError::InvalidInput(_))
                | Self::Source(SourceError::Invalid(_))
                | Self::Usage(_)
        )
    }
}
