//! Ports (interfaces) defining the boundaries of the application
//!
//! Ports are traits that define how the domain interacts with the outside.
//! They keep the calibration independent of where readings come from and
//! where the result goes.
//!
//! - **ReadingSource**: how we obtain a capture (preset, command line, file)
//! - **OutputPort**: how we deliver the result line (stdout, buffer)

pub mod output;
pub mod source;

pub use output::{OutputError, OutputPort};
pub use source::{ReadingSource, SourceError};
