//! Adapters - concrete implementations of ports
//!
//! Adapters connect the domain to the outside world by implementing
//! the port traits.
//!
//! # Available Adapters
//!
//! - **preset**: the hardcoded bench captures
//! - **file_source**: TOML readings file (std)
//! - **writer_output**: any `std::io::Write`, usually stdout (std)

pub mod preset;

#[cfg(feature = "std")]
pub mod file_source;
#[cfg(feature = "std")]
pub mod writer_output;

pub use preset::{Preset, PresetSource};

#[cfg(feature = "std")]
pub use file_source::FileSource;
#[cfg(feature = "std")]
pub use writer_output::WriterOutput;
