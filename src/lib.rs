//! Peg Threshold Calibration Library
//!
//! This library computes the detection threshold of each peg on the box
//! from two raw captures: one with every peg uncovered (highs) and one with
//! every peg covered (lows).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                                 │
//! │  - ReadingSet entity                                             │
//! │  - MidpointCalibration service                                   │
//! │  - Output formats (decimal, hex, console)                        │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Ports (Traits)                               │
//! │  - ReadingSource: obtain a capture                               │
//! │  - OutputPort: deliver the result line                           │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Adapters                                     │
//! │  - PresetSource: hardcoded bench captures                        │
//! │  - FileSource: TOML readings file (std)                          │
//! │  - WriterOutput: stdout or any io::Write (std)                   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Without the `std` feature the domain, ports, preset adapter and the
//! feature report layout build for `no_std + alloc`, so firmware can share
//! them.
//!
//! # Example
//!
//! ```
//! use peggy::domain::{compute_midpoints, format_midpoints};
//!
//! let mids = compute_midpoints(&[833.0, 712.0], &[40.0, 34.0]).unwrap();
//! assert_eq!(format_midpoints(&mids, ","), "198,169");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

// ============================================================================
// Protocol (shared between host and device)
// ============================================================================

pub mod feature_protocol;

pub use feature_protocol::{
    swizzle_hex, PegThresholds, ReportError, PEG_COUNT, PEG_THRESHOLDS_REPORT_ID,
    PEG_THRESHOLDS_REPORT_SIZE,
};

// ============================================================================
// Hexagonal Architecture
// ============================================================================

/// Domain layer - pure calibration logic
pub mod domain;

/// Ports - traits defining boundaries
pub mod ports;

/// Adapters - concrete implementations
pub mod adapters;

pub use domain::{
    compute_midpoints, format_midpoints, CalibrationError, MidpointCalibration, OutputFormat,
    PegId, ReadingSet,
};
pub use ports::{OutputPort, ReadingSource};
pub use adapters::{Preset, PresetSource};

// ============================================================================
// Host application (std only)
// ============================================================================

#[cfg(feature = "std")]
pub mod app;
#[cfg(feature = "std")]
pub mod config;
#[cfg(feature = "std")]
pub mod error;

#[cfg(feature = "std")]
pub use adapters::{FileSource, WriterOutput};
#[cfg(feature = "std")]
pub use error::{PeggyError, Result};
