//! Domain layer - pure calibration logic independent of infrastructure
//!
//! This module contains the reading entity, the midpoint calculation and
//! the rendering of its result.

pub mod calibration;
pub mod format;
pub mod reading;

pub use calibration::{compute_midpoints, truncate, CalibrationError, InputFault, MidpointCalibration};
pub use format::{format_midpoints, render, OutputFormat};
pub use reading::{PegId, ReadingSet};
