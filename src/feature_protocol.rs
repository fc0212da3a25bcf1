//! Shared HID feature report layout for the peg box
//!
//! This module defines the report the host writes to calibrate the pegs.
//! The firmware declares it as a vendor feature report with byte-sized
//! fields, so each `u16` threshold travels little-endian.
//!
//! | Report | Kind    | Bytes | Meaning                        |
//! |--------|---------|-------|--------------------------------|
//! | 71     | feature | 12    | `peg_thresholds`: 6 x `u16` LE |

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::domain::calibration::truncate;

/// Number of pegs on the box
pub const PEG_COUNT: usize = 6;

/// Report ID of the `peg_thresholds` feature report
pub const PEG_THRESHOLDS_REPORT_ID: u8 = 71;

/// Size of the `peg_thresholds` feature report payload
pub const PEG_THRESHOLDS_REPORT_SIZE: usize = PEG_COUNT * 2;

/// Error type for building or decoding feature reports
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportError {
    /// The report carries one threshold per peg
    #[error("expected {expected} peg thresholds, got {actual}")]
    PegCountMismatch { expected: usize, actual: usize },
    /// Threshold does not fit the firmware's 16-bit field
    #[error("threshold for peg {peg} is {value}, outside 0..=65535")]
    ThresholdOutOfRange { peg: usize, value: i64 },
    /// Payload has the wrong size
    #[error("payload is {actual} bytes, expected {expected}")]
    PayloadLength { expected: usize, actual: usize },
}

/// Convert a midpoint to the firmware's `u16` threshold (truncating).
pub fn threshold_from_midpoint(peg: usize, mid: f64) -> Result<u16, ReportError> {
    let value = truncate(mid);
    u16::try_from(value).map_err(|_| ReportError::ThresholdOutOfRange { peg, value })
}

/// Hex rendering of a threshold with its bytes in wire order.
///
/// `0x00c6` becomes `"c6 00"`: the low byte first, as it appears in the
/// feature report.
pub fn swizzle_hex(value: u16) -> String {
    let hex = format!("{:04x}", value);
    format!("{} {}", &hex[2..4], &hex[0..2])
}

/// Peg thresholds as stored by the firmware
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPegThresholds")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PegThresholds {
    values: heapless::Vec<u16, PEG_COUNT>,
}

#[derive(Deserialize)]
struct RawPegThresholds {
    values: Vec<u16>,
}

impl TryFrom<RawPegThresholds> for PegThresholds {
    type Error = ReportError;

    fn try_from(raw: RawPegThresholds) -> Result<Self, Self::Error> {
        Self::new(&raw.values)
    }
}

impl PegThresholds {
    /// Create thresholds from exactly `PEG_COUNT` values
    pub fn new(values: &[u16]) -> Result<Self, ReportError> {
        let values = heapless::Vec::from_slice(values).map_err(|_| {
            ReportError::PegCountMismatch {
                expected: PEG_COUNT,
                actual: values.len(),
            }
        })?;
        if values.len() != PEG_COUNT {
            return Err(ReportError::PegCountMismatch {
                expected: PEG_COUNT,
                actual: values.len(),
            });
        }
        Ok(Self { values })
    }

    /// Truncate computed midpoints into thresholds
    pub fn from_midpoints(mids: &[f64]) -> Result<Self, ReportError> {
        if mids.len() != PEG_COUNT {
            return Err(ReportError::PegCountMismatch {
                expected: PEG_COUNT,
                actual: mids.len(),
            });
        }

        let mut values = heapless::Vec::new();
        for (peg, &mid) in mids.iter().enumerate() {
            // Length already checked, push cannot overflow
            let _ = values.push(threshold_from_midpoint(peg, mid)?);
        }
        Ok(Self { values })
    }

    /// Thresholds in peg order
    pub fn values(&self) -> &[u16] {
        &self.values
    }

    /// Encode as the `peg_thresholds` feature payload (report ID excluded)
    pub fn to_report_payload(&self) -> heapless::Vec<u8, PEG_THRESHOLDS_REPORT_SIZE> {
        let mut payload = heapless::Vec::new();
        for value in &self.values {
            let _ = payload.extend_from_slice(&value.to_le_bytes());
        }
        payload
    }

    /// Decode a `peg_thresholds` feature payload
    pub fn from_report_payload(payload: &[u8]) -> Result<Self, ReportError> {
        if payload.len() != PEG_THRESHOLDS_REPORT_SIZE {
            return Err(ReportError::PayloadLength {
                expected: PEG_THRESHOLDS_REPORT_SIZE,
                actual: payload.len(),
            });
        }

        let mut values = heapless::Vec::new();
        for pair in payload.chunks_exact(2) {
            let _ = values.push(u16::from_le_bytes([pair[0], pair[1]]));
        }
        Ok(Self { values })
    }
}
