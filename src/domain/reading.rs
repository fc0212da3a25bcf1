//! Peg reading domain entity
//!
//! This module defines the high/low capture for a bank of pegs.
//! It has no knowledge of where readings come from or how results are shown.

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::domain::calibration::{CalibrationError, InputFault};

/// A pair of captures from the domain perspective.
///
/// `highs[i]` and `lows[i]` are the raw readings of peg `i` in the two
/// reference states (uncovered and covered). Construction validates the
/// pairing, so a `ReadingSet` is always usable by the calibration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawReadingSet")]
pub struct ReadingSet {
    highs: Vec<f64>,
    lows: Vec<f64>,
}

#[derive(Deserialize)]
struct RawReadingSet {
    highs: Vec<f64>,
    lows: Vec<f64>,
}

impl TryFrom<RawReadingSet> for ReadingSet {
    type Error = CalibrationError;

    fn try_from(raw: RawReadingSet) -> Result<Self, Self::Error> {
        Self::new(raw.highs, raw.lows)
    }
}

impl ReadingSet {
    /// Create a reading set, checking that both captures line up
    pub fn new(highs: Vec<f64>, lows: Vec<f64>) -> Result<Self, CalibrationError> {
        validate(&highs, &lows)?;
        Ok(Self { highs, lows })
    }

    /// Create a reading set from raw ADC counts
    pub fn from_counts(highs: &[u16], lows: &[u16]) -> Result<Self, CalibrationError> {
        Self::new(
            highs.iter().map(|&v| f64::from(v)).collect(),
            lows.iter().map(|&v| f64::from(v)).collect(),
        )
    }

    /// Readings with the pegs uncovered
    pub fn highs(&self) -> &[f64] {
        &self.highs
    }

    /// Readings with the pegs covered
    pub fn lows(&self) -> &[f64] {
        &self.lows
    }

    /// Number of pegs in the set
    pub fn len(&self) -> usize {
        self.highs.len()
    }

    /// Always false for a constructed set
    pub fn is_empty(&self) -> bool {
        self.highs.is_empty()
    }

    /// Iterate `(peg, high, low)` triples
    pub fn pegs(&self) -> impl Iterator<Item = (PegId, f64, f64)> + '_ {
        self.highs
            .iter()
            .zip(self.lows.iter())
            .enumerate()
            .map(|(i, (&h, &l))| (PegId::from_index(i), h, l))
    }
}

/// Check the pairing invariants shared by `ReadingSet` and the calibration.
pub(crate) fn validate(highs: &[f64], lows: &[f64]) -> Result<(), CalibrationError> {
    if highs.is_empty() || lows.is_empty() {
        return Err(CalibrationError::InvalidInput(InputFault::Empty));
    }
    if highs.len() != lows.len() {
        return Err(CalibrationError::InvalidInput(InputFault::LengthMismatch {
            highs: highs.len(),
            lows: lows.len(),
        }));
    }
    if let Some(index) = highs
        .iter()
        .zip(lows.iter())
        .position(|(h, l)| !h.is_finite() || !l.is_finite())
    {
        return Err(CalibrationError::InvalidInput(InputFault::NonFinite { index }));
    }
    Ok(())
}

/// Peg identifier
///
/// Uses a single byte, matching the firmware's `uint8_t` peg numbering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PegId(pub u8);

impl PegId {
    pub const PEG_1: PegId = PegId(0);
    pub const PEG_2: PegId = PegId(1);
    pub const PEG_3: PegId = PegId(2);
    pub const PEG_4: PegId = PegId(3);
    pub const PEG_5: PegId = PegId(4);
    pub const PEG_6: PegId = PegId(5);

    /// Placeholder for positions past the last byte-sized id
    pub const UNKNOWN: PegId = PegId(u8::MAX);

    /// Create a new peg ID from a raw value
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Peg at position `index`, or `UNKNOWN` when it does not fit a byte
    pub fn from_index(index: usize) -> Self {
        u8::try_from(index).map(PegId).unwrap_or(Self::UNKNOWN)
    }

    /// Get the firmware name of this peg
    pub const fn as_str(&self) -> &'static str {
        match self.0 {
            0 => "peg1",
            1 => "peg2",
            2 => "peg3",
            3 => "peg4",
            4 => "peg5",
            5 => "peg6",
            _ => "unknown",
        }
    }

    /// Get the raw ID value
    pub const fn value(&self) -> u8 {
        self.0
    }
}
