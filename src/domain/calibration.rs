//! Peg threshold calibration domain service
//!
//! This module computes the detection threshold of each peg from the two
//! reference captures.

use alloc::vec::Vec;

use crate::domain::reading::{self, ReadingSet};

/// Error type for calibration input
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// The captures cannot be paired peg by peg
    #[error("invalid input: {0}")]
    InvalidInput(InputFault),
}

/// What made a capture pair unusable
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputFault {
    /// One or both captures hold no readings
    #[error("no readings")]
    Empty,
    /// The captures cover a different number of pegs
    #[error("{highs} high readings but {lows} low readings")]
    LengthMismatch { highs: usize, lows: usize },
    /// A reading is NaN or infinite
    #[error("reading {index} is not a finite number")]
    NonFinite { index: usize },
}

/// Midpoint calibration parameters
///
/// Places the threshold between the high and low reading, weighted toward
/// the low one:
/// `mid = (high + low_weight * low) / (low_weight + 1)`
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MidpointCalibration {
    /// Weight of the low (covered) reading
    pub low_weight: f64,
    /// Divisor, always `low_weight + 1`
    pub divisor: f64,
}

impl MidpointCalibration {
    /// Weight of the low reading used by the peg firmware
    pub const LOW_WEIGHT: f64 = 4.0;

    /// Divisor matching `LOW_WEIGHT`
    pub const DIVISOR: f64 = 5.0;

    /// 1:4 weighting toward the covered reading
    ///
    /// The threshold sits one fifth of the way up from the low reading.
    pub const PEGGY_DEFAULT: Self = Self {
        low_weight: Self::LOW_WEIGHT,
        divisor: Self::DIVISOR,
    };

    /// Create a calibration with a custom low weight
    ///
    /// Returns `None` unless `low_weight > -1`, where the divisor would
    /// reach zero or flip the sign of the midpoint.
    pub fn new(low_weight: f64) -> Option<Self> {
        if !low_weight.is_finite() || low_weight <= -1.0 {
            return None;
        }
        Some(Self {
            low_weight,
            divisor: low_weight + 1.0,
        })
    }

    /// Midpoint of a single peg
    #[inline]
    pub fn midpoint(&self, high: f64, low: f64) -> f64 {
        (high + self.low_weight * low) / self.divisor
    }

    /// Midpoints for every peg of a validated reading set
    pub fn apply(&self, readings: &ReadingSet) -> Vec<f64> {
        let mids: Vec<f64> = readings
            .pegs()
            .map(|(_, high, low)| self.midpoint(high, low))
            .collect();

        tracing::debug!(pegs = mids.len(), "computed midpoints");
        mids
    }

    /// Midpoints for raw slices, validating them first
    pub fn compute(&self, highs: &[f64], lows: &[f64]) -> Result<Vec<f64>, CalibrationError> {
        reading::validate(highs, lows)?;

        let mids: Vec<f64> = highs
            .iter()
            .zip(lows.iter())
            .map(|(&high, &low)| self.midpoint(high, low))
            .collect();

        tracing::debug!(pegs = mids.len(), "computed midpoints");
        Ok(mids)
    }
}

impl Default for MidpointCalibration {
    fn default() -> Self {
        Self::PEGGY_DEFAULT
    }
}

/// Compute `(high + 4 * low) / 5` for every peg.
///
/// Fails with [`CalibrationError::InvalidInput`] when the sequences are
/// empty, differ in length, or contain a non-finite reading.
pub fn compute_midpoints(highs: &[f64], lows: &[f64]) -> Result<Vec<f64>, CalibrationError> {
    MidpointCalibration::PEGGY_DEFAULT.compute(highs, lows)
}

/// Truncate a midpoint toward zero.
///
/// `198.6` becomes `198` and `-3.7` becomes `-3`. Values beyond the `i64`
/// range saturate.
#[inline]
pub fn truncate(mid: f64) -> i64 {
    mid as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use proptest::prelude::*;

    #[test]
    fn test_capture_1_midpoints() {
        let mids = compute_midpoints(
            &[833.0, 712.0, 700.0, 677.0, 674.0, 569.0],
            &[40.0, 34.0, 33.0, 34.0, 37.0, 32.0],
        )
        .unwrap();
        let truncated: Vec<i64> = mids.iter().map(|&m| truncate(m)).collect();
        assert_eq!(truncated, vec![198, 169, 166, 162, 164, 139]);
    }

    #[test]
    fn test_truncates_instead_of_rounding() {
        let mids = compute_midpoints(&[833.0], &[40.0]).unwrap();
        assert!((mids[0] - 198.6).abs() < 1e-9);
        assert_eq!(truncate(mids[0]), 198);
    }

    #[test]
    fn test_truncates_toward_zero_for_negatives() {
        assert_eq!(truncate(-3.7), -3);
        assert_eq!(truncate(-0.2), 0);
    }

    #[test]
    fn test_zero_boundary() {
        assert_eq!(compute_midpoints(&[0.0], &[0.0]).unwrap(), vec![0.0]);
    }

    #[test]
    fn test_mismatched_lengths_are_invalid_input() {
        let err = compute_midpoints(&[1.0, 2.0, 3.0], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            CalibrationError::InvalidInput(InputFault::LengthMismatch { highs: 3, lows: 2 })
        ));
    }

    #[test]
    fn test_empty_is_invalid_input() {
        let err = compute_midpoints(&[], &[]).unwrap_err();
        assert_eq!(err, CalibrationError::InvalidInput(InputFault::Empty));
        assert_eq!(err.to_string(), "invalid input: no readings");
    }

    #[test]
    fn test_custom_weight() {
        let cal = MidpointCalibration::new(1.0).unwrap();
        assert_eq!(cal.divisor, 2.0);
        assert_eq!(cal.midpoint(10.0, 20.0), 15.0);
        assert_eq!(MidpointCalibration::default(), MidpointCalibration::PEGGY_DEFAULT);
    }

    #[test]
    fn test_rejects_weight_with_zero_divisor() {
        assert_eq!(MidpointCalibration::new(-1.0), None);
        assert_eq!(MidpointCalibration::new(-2.5), None);
        assert_eq!(MidpointCalibration::new(f64::NAN), None);
        assert_eq!(MidpointCalibration::new(f64::INFINITY), None);
        assert_eq!(MidpointCalibration::new(4.0), Some(MidpointCalibration::PEGGY_DEFAULT));
    }

    #[test]
    fn test_apply_matches_compute() {
        let set = ReadingSet::from_counts(&[837, 702], &[37, 33]).unwrap();
        let cal = MidpointCalibration::PEGGY_DEFAULT;
        assert_eq!(cal.apply(&set), cal.compute(set.highs(), set.lows()).unwrap());
    }

    fn paired_readings() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
        (1usize..16).prop_flat_map(|n| {
            (
                prop::collection::vec(0.0f64..1.0e6, n),
                prop::collection::vec(0.0f64..1.0e6, n),
            )
        })
    }

    proptest! {
        #[test]
        fn prop_midpoint_times_five_matches_weighted_sum((highs, lows) in paired_readings()) {
            let mids = compute_midpoints(&highs, &lows).unwrap();
            prop_assert_eq!(mids.len(), highs.len());
            for i in 0..mids.len() {
                let expected = highs[i] + 4.0 * lows[i];
                prop_assert!((mids[i] * 5.0 - expected).abs() <= 1e-9 * expected.max(1.0));
            }
        }

        #[test]
        fn prop_compute_is_idempotent((highs, lows) in paired_readings()) {
            let first = compute_midpoints(&highs, &lows).unwrap();
            let second = compute_midpoints(&highs, &lows).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_truncated_never_exceeds_midpoint((highs, lows) in paired_readings()) {
            for mid in compute_midpoints(&highs, &lows).unwrap() {
                let t = truncate(mid) as f64;
                prop_assert!(t <= mid && mid - t < 1.0);
            }
        }
    }
}
