//! Rendering of midpoints for the operator
//!
//! The calibration result ends up pasted into a device call by hand, so
//! every format produces a single line.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::calibration::truncate;
use crate::feature_protocol::{swizzle_hex, threshold_from_midpoint, PegThresholds, ReportError};

/// How the midpoint line is rendered
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputFormat {
    /// Truncated integers, e.g. `198,169,166`
    #[default]
    Decimal,
    /// Little-endian hex byte pairs, e.g. `c6 00,a9 00`
    Hex,
    /// Browser console call that writes the `peg_thresholds` feature
    Console,
}

impl OutputFormat {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Decimal => "decimal",
            OutputFormat::Hex => "hex",
            OutputFormat::Console => "console",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "decimal" | "dec" | "int" => Ok(OutputFormat::Decimal),
            "hex" | "le" => Ok(OutputFormat::Hex),
            "console" | "js" => Ok(OutputFormat::Console),
            other => Err(format!(
                "unknown format '{}'. Valid formats: decimal, hex, console",
                other
            )),
        }
    }
}

/// Join the truncated midpoints with `separator`.
///
/// Each value is truncated toward zero before printing, so `198.6` is
/// written as `198`.
pub fn format_midpoints(mids: &[f64], separator: &str) -> String {
    mids.iter()
        .map(|&mid| truncate(mid).to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Render midpoints in the requested format.
///
/// `Decimal` never fails. `Hex` needs every value to fit a `u16`, and
/// `Console` additionally needs exactly one value per peg.
pub fn render(mids: &[f64], format: OutputFormat, separator: &str) -> Result<String, ReportError> {
    match format {
        OutputFormat::Decimal => Ok(format_midpoints(mids, separator)),
        OutputFormat::Hex => {
            let pairs = mids
                .iter()
                .enumerate()
                .map(|(peg, &mid)| threshold_from_midpoint(peg, mid).map(swizzle_hex))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(pairs.join(separator))
        }
        OutputFormat::Console => {
            let thresholds = PegThresholds::from_midpoints(mids)?;
            let values = thresholds
                .values()
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(",");
            Ok(format!(
                "await device.set_feature('peg_thresholds', [{}]);",
                values
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calibration::compute_midpoints;

    const CAPTURE_1_HIGHS: [f64; 6] = [833.0, 712.0, 700.0, 677.0, 674.0, 569.0];
    const CAPTURE_1_LOWS: [f64; 6] = [40.0, 34.0, 33.0, 34.0, 37.0, 32.0];

    #[test]
    fn test_comma_separated() {
        let mids = compute_midpoints(&CAPTURE_1_HIGHS, &CAPTURE_1_LOWS).unwrap();
        assert_eq!(format_midpoints(&mids, ","), "198,169,166,162,164,139");
    }

    #[test]
    fn test_space_separated_capture_2() {
        let mids = compute_midpoints(
            &[837.0, 702.0, 708.0, 693.0, 679.0, 582.0],
            &[37.0, 33.0, 32.0, 33.0, 36.0, 30.0],
        )
        .unwrap();
        assert_eq!(format_midpoints(&mids, " "), "197 166 167 165 164 140");
    }

    #[test]
    fn test_single_value_has_no_separator() {
        assert_eq!(format_midpoints(&[198.6], ","), "198");
    }

    #[test]
    fn test_arbitrary_separator() {
        assert_eq!(format_midpoints(&[1.2, 2.9, 3.0], " | "), "1 | 2 | 3");
    }

    #[test]
    fn test_hex_swizzles_bytes() {
        let line = render(&[198.6, 300.0], OutputFormat::Hex, ",").unwrap();
        assert_eq!(line, "c6 00,2c 01");
    }

    #[test]
    fn test_hex_rejects_negative() {
        let err = render(&[10.0, -1.5], OutputFormat::Hex, ",").unwrap_err();
        assert!(matches!(err, ReportError::ThresholdOutOfRange { peg: 1, .. }));
    }

    #[test]
    fn test_console_snippet() {
        let mids = compute_midpoints(&CAPTURE_1_HIGHS, &CAPTURE_1_LOWS).unwrap();
        let line = render(&mids, OutputFormat::Console, " ").unwrap();
        assert_eq!(
            line,
            "await device.set_feature('peg_thresholds', [198,169,166,162,164,139]);"
        );
    }

    #[test]
    fn test_console_needs_every_peg() {
        let err = render(&[1.0, 2.0], OutputFormat::Console, ",").unwrap_err();
        assert_eq!(err, ReportError::PegCountMismatch { expected: 6, actual: 2 });
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("hex".parse::<OutputFormat>(), Ok(OutputFormat::Hex));
        assert_eq!("Decimal".parse::<OutputFormat>(), Ok(OutputFormat::Decimal));
        assert_eq!("js".parse::<OutputFormat>(), Ok(OutputFormat::Console));
        assert!("csv".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default().as_str(), "decimal");
    }
}
