//! Calibration run: load readings, compute midpoints, emit one line

use tracing::{debug, info, instrument};

use crate::config::Settings;
use crate::domain::{render, truncate, MidpointCalibration};
use crate::error::Result;
use crate::ports::OutputPort;

/// Run one calibration and write the result line to `output`.
///
/// Nothing is written when any step fails. Returns the emitted line.
#[instrument(skip_all, fields(format = settings.format.as_str()))]
pub fn run(settings: &Settings, output: &mut dyn OutputPort) -> Result<String> {
    let mut source = settings.readings.source();
    let readings = source.load()?;
    info!(source = source.describe(), pegs = readings.len(), "loaded readings");

    let mids = MidpointCalibration::PEGGY_DEFAULT.apply(&readings);
    for ((peg, high, low), mid) in readings.pegs().zip(mids.iter()) {
        debug!(peg = peg.as_str(), high, low, mid, threshold = truncate(*mid), "midpoint");
    }

    let line = render(&mids, settings.format, &settings.separator)?;
    output.emit(&line)?;
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{Preset, WriterOutput};
    use crate::config::ReadingsChoice;
    use crate::domain::{CalibrationError, InputFault, OutputFormat, ReadingSet};
    use crate::error::PeggyError;
    use crate::ports::SourceError;
    use std::io::Write;

    #[test]
    fn test_default_run_prints_first_capture() {
        let mut out = WriterOutput::new(Vec::new());
        let line = run(&Settings::default(), &mut out).unwrap();
        assert_eq!(line, "198,169,166,162,164,139");
        assert_eq!(out.into_inner(), b"198,169,166,162,164,139\n");
    }

    #[test]
    fn test_second_capture_space_separated() {
        let mut out = String::new();
        run(&Settings::for_preset(Preset::Capture2), &mut out).unwrap();
        assert_eq!(out, "197 166 167 165 164 140\n");
    }

    #[test]
    fn test_mismatched_file_emits_nothing() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "highs = [833, 712]\nlows = [40]").unwrap();
        let settings = Settings {
            readings: ReadingsChoice::File(file.path().to_path_buf()),
            ..Settings::default()
        };

        let mut out = String::new();
        let err = run(&settings, &mut out).unwrap_err();
        assert!(matches!(
            err,
            PeggyError::Source(SourceError::Invalid(CalibrationError::InvalidInput(
                InputFault::LengthMismatch { highs: 2, lows: 1 }
            )))
        ));
        assert!(err.is_invalid_input());
        assert!(out.is_empty());
    }

    #[test]
    fn test_hex_from_inline_readings() {
        let settings = Settings {
            readings: ReadingsChoice::Inline(ReadingSet::new(vec![833.0], vec![40.0]).unwrap()),
            separator: " ".into(),
            format: OutputFormat::Hex,
        };
        let mut out = String::new();
        assert_eq!(run(&settings, &mut out).unwrap(), "c6 00");
    }

    #[test]
    fn test_console_rejects_partial_bank() {
        let settings = Settings {
            readings: ReadingsChoice::Inline(ReadingSet::new(vec![833.0], vec![40.0]).unwrap()),
            separator: ",".into(),
            format: OutputFormat::Console,
        };
        let mut out = String::new();
        assert!(matches!(run(&settings, &mut out), Err(PeggyError::Report(_))));
        assert!(out.is_empty());
    }
}
