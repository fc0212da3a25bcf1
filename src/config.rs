//! Configuration for the host tool
//!
//! Settings are layered: command-line flags win over the config file, and
//! the config file wins over the defaults carried by the chosen preset.
//!
//! ```toml
//! preset = "capture-2"
//! separator = ";"
//! format = "hex"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::adapters::{FileSource, Preset, PresetSource};
use crate::domain::{OutputFormat, ReadingSet};
use crate::error::{PeggyError, Result};
use crate::ports::ReadingSource;

/// Contents of a configuration file. Every key is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalibrationConfig {
    pub preset: Option<Preset>,
    pub separator: Option<String>,
    pub format: Option<OutputFormat>,
}

impl CalibrationConfig {
    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| PeggyError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| PeggyError::ConfigParse {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })
    }
}

/// Values given on the command line
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub preset: Option<Preset>,
    pub highs: Option<Vec<f64>>,
    pub lows: Option<Vec<f64>>,
    pub readings: Option<PathBuf>,
    pub separator: Option<String>,
    pub format: Option<OutputFormat>,
}

/// Where the captures come from
#[derive(Clone, Debug, PartialEq)]
pub enum ReadingsChoice {
    Preset(Preset),
    Inline(ReadingSet),
    File(PathBuf),
}

impl ReadingsChoice {
    /// Build the reading source for this choice
    pub fn source(&self) -> Box<dyn ReadingSource> {
        match self {
            ReadingsChoice::Preset(preset) => Box::new(PresetSource::new(*preset)),
            ReadingsChoice::Inline(set) => Box::new(set.clone()),
            ReadingsChoice::File(path) => Box::new(FileSource::new(path.clone())),
        }
    }
}

/// Fully resolved settings for one run
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub readings: ReadingsChoice,
    pub separator: String,
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        let preset = Preset::default();
        Self {
            readings: ReadingsChoice::Preset(preset),
            separator: preset.separator().to_string(),
            format: OutputFormat::default(),
        }
    }
}

impl Settings {
    /// Settings for a preset with its own separator
    pub fn for_preset(preset: Preset) -> Self {
        Self {
            readings: ReadingsChoice::Preset(preset),
            separator: preset.separator().to_string(),
            format: OutputFormat::default(),
        }
    }

    /// Merge command-line overrides over an optional config file
    pub fn resolve(overrides: Overrides, config: Option<CalibrationConfig>) -> Result<Self> {
        let config = config.unwrap_or_default();
        let preset = overrides.preset.or(config.preset).unwrap_or_default();

        let inline = match (overrides.highs, overrides.lows) {
            (Some(highs), Some(lows)) => Some(ReadingSet::new(highs, lows)?),
            (None, None) => None,
            _ => {
                return Err(PeggyError::Usage(
                    "--highs and --lows must be given together".to_string(),
                ))
            }
        };

        let readings = match (inline, overrides.readings) {
            (Some(_), Some(_)) => {
                return Err(PeggyError::Usage(
                    "use either --highs/--lows or --readings, not both".to_string(),
                ))
            }
            (Some(set), None) => ReadingsChoice::Inline(set),
            (None, Some(path)) => ReadingsChoice::File(path),
            (None, None) => ReadingsChoice::Preset(preset),
        };

        let separator = overrides
            .separator
            .or(config.separator)
            .unwrap_or_else(|| preset.separator().to_string());

        let format = overrides.format.or(config.format).unwrap_or_default();

        Ok(Self {
            readings,
            separator,
            format,
        })
    }
}
