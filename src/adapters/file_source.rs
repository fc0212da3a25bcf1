//! TOML readings file adapter
//!
//! ```toml
//! highs = [833, 712, 700, 677, 674, 569]
//! lows = [40, 34, 33, 34, 37, 32]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::ReadingSet;
use crate::ports::source::{ReadingSource, SourceError};

/// On-disk layout, paired up by `ReadingSet::new` after parsing
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ReadingsFile {
    highs: Vec<f64>,
    lows: Vec<f64>,
}

/// Reading source backed by a TOML file
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
    origin: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let origin = path.display().to_string();
        Self { path, origin }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReadingSource for FileSource {
    fn load(&mut self) -> Result<ReadingSet, SourceError> {
        tracing::debug!(path = %self.origin, "reading capture file");

        let text = std::fs::read_to_string(&self.path).map_err(|e| SourceError::Unreadable {
            origin: self.origin.clone(),
            message: e.to_string(),
        })?;

        let file = toml::from_str::<ReadingsFile>(&text).map_err(|e| SourceError::Malformed {
            origin: self.origin.clone(),
            message: e.message().to_string(),
        })?;

        Ok(ReadingSet::new(file.highs, file.lows)?)
    }

    fn describe(&self) -> &str {
        &self.origin
    }
}
