//! Hardcoded capture adapter
//!
//! Two bench captures taken with the `toggle_raw` dump: one with all pegs
//! uncovered (highs) and one with all pegs covered (lows).

use core::str::FromStr;

use alloc::format;
use alloc::string::String;

use serde::{Deserialize, Serialize};

use crate::domain::ReadingSet;
use crate::feature_protocol::PEG_COUNT;
use crate::ports::source::{ReadingSource, SourceError};

/// Known captures
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Preset {
    /// First bench capture, printed comma separated
    #[default]
    #[serde(rename = "capture-1")]
    Capture1,
    /// Second bench capture, printed space separated
    #[serde(rename = "capture-2")]
    Capture2,
}

impl Preset {
    /// Every preset, in declaration order
    pub const ALL: [Preset; 2] = [Preset::Capture1, Preset::Capture2];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Preset::Capture1 => "capture-1",
            Preset::Capture2 => "capture-2",
        }
    }

    /// Readings with the pegs uncovered
    pub const fn highs(&self) -> [u16; PEG_COUNT] {
        match self {
            Preset::Capture1 => [833, 712, 700, 677, 674, 569],
            Preset::Capture2 => [837, 702, 708, 693, 679, 582],
        }
    }

    /// Readings with the pegs covered
    pub const fn lows(&self) -> [u16; PEG_COUNT] {
        match self {
            Preset::Capture1 => [40, 34, 33, 34, 37, 32],
            Preset::Capture2 => [37, 33, 32, 33, 36, 30],
        }
    }

    /// Separator the capture was originally printed with
    pub const fn separator(&self) -> &'static str {
        match self {
            Preset::Capture1 => ",",
            Preset::Capture2 => " ",
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown preset '{}'. Valid presets: capture-1, capture-2", s))
    }
}

/// Reading source backed by a preset
#[derive(Clone, Copy, Debug, Default)]
pub struct PresetSource {
    preset: Preset,
}

impl PresetSource {
    pub const fn new(preset: Preset) -> Self {
        Self { preset }
    }

    pub const fn preset(&self) -> Preset {
        self.preset
    }
}

impl ReadingSource for PresetSource {
    fn load(&mut self) -> Result<ReadingSet, SourceError> {
        tracing::trace!(preset = self.preset.as_str(), "loading preset capture");
        Ok(ReadingSet::from_counts(&self.preset.highs(), &self.preset.lows())?)
    }

    fn describe(&self) -> &str {
        self.preset.as_str()
    }
}
