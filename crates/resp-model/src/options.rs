//! Configuration for the chart pipeline.
//!
//! Every field has a default matching the reference deployment, so an empty
//! TOML file (or none at all) yields a working configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// First week with reliable combined variant and severity reporting.
pub const DEFAULT_EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(2020, 8, 20) {
    Some(date) => date,
    None => panic!("invalid default epoch"),
};

/// Seed used by the reference deployment for reproducible variant colors.
pub const DEFAULT_COLOR_SEED: u64 = 1123;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub selection: SourceSelection,
    pub ingest: IngestConfig,
    pub alignment: AlignmentOptions,
    pub palette: PaletteOptions,
    pub chart: ChartOptions,
}

/// Which pathogen, indicators and strata to keep from the raw tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSelection {
    pub pathogen: String,
    /// Indicator holding variant proportions in the variants table.
    pub variant_indicator: String,
    /// Severity indicators, in bar order.
    pub severity_indicators: Vec<String>,
    /// Age band kept from the severity table; `None` keeps all bands.
    pub severity_stratum: Option<String>,
}

impl Default for SourceSelection {
    fn default() -> Self {
        Self {
            pathogen: "SARS-CoV-2".to_string(),
            variant_indicator: "proportion".to_string(),
            severity_indicators: vec![
                "hospitaladmissions".to_string(),
                "ICUadmissions".to_string(),
                "deaths".to_string(),
            ],
            severity_stratum: Some("total".to_string()),
        }
    }
}

/// How empty `value` cells are treated during ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyValueMode {
    /// An empty value is a fatal ingestion error.
    #[default]
    Strict,
    /// An empty value reads as `0.0`.
    Lenient,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub empty_values: EmptyValueMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentOptions {
    /// Rows dated before this are dropped from both series.
    pub epoch: NaiveDate,
}

impl Default for AlignmentOptions {
    fn default() -> Self {
        Self {
            epoch: DEFAULT_EPOCH,
        }
    }
}

/// Source of randomness for color assignment.
///
/// There is no implicit choice: callers pick reproducible or non-reproducible
/// colors explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedMode {
    /// Same seed and count always yield the same colors.
    Fixed(u64),
    /// Fresh OS entropy on every call.
    Entropy,
}

impl SeedMode {
    pub fn seed(self) -> Option<u64> {
        match self {
            Self::Fixed(seed) => Some(seed),
            Self::Entropy => None,
        }
    }
}

impl From<Option<u64>> for SeedMode {
    fn from(seed: Option<u64>) -> Self {
        seed.map_or(Self::Entropy, Self::Fixed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteOptions {
    /// Accepted colors must be strictly farther apart than this (RGB units).
    pub min_distance: f64,
    /// Colors with luminance above this are rejected.
    pub brightness_threshold: f64,
    /// Candidate draws before giving up with "palette exhausted".
    pub max_attempts: usize,
    pub seed: SeedMode,
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self {
            min_distance: 0.2,
            brightness_threshold: 0.7,
            max_attempts: 10_000,
            seed: SeedMode::Fixed(DEFAULT_COLOR_SEED),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    /// A variant peaking strictly above this gets a text annotation.
    pub peak_threshold: f64,
    /// Legend entries per row before wrapping.
    pub legend_max_columns: usize,
    /// Label every n-th date on the x axis.
    pub tick_stride: usize,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            peak_threshold: 40.0,
            legend_max_columns: 9,
            tick_stride: 2,
        }
    }
}
