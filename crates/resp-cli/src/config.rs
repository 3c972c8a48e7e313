//! Chart configuration: optional TOML file, then command-line overrides.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use tracing::{debug, info};

use resp_model::{ChartConfig, EmptyValueMode, SeedMode};

/// Read `path` as TOML, or return the defaults when no path is given.
///
/// Unlike a settings file, an explicitly requested config that is missing or
/// malformed is an error.
pub fn load_config(path: Option<&Path>) -> Result<ChartConfig> {
    let Some(path) = path else {
        debug!("no config file, using defaults");
        return Ok(ChartConfig::default());
    };
    let content =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let config = parse_config(&content).with_context(|| format!("parse config {}", path.display()))?;
    info!(path = %path.display(), "config loaded");
    Ok(config)
}

pub fn parse_config(content: &str) -> Result<ChartConfig> {
    Ok(toml::from_str(content)?)
}

/// Effective configuration rendered back as TOML.
///
/// TOML integers are signed 64-bit, so a fixed seed above `i64::MAX` could be
/// written but never read back.
pub fn render_config(config: &ChartConfig) -> Result<String> {
    if let SeedMode::Fixed(seed) = config.palette.seed
        && i64::try_from(seed).is_err()
    {
        bail!("seed {seed} does not fit in a TOML integer (max {})", i64::MAX);
    }
    toml::to_string_pretty(config).context("serialize config")
}

/// Values given on the command line; `None` keeps the file or default value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub seed: Option<SeedMode>,
    pub min_distance: Option<f64>,
    pub max_attempts: Option<usize>,
    pub epoch: Option<NaiveDate>,
    pub peak_threshold: Option<f64>,
    pub empty_values: Option<EmptyValueMode>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut ChartConfig) {
        if let Some(seed) = self.seed {
            config.palette.seed = seed;
        }
        if let Some(min_distance) = self.min_distance {
            config.palette.min_distance = min_distance;
        }
        if let Some(max_attempts) = self.max_attempts {
            config.palette.max_attempts = max_attempts;
        }
        if let Some(epoch) = self.epoch {
            config.alignment.epoch = epoch;
        }
        if let Some(threshold) = self.peak_threshold {
            config.chart.peak_threshold = threshold;
        }
        if let Some(mode) = self.empty_values {
            config.ingest.empty_values = mode;
        }
    }
}

/// Load the file (if any) and apply overrides on top.
pub fn resolve_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<ChartConfig> {
    let mut config = load_config(path)?;
    overrides.apply(&mut config);
    Ok(config)
}
