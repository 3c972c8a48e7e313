//! Command-line arguments for `resp-chart`.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use resp_cli::config::ConfigOverrides;
use resp_cli::pipeline::SourcePaths;
use resp_model::{EmptyValueMode, SeedMode};

#[derive(Parser)]
#[command(
    name = "resp-chart",
    version,
    about = "Weekly variant and severity charts from respiratory surveillance tables",
    long_about = "Aligns weekly variant proportions with hospital, ICU and death counts\n\
                  for one region and emits the chart as a render-ready JSON payload."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the regions present in either table.
    Regions(RegionsArgs),

    /// Build the chart payload for one region.
    Chart(ChartArgs),

    /// Draw a color assignment without loading any data.
    Palette(PaletteArgs),

    /// Print the effective configuration as TOML.
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct SourceArgs {
    /// Folder holding the cached source tables.
    #[arg(long = "data-dir", value_name = "DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Variants table (default: <DATA_DIR>/variants.csv).
    #[arg(long = "variants", value_name = "PATH")]
    pub variants: Option<PathBuf>,

    /// Severity table (default: <DATA_DIR>/nonSentinelSeverity.csv).
    #[arg(long = "severity", value_name = "PATH")]
    pub severity: Option<PathBuf>,
}

impl SourceArgs {
    pub fn paths(&self) -> SourcePaths {
        let defaults = SourcePaths::in_dir(&self.data_dir);
        SourcePaths {
            variants: self.variants.clone().unwrap_or(defaults.variants),
            severity: self.severity.clone().unwrap_or(defaults.severity),
        }
    }
}

#[derive(Args)]
pub struct OverrideArgs {
    /// TOML configuration file.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Fixed seed for variant colors (0 to 9223372036854775807).
    #[arg(
        long = "seed",
        value_name = "SEED",
        conflicts_with = "unseeded",
        value_parser = clap::value_parser!(u64).range(..=i64::MAX as u64)
    )]
    pub seed: Option<u64>,

    /// Draw variant colors from OS entropy (colors change between runs).
    #[arg(long = "unseeded")]
    pub unseeded: bool,

    /// Minimum RGB distance between any two variant colors.
    #[arg(long = "min-distance", value_name = "D")]
    pub min_distance: Option<f64>,

    /// Candidate draws before the palette is reported exhausted.
    #[arg(long = "max-attempts", value_name = "N")]
    pub max_attempts: Option<usize>,

    /// Drop weeks before this date (YYYY-MM-DD).
    #[arg(long = "epoch", value_name = "DATE")]
    pub epoch: Option<NaiveDate>,

    /// Annotate variant peaks strictly above this percentage.
    #[arg(long = "peak-threshold", value_name = "PCT")]
    pub peak_threshold: Option<f64>,

    /// Read empty value cells as 0 instead of failing.
    #[arg(long = "lenient-values")]
    pub lenient_values: bool,
}

impl OverrideArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        let seed = if self.unseeded {
            Some(SeedMode::Entropy)
        } else {
            self.seed.map(SeedMode::Fixed)
        };
        ConfigOverrides {
            seed,
            min_distance: self.min_distance,
            max_attempts: self.max_attempts,
            epoch: self.epoch,
            peak_threshold: self.peak_threshold,
            empty_values: self.lenient_values.then_some(EmptyValueMode::Lenient),
        }
    }
}

#[derive(Args)]
pub struct RegionsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Read empty value cells as 0 instead of failing.
    #[arg(long = "lenient-values")]
    pub lenient_values: bool,
}

#[derive(Args)]
pub struct ChartArgs {
    /// Region name as it appears in the tables (e.g. Greece).
    #[arg(value_name = "REGION")]
    pub region: String,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub overrides: OverrideArgs,

    /// Write the JSON payload here instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also write the aligned weekly tables as CSV into this folder.
    #[arg(long = "export-dir", value_name = "DIR")]
    pub export_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct PaletteArgs {
    /// Number of colors to draw.
    #[arg(value_name = "COUNT")]
    pub count: usize,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub overrides: OverrideArgs,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn chart_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "resp-chart",
            "chart",
            "Greece",
            "--seed",
            "5",
            "--epoch",
            "2021-01-01",
            "--lenient-values",
        ])
        .unwrap();
        let Command::Chart(args) = cli.command else {
            panic!("expected chart command");
        };
        assert_eq!(args.region, "Greece");
        let overrides = args.overrides.overrides();
        assert_eq!(overrides.seed, Some(SeedMode::Fixed(5)));
        assert_eq!(overrides.epoch, NaiveDate::from_ymd_opt(2021, 1, 1));
        assert_eq!(overrides.empty_values, Some(EmptyValueMode::Lenient));
        assert_eq!(overrides.min_distance, None);
    }

    #[test]
    fn seed_and_unseeded_conflict() {
        assert!(
            Cli::try_parse_from(["resp-chart", "palette", "5", "--seed", "1", "--unseeded"])
                .is_err()
        );
    }

    #[test]
    fn seed_must_fit_in_a_config_file() {
        assert!(
            Cli::try_parse_from(["resp-chart", "config", "--seed", "18446744073709551615"])
                .is_err()
        );
        let cli =
            Cli::try_parse_from(["resp-chart", "config", "--seed", "9223372036854775807"]).unwrap();
        let Command::Config(args) = cli.command else {
            panic!("expected config command");
        };
        assert_eq!(
            args.overrides.overrides().seed,
            Some(SeedMode::Fixed(i64::MAX as u64))
        );
    }

    #[test]
    fn source_paths_default_to_data_dir() {
        let cli = Cli::try_parse_from([
            "resp-chart",
            "regions",
            "--data-dir",
            "cache",
            "--severity",
            "other.csv",
        ])
        .unwrap();
        let Command::Regions(args) = cli.command else {
            panic!("expected regions command");
        };
        let paths = args.source.paths();
        assert_eq!(paths.variants, PathBuf::from("cache").join("variants.csv"));
        assert_eq!(paths.severity, PathBuf::from("other.csv"));
    }
}
