//! End-to-end tests for the chart pipeline.

use std::fs;

use chrono::NaiveDate;
use tempfile::TempDir;

use resp_cli::config::{ConfigOverrides, load_config, resolve_config};
use resp_cli::pipeline::{SourcePaths, load_tables, run_pipeline};
use resp_model::{ChartConfig, EmptyValueMode, SeedMode};

const VARIANTS: &str = "\
countryname,yearweek,pathogen,variant,indicator,value
Greece,2021-W01,SARS-CoV-2,Alpha,proportion,10
Greece,2021-W02,SARS-CoV-2,Alpha,proportion,60
Greece,2021-W03,SARS-CoV-2,Alpha,proportion,55
Greece,2021-W02,SARS-CoV-2,Alpha,detections,999
Italy,2021-W01,SARS-CoV-2,Delta,proportion,30
";

const SEVERITY: &str = "\
countryname,yearweek,pathogen,age,indicator,value
Greece,2021-W01,SARS-CoV-2,total,deaths,1
Greece,2021-W01,SARS-CoV-2,total,ICUadmissions,3
Greece,2021-W01,SARS-CoV-2,total,hospitaladmissions,10
Greece,2021-W02,SARS-CoV-2,total,deaths,2
Greece,2021-W02,SARS-CoV-2,total,ICUadmissions,4
Greece,2021-W02,SARS-CoV-2,total,hospitaladmissions,12
Greece,2021-W03,SARS-CoV-2,total,deaths,1
Greece,2021-W03,SARS-CoV-2,total,ICUadmissions,2
Greece,2021-W03,SARS-CoV-2,total,hospitaladmissions,9
Greece,2021-W03,SARS-CoV-2,65+,deaths,1
";

fn data_dir(variants: &str, severity: &str) -> (TempDir, SourcePaths) {
    let dir = TempDir::new().unwrap();
    let paths = SourcePaths::in_dir(dir.path());
    fs::write(&paths.variants, variants).unwrap();
    fs::write(&paths.severity, severity).unwrap();
    (dir, paths)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn greece_chart_end_to_end() {
    let (_dir, paths) = data_dir(VARIANTS, SEVERITY);
    let config = ChartConfig::default();
    let tables = load_tables(&paths, &config).unwrap();
    let output = run_pipeline(&tables, "Greece", &config).unwrap();

    assert_eq!(
        output.payload.dates,
        vec![date(2021, 1, 4), date(2021, 1, 11), date(2021, 1, 18)]
    );
    assert_eq!(output.colors.len(), 1);
    assert_eq!(output.payload.annotations.len(), 1);
    assert_eq!(output.payload.annotations[0].date, date(2021, 1, 11));
    assert_eq!(output.payload.annotations[0].value, 60.0);
    assert_eq!(
        output.aligned.severity().column("deaths"),
        Some(&[1.0, 2.0, 1.0][..])
    );
}

#[test]
fn fixed_seed_gives_the_same_colors_across_requests() {
    let (_dir, paths) = data_dir(VARIANTS, SEVERITY);
    let config = ChartConfig::default();
    let tables = load_tables(&paths, &config).unwrap();
    let first = run_pipeline(&tables, "Greece", &config).unwrap();
    let second = run_pipeline(&tables, "Greece", &config).unwrap();
    assert_eq!(first.colors, second.colors);
    assert_eq!(first.payload, second.payload);
}

#[test]
fn unknown_region_yields_empty_payload() {
    let (_dir, paths) = data_dir(VARIANTS, SEVERITY);
    let config = ChartConfig::default();
    let tables = load_tables(&paths, &config).unwrap();
    let output = run_pipeline(&tables, "Atlantis", &config).unwrap();

    assert!(output.payload.is_empty());
    assert!(output.payload.lines.is_empty());
    assert!(output.colors.is_empty());
}

#[test]
fn region_without_severity_rows_has_no_dates() {
    let (_dir, paths) = data_dir(VARIANTS, SEVERITY);
    let config = ChartConfig::default();
    let tables = load_tables(&paths, &config).unwrap();
    let output = run_pipeline(&tables, "Italy", &config).unwrap();

    // Italy only reports variants; the severity calendar is authoritative.
    assert!(output.payload.dates.is_empty());
    assert_eq!(output.payload.lines.len(), 1);
    assert!(output.payload.lines[0].values.is_empty());
    assert!(output.payload.annotations.is_empty());
}

#[test]
fn config_file_and_overrides_combine() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chart.toml");
    fs::write(
        &path,
        "[chart]\npeak_threshold = 70.0\n\n[palette]\nseed = { fixed = 7 }\n",
    )
    .unwrap();

    let loaded = load_config(Some(&path)).unwrap();
    assert_eq!(loaded.chart.peak_threshold, 70.0);
    assert_eq!(loaded.palette.seed, SeedMode::Fixed(7));

    let overrides = ConfigOverrides {
        seed: Some(SeedMode::Entropy),
        empty_values: Some(EmptyValueMode::Lenient),
        ..ConfigOverrides::default()
    };
    let resolved = resolve_config(Some(&path), &overrides).unwrap();
    assert_eq!(resolved.chart.peak_threshold, 70.0);
    assert_eq!(resolved.palette.seed, SeedMode::Entropy);
    assert_eq!(resolved.ingest.empty_values, EmptyValueMode::Lenient);
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = load_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(err.to_string().contains("read config"));
}

#[test]
fn raised_threshold_removes_annotation() {
    let (_dir, paths) = data_dir(VARIANTS, SEVERITY);
    let mut config = ChartConfig::default();
    config.chart.peak_threshold = 60.0;
    let tables = load_tables(&paths, &config).unwrap();
    let output = run_pipeline(&tables, "Greece", &config).unwrap();
    assert!(output.payload.annotations.is_empty());
}

#[test]
fn later_epoch_truncates_chart() {
    let (_dir, paths) = data_dir(VARIANTS, SEVERITY);
    let mut config = ChartConfig::default();
    config.alignment.epoch = date(2021, 1, 11);
    let tables = load_tables(&paths, &config).unwrap();
    let output = run_pipeline(&tables, "Greece", &config).unwrap();
    assert_eq!(
        output.payload.dates,
        vec![date(2021, 1, 11), date(2021, 1, 18)]
    );
    assert_eq!(output.payload.lines[0].values, vec![60.0, 55.0]);
}

#[test]
fn empty_value_cell_needs_lenient_mode() {
    let severity = format!("{SEVERITY}Greece,2021-W04,SARS-CoV-2,total,deaths,\n");
    let (_dir, paths) = data_dir(VARIANTS, &severity);

    let strict = ChartConfig::default();
    assert!(load_tables(&paths, &strict).is_err());

    let mut lenient = ChartConfig::default();
    lenient.ingest.empty_values = EmptyValueMode::Lenient;
    let tables = load_tables(&paths, &lenient).unwrap();
    let output = run_pipeline(&tables, "Greece", &lenient).unwrap();
    assert_eq!(output.payload.dates.len(), 4);
}

#[test]
fn palette_exhaustion_surfaces_as_error() {
    let (_dir, paths) = data_dir(VARIANTS, SEVERITY);
    let mut config = ChartConfig::default();
    config.palette.min_distance = 2.0;
    config.palette.max_attempts = 100;
    let tables = load_tables(&paths, &config).unwrap();
    // One color always fits; the distance only matters from the second on.
    assert!(run_pipeline(&tables, "Greece", &config).is_ok());

    let variants = format!("{VARIANTS}Greece,2021-W01,SARS-CoV-2,Delta,proportion,5\n");
    let (_dir2, paths2) = data_dir(&variants, SEVERITY);
    let tables = load_tables(&paths2, &config).unwrap();
    let err = run_pipeline(&tables, "Greece", &config).unwrap_err();
    assert!(format!("{err:#}").contains("assign colors for 2 variants"));
}
