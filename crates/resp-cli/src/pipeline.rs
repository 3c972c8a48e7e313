//! Per-request chart pipeline.
//!
//! Each call re-derives everything from the raw tables: select the region,
//! build both weekly series, align them, assign variant colors, and assemble
//! the payload. Nothing derived is cached between calls.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, warn};

use resp_ingest::{IngestOptions, SEVERITY_FILE, SourceTables, VARIANTS_FILE};
use resp_model::{AlignedSeriesPair, ChartConfig, ColorAssignment, RenderPayload};
use resp_palette::ColorAssignor;
use resp_report::build_payload;
use resp_transform::{align, build_severity_series, build_variant_series};

/// Locations of the two source tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    pub variants: PathBuf,
    pub severity: PathBuf,
}

impl SourcePaths {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            variants: dir.join(VARIANTS_FILE),
            severity: dir.join(SEVERITY_FILE),
        }
    }
}

/// Everything one chart request produces.
#[derive(Debug, Clone)]
pub struct ChartOutput {
    pub aligned: AlignedSeriesPair,
    pub colors: ColorAssignment,
    pub payload: RenderPayload,
}

pub fn load_tables(paths: &SourcePaths, config: &ChartConfig) -> Result<SourceTables> {
    let start = Instant::now();
    let tables = SourceTables::load(
        &paths.variants,
        &paths.severity,
        IngestOptions::from(&config.ingest),
    )
    .context("load surveillance tables")?;
    info!(
        variant_rows = tables.variants.len(),
        severity_rows = tables.severity.len(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(tables)
}

/// Run every stage after ingestion for `region`.
///
/// A region with no matching rows yields an empty payload, not an error.
pub fn run_pipeline(
    tables: &SourceTables,
    region: &str,
    config: &ChartConfig,
) -> Result<ChartOutput> {
    let chart_span = info_span!("chart", region = %region);
    let _chart_guard = chart_span.enter();
    let chart_start = Instant::now();

    let selection = tables.select(region, &config.selection);
    if selection.is_empty() {
        warn!(region, "no rows for region");
    }

    let (severity, variants) = info_span!("series").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let severity = build_severity_series(selection.severity.iter().copied())
            .context("build severity series")?;
        let variants = build_variant_series(selection.variants.iter().copied())
            .context("build variant series")?;
        debug!(
            severity_weeks = severity.len(),
            severity_indicators = severity.category_count(),
            variant_weeks = variants.len(),
            variant_count = variants.category_count(),
            duration_ms = start.elapsed().as_millis(),
            "series complete"
        );
        Ok((severity, variants))
    })?;

    let aligned = info_span!("align").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let aligned =
            align(&severity, &variants, config.alignment.epoch).context("align series")?;
        debug!(
            dates = aligned.dates().len(),
            duration_ms = start.elapsed().as_millis(),
            "align complete"
        );
        Ok(aligned)
    })?;

    let colors = info_span!("palette").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let count = aligned.variants().category_count();
        let colors = ColorAssignor::from_options(&config.palette)
            .assign_with_seed(count, config.palette.min_distance, config.palette.seed)
            .with_context(|| format!("assign colors for {count} variants"))?;
        debug!(
            colors = colors.len(),
            duration_ms = start.elapsed().as_millis(),
            "palette complete"
        );
        Ok(colors)
    })?;

    let payload = info_span!("payload").in_scope(|| -> Result<_> {
        build_payload(
            region,
            &aligned,
            &colors,
            &config.selection.severity_indicators,
            &config.chart,
        )
        .context("build render payload")
    })?;

    info!(
        dates = payload.dates.len(),
        variants = payload.lines.len(),
        annotations = payload.annotations.len(),
        duration_ms = chart_start.elapsed().as_millis(),
        "chart complete"
    );
    Ok(ChartOutput {
        aligned,
        colors,
        payload,
    })
}
