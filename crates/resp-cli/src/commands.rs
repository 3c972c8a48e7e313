use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, CellAlignment, Table};
use tracing::{info, info_span};

use resp_cli::config::{ConfigOverrides, render_config, resolve_config};
use resp_cli::pipeline::{ChartOutput, load_tables, run_pipeline};
use resp_model::{EmptyValueMode, RenderPayload, SurveillanceRecord};
use resp_palette::ColorAssignor;
use resp_report::write_payload_json;
use resp_transform::write_csv;

use crate::cli::{ChartArgs, ConfigArgs, PaletteArgs, RegionsArgs};
use crate::summary::{align_column, apply_table_style, color_cell, header_cell};
use crate::types::ChartResult;

pub fn run_regions(args: &RegionsArgs) -> Result<()> {
    let overrides = ConfigOverrides {
        empty_values: args.lenient_values.then_some(EmptyValueMode::Lenient),
        ..ConfigOverrides::default()
    };
    let config = resolve_config(None, &overrides)?;
    let tables = load_tables(&args.source.paths(), &config)?;

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Region"),
        header_cell("Variant rows"),
        header_cell("Severity rows"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for region in tables.regions() {
        table.add_row(vec![
            Cell::new(&region),
            Cell::new(count_rows(&tables.variants, &region)),
            Cell::new(count_rows(&tables.severity, &region)),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_chart(args: &ChartArgs) -> Result<ChartResult> {
    let config = resolve_config(args.overrides.config.as_deref(), &args.overrides.overrides())?;
    let tables = load_tables(&args.source.paths(), &config)?;
    let ChartOutput {
        aligned, payload, ..
    } = run_pipeline(&tables, &args.region, &config)?;

    let mut exports = Vec::new();
    if let Some(dir) = &args.export_dir {
        let export_span = info_span!("export", dir = %dir.display());
        let _export_guard = export_span.enter();
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        let stem = file_stem(&args.region);
        let severity_path = dir.join(format!("{stem}_severity.csv"));
        write_csv(aligned.severity(), &severity_path)
            .with_context(|| format!("export {}", severity_path.display()))?;
        let variants_path = dir.join(format!("{stem}_variants.csv"));
        write_csv(aligned.variants(), &variants_path)
            .with_context(|| format!("export {}", variants_path.display()))?;
        info!(files = 2, "aligned series exported");
        exports.push(severity_path);
        exports.push(variants_path);
    }

    write_payload(&payload, args.output.as_deref())?;

    Ok(ChartResult {
        region: args.region.clone(),
        output: args.output.clone(),
        exports,
        payload,
    })
}

pub fn run_palette(args: &PaletteArgs) -> Result<()> {
    let config = resolve_config(args.overrides.config.as_deref(), &args.overrides.overrides())?;
    let palette = &config.palette;
    let colors = ColorAssignor::from_options(palette)
        .assign_with_seed(args.count, palette.min_distance, palette.seed)
        .with_context(|| {
            format!(
                "assign {} colors at distance {}",
                args.count, palette.min_distance
            )
        })?;

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Color"),
        header_cell("Luminance"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (index, color) in colors.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            color_cell(color),
            Cell::new(format!("{:.3}", color.rgb.luminance())),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_config(args: &ConfigArgs) -> Result<()> {
    let config = resolve_config(args.overrides.config.as_deref(), &args.overrides.overrides())?;
    print!("{}", render_config(&config)?);
    Ok(())
}

fn write_payload(payload: &RenderPayload, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create {}", parent.display()))?;
            }
            let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_payload_json(payload, &mut writer).context("write payload")?;
            writeln!(writer)?;
            writer.flush()?;
            info!(path = %path.display(), "payload written");
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_payload_json(payload, &mut writer).context("write payload")?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

fn count_rows(records: &[SurveillanceRecord], region: &str) -> usize {
    records.iter().filter(|r| r.region == region).count()
}

/// File-name-safe form of a region name.
fn file_stem(region: &str) -> String {
    region
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_names_become_safe_stems() {
        assert_eq!(file_stem("Greece"), "greece");
        assert_eq!(file_stem("Czech Republic"), "czech_republic");
        assert_eq!(file_stem(" EU/EEA "), "eu_eea");
    }
}
