use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use resp_model::{NamedColor, RenderPayload};

use crate::types::ChartResult;

/// Print the per-series overview of a chart run.
///
/// Goes to stderr when the payload itself was written to stdout.
pub fn print_summary(result: &ChartResult) {
    let mut lines = vec![format!("Region: {}", result.region)];
    match &result.output {
        Some(path) => lines.push(format!("Payload: {}", path.display())),
        None => lines.push("Payload: stdout".to_string()),
    }
    for path in &result.exports {
        lines.push(format!("Export: {}", path.display()));
    }
    if result.payload.is_empty() {
        lines.push("No weeks on or after the epoch for this region.".to_string());
    }
    lines.push(summary_table(&result.payload).to_string());

    let text = lines.join("\n");
    if result.output.is_some() {
        println!("{text}");
    } else {
        eprintln!("{text}");
    }
}

pub fn summary_table(payload: &RenderPayload) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Series"),
        header_cell("Axis"),
        header_cell("Weeks"),
        header_cell("Total"),
        header_cell("Peak"),
        header_cell("Peak week"),
        header_cell("Color"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);

    for bar in &payload.bars {
        let (week, peak) = peak_of(payload, &bar.values).unzip();
        table.add_row(vec![
            Cell::new(&bar.label),
            dim_cell("L"),
            Cell::new(bar.values.len()),
            Cell::new(format_value(bar.values.iter().sum())),
            peak_cell(peak, false),
            week_cell(week),
            dim_cell(&bar.color),
        ]);
    }
    for line in &payload.lines {
        let (week, peak) = peak_of(payload, &line.values).unzip();
        let annotated = payload
            .annotations
            .iter()
            .any(|annotation| annotation.variant == line.variant);
        table.add_row(vec![
            Cell::new(&line.variant)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            dim_cell("R"),
            Cell::new(line.values.len()),
            dim_cell("-"),
            peak_cell(peak, annotated),
            week_cell(week),
            color_cell(&line.color),
        ]);
    }
    table
}

/// Plain listing style for catalog and palette output.
pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn peak_of(payload: &RenderPayload, values: &[f64]) -> Option<(String, f64)> {
    let mut peak: Option<(usize, f64)> = None;
    for (index, value) in values.iter().enumerate() {
        if peak.is_none_or(|(_, best)| *value > best) {
            peak = Some((index, *value));
        }
    }
    peak.and_then(|(index, value)| {
        payload
            .dates
            .get(index)
            .map(|date| (date.format("%G-W%V").to_string(), value))
    })
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn peak_cell(value: Option<f64>, annotated: bool) -> Cell {
    match value {
        Some(value) if annotated => Cell::new(format_value(value))
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold),
        Some(value) => Cell::new(format_value(value)),
        None => dim_cell("-"),
    }
}

fn week_cell(week: Option<String>) -> Cell {
    match week {
        Some(week) => Cell::new(week),
        None => dim_cell("-"),
    }
}

pub fn color_cell(color: &NamedColor) -> Cell {
    let rgb = color.rgb;
    Cell::new(format!("{} ({})", color.name, color.hex())).fg(Color::Rgb {
        r: channel(rgb.r),
        g: channel(rgb.g),
        b: channel(rgb.b),
    })
}

fn channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
