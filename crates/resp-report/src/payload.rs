use std::io::Write;

use chrono::NaiveDate;
use tracing::debug;

use resp_model::{
    AlignedSeriesPair, AxisLabels, BarSeries, ChartOptions, ColorAssignment, Legend, LegendEntry,
    LegendKind, LineSeries, PeakAnnotation, RenderPayload,
};

use crate::error::{ReportError, Result};
use crate::styles::{
    ATTRIBUTION, BAR_ALPHA, LEFT_AXIS_LABEL, RIGHT_AXIS_LABEL, SeverityStyle, chart_title,
};

/// Assemble the render payload for one region.
///
/// `severity_indicators` fixes the bar order; an indicator missing from the
/// aligned data is drawn as an all-zero series. `colors` must hold exactly one
/// color per variant, in the variant series' category order.
pub fn build_payload(
    region: &str,
    aligned: &AlignedSeriesPair,
    colors: &ColorAssignment,
    severity_indicators: &[String],
    options: &ChartOptions,
) -> Result<RenderPayload> {
    let variants = aligned.variants();
    if colors.len() != variants.category_count() {
        return Err(ReportError::ColorCountMismatch {
            colors: colors.len(),
            variants: variants.category_count(),
        });
    }
    let dates = aligned.dates();

    let bars: Vec<BarSeries> = severity_indicators
        .iter()
        .map(|indicator| {
            let style = SeverityStyle::for_indicator(indicator);
            let values = aligned
                .severity()
                .column(indicator)
                .map_or_else(|| vec![0.0; dates.len()], <[f64]>::to_vec);
            BarSeries {
                indicator: style.indicator,
                label: style.label,
                color: style.color,
                alpha: BAR_ALPHA,
                stacked_on: style.stacked_on,
                values,
            }
        })
        .collect();

    let mut lines = Vec::with_capacity(variants.category_count());
    let mut annotations = Vec::new();
    for ((variant, values), color) in variants.columns().zip(colors) {
        if let Some((date, value)) = find_peak(dates, values, options.peak_threshold) {
            annotations.push(PeakAnnotation {
                variant: variant.to_string(),
                date,
                value,
                color: color.name.clone(),
            });
        }
        lines.push(LineSeries {
            variant: variant.to_string(),
            color: color.clone(),
            values: values.to_vec(),
        });
    }

    let legend = build_legend(&bars, &lines, options.legend_max_columns);
    let stride = options.tick_stride.max(1);
    let x_ticks = dates.iter().step_by(stride).copied().collect();

    debug!(
        region,
        dates = dates.len(),
        bars = bars.len(),
        lines = lines.len(),
        annotations = annotations.len(),
        "payload built"
    );

    Ok(RenderPayload {
        region: region.to_string(),
        title: chart_title(region),
        dates: dates.to_vec(),
        bars,
        lines,
        annotations,
        legend,
        axes: AxisLabels {
            left: LEFT_AXIS_LABEL.to_string(),
            right: RIGHT_AXIS_LABEL.to_string(),
        },
        x_ticks,
        attribution: ATTRIBUTION.to_string(),
    })
}

/// Date and value of the first maximum, if that maximum is strictly above
/// `threshold`.
pub fn find_peak(dates: &[NaiveDate], values: &[f64], threshold: f64) -> Option<(NaiveDate, f64)> {
    let mut peak: Option<(NaiveDate, f64)> = None;
    for (date, value) in dates.iter().zip(values) {
        if peak.is_none_or(|(_, best)| *value > best) {
            peak = Some((*date, *value));
        }
    }
    peak.filter(|(_, value)| *value > threshold)
}

/// Severity entries first, then variants in color-assignment order.
///
/// Columns follow the variant count, capped at `max_columns`; extra entries
/// wrap onto further rows.
pub fn build_legend(bars: &[BarSeries], lines: &[LineSeries], max_columns: usize) -> Legend {
    let mut entries: Vec<LegendEntry> = bars
        .iter()
        .map(|bar| LegendEntry {
            label: bar.label.clone(),
            color: bar.color.clone(),
            kind: LegendKind::Severity,
        })
        .collect();
    entries.extend(lines.iter().map(|line| LegendEntry {
        label: line.variant.clone(),
        color: line.color.name.clone(),
        kind: LegendKind::Variant,
    }));
    let columns = lines.len().min(max_columns).max(1);
    let rows = entries.len().div_ceil(columns);
    Legend {
        entries,
        columns,
        rows,
    }
}

/// Legend rows as text, entries separated by ` | `.
pub fn render_legend(legend: &Legend) -> String {
    legend
        .entries
        .chunks(legend.columns.max(1))
        .map(|row| {
            row.iter()
                .map(|entry| entry.label.as_str())
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty-printed JSON for the rendering surface.
pub fn write_payload_json<W: Write>(payload: &RenderPayload, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, payload)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(n: u32) -> Vec<NaiveDate> {
        (0..n)
            .map(|i| NaiveDate::from_ymd_opt(2021, 1, 4 + 7 * i).unwrap())
            .collect()
    }

    #[test]
    fn peak_at_exact_threshold_is_not_annotated() {
        assert_eq!(find_peak(&dates(3), &[10.0, 40.0, 20.0], 40.0), None);
    }

    #[test]
    fn peak_just_over_threshold_is_annotated_once() {
        let d = dates(3);
        assert_eq!(
            find_peak(&d, &[10.0, 40.0001, 20.0], 40.0),
            Some((d[1], 40.0001))
        );
    }

    #[test]
    fn ties_resolve_to_first_date() {
        let d = dates(4);
        assert_eq!(
            find_peak(&d, &[50.0, 70.0, 70.0, 10.0], 40.0),
            Some((d[1], 70.0))
        );
    }

    #[test]
    fn empty_series_has_no_peak() {
        assert_eq!(find_peak(&[], &[], 40.0), None);
    }

    #[test]
    fn unknown_indicator_gets_neutral_style() {
        let style = SeverityStyle::for_indicator("cases");
        assert_eq!(style.label, "cases");
        assert_eq!(style.color, "gray");
        assert_eq!(style.stacked_on, None);
    }
}
