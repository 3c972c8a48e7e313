//! Render-ready chart description handed to the drawing surface.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::color::NamedColor;

/// Everything the charting surface needs to draw one region's chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPayload {
    pub region: String,
    pub title: String,
    /// Shared x axis: the aligned date index.
    pub dates: Vec<NaiveDate>,
    /// Severity bars on the left axis, in legend order.
    pub bars: Vec<BarSeries>,
    /// One variant-proportion line per variant on the right axis.
    pub lines: Vec<LineSeries>,
    pub annotations: Vec<PeakAnnotation>,
    pub legend: Legend,
    pub axes: AxisLabels,
    /// Dates that carry a tick label.
    pub x_ticks: Vec<NaiveDate>,
    pub attribution: String,
}

impl RenderPayload {
    /// True when there is nothing to plot.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() && self.lines.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    pub indicator: String,
    pub label: String,
    pub color: String,
    pub alpha: f64,
    /// Indicator whose bar this one is drawn on top of.
    pub stacked_on: Option<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub variant: String,
    pub color: NamedColor,
    pub values: Vec<f64>,
}

/// Text label placed at a variant's peak.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakAnnotation {
    pub variant: String,
    pub date: NaiveDate,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendKind {
    Severity,
    Variant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
    pub kind: LegendKind,
}

/// Legend entries with severity first, then variants, wrapped into a grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
    pub columns: usize,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabels {
    pub left: String,
    pub right: String,
}
