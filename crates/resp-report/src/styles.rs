//! Fixed presentation of the severity bars.

/// Alpha applied to every severity bar.
pub const BAR_ALPHA: f64 = 0.5;

/// How one severity indicator is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityStyle {
    pub indicator: String,
    pub label: String,
    pub color: String,
    pub stacked_on: Option<String>,
}

impl SeverityStyle {
    /// Style for a known indicator, or a neutral gray bar labelled with the
    /// raw indicator name.
    pub fn for_indicator(indicator: &str) -> Self {
        let (label, color, stacked_on) = match indicator {
            "hospitaladmissions" => ("Hosp. Admissions", "#C5DFB9", None),
            "ICUadmissions" => ("ICU", "#548135", Some("deaths")),
            "deaths" => ("Deaths", "black", None),
            other => (other, "gray", None),
        };
        Self {
            indicator: indicator.to_string(),
            label: label.to_string(),
            color: color.to_string(),
            stacked_on: stacked_on.map(str::to_string),
        }
    }
}

pub const LEFT_AXIS_LABEL: &str = "Severity";
pub const RIGHT_AXIS_LABEL: &str = "Percentage of variants (%)";
pub const ATTRIBUTION: &str = "ECDC data";

pub fn chart_title(region: &str) -> String {
    format!("{region} - COVID Hosp., ICU patients, Deaths (L) % Variant (R)")
}
