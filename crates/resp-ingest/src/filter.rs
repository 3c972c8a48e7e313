use std::collections::BTreeSet;

use resp_model::{SourceSelection, SurveillanceRecord};

/// Restricts a raw table to one region, one pathogen and, optionally, an
/// indicator allow-list and a single stratum.
///
/// Filtering never fails: a region without matching rows yields an empty
/// selection, which downstream stages render as an empty chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFilter {
    region: String,
    pathogen: String,
    indicators: Option<BTreeSet<String>>,
    stratum: Option<String>,
}

impl RecordFilter {
    pub fn new(region: impl Into<String>, pathogen: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            pathogen: pathogen.into(),
            indicators: None,
            stratum: None,
        }
    }

    /// Filter for the variant-proportion rows of `region`.
    pub fn variants(region: &str, selection: &SourceSelection) -> Self {
        Self::new(region, selection.pathogen.as_str())
            .with_indicators([selection.variant_indicator.as_str()])
    }

    /// Filter for the configured severity indicators of `region`.
    pub fn severity(region: &str, selection: &SourceSelection) -> Self {
        let filter = Self::new(region, selection.pathogen.as_str())
            .with_indicators(selection.severity_indicators.iter().map(String::as_str));
        match &selection.severity_stratum {
            Some(stratum) => filter.with_stratum(stratum.as_str()),
            None => filter,
        }
    }

    /// Only keep rows whose indicator is in `indicators`.
    #[must_use]
    pub fn with_indicators<I, S>(mut self, indicators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.indicators = Some(indicators.into_iter().map(Into::into).collect());
        self
    }

    /// Only keep rows with exactly this stratum.
    #[must_use]
    pub fn with_stratum(mut self, stratum: impl Into<String>) -> Self {
        self.stratum = Some(stratum.into());
        self
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn matches(&self, record: &SurveillanceRecord) -> bool {
        record.region == self.region
            && record.pathogen == self.pathogen
            && self
                .indicators
                .as_ref()
                .is_none_or(|allowed| allowed.contains(&record.indicator))
            && self
                .stratum
                .as_deref()
                .is_none_or(|stratum| record.stratum() == Some(stratum))
    }

    /// Borrow the matching rows, preserving input order.
    pub fn apply<'a>(&self, records: &'a [SurveillanceRecord]) -> Vec<&'a SurveillanceRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(region: &str, indicator: &str, stratum: Option<&str>) -> SurveillanceRecord {
        SurveillanceRecord {
            region: region.to_string(),
            pathogen: "SARS-CoV-2".to_string(),
            indicator: indicator.to_string(),
            stratum: stratum.map(str::to_string),
            yearweek: "2021-W01".to_string(),
            value: 1.0,
            line: 2,
        }
    }

    #[test]
    fn severity_filter_requires_total_stratum() {
        let selection = SourceSelection::default();
        let filter = RecordFilter::severity("Greece", &selection);
        assert!(filter.matches(&record("Greece", "deaths", Some("total"))));
        assert!(!filter.matches(&record("Greece", "deaths", Some("65+"))));
        assert!(!filter.matches(&record("Greece", "deaths", None)));
        assert!(!filter.matches(&record("Greece", "cases", Some("total"))));
        assert!(!filter.matches(&record("Italy", "deaths", Some("total"))));
    }

    #[test]
    fn variant_filter_ignores_stratum() {
        let selection = SourceSelection::default();
        let filter = RecordFilter::variants("Greece", &selection);
        assert!(filter.matches(&record("Greece", "proportion", Some("Alpha"))));
        assert!(!filter.matches(&record("Greece", "detections", Some("Alpha"))));
    }

    #[test]
    fn unconstrained_indicator_accepts_all() {
        let filter = RecordFilter::new("Greece", "SARS-CoV-2");
        assert!(filter.matches(&record("Greece", "anything", None)));
    }

    #[test]
    fn unknown_region_yields_empty_selection() {
        let records = vec![record("Greece", "deaths", Some("total"))];
        let filter = RecordFilter::new("Atlantis", "SARS-CoV-2");
        assert!(filter.apply(&records).is_empty());
    }
}
