//! Long-to-wide reshaping of surveillance records.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use tracing::debug;

use resp_model::{SurveillanceRecord, WideSeries};

use crate::error::{Result, TransformError};
use crate::yearweek::yearweek_to_date;

/// Which record field becomes the wide column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKey {
    /// One column per indicator (severity table).
    Indicator,
    /// One column per stratum, i.e. per variant (variants table).
    Stratum,
}

/// Group records by (week, category), sum the values, and pivot into a
/// [`WideSeries`] indexed by the Monday of each ISO week.
///
/// Duplicate rows for the same week and category add up. Any category seen in
/// at least one week gets a full column, zero-filled where it was not reported.
pub fn build_wide_series<'a, I>(records: I, key: CategoryKey) -> Result<WideSeries>
where
    I: IntoIterator<Item = &'a SurveillanceRecord>,
{
    let mut cells: BTreeMap<NaiveDate, BTreeMap<&'a str, f64>> = BTreeMap::new();
    let mut categories: BTreeSet<&'a str> = BTreeSet::new();
    let mut rows = 0usize;

    for record in records {
        let date = yearweek_to_date(&record.yearweek).map_err(|source| {
            TransformError::YearWeek {
                line: record.line,
                source,
            }
        })?;
        let category = match key {
            CategoryKey::Indicator => record.indicator.as_str(),
            CategoryKey::Stratum => record
                .stratum()
                .ok_or(TransformError::MissingCategory { line: record.line })?,
        };
        *cells.entry(date).or_default().entry(category).or_insert(0.0) += record.value;
        categories.insert(category);
        rows += 1;
    }

    let index: Vec<NaiveDate> = cells.keys().copied().collect();
    let columns: BTreeMap<String, Vec<f64>> = categories
        .iter()
        .map(|category| {
            let values = cells
                .values()
                .map(|week| week.get(category).copied().unwrap_or(0.0))
                .collect();
            ((*category).to_string(), values)
        })
        .collect();

    debug!(
        rows,
        weeks = index.len(),
        categories = columns.len(),
        "wide series built"
    );
    Ok(WideSeries::from_columns(index, columns)?)
}

/// Variant proportions, one column per variant.
pub fn build_variant_series<'a, I>(records: I) -> Result<WideSeries>
where
    I: IntoIterator<Item = &'a SurveillanceRecord>,
{
    build_wide_series(records, CategoryKey::Stratum)
}

/// Severity counts, one column per indicator.
pub fn build_severity_series<'a, I>(records: I) -> Result<WideSeries>
where
    I: IntoIterator<Item = &'a SurveillanceRecord>,
{
    build_wide_series(records, CategoryKey::Indicator)
}
