//! Wide (one row per week, one column per category) time series.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{ModelError, Result};

/// Weekly values keyed by calendar date and category.
///
/// The index is strictly increasing and every column has exactly one value per
/// index date. Cells absent from the raw input hold `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WideSeries {
    index: Vec<NaiveDate>,
    columns: BTreeMap<String, Vec<f64>>,
}

impl WideSeries {
    /// A series with no dates and no categories.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a series from an index and its columns, checking the invariants.
    pub fn from_columns(
        index: Vec<NaiveDate>,
        columns: BTreeMap<String, Vec<f64>>,
    ) -> Result<Self> {
        for pair in index.windows(2) {
            if pair[1] <= pair[0] {
                return Err(ModelError::UnorderedIndex { date: pair[1] });
            }
        }
        for (category, values) in &columns {
            if values.len() != index.len() {
                return Err(ModelError::ColumnLength {
                    category: category.clone(),
                    expected: index.len(),
                    actual: values.len(),
                });
            }
        }
        Ok(Self { index, columns })
    }

    pub fn index(&self) -> &[NaiveDate] {
        &self.index
    }

    /// Number of dates (rows).
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Category names in lexicographic order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn category_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, category: &str) -> Option<&[f64]> {
        self.columns.get(category).map(Vec::as_slice)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Value of one cell; `None` when the date or the category is unknown.
    pub fn value(&self, date: NaiveDate, category: &str) -> Option<f64> {
        let row = self.index.binary_search(&date).ok()?;
        self.columns.get(category).map(|values| values[row])
    }

    /// Keep only rows dated on or after `epoch`. Columns are kept even if they
    /// become all zero.
    #[must_use]
    pub fn since(&self, epoch: NaiveDate) -> Self {
        let start = self.index.partition_point(|date| *date < epoch);
        Self {
            index: self.index[start..].to_vec(),
            columns: self
                .columns
                .iter()
                .map(|(name, values)| (name.clone(), values[start..].to_vec()))
                .collect(),
        }
    }

    /// Re-express this series on `other`'s index.
    ///
    /// Dates missing here are filled with `0.0`; dates absent from `other` are
    /// dropped. The category set is unchanged.
    #[must_use]
    pub fn reindex_like(&self, other: &WideSeries) -> Self {
        let rows: Vec<Option<usize>> = other
            .index
            .iter()
            .map(|date| self.index.binary_search(date).ok())
            .collect();
        let columns = self
            .columns
            .iter()
            .map(|(name, values)| {
                let aligned = rows
                    .iter()
                    .map(|row| row.map_or(0.0, |row| values[row]))
                    .collect();
                (name.clone(), aligned)
            })
            .collect();
        Self {
            index: other.index.clone(),
            columns,
        }
    }
}

/// Severity and variant series sharing one date index.
///
/// The severity index is authoritative; both series always have the same
/// dates in the same order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedSeriesPair {
    severity: WideSeries,
    variants: WideSeries,
}

impl AlignedSeriesPair {
    pub fn from_parts(severity: WideSeries, variants: WideSeries) -> Result<Self> {
        if severity.index != variants.index {
            return Err(ModelError::IndexMismatch {
                severity: severity.len(),
                variants: variants.len(),
            });
        }
        Ok(Self { severity, variants })
    }

    pub fn severity(&self) -> &WideSeries {
        &self.severity
    }

    pub fn variants(&self) -> &WideSeries {
        &self.variants
    }

    /// The shared date index.
    pub fn dates(&self) -> &[NaiveDate] {
        self.severity.index()
    }

    pub fn into_parts(self) -> (WideSeries, WideSeries) {
        (self.severity, self.variants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(index: Vec<NaiveDate>, columns: Vec<(&str, Vec<f64>)>) -> WideSeries {
        WideSeries::from_columns(
            index,
            columns
                .into_iter()
                .map(|(name, values)| (name.to_string(), values))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn rejects_ragged_columns() {
        let err = WideSeries::from_columns(
            vec![date(2021, 1, 4)],
            BTreeMap::from([("Alpha".to_string(), vec![1.0, 2.0])]),
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::ColumnLength { expected: 1, actual: 2, .. }));
    }

    #[test]
    fn rejects_unordered_index() {
        let err = WideSeries::from_columns(
            vec![date(2021, 1, 11), date(2021, 1, 4)],
            BTreeMap::new(),
        )
        .unwrap_err();
        assert_eq!(err, ModelError::UnorderedIndex { date: date(2021, 1, 4) });
    }

    #[test]
    fn since_keeps_all_zero_columns() {
        let s = series(
            vec![date(2020, 8, 17), date(2020, 8, 24)],
            vec![("Early", vec![5.0, 0.0])],
        );
        let cut = s.since(date(2020, 8, 20));
        assert_eq!(cut.index(), &[date(2020, 8, 24)]);
        assert_eq!(cut.column("Early"), Some(&[0.0][..]));
    }

    #[test]
    fn reindex_fills_and_drops() {
        let backbone = series(vec![date(2021, 1, 4), date(2021, 1, 11)], vec![]);
        let other = series(
            vec![date(2021, 1, 11), date(2021, 1, 18)],
            vec![("Alpha", vec![60.0, 55.0])],
        );
        let aligned = other.reindex_like(&backbone);
        assert_eq!(aligned.index(), backbone.index());
        assert_eq!(aligned.column("Alpha"), Some(&[0.0, 60.0][..]));
        assert_eq!(aligned.value(date(2021, 1, 18), "Alpha"), None);
    }

    #[test]
    fn pair_requires_identical_index() {
        let a = series(vec![date(2021, 1, 4)], vec![]);
        let b = series(vec![date(2021, 1, 11)], vec![]);
        assert!(AlignedSeriesPair::from_parts(a.clone(), b).is_err());
        assert!(AlignedSeriesPair::from_parts(a.clone(), a).is_ok());
    }
}
