//! Polars views of wide series, for inspection and CSV export.

use std::fs::File;
use std::path::Path;

use polars::prelude::{Column, CsvWriter, DataFrame, NamedFrom, SerWriter, Series};

use resp_model::WideSeries;

use crate::error::{Result, TransformError};

/// Name of the date column in exported frames.
pub const DATE_COLUMN: &str = "date";

/// A `date` column (ISO strings) followed by one f64 column per category.
pub fn to_frame(series: &WideSeries) -> Result<DataFrame> {
    let dates: Vec<String> = series
        .index()
        .iter()
        .map(|date| date.format("%Y-%m-%d").to_string())
        .collect();
    let mut columns: Vec<Column> = Vec::with_capacity(series.category_count() + 1);
    columns.push(Series::new(DATE_COLUMN.into(), dates).into());
    for (category, values) in series.columns() {
        columns.push(Series::new(category.into(), values).into());
    }
    Ok(DataFrame::new(columns)?)
}

/// Write [`to_frame`] as CSV with a header row.
pub fn write_csv(series: &WideSeries, path: &Path) -> Result<()> {
    let mut frame = to_frame(series)?;
    let mut file = File::create(path).map_err(|source| TransformError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut frame)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn frame_has_date_then_categories() {
        let series = WideSeries::from_columns(
            vec![
                NaiveDate::from_ymd_opt(2021, 1, 4).unwrap(),
                NaiveDate::from_ymd_opt(2021, 1, 11).unwrap(),
            ],
            BTreeMap::from([
                ("deaths".to_string(), vec![1.0, 2.0]),
                ("ICUadmissions".to_string(), vec![3.0, 4.0]),
            ]),
        )
        .unwrap();
        let frame = to_frame(&series).unwrap();
        assert_eq!(frame.height(), 2);
        let names: Vec<String> = frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["date", "ICUadmissions", "deaths"]);
    }

    #[test]
    fn empty_series_is_empty_frame() {
        let frame = to_frame(&WideSeries::empty()).unwrap();
        assert_eq!(frame.height(), 0);
        assert_eq!(frame.width(), 1);
    }
}
