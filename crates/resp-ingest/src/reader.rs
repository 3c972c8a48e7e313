use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use resp_model::{EmptyValueMode, IngestConfig, SurveillanceRecord, TableKind};

use crate::error::{IngestError, Result};

/// Options controlling how raw cells are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestOptions {
    pub empty_values: EmptyValueMode,
}

impl IngestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_empty_values(mut self, mode: EmptyValueMode) -> Self {
        self.empty_values = mode;
        self
    }
}

impl From<&IngestConfig> for IngestOptions {
    fn from(config: &IngestConfig) -> Self {
        Self {
            empty_values: config.empty_values,
        }
    }
}

/// A resolved column: its position and the header name it was found under.
#[derive(Debug, Clone, Copy)]
struct Column {
    index: usize,
    name: &'static str,
}

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy)]
struct ColumnLayout {
    region: Column,
    pathogen: Column,
    indicator: Column,
    stratum: Column,
    yearweek: Column,
    value: Column,
}

impl ColumnLayout {
    fn resolve(kind: TableKind, headers: &StringRecord) -> Result<Self> {
        let headers: Vec<String> = headers.iter().map(normalize_header).collect();
        let find = |column: &'static str, aliases: &[&'static str]| -> Result<Column> {
            headers
                .iter()
                .enumerate()
                .find_map(|(index, header)| {
                    std::iter::once(column)
                        .chain(aliases.iter().copied())
                        .find(|name| header.eq_ignore_ascii_case(name))
                        .map(|name| Column { index, name })
                })
                .ok_or(IngestError::MissingColumn {
                    table: kind,
                    column,
                })
        };
        Ok(Self {
            region: find("countryname", &["region"])?,
            pathogen: find("pathogen", &[])?,
            indicator: find("indicator", &[])?,
            stratum: find(kind.stratum_column(), &["stratum"])?,
            yearweek: find("yearweek", &[])?,
            value: find("value", &[])?,
        })
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn normalize_cell(raw: &str) -> &str {
    raw.trim().trim_matches('\u{feff}')
}

/// Read one surveillance table from disk.
pub fn read_table(kind: TableKind, path: &Path, options: IngestOptions) -> Result<Vec<SurveillanceRecord>> {
    let start = Instant::now();
    let file = File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let records = read_table_from_reader(kind, file, options)?;
    info!(
        table = %kind,
        path = %path.display(),
        rows = records.len(),
        duration_ms = start.elapsed().as_millis(),
        "table loaded"
    );
    Ok(records)
}

/// Read one surveillance table from any CSV source.
///
/// Fails on the first malformed row; a table is either fully parsed or not
/// returned at all.
pub fn read_table_from_reader<R: Read>(
    kind: TableKind,
    source: R,
    options: IngestOptions,
) -> Result<Vec<SurveillanceRecord>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(source);
    let headers = reader
        .headers()
        .map_err(|source| IngestError::CsvParse { table: kind, source })?
        .clone();
    let layout = ColumnLayout::resolve(kind, &headers)?;
    debug!(table = %kind, columns = headers.len(), "header resolved");

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|source| IngestError::CsvParse { table: kind, source })?;
        records.push(parse_row(kind, &layout, &row, options)?);
    }
    Ok(records)
}

fn parse_row(
    kind: TableKind,
    layout: &ColumnLayout,
    row: &StringRecord,
    options: IngestOptions,
) -> Result<SurveillanceRecord> {
    let line = row.position().map_or(0, csv::Position::line);
    let cell = |idx: usize| row.get(idx).map(normalize_cell).unwrap_or("");
    let required = |column: Column| -> Result<String> {
        let value = cell(column.index);
        if value.is_empty() {
            return Err(IngestError::MissingField {
                table: kind,
                line,
                column: column.name,
            });
        }
        Ok(value.to_string())
    };

    let stratum = cell(layout.stratum.index);
    let raw_value = cell(layout.value.index);
    let value = match (raw_value.is_empty(), options.empty_values) {
        (true, EmptyValueMode::Lenient) => 0.0,
        (true, EmptyValueMode::Strict) => {
            return Err(IngestError::MissingField {
                table: kind,
                line,
                column: layout.value.name,
            });
        }
        (false, _) => parse_value(raw_value).ok_or_else(|| IngestError::InvalidValue {
            table: kind,
            line,
            column: layout.value.name,
            value: raw_value.to_string(),
        })?,
    };

    Ok(SurveillanceRecord {
        region: required(layout.region)?,
        pathogen: required(layout.pathogen)?,
        indicator: required(layout.indicator)?,
        stratum: (!stratum.is_empty()).then(|| stratum.to_string()),
        yearweek: required(layout.yearweek)?,
        value,
        line,
    })
}

/// Parse a finite numeric cell.
fn parse_value(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARIANTS: &str = "\
countryname,yearweek,pathogen,variant,indicator,value
Greece,2021-W01,SARS-CoV-2,Alpha,proportion,10
Greece,2021-W02,SARS-CoV-2,Alpha,proportion,60.5
";

    #[test]
    fn parses_variant_rows() {
        let records =
            read_table_from_reader(TableKind::Variants, VARIANTS.as_bytes(), IngestOptions::new())
                .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].region, "Greece");
        assert_eq!(records[0].stratum(), Some("Alpha"));
        assert_eq!(records[0].line, 2);
        assert_eq!(records[1].value, 60.5);
    }

    #[test]
    fn header_lookup_ignores_case_bom_and_whitespace() {
        let csv = "\u{feff}Region , Pathogen,Indicator,Stratum,YearWeek,Value\n\
                   Greece,SARS-CoV-2,deaths,total,2021-W01,3\n";
        let records =
            read_table_from_reader(TableKind::Severity, csv.as_bytes(), IngestOptions::new())
                .unwrap();
        assert_eq!(records[0].stratum(), Some("total"));
        assert_eq!(records[0].indicator, "deaths");
    }

    #[test]
    fn missing_column_is_fatal() {
        let csv = "countryname,yearweek,pathogen,indicator,value\nGreece,2021-W01,X,deaths,1\n";
        let err = read_table_from_reader(TableKind::Severity, csv.as_bytes(), IngestOptions::new())
            .unwrap_err();
        assert!(matches!(
            err,
            IngestError::MissingColumn {
                table: TableKind::Severity,
                column: "age"
            }
        ));
    }

    #[test]
    fn unparseable_value_is_fatal() {
        let csv = "countryname,yearweek,pathogen,age,indicator,value\n\
                   Greece,2021-W01,X,total,deaths,many\n";
        let err = read_table_from_reader(TableKind::Severity, csv.as_bytes(), IngestOptions::new())
            .unwrap_err();
        assert!(matches!(err, IngestError::InvalidValue { line: 2, .. }));
    }

    #[test]
    fn empty_value_depends_on_mode() {
        let csv = "countryname,yearweek,pathogen,age,indicator,value\n\
                   Greece,2021-W01,X,total,deaths,\n";
        let strict =
            read_table_from_reader(TableKind::Severity, csv.as_bytes(), IngestOptions::new());
        assert!(matches!(
            strict,
            Err(IngestError::MissingField { column: "value", .. })
        ));

        let lenient = read_table_from_reader(
            TableKind::Severity,
            csv.as_bytes(),
            IngestOptions::new().with_empty_values(EmptyValueMode::Lenient),
        )
        .unwrap();
        assert_eq!(lenient[0].value, 0.0);
    }

    #[test]
    fn empty_stratum_is_none() {
        let csv = "countryname,yearweek,pathogen,variant,indicator,value\n\
                   Greece,2021-W01,X,,proportion,5\n";
        let records =
            read_table_from_reader(TableKind::Variants, csv.as_bytes(), IngestOptions::new())
                .unwrap();
        assert_eq!(records[0].stratum, None);
    }

    #[test]
    fn blank_row_is_fatal() {
        let csv = format!("{VARIANTS},,,,,\n");
        let strict =
            read_table_from_reader(TableKind::Variants, csv.as_bytes(), IngestOptions::new());
        assert!(matches!(
            strict,
            Err(IngestError::MissingField { line: 4, .. })
        ));

        let lenient = read_table_from_reader(
            TableKind::Variants,
            csv.as_bytes(),
            IngestOptions::new().with_empty_values(EmptyValueMode::Lenient),
        );
        assert!(matches!(
            lenient,
            Err(IngestError::MissingField {
                line: 4,
                column: "countryname",
                ..
            })
        ));
    }

    #[test]
    fn missing_field_names_the_matched_header() {
        let csv = "region,pathogen,indicator,stratum,yearweek,value
                   ,SARS-CoV-2,deaths,total,2021-W01,3
";
        let err = read_table_from_reader(TableKind::Severity, csv.as_bytes(), IngestOptions::new())
            .unwrap_err();
        assert!(matches!(
            err,
            IngestError::MissingField {
                line: 2,
                column: "region",
                ..
            }
        ));
        assert!(err.to_string().contains("'region'"));
    }

    #[test]
    fn ragged_row_is_fatal() {
        let csv = "countryname,yearweek,pathogen,variant,indicator,value\nGreece,2021-W01\n";
        let err = read_table_from_reader(TableKind::Variants, csv.as_bytes(), IngestOptions::new())
            .unwrap_err();
        assert!(matches!(err, IngestError::CsvParse { .. }));
    }
}
