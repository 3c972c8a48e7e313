//! Error types for surveillance table ingestion.

use std::path::PathBuf;

use resp_model::TableKind;
use thiserror::Error;

/// Errors that abort ingestion. No partially parsed table is ever returned.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Failed to open or read the source file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV itself is malformed (bad quoting, ragged rows, bad UTF-8).
    #[error("failed to parse {table} CSV: {source}")]
    CsvParse {
        table: TableKind,
        #[source]
        source: csv::Error,
    },

    /// A column the schema requires is absent from the header.
    #[error("{table} table is missing required column '{column}'")]
    MissingColumn {
        table: TableKind,
        column: &'static str,
    },

    /// A required cell is empty.
    #[error("{table} table line {line}: required field '{column}' is empty")]
    MissingField {
        table: TableKind,
        line: u64,
        column: &'static str,
    },

    /// A cell could not be parsed into its declared type.
    #[error("{table} table line {line}: invalid {column} value '{value}'")]
    InvalidValue {
        table: TableKind,
        line: u64,
        column: &'static str,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;
