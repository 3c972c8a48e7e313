use std::path::PathBuf;

use polars::prelude::PolarsError;
use resp_model::ModelError;
use thiserror::Error;

/// A year-week token that is not a valid `<ISO-year>-W<ISO-week>` identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid ISO year-week token '{0}'")]
pub struct InvalidYearWeek(pub String);

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("source line {line}: {source}")]
    YearWeek {
        line: u64,
        #[source]
        source: InvalidYearWeek,
    },

    #[error("source line {line}: record has no stratum to use as a category")]
    MissingCategory { line: u64 },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("frame conversion failed: {0}")]
    Frame(#[from] PolarsError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, TransformError>;
