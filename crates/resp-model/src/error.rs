use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("column {category} has {actual} values but the index has {expected} dates")]
    ColumnLength {
        category: String,
        expected: usize,
        actual: usize,
    },
    #[error("date index is not strictly increasing at {date}")]
    UnorderedIndex { date: NaiveDate },
    #[error("aligned series disagree on their date index ({severity} vs {variants} dates)")]
    IndexMismatch { severity: usize, variants: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
