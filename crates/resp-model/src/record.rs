use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of the two source tables a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    /// Variant proportions; the stratum is the variant name.
    Variants,
    /// Severity counts; the stratum is the age band.
    Severity,
}

impl TableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Variants => "variants",
            Self::Severity => "severity",
        }
    }

    /// Header of the column holding this table's stratum.
    pub fn stratum_column(self) -> &'static str {
        match self {
            Self::Variants => "variant",
            Self::Severity => "age",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a raw long-format surveillance table.
///
/// Records are read once at ingestion and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveillanceRecord {
    pub region: String,
    pub pathogen: String,
    pub indicator: String,
    /// Age band (severity) or variant name (variants). Empty cells become `None`.
    pub stratum: Option<String>,
    /// ISO year-week token, e.g. `2021-W05`. Validated by the series builder.
    pub yearweek: String,
    pub value: f64,
    /// 1-based line in the source file, for diagnostics.
    pub line: u64,
}

impl SurveillanceRecord {
    pub fn stratum(&self) -> Option<&str> {
        self.stratum.as_deref()
    }
}
