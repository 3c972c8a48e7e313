use std::path::Path;

use tracing::info_span;

use resp_model::{SourceSelection, SurveillanceRecord, TableKind};

use crate::catalog::region_catalog;
use crate::error::Result;
use crate::filter::RecordFilter;
use crate::reader::{IngestOptions, read_table};

/// Default local file name of the variants table.
pub const VARIANTS_FILE: &str = "variants.csv";
/// Default local file name of the severity table.
pub const SEVERITY_FILE: &str = "nonSentinelSeverity.csv";

/// The two raw tables, read once and never mutated.
#[derive(Debug, Clone, Default)]
pub struct SourceTables {
    pub variants: Vec<SurveillanceRecord>,
    pub severity: Vec<SurveillanceRecord>,
}

/// Rows of both tables matching one region.
#[derive(Debug, Clone)]
pub struct RegionSelection<'a> {
    pub region: String,
    pub variants: Vec<&'a SurveillanceRecord>,
    pub severity: Vec<&'a SurveillanceRecord>,
}

impl RegionSelection<'_> {
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty() && self.severity.is_empty()
    }
}

impl SourceTables {
    pub fn new(variants: Vec<SurveillanceRecord>, severity: Vec<SurveillanceRecord>) -> Self {
        Self { variants, severity }
    }

    pub fn load(variants: &Path, severity: &Path, options: IngestOptions) -> Result<Self> {
        let span = info_span!("ingest");
        let _guard = span.enter();
        Ok(Self {
            variants: read_table(TableKind::Variants, variants, options)?,
            severity: read_table(TableKind::Severity, severity, options)?,
        })
    }

    /// Region catalog used to populate a selector.
    pub fn regions(&self) -> Vec<String> {
        region_catalog(&self.variants, &self.severity)
    }

    /// Apply the configured selection for `region` to both tables.
    pub fn select(&self, region: &str, selection: &SourceSelection) -> RegionSelection<'_> {
        RegionSelection {
            region: region.to_string(),
            variants: RecordFilter::variants(region, selection).apply(&self.variants),
            severity: RecordFilter::severity(region, selection).apply(&self.severity),
        }
    }
}
