//! Surveillance table ingestion.
//!
//! Reads the variant-proportion and severity tables from CSV, restricts them
//! to one region/pathogen/indicator set, and lists the available regions.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use resp_ingest::{IngestOptions, SourceTables};
//! use resp_model::SourceSelection;
//!
//! let tables = SourceTables::load(
//!     Path::new("variants.csv"),
//!     Path::new("nonSentinelSeverity.csv"),
//!     IngestOptions::new(),
//! )?;
//! let greece = tables.select("Greece", &SourceSelection::default());
//! ```

mod catalog;
mod error;
mod filter;
mod reader;
mod tables;

pub use catalog::region_catalog;
pub use error::{IngestError, Result};
pub use filter::RecordFilter;
pub use reader::{IngestOptions, read_table, read_table_from_reader};
pub use tables::{RegionSelection, SEVERITY_FILE, SourceTables, VARIANTS_FILE};
