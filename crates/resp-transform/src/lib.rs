//! Weekly series construction and alignment.
//!
//! Raw long-format records become [`resp_model::WideSeries`] tables (one row
//! per ISO week, one column per category), and the variant series is then
//! reindexed onto the severity series' dates.

pub mod align;
pub mod builder;
pub mod error;
pub mod frame;
pub mod yearweek;

pub use align::align;
pub use builder::{CategoryKey, build_severity_series, build_variant_series, build_wide_series};
pub use error::{InvalidYearWeek, Result, TransformError};
pub use frame::{DATE_COLUMN, to_frame, write_csv};
pub use yearweek::yearweek_to_date;
