//! Render payload assembly.
//!
//! Turns an aligned series pair and a color assignment into the structure the
//! charting surface draws: stacked severity bars on the left axis, one line
//! per variant on the right axis, peak labels, and a wrapped legend.

mod error;
mod payload;
pub mod styles;

pub use error::{ReportError, Result};
pub use payload::{build_legend, build_payload, find_peak, render_legend, write_payload_json};
pub use styles::SeverityStyle;
