pub mod color;
pub mod error;
pub mod options;
pub mod payload;
pub mod record;
pub mod series;

pub use color::{ColorAssignment, NamedColor, Rgb};
pub use error::{ModelError, Result};
pub use options::{
    AlignmentOptions, ChartConfig, ChartOptions, DEFAULT_EPOCH, EmptyValueMode, IngestConfig,
    PaletteOptions, SeedMode, SourceSelection,
};
pub use payload::{
    AxisLabels, BarSeries, Legend, LegendEntry, LegendKind, LineSeries, PeakAnnotation,
    RenderPayload,
};
pub use record::{SurveillanceRecord, TableKind};
pub use series::{AlignedSeriesPair, WideSeries};
