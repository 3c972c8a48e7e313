use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("got {colors} colors for {variants} variants")]
    ColorCountMismatch { colors: usize, variants: usize },

    #[error("failed to serialize payload: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
