use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    #[error("minimum color distance must be a non-negative number, got {0}")]
    InvalidMinDistance(f64),

    /// The palette cannot supply `requested` colors under the current
    /// constraints. The caller may retry with a smaller `min_distance`.
    #[error(
        "palette exhausted: accepted {accepted} of {requested} colors after {attempts} draws"
    )]
    Exhausted {
        requested: usize,
        accepted: usize,
        attempts: usize,
    },
}

pub type Result<T> = std::result::Result<T, PaletteError>;
