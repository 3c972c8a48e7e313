//! Category color assignment for chart lines.

mod assign;
pub mod css4;
mod error;

pub use assign::{
    ColorAssignor, DEFAULT_BRIGHTNESS_THRESHOLD, DEFAULT_MAX_ATTEMPTS, assign_colors,
};
pub use error::{PaletteError, Result};
