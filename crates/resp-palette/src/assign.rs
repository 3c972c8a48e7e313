//! Rejection sampling of category colors.
//!
//! Candidates are drawn uniformly (with replacement) from a named palette.
//! A candidate is kept only if it is not too bright for a white background and
//! lies strictly farther than `min_distance` from every color kept so far.
//! The number of draws is capped; running out yields
//! [`PaletteError::Exhausted`] instead of looping forever.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use resp_model::{ColorAssignment, NamedColor, PaletteOptions, Rgb, SeedMode};

use crate::css4::CSS4_COLORS;
use crate::error::{PaletteError, Result};

/// Default luminance ceiling.
pub const DEFAULT_BRIGHTNESS_THRESHOLD: f64 = 0.7;
/// Default cap on candidate draws per assignment.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

/// Draws category colors from a fixed palette.
#[derive(Debug, Clone)]
pub struct ColorAssignor {
    palette: Vec<NamedColor>,
    brightness_threshold: f64,
    max_attempts: usize,
}

impl Default for ColorAssignor {
    fn default() -> Self {
        Self::css4()
    }
}

impl ColorAssignor {
    /// Assignor over the CSS4 named colors with default limits.
    pub fn css4() -> Self {
        let palette = CSS4_COLORS
            .iter()
            .map(|&(name, hex)| NamedColor::new(name, Rgb::from_hex(hex)))
            .collect();
        Self::with_palette(palette)
    }

    pub fn with_palette(palette: Vec<NamedColor>) -> Self {
        Self {
            palette,
            brightness_threshold: DEFAULT_BRIGHTNESS_THRESHOLD,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// CSS4 assignor using the limits from `options`.
    pub fn from_options(options: &PaletteOptions) -> Self {
        Self::css4()
            .with_brightness_threshold(options.brightness_threshold)
            .with_max_attempts(options.max_attempts)
    }

    #[must_use]
    pub fn with_brightness_threshold(mut self, threshold: f64) -> Self {
        self.brightness_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn palette(&self) -> &[NamedColor] {
        &self.palette
    }

    pub fn is_bright(&self, rgb: &Rgb) -> bool {
        rgb.luminance() > self.brightness_threshold
    }

    /// Palette colors that pass the brightness filter.
    pub fn eligible(&self) -> impl Iterator<Item = &NamedColor> {
        self.palette.iter().filter(|color| !self.is_bright(&color.rgb))
    }

    /// Assign `count` colors using the caller's random source.
    pub fn assign<R: Rng + ?Sized>(
        &self,
        count: usize,
        min_distance: f64,
        rng: &mut R,
    ) -> Result<ColorAssignment> {
        if min_distance.is_nan() || min_distance < 0.0 {
            return Err(PaletteError::InvalidMinDistance(min_distance));
        }
        if count == 0 {
            return Ok(ColorAssignment::default());
        }

        // Identical colors are never farther apart than any min_distance, so
        // no request can exceed the number of eligible entries.
        let eligible = self.eligible().count();
        if count > eligible {
            warn!(requested = count, eligible, "palette too small for request");
            return Err(PaletteError::Exhausted {
                requested: count,
                accepted: 0,
                attempts: 0,
            });
        }

        let mut accepted: Vec<NamedColor> = Vec::with_capacity(count);
        let mut attempts = 0usize;
        while accepted.len() < count {
            if attempts >= self.max_attempts {
                warn!(
                    requested = count,
                    accepted = accepted.len(),
                    attempts,
                    min_distance,
                    "palette exhausted"
                );
                return Err(PaletteError::Exhausted {
                    requested: count,
                    accepted: accepted.len(),
                    attempts,
                });
            }
            attempts += 1;
            let Some(candidate) = self.palette.choose(rng) else {
                return Err(PaletteError::Exhausted {
                    requested: count,
                    accepted: accepted.len(),
                    attempts,
                });
            };
            if self.is_bright(&candidate.rgb) {
                continue;
            }
            if accepted
                .iter()
                .all(|color| color.rgb.distance(&candidate.rgb) > min_distance)
            {
                accepted.push(candidate.clone());
            }
        }

        debug!(requested = count, attempts, min_distance, "colors assigned");
        Ok(ColorAssignment::new(accepted))
    }

    /// Assign `count` colors with a freshly created generator.
    ///
    /// `SeedMode::Fixed` makes the result a pure function of
    /// `(count, min_distance, seed)`.
    pub fn assign_with_seed(
        &self,
        count: usize,
        min_distance: f64,
        seed: SeedMode,
    ) -> Result<ColorAssignment> {
        let mut rng = match seed {
            SeedMode::Fixed(seed) => ChaCha8Rng::seed_from_u64(seed),
            SeedMode::Entropy => ChaCha8Rng::from_entropy(),
        };
        self.assign(count, min_distance, &mut rng)
    }
}

/// Assign `count` CSS4 colors at least `min_distance` apart.
///
/// `Some(seed)` gives a reproducible sequence; `None` draws from OS entropy.
pub fn assign_colors(count: usize, min_distance: f64, seed: Option<u64>) -> Result<ColorAssignment> {
    ColorAssignor::css4().assign_with_seed(count, min_distance, SeedMode::from(seed))
}
