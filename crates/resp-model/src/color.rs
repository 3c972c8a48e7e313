use serde::{Deserialize, Serialize};

/// An RGB color with components normalized to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| f64::from((hex >> shift) & 0xFF) / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    /// Perceptual luminance: `0.2126 R + 0.7152 G + 0.0722 B`.
    pub fn luminance(&self) -> f64 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }

    /// Euclidean distance in RGB space.
    pub fn distance(&self, other: &Rgb) -> f64 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// `#rrggbb` form.
    pub fn to_hex_string(&self) -> String {
        let byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }
}

/// A palette entry: a CSS color name and its RGB value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedColor {
    pub name: String,
    pub rgb: Rgb,
}

impl NamedColor {
    pub fn new(name: impl Into<String>, rgb: Rgb) -> Self {
        Self {
            name: name.into(),
            rgb,
        }
    }

    pub fn hex(&self) -> String {
        self.rgb.to_hex_string()
    }
}

/// Colors for an ordered list of categories, one per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorAssignment {
    colors: Vec<NamedColor>,
}

impl ColorAssignment {
    pub fn new(colors: Vec<NamedColor>) -> Self {
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&NamedColor> {
        self.colors.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NamedColor> {
        self.colors.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.colors.iter().map(|c| c.name.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a ColorAssignment {
    type Item = &'a NamedColor;
    type IntoIter = std::slice::Iter<'a, NamedColor>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips_through_normalized_channels() {
        let rgb = Rgb::from_hex(0x548135);
        assert_eq!(rgb.to_hex_string(), "#548135");
    }

    #[test]
    fn luminance_weights() {
        assert!((Rgb::new(1.0, 1.0, 1.0).luminance() - 1.0).abs() < 1e-12);
        assert!((Rgb::new(0.0, 1.0, 0.0).luminance() - 0.7152).abs() < 1e-12);
        assert_eq!(Rgb::new(0.0, 0.0, 0.0).luminance(), 0.0);
    }

    #[test]
    fn distance_is_euclidean() {
        let black = Rgb::new(0.0, 0.0, 0.0);
        let white = Rgb::new(1.0, 1.0, 1.0);
        assert!((black.distance(&white) - 3f64.sqrt()).abs() < 1e-12);
        assert_eq!(white.distance(&white), 0.0);
    }
}
