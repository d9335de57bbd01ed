//! Year color assignment
//!
//! Each distinct year gets one RGB color for its bubbles. The source is
//! pluggable: a configured palette when it covers every year, otherwise
//! evenly spaced hues around the HSV wheel.

use std::collections::BTreeMap;

use palette::{FromColor, Hsv, Srgb};

/// RGB triple with components in `[0, 1]`.
pub type Rgb = (f32, f32, f32);

/// Assigns one color per distinct year.
pub trait ColorSource {
    /// Map each year to an RGB triple. Years are given sorted ascending.
    fn assign(&self, years: &[&str]) -> BTreeMap<String, Rgb>;
}

/// Colors taken from a configured palette, truncated to the number of
/// years. Callers are expected to pick this source only when the palette
/// is long enough.
#[derive(Debug, Clone)]
pub struct PaletteColors {
    colors: Vec<Rgb>,
}

impl PaletteColors {
    pub fn new(colors: Vec<Rgb>) -> Self {
        Self { colors }
    }
}

impl ColorSource for PaletteColors {
    fn assign(&self, years: &[&str]) -> BTreeMap<String, Rgb> {
        years
            .iter()
            .zip(&self.colors)
            .map(|(year, color)| (year.to_string(), *color))
            .collect()
    }
}

/// Colors generated from evenly spaced hues at half saturation and full
/// value, so any number of years stays distinguishable.
#[derive(Debug, Clone, Copy, Default)]
pub struct HueWheel;

impl ColorSource for HueWheel {
    fn assign(&self, years: &[&str]) -> BTreeMap<String, Rgb> {
        let count = years.len();
        years
            .iter()
            .enumerate()
            .map(|(i, year)| {
                let hue = i as f32 / count as f32 * 360.0;
                let rgb = Srgb::from_color(Hsv::new_srgb(hue, 0.5, 1.0));
                (year.to_string(), (rgb.red, rgb.green, rgb.blue))
            })
            .collect()
    }
}
