use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Country colours: one stable colour per country across every chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CountryColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl CountryColors {
    pub fn new<'a>(countries: impl IntoIterator<Item = &'a str>) -> Self {
        let countries: Vec<&str> = countries.into_iter().collect();
        let palette = generate_palette(countries.len());
        let mapping = countries
            .into_iter()
            .zip(palette)
            .map(|(c, color)| (c.to_string(), color))
            .collect();

        CountryColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, country: &str) -> Color32 {
        self.mapping
            .get(country)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Continuous scale for the map view
// ---------------------------------------------------------------------------

/// Viridis anchors, dark purple to yellow.
const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

/// Maps a numeric range onto the Viridis gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    min: f64,
    max: f64,
}

impl ColorScale {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Position of `value` in the range, clamped to `[0, 1]`.
    /// A degenerate range maps everything to the middle.
    pub fn fraction(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if !span.is_finite() || span.abs() < f64::EPSILON {
            return 0.5;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }

    pub fn color_for(&self, value: f64) -> Color32 {
        let t = self.fraction(value) as f32 * (VIRIDIS.len() - 1) as f32;
        let lo = (t.floor() as usize).min(VIRIDIS.len() - 2);
        let factor = t - lo as f32;

        let anchor = |(r, g, b): (u8, u8, u8)| -> LinSrgb {
            Srgb::new(r, g, b).into_format::<f32>().into_linear()
        };
        let mixed = anchor(VIRIDIS[lo]).mix(anchor(VIRIDIS[lo + 1]), factor);
        let rgb: Srgb = mixed.into_color();
        to_color32(rgb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(7);
        assert_eq!(colors.len(), 7);
        assert_ne!(colors[0], colors[1]);
    }

    #[test]
    fn unknown_country_gets_default_color() {
        let colors = CountryColors::new(["Chad", "Peru"]);
        assert_ne!(colors.color_for("Chad"), colors.color_for("Peru"));
        assert_eq!(colors.color_for("Atlantis"), Color32::GRAY);
    }

    #[test]
    fn scale_endpoints_hit_first_and_last_anchor() {
        let scale = ColorScale::new(10.0, 20.0);
        assert_eq!(scale.color_for(10.0), Color32::from_rgb(68, 1, 84));
        assert_eq!(scale.color_for(20.0), Color32::from_rgb(253, 231, 37));
        assert_eq!(scale.color_for(-5.0), scale.color_for(10.0));
        assert_eq!(scale.color_for(99.0), scale.color_for(20.0));
    }

    #[test]
    fn degenerate_scale_uses_midpoint() {
        let scale = ColorScale::new(3.0, 3.0);
        assert_eq!(scale.fraction(3.0), 0.5);
        assert_eq!(scale.color_for(3.0), Color32::from_rgb(33, 145, 140));
    }
}
