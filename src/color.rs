use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::report::PERCENTILE_BUCKETS;

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
            // Stop short of a full turn so the 0th and 100th lines differ.
            let hue = (i as f32 / n as f32) * 300.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: percentile bucket → Color32
// ---------------------------------------------------------------------------

/// One colour per percentile bucket column.
#[derive(Debug, Clone)]
pub struct BucketColors {
    colors: Vec<Color32>,
    default_color: Color32,
}

impl Default for BucketColors {
    fn default() -> Self {
        Self {
            colors: generate_palette(PERCENTILE_BUCKETS.len()),
            default_color: Color32::GRAY,
        }
    }
}

impl BucketColors {
    /// Colour of bucket column `col`.
    pub fn color_for(&self, col: usize) -> Color32 {
        self.colors.get(col).copied().unwrap_or(self.default_color)
    }
}
