use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Chart palette
// ---------------------------------------------------------------------------

/// Hue, saturation, lightness of the five chart colours.
const CHART_HSL: [(f32, f32, f32); 5] = [
    (12.0, 0.76, 0.61),
    (173.0, 0.58, 0.39),
    (197.0, 0.37, 0.24),
    (43.0, 0.74, 0.66),
    (27.0, 0.87, 0.67),
];

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0).round() as u8,
        (rgb.green * 255.0).round() as u8,
        (rgb.blue * 255.0).round() as u8,
    )
}

/// Fixed palette shared by every chart; series and slices cycle through it.
#[derive(Debug, Clone)]
pub struct ChartPalette {
    colors: Vec<Color32>,
}

impl Default for ChartPalette {
    fn default() -> Self {
        Self {
            colors: CHART_HSL
                .iter()
                .map(|&(h, s, l)| hsl_to_color32(h, s, l))
                .collect(),
        }
    }
}

impl ChartPalette {
    /// Colour for the `i`-th series or slice.
    pub fn color(&self, i: usize) -> Color32 {
        self.colors[i % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_cycles() {
        let palette = ChartPalette::default();
        assert_eq!(palette.len(), 5);
        assert_eq!(palette.color(0), palette.color(5));
        assert_ne!(palette.color(0), palette.color(1));
    }

    #[test]
    fn test_hsl_conversion() {
        assert_eq!(hsl_to_color32(0.0, 1.0, 0.5), Color32::from_rgb(255, 0, 0));
        assert_eq!(hsl_to_color32(0.0, 0.0, 1.0), Color32::WHITE);
    }
}
