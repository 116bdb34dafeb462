use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Continuous magnitude colour scale
// ---------------------------------------------------------------------------

/// Reversed ColorBrewer RdYlBu: blue for small events, dark red for large.
const RD_YL_BU_R: [(u8, u8, u8); 11] = [
    (0x31, 0x36, 0x95),
    (0x45, 0x75, 0xb4),
    (0x74, 0xad, 0xd1),
    (0xab, 0xd9, 0xe9),
    (0xe0, 0xf3, 0xf8),
    (0xff, 0xff, 0xbf),
    (0xfe, 0xe0, 0x90),
    (0xfd, 0xae, 0x61),
    (0xf4, 0x6d, 0x43),
    (0xd7, 0x30, 0x27),
    (0xa5, 0x00, 0x26),
];

/// Maps magnitudes within `[min, max]` onto a continuous colour ramp.
#[derive(Debug, Clone)]
pub struct MagnitudeScale {
    min: f64,
    max: f64,
    stops: Vec<LinSrgb>,
}

impl MagnitudeScale {
    pub fn new(min: f64, max: f64) -> Self {
        let stops = RD_YL_BU_R
            .iter()
            .map(|&(r, g, b)| Srgb::new(r, g, b).into_format::<f32>().into_linear())
            .collect();
        MagnitudeScale { min, max, stops }
    }

    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Position of `magnitude` on the scale, clamped to `[0, 1]`.
    pub fn normalize(&self, magnitude: f64) -> f32 {
        let span = self.max - self.min;
        if span.abs() < f64::EPSILON {
            return 0.5;
        }
        ((magnitude - self.min) / span).clamp(0.0, 1.0) as f32
    }

    pub fn color_for(&self, magnitude: f64) -> Color32 {
        let t = self.normalize(magnitude) * (self.stops.len() - 1) as f32;
        let lower = (t.floor() as usize).min(self.stops.len() - 2);
        let frac = t - lower as f32;
        let mixed = self.stops[lower].mix(self.stops[lower + 1], frac);
        let rgb: Srgb<u8> = Srgb::from_linear(mixed);
        Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
    }

    /// Evenly spaced (label, colour) pairs for a legend strip.
    pub fn legend_entries(&self, n: usize) -> Vec<(String, Color32)> {
        if n < 2 {
            return vec![(format!("{:.1}", self.min), self.color_for(self.min))];
        }
        (0..n)
            .map(|i| {
                let m = self.min + (self.max - self.min) * i as f64 / (n - 1) as f64;
                (format!("{m:.1}"), self.color_for(m))
            })
            .collect()
    }
}

/// Marker radius in points, growing with magnitude like a bubble map.
pub fn marker_radius(magnitude: f64, max_magnitude: f64) -> f32 {
    if max_magnitude <= 0.0 {
        return 2.0;
    }
    (2.0 + 10.0 * (magnitude.max(0.0) / max_magnitude)) as f32
}
