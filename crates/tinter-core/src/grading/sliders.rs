//! Single-value adjustments: saturation, brightness and gamma.

use crate::image::Rgba;
use crate::math::{clamp, lut_index, round_half_up};

/// Pushes every non-maximal channel toward or away from the pixel's
/// brightest channel.
///
/// ```text
/// scale = adjust × −0.01
/// c    += round((max(r, g, b) − c) × scale)   for c ≠ max
/// ```
///
/// Negative `adjust` desaturates, positive pulls the lesser channels further
/// down. The maximal channel is never touched.
#[derive(Debug, Clone, Copy)]
pub struct Saturation {
    scale: f64,
}

impl Saturation {
    pub fn new(adjust: f64) -> Self {
        Self {
            scale: adjust * -0.01,
        }
    }

    pub fn apply(&self, mut px: Rgba) -> Rgba {
        let max = px.r.max(px.g).max(px.b);
        for c in [&mut px.r, &mut px.g, &mut px.b] {
            if *c != max {
                *c += round_half_up((max - *c) * self.scale);
            }
        }
        px
    }
}

/// Linear brightness scale through a precomputed 256-entry table.
///
/// `lookup[i] = clamp(i × (1 + change), 0, 255)`.
#[derive(Debug, Clone)]
pub struct Brightness {
    lookup: [f64; 256],
}

impl Brightness {
    pub fn new(change: f64) -> Self {
        let mut lookup = [0.0_f64; 256];
        for (i, slot) in lookup.iter_mut().enumerate() {
            *slot = clamp(i as f64 * (1.0 + change), 0.0, 255.0);
        }
        Self { lookup }
    }

    pub fn apply(&self, mut px: Rgba) -> Rgba {
        px.r = self.lookup[lut_index(px.r)];
        px.g = self.lookup[lut_index(px.g)];
        px.b = self.lookup[lut_index(px.b)];
        px
    }
}

/// Power curve on normalized channels: `c = (c / 255)^adjust × 255`.
///
/// Not clamped; the buffer write truncates.
#[derive(Debug, Clone, Copy)]
pub struct Gamma {
    adjust: f64,
}

impl Gamma {
    pub fn new(adjust: f64) -> Self {
        Self { adjust }
    }

    pub fn apply(&self, mut px: Rgba) -> Rgba {
        for c in [&mut px.r, &mut px.g, &mut px.b] {
            *c = (*c / 255.0).powf(self.adjust) * 255.0;
        }
        px
    }
}
