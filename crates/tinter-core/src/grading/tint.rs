//! Whole-pixel color casts: sepia, colorize toward a target, greyscale.

use serde::{Deserialize, Serialize};

use crate::image::Rgba;

/// Classic sepia matrix blended with identity by `adjust / 100`.
///
/// ```text
/// r' = min(255, r·(1 − 0.607a) + g·0.769a  + b·0.189a)
/// g' = min(255, r'·0.349a      + g·(1 − 0.314a) + b·0.168a)
/// b' = min(255, r'·0.272a      + g'·0.534a + b·(1 − 0.869a))
/// ```
///
/// The rows are evaluated in order and each one reads the channels already
/// rewritten by the rows above it (`r'` in the green row, `r'` and `g'` in the
/// blue row). Filters tuned against this cascade depend on it.
#[derive(Debug, Clone, Copy)]
pub struct Sepia {
    amount: f64,
}

impl Sepia {
    pub fn new(adjust: f64) -> Self {
        Self {
            amount: adjust / 100.0,
        }
    }

    pub fn apply(&self, mut px: Rgba) -> Rgba {
        let a = self.amount;
        px.r = (px.r * (1.0 - 0.607 * a) + px.g * (0.769 * a) + px.b * (0.189 * a)).min(255.0);
        px.g = (px.r * (0.349 * a) + px.g * (1.0 - 0.314 * a) + px.b * (0.168 * a)).min(255.0);
        px.b = (px.r * (0.272 * a) + px.g * (0.534 * a) + px.b * (1.0 - 0.869 * a)).min(255.0);
        px
    }
}

/// An opaque RGB target for [`Colorize`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Blends each channel `level`% of the way toward a target color.
///
/// `c −= (c − target.c) × level / 100`
#[derive(Debug, Clone, Copy)]
pub struct Colorize {
    target: TargetColor,
    level: f64,
}

impl Colorize {
    pub fn new(target: TargetColor, level: f64) -> Self {
        Self { target, level }
    }

    pub fn apply(&self, mut px: Rgba) -> Rgba {
        let t = self.level / 100.0;
        px.r -= (px.r - self.target.r) * t;
        px.g -= (px.g - self.target.g) * t;
        px.b -= (px.b - self.target.b) * t;
        px
    }
}

/// Rec. 601 luma weights.
const LUMA_REC601: [f64; 3] = [0.299, 0.587, 0.114];

/// Replaces r, g and b with their Rec. 601 weighted average. Not rounded.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreyScale;

impl GreyScale {
    pub fn apply(&self, mut px: Rgba) -> Rgba {
        let avg = LUMA_REC601[0] * px.r + LUMA_REC601[1] * px.g + LUMA_REC601[2] * px.b;
        px.r = avg;
        px.g = avg;
        px.b = avg;
        px
    }
}
