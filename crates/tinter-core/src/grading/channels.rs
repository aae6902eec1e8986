//! Per-channel push toward white or black.

use serde::{Deserialize, Serialize};

use crate::image::Rgba;

/// Percentages (−100..100) for each channel. Absent or zero means untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelAmounts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub red: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub green: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blue: Option<f64>,
}

/// Moves each configured channel a fraction of the way to 255 (positive) or
/// to 0 (negative).
///
/// ```text
/// p > 0:  c += (255 − c) × p
/// p < 0:  c −= c × |p|
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ChannelPush {
    red: Option<f64>,
    green: Option<f64>,
    blue: Option<f64>,
}

impl ChannelPush {
    pub fn new(amounts: ChannelAmounts) -> Self {
        let fraction = |p: Option<f64>| p.filter(|&p| p != 0.0).map(|p| p / 100.0);
        Self {
            red: fraction(amounts.red),
            green: fraction(amounts.green),
            blue: fraction(amounts.blue),
        }
    }

    pub fn apply(&self, mut px: Rgba) -> Rgba {
        push(&mut px.r, self.red);
        push(&mut px.g, self.green);
        push(&mut px.b, self.blue);
        px
    }
}

fn push(c: &mut f64, amount: Option<f64>) {
    match amount {
        Some(p) if p > 0.0 => *c += (255.0 - *c) * p,
        Some(p) => *c -= *c * p.abs(),
        None => {}
    }
}
