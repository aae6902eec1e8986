//! Bezier tone curves baked into 8-bit lookup tables.
//!
//! A curve is defined by two or more control points `(x, y)` on the
//! `[0, 255]` intensity plane. The first and last points are the curve
//! endpoints; any points in between pull the curve toward them without
//! passing through them.
//!
//! # Algorithm
//! 1. Sample the curve at `t = i / 1000` for `i in 0..1000` by repeated
//!    linear interpolation of neighbouring points (De Casteljau) until a single
//!    point remains.
//! 2. Round that point's x to an integer key and store its y, clamped to the
//!    bounds and rounded. A later sample landing on the same key replaces the
//!    earlier one.
//! 3. Fill keys that no sample landed on by linear interpolation between the
//!    previous filled key and the next sampled key.
//!
//! ```text
//!   points ──→ 1000 × De Casteljau ──→ sparse key → value ──→ gap fill ──→ Curve[0..=last_x]
//! ```
//!
//! [`ToneCurve`] extends the curve flat to the full `[0, 255]` range and applies
//! it to a selection of the red, green and blue channels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FilterError, FilterResult};
use crate::image::Rgba;
use crate::math::{clamp, lerp, lut_index, round_half_up};

/// Number of parameter samples taken along the curve.
const SAMPLE_COUNT: u32 = 1000;

/// A curve anchor. `x` is an input intensity, `y` the pull toward an output
/// intensity. `y` is not clamped until the curve is sampled.
///
/// Serialized as a two-element array `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(u8, f64)", into = "(u8, f64)")]
pub struct ControlPoint {
    pub x: u8,
    pub y: f64,
}

impl ControlPoint {
    pub const fn new(x: u8, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(u8, f64)> for ControlPoint {
    fn from((x, y): (u8, f64)) -> Self {
        Self { x, y }
    }
}

impl From<ControlPoint> for (u8, f64) {
    fn from(p: ControlPoint) -> Self {
        (p.x, p.y)
    }
}

/// Dense mapping from every integer key in `[0, last_x]` to an output value.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    values: Vec<f64>,
}

impl Curve {
    /// Value at `key`, or `None` past the last control point.
    pub fn get(&self, key: usize) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Highest key present (the last control point's x).
    pub fn last_key(&self) -> usize {
        self.values.len() - 1
    }

    /// Number of keys, always `last_key() + 1`.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All values in key order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Build a curve through `points`, sampled values clamped to `[low, high]`.
///
/// Covers keys `0..=points.last().x`. Fails with
/// [`FilterError::InvalidInput`] for fewer than two points.
pub fn build_curve(points: &[ControlPoint], low: f64, high: f64) -> FilterResult<Curve> {
    let Some(last) = points.last().filter(|_| points.len() >= 2) else {
        return Err(FilterError::InvalidInput(format!(
            "a curve needs at least 2 control points, got {}",
            points.len()
        )));
    };
    let end = last.x as usize;

    let mut sampled: Vec<Option<f64>> = vec![None; end + 1];
    let mut scratch: Vec<(f64, f64)> = Vec::with_capacity(points.len());

    for i in 0..SAMPLE_COUNT {
        let t = i as f64 / SAMPLE_COUNT as f64;
        let (x, y) = de_casteljau(points, t, &mut scratch);

        let key = round_half_up(x);
        if key < 0.0 || key > end as f64 {
            continue;
        }
        let value = round_half_up(clamp(y, low, high));
        sampled[key as usize] = Some(value);
    }

    Ok(Curve {
        values: fill_gaps(&sampled, low),
    })
}

/// Four-point convenience form, bounded to `[0, 255]`.
pub fn cubic_curve(
    start: ControlPoint,
    ctrl1: ControlPoint,
    ctrl2: ControlPoint,
    end: ControlPoint,
) -> FilterResult<Curve> {
    build_curve(&[start, ctrl1, ctrl2, end], 0.0, 255.0)
}

/// Evaluate the Bezier defined by `points` at `t`, reusing `scratch`.
fn de_casteljau(points: &[ControlPoint], t: f64, scratch: &mut Vec<(f64, f64)>) -> (f64, f64) {
    scratch.clear();
    scratch.extend(points.iter().map(|p| (p.x as f64, p.y)));

    for level in (1..scratch.len()).rev() {
        for j in 0..level {
            let (x0, y0) = scratch[j];
            let (x1, y1) = scratch[j + 1];
            scratch[j] = (lerp(x0, x1, t), lerp(y0, y1, t));
        }
    }
    scratch[0]
}

/// Turn sparse samples into a dense table.
///
/// A missing key interpolates between the previous (already filled) key and
/// the next sampled key. With no next sample the previous value is copied;
/// with no previous key the next sample is carried backward.
fn fill_gaps(sampled: &[Option<f64>], fallback: f64) -> Vec<f64> {
    let mut values: Vec<f64> = Vec::with_capacity(sampled.len());

    for (key, sample) in sampled.iter().enumerate() {
        if let Some(v) = sample {
            values.push(*v);
            continue;
        }

        let next = sampled[key + 1..]
            .iter()
            .enumerate()
            .find_map(|(offset, v)| v.map(|v| (key + 1 + offset, v)));

        let filled = match (values.last().copied(), next) {
            (Some(prev), Some((next_key, next_value))) => {
                let span = (next_key - (key - 1)) as f64;
                prev + (next_value - prev) / span
            }
            (Some(prev), None) => prev,
            (None, Some((_, next_value))) => next_value,
            (None, None) => fallback,
        };
        values.push(filled);
    }

    values
}

/// Which of the red, green and blue channels a curve remaps.
///
/// Parsed from a selector string whose characters are each `r`, `g` or `b`;
/// `"rgb"` selects all three. Alpha cannot be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChannelSet {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
}

impl ChannelSet {
    pub const RGB: Self = Self {
        red: true,
        green: true,
        blue: true,
    };
    pub const RED: Self = Self {
        red: true,
        green: false,
        blue: false,
    };
    pub const GREEN: Self = Self {
        red: false,
        green: true,
        blue: false,
    };
    pub const BLUE: Self = Self {
        red: false,
        green: false,
        blue: true,
    };

    pub fn is_empty(&self) -> bool {
        !(self.red || self.green || self.blue)
    }
}

impl FromStr for ChannelSet {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut set = Self::default();
        for ch in s.chars() {
            match ch {
                'r' => set.red = true,
                'g' => set.green = true,
                'b' => set.blue = true,
                other => {
                    return Err(FilterError::InvalidInput(format!(
                        "unknown curve channel `{other}` in `{s}`"
                    )));
                }
            }
        }
        if set.is_empty() {
            return Err(FilterError::InvalidInput(
                "curve channel selector is empty".to_string(),
            ));
        }
        Ok(set)
    }
}

impl TryFrom<String> for ChannelSet {
    type Error = FilterError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for ChannelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.red {
            f.write_str("r")?;
        }
        if self.green {
            f.write_str("g")?;
        }
        if self.blue {
            f.write_str("b")?;
        }
        Ok(())
    }
}

impl From<ChannelSet> for String {
    fn from(set: ChannelSet) -> Self {
        set.to_string()
    }
}

/// A curve remap over selected channels, baked to 256 entries.
#[derive(Debug, Clone)]
pub struct ToneCurve {
    channels: ChannelSet,
    lut: [f64; 256],
}

impl ToneCurve {
    /// Build the curve and extend it flat outside the control point range.
    ///
    /// Keys below the first point's x map to the first point's y, keys from
    /// the last point's x up map to the last point's y. These two fills use
    /// the raw y values.
    pub fn new(channels: ChannelSet, points: &[ControlPoint]) -> FilterResult<Self> {
        let curve = build_curve(points, 0.0, 255.0)?;
        // build_curve guarantees at least two points.
        let (first, last) = (points[0], points[points.len() - 1]);

        let mut lut = [0.0_f64; 256];
        for (key, slot) in lut.iter_mut().enumerate() {
            *slot = curve.get(key).unwrap_or(last.y);
        }
        for slot in &mut lut[..first.x as usize] {
            *slot = first.y;
        }
        if last.x < 255 {
            for slot in &mut lut[last.x as usize..] {
                *slot = last.y;
            }
        }

        Ok(Self { channels, lut })
    }

    pub fn channels(&self) -> ChannelSet {
        self.channels
    }

    /// Output for an input intensity.
    pub fn lookup(&self, value: f64) -> f64 {
        self.lut[lut_index(value)]
    }

    pub fn apply(&self, mut px: Rgba) -> Rgba {
        if self.channels.red {
            px.r = self.lookup(px.r);
        }
        if self.channels.green {
            px.g = self.lookup(px.g);
        }
        if self.channels.blue {
            px.b = self.lookup(px.b);
        }
        px
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(raw: &[(u8, f64)]) -> Vec<ControlPoint> {
        raw.iter().copied().map(ControlPoint::from).collect()
    }

    #[test]
    fn test_build_curve_rejects_fewer_than_two_points() {
        assert!(matches!(
            build_curve(&[], 0.0, 255.0),
            Err(FilterError::InvalidInput(_))
        ));
        assert!(matches!(
            build_curve(&points(&[(10, 10.0)]), 0.0, 255.0),
            Err(FilterError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_identity_curve_within_one() {
        let curve = build_curve(&points(&[(0, 0.0), (255, 255.0)]), 0.0, 255.0).unwrap();
        assert_eq!(curve.len(), 256);
        for key in 0..=255 {
            let v = curve.get(key).unwrap();
            assert!(
                (v - key as f64).abs() <= 1.0,
                "key {key}: got {v}"
            );
        }
    }

    #[test]
    fn test_curve_covers_exactly_up_to_last_x() {
        let curve = build_curve(
            &points(&[(0, 0.0), (90, 120.0), (186, 144.0), (200, 230.0)]),
            0.0,
            255.0,
        )
        .unwrap();
        assert_eq!(curve.last_key(), 200);
        assert!(curve.get(200).is_some());
        assert!(curve.get(201).is_none());
        assert!(curve.values().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_endpoints_map_to_rounded_clamped_y() {
        let curve = build_curve(&points(&[(0, -40.0), (128, 90.4), (255, 400.0)]), 0.0, 255.0)
            .unwrap();
        assert_eq!(curve.get(0), Some(0.0));
        assert!((curve.get(255).unwrap() - 255.0).abs() <= 1.0);
    }

    #[test]
    fn test_custom_bounds_clamp_samples() {
        let curve = build_curve(&points(&[(0, 0.0), (255, 255.0)]), 50.0, 200.0).unwrap();
        assert!(curve.values().iter().all(|v| (50.0..=200.0).contains(v)));
        assert_eq!(curve.get(10), Some(50.0));
        assert_eq!(curve.get(250), Some(200.0));
    }

    #[test]
    fn test_cubic_curve_matches_slice_form() {
        let (a, b, c, d) = (
            ControlPoint::new(0, 0.0),
            ControlPoint::new(120, 100.0),
            ControlPoint::new(128, 140.0),
            ControlPoint::new(255, 255.0),
        );
        let cubic = cubic_curve(a, b, c, d).unwrap();
        let slice = build_curve(&[a, b, c, d], 0.0, 255.0).unwrap();
        assert_eq!(cubic, slice);
    }

    #[test]
    fn test_fill_gaps_interpolates_between_neighbours() {
        let filled = fill_gaps(&[Some(0.0), None, None, Some(30.0), None], 0.0);
        assert_eq!(filled, vec![0.0, 10.0, 20.0, 30.0, 30.0]);
    }

    #[test]
    fn test_fill_gaps_carries_first_sample_backward() {
        let filled = fill_gaps(&[None, None, Some(5.0), None, Some(9.0)], 0.0);
        assert_eq!(filled, vec![5.0, 5.0, 5.0, 7.0, 9.0]);
    }

    #[test]
    fn test_curve_with_late_start_is_total() {
        let curve = build_curve(&points(&[(100, 10.0), (200, 250.0)]), 0.0, 255.0).unwrap();
        assert_eq!(curve.len(), 201);
        // Nothing samples below x = 100; the first sampled value is carried back.
        assert_eq!(curve.get(0), Some(10.0));
        assert_eq!(curve.get(99), Some(10.0));
    }

    #[test]
    fn test_channel_set_parsing() {
        assert_eq!("rgb".parse::<ChannelSet>().unwrap(), ChannelSet::RGB);
        assert_eq!("b".parse::<ChannelSet>().unwrap(), ChannelSet::BLUE);
        assert!("rga".parse::<ChannelSet>().is_err());
        assert!("".parse::<ChannelSet>().is_err());
        assert_eq!(ChannelSet::RGB.to_string(), "rgb");
    }

    #[test]
    fn test_tone_curve_extends_flat_outside_points() {
        let curve = ToneCurve::new(
            ChannelSet::BLUE,
            &points(&[(20, 0.0), (90, 120.0), (186, 144.0), (255, 230.0)]),
        )
        .unwrap();
        assert_eq!(curve.lookup(0.0), 0.0);
        assert_eq!(curve.lookup(19.0), 0.0);
        assert!((curve.lookup(255.0) - 230.0).abs() <= 1.0);

        let curve = ToneCurve::new(ChannelSet::RGB, &points(&[(0, 10.0), (200, 180.0)])).unwrap();
        assert_eq!(curve.lookup(200.0), 180.0);
        assert_eq!(curve.lookup(255.0), 180.0);
    }

    #[test]
    fn test_tone_curve_only_touches_selected_channels() {
        let curve =
            ToneCurve::new(ChannelSet::BLUE, &points(&[(0, 255.0), (255, 255.0)])).unwrap();
        let out = curve.apply(Rgba::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(out.r, 10.0);
        assert_eq!(out.g, 20.0);
        assert_eq!(out.b, 255.0);
        assert_eq!(out.a, 40.0);
    }

    #[test]
    fn test_control_points_deserialize_from_pairs() {
        let parsed: Vec<ControlPoint> = serde_json::from_str("[[0, 0], [120, 100.5]]").unwrap();
        assert_eq!(parsed, points(&[(0, 0.0), (120, 100.5)]));
    }
}
