//! Scalar helpers shared by the curve builder and the channel operations.

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Clamp `value` into `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics when `min > max`; `max` wins.
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value > max {
        max
    } else if value < min {
        min
    } else {
        value
    }
}

/// Round to the nearest integer, sending exact halves toward +∞.
///
/// `2.5 → 3`, `-2.5 → -2`. [`f64::round`] sends halves away from zero,
/// which would shift negative saturation deltas by one.
#[inline]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Look-up index for a channel value: rounded, then clamped to `0..=255`.
#[inline]
pub(crate) fn lut_index(value: f64) -> usize {
    if value.is_nan() {
        return 0;
    }
    round_half_up(value).clamp(0.0, 255.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up_positive_and_negative() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.49), 2.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.51), -3.0);
    }

    #[test]
    fn test_clamp_bounds() {
        assert_eq!(clamp(300.0, 0.0, 255.0), 255.0);
        assert_eq!(clamp(-4.0, 0.0, 255.0), 0.0);
        assert_eq!(clamp(12.5, 0.0, 255.0), 12.5);
    }

    #[test]
    fn test_lut_index_is_total() {
        assert_eq!(lut_index(-10.0), 0);
        assert_eq!(lut_index(300.0), 255);
        assert_eq!(lut_index(99.5), 100);
        assert_eq!(lut_index(f64::NAN), 0);
    }
}
