//! Angle helpers

use std::f32::consts::TAU;

/// Wrap an angle in radians into `[0, 2π)`.
///
/// `rem_euclid` can round a tiny negative input up to exactly `TAU`, so that
/// case is folded back to zero.
#[inline]
pub fn wrap_radians(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Normalize a difference of two compass headings into `(-180°, 180°]`.
#[inline]
pub fn normalize_degrees(delta: f32) -> f32 {
    let d = (delta + 180.0).rem_euclid(360.0) - 180.0;
    if d <= -180.0 {
        d + 360.0
    } else {
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_radians_range() {
        for &a in &[0.0, 1.0, TAU, -0.5, -TAU, 100.0, -100.0, -1e-9, 7.0 * TAU + 0.1] {
            let w = wrap_radians(a);
            assert!((0.0..TAU).contains(&w), "{} wrapped to {}", a, w);
        }
    }

    #[test]
    fn test_wrap_radians_value() {
        assert!((wrap_radians(TAU + 0.25) - 0.25).abs() < 1e-5);
        assert!((wrap_radians(-0.25) - (TAU - 0.25)).abs() < 1e-5);
        assert_eq!(wrap_radians(TAU), 0.0);
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(350.0), -10.0);
        assert_eq!(normalize_degrees(-350.0), 10.0);
        assert_eq!(normalize_degrees(180.0), 180.0);
        assert_eq!(normalize_degrees(-180.0), 180.0);
        assert_eq!(normalize_degrees(540.0), 180.0);
    }
}
