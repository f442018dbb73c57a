//! Interpolation helpers:
//! - lerp_f32 (linear segments)
//! - auto_clamped_slope (tangent at a key from its neighbours)
//! - bezier_segment (cubic bezier between two keys with per-key slopes)

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Cubic Bezier basis function
#[inline]
fn cubic_bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Slope (value per frame) at `cur`, given its neighbouring keys as `(time, value)`.
///
/// End keys and local extremes get a flat tangent so the curve never
/// overshoots the keyed values.
pub fn auto_clamped_slope(
    prev: Option<(f32, f32)>,
    cur: (f32, f32),
    next: Option<(f32, f32)>,
) -> f32 {
    let (Some(p), Some(n)) = (prev, next) else {
        return 0.0;
    };
    let rising_in = cur.1 - p.1;
    let rising_out = n.1 - cur.1;
    // Local extreme (or plateau): hold flat.
    if rising_in * rising_out <= 0.0 {
        return 0.0;
    }
    let span = n.0 - p.0;
    if span <= f32::EPSILON {
        return 0.0;
    }
    let slope = (n.1 - p.1) / span;

    // Clamp so neither adjacent segment overshoots its end values.
    let dt_in = (cur.0 - p.0).max(f32::EPSILON);
    let dt_out = (n.0 - cur.0).max(f32::EPSILON);
    let max_in = 3.0 * rising_in / dt_in;
    let max_out = 3.0 * rising_out / dt_out;
    if slope > 0.0 {
        slope.min(max_in).min(max_out)
    } else {
        slope.max(max_in).max(max_out)
    }
}

/// Evaluate a cubic bezier segment between `(v_a, slope_a)` and `(v_b, slope_b)`
/// spanning `dt` frames, at normalized segment time `frac` in [0, 1].
///
/// Handles sit at one third of the segment on each side, which keeps the
/// time axis linear in the bezier parameter; no inversion is needed.
#[inline]
pub fn bezier_segment(v_a: f32, v_b: f32, slope_a: f32, slope_b: f32, dt: f32, frac: f32) -> f32 {
    let frac = frac.clamp(0.0, 1.0);
    let third = dt / 3.0;
    let y1 = v_a + slope_a * third;
    let y2 = v_b - slope_b * third;
    cubic_bezier(v_a, y1, y2, v_b, frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints_and_midpoint() {
        assert_eq!(lerp_f32(2.0, 4.0, 0.0), 2.0);
        assert_eq!(lerp_f32(2.0, 4.0, 1.0), 4.0);
        assert_eq!(lerp_f32(2.0, 4.0, 0.5), 3.0);
    }

    #[test]
    fn end_keys_and_extremes_are_flat() {
        assert_eq!(auto_clamped_slope(None, (0.0, 1.0), Some((1.0, 2.0))), 0.0);
        assert_eq!(auto_clamped_slope(Some((0.0, 1.0)), (1.0, 2.0), None), 0.0);
        // Peak at the middle key.
        assert_eq!(
            auto_clamped_slope(Some((0.0, 0.0)), (1.0, 5.0), Some((2.0, 0.0))),
            0.0
        );
    }

    #[test]
    fn monotonic_keys_get_secant_slope() {
        let s = auto_clamped_slope(Some((0.0, 0.0)), (1.0, 1.0), Some((2.0, 2.0)));
        assert!((s - 1.0).abs() < 1e-6);
    }

    #[test]
    fn bezier_segment_hits_endpoints() {
        assert_eq!(bezier_segment(3.0, 7.0, 0.0, 0.0, 4.0, 0.0), 3.0);
        assert!((bezier_segment(3.0, 7.0, 0.0, 0.0, 4.0, 1.0) - 7.0).abs() < 1e-6);
        // Flat tangents on both ends give a symmetric ease; midpoint is the average.
        assert!((bezier_segment(3.0, 7.0, 0.0, 0.0, 4.0, 0.5) - 5.0).abs() < 1e-6);
    }
}
