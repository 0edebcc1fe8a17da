//! Saturation and angle-error helpers
//!
//! All motor commands in this crate pass through [`clamp_output`] before
//! they leave a controller.

use libm::fabsf;

/// Saturate `value` to `[-limit, +limit]`.
///
/// Saturates instead of wrapping. A negative `limit` is treated as its
/// magnitude. A NaN value or bound collapses to zero.
pub fn limit(value: f32, limit: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    let bound = fabsf(limit);
    if bound.is_nan() {
        return 0.0;
    }
    value.clamp(-bound, bound)
}

/// Saturate a motor command to the `[-1.0, +1.0]` output range.
#[inline]
pub fn clamp_output(value: f32) -> f32 {
    limit(value, 1.0)
}

/// Fold a raw error on a wrap-around axis so it always points the short way.
///
/// `min`/`max` are the bounds of the measured axis (for a gyro yaw reading:
/// -180 and 180). When the raw error is larger than half the range, the
/// full range is added or subtracted once.
pub fn fold_wrapped_error(raw_error: f32, min: f32, max: f32) -> f32 {
    let range = max - min;
    if fabsf(raw_error) > range / 2.0 {
        if raw_error > 0.0 {
            raw_error - range
        } else {
            raw_error + range
        }
    } else {
        raw_error
    }
}

/// True when `|error| <= tolerance` (boundary counts as on target).
#[inline]
pub fn within_tolerance(error: f32, tolerance: f32) -> bool {
    fabsf(error) <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_passes_small_values() {
        assert!((limit(0.3, 0.5) - 0.3).abs() < f32::EPSILON);
        assert!((limit(-0.3, 0.5) + 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_limit_saturates_symmetrically() {
        assert!((limit(4.0, 0.5) - 0.5).abs() < f32::EPSILON);
        assert!((limit(-4.0, 0.5) + 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_limit_negative_bound_uses_magnitude() {
        assert!((limit(2.0, -0.25) - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_limit_nan_is_zero() {
        assert_eq!(limit(f32::NAN, 1.0), 0.0);
    }

    #[test]
    fn test_clamp_output_range() {
        assert_eq!(clamp_output(1.7), 1.0);
        assert_eq!(clamp_output(-1.7), -1.0);
        assert_eq!(clamp_output(0.4), 0.4);
    }

    #[test]
    fn test_fold_short_way_across_seam() {
        // setpoint 170, reading -170
        let folded = fold_wrapped_error(170.0 - (-170.0), -180.0, 180.0);
        assert!((folded + 20.0).abs() < 1e-4, "got {}", folded);

        // setpoint -170, reading 170
        let folded = fold_wrapped_error(-170.0 - 170.0, -180.0, 180.0);
        assert!((folded - 20.0).abs() < 1e-4, "got {}", folded);
    }

    #[test]
    fn test_fold_leaves_half_range_alone() {
        assert!((fold_wrapped_error(180.0, -180.0, 180.0) - 180.0).abs() < 1e-4);
        assert!((fold_wrapped_error(-90.0, -180.0, 180.0) + 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_within_tolerance_boundary() {
        assert!(within_tolerance(2.0, 2.0));
        assert!(within_tolerance(-2.0, 2.0));
        assert!(!within_tolerance(2.01, 2.0));
    }
}
