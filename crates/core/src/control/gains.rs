//! PID tuning coefficients

/// Proportional/integral/derivative coefficients for one control loop.
///
/// Gains never change field by field: a controller swaps the whole value
/// so a tick never sees a half-updated tuning.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PidGains {
    /// Proportional gain
    pub p: f32,
    /// Integral gain
    pub i: f32,
    /// Derivative gain
    pub d: f32,
}

impl PidGains {
    /// Create a full set of gains
    pub const fn new(p: f32, i: f32, d: f32) -> Self {
        Self { p, i, d }
    }

    /// Create proportional-only gains
    pub const fn proportional(p: f32) -> Self {
        Self { p, i: 0.0, d: 0.0 }
    }

    /// Create proportional-derivative gains
    pub const fn pd(p: f32, d: f32) -> Self {
        Self { p, i: 0.0, d }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proportional_zeroes_other_terms() {
        let gains = PidGains::proportional(0.25);
        assert_eq!(gains, PidGains::new(0.25, 0.0, 0.0));
    }

    #[test]
    fn test_pd_zeroes_integral() {
        let gains = PidGains::pd(0.1, 0.02);
        assert!((gains.i - 0.0).abs() < f32::EPSILON);
        assert!((gains.d - 0.02).abs() < f32::EPSILON);
    }
}
