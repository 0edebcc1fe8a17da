//! Drivetrain Parameter Definitions
//!
//! # Parameters
//!
//! - `DRV_STR_P`, `DRV_STR_I`, `DRV_STR_D` - Straight-distance gains
//! - `DRV_PIV_P`, `DRV_PIV_I`, `DRV_PIV_D` - Heading/pivot gains
//! - `DRV_HDG_MIN`, `DRV_HDG_MAX` - Heading sensor range in degrees
//!   (read-only, fixed by the sensor)
//! - `DRV_DIST_TOL` - Default distance on-target tolerance in inches
//! - `DRV_HDG_TOL` - Default heading on-target tolerance in degrees

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::control::PidGains;

const DEFAULT_STRAIGHT_P: f32 = 0.1;
const DEFAULT_STRAIGHT_I: f32 = 0.01;
const DEFAULT_STRAIGHT_D: f32 = 0.001;
const DEFAULT_PIVOT_P: f32 = 0.02;
const DEFAULT_PIVOT_I: f32 = 0.0;
const DEFAULT_PIVOT_D: f32 = 0.0;
const DEFAULT_HEADING_MIN: f32 = -180.0;
const DEFAULT_HEADING_MAX: f32 = 180.0;
const DEFAULT_DISTANCE_TOL: f32 = 1.0;
const DEFAULT_HEADING_TOL: f32 = 5.0;

const MIN_GAIN: f32 = 0.0;
const MAX_GAIN: f32 = 10.0;
const MIN_TOL: f32 = 0.0;
const MAX_DISTANCE_TOL: f32 = 24.0;
const MAX_HEADING_TOL: f32 = 45.0;

/// Drivetrain tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveParams {
    /// Gains for straight-distance hold
    pub straight_gains: PidGains,
    /// Gains for heading hold and pivots
    pub pivot_gains: PidGains,
    /// Lower bound of the heading sensor range (degrees)
    pub heading_min_deg: f32,
    /// Upper bound of the heading sensor range (degrees)
    pub heading_max_deg: f32,
    /// Default distance tolerance for actions (inches)
    pub distance_tolerance: f32,
    /// Default heading tolerance for actions (degrees)
    pub heading_tolerance_deg: f32,
}

impl Default for DriveParams {
    fn default() -> Self {
        Self {
            straight_gains: PidGains::new(DEFAULT_STRAIGHT_P, DEFAULT_STRAIGHT_I, DEFAULT_STRAIGHT_D),
            pivot_gains: PidGains::new(DEFAULT_PIVOT_P, DEFAULT_PIVOT_I, DEFAULT_PIVOT_D),
            heading_min_deg: DEFAULT_HEADING_MIN,
            heading_max_deg: DEFAULT_HEADING_MAX,
            distance_tolerance: DEFAULT_DISTANCE_TOL,
            heading_tolerance_deg: DEFAULT_HEADING_TOL,
        }
    }
}

impl DriveParams {
    /// Register drivetrain parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        let tunable = [
            ("DRV_STR_P", DEFAULT_STRAIGHT_P),
            ("DRV_STR_I", DEFAULT_STRAIGHT_I),
            ("DRV_STR_D", DEFAULT_STRAIGHT_D),
            ("DRV_PIV_P", DEFAULT_PIVOT_P),
            ("DRV_PIV_I", DEFAULT_PIVOT_I),
            ("DRV_PIV_D", DEFAULT_PIVOT_D),
            ("DRV_DIST_TOL", DEFAULT_DISTANCE_TOL),
            ("DRV_HDG_TOL", DEFAULT_HEADING_TOL),
        ];
        for (name, value) in tunable {
            store.register(name, ParamValue::Float(value), ParamFlags::empty())?;
        }

        store.register(
            "DRV_HDG_MIN",
            ParamValue::Float(DEFAULT_HEADING_MIN),
            ParamFlags::READ_ONLY,
        )?;
        store.register(
            "DRV_HDG_MAX",
            ParamValue::Float(DEFAULT_HEADING_MAX),
            ParamFlags::READ_ONLY,
        )?;

        Ok(())
    }

    /// Load drivetrain parameters from parameter store
    pub fn from_store(store: &ParameterStore) -> Self {
        let gain = |name, default| store.get_float(name, default, MIN_GAIN, MAX_GAIN);
        Self {
            straight_gains: PidGains::new(
                gain("DRV_STR_P", DEFAULT_STRAIGHT_P),
                gain("DRV_STR_I", DEFAULT_STRAIGHT_I),
                gain("DRV_STR_D", DEFAULT_STRAIGHT_D),
            ),
            pivot_gains: PidGains::new(
                gain("DRV_PIV_P", DEFAULT_PIVOT_P),
                gain("DRV_PIV_I", DEFAULT_PIVOT_I),
                gain("DRV_PIV_D", DEFAULT_PIVOT_D),
            ),
            heading_min_deg: store.get_float("DRV_HDG_MIN", DEFAULT_HEADING_MIN, -360.0, 0.0),
            heading_max_deg: store.get_float("DRV_HDG_MAX", DEFAULT_HEADING_MAX, 0.0, 360.0),
            distance_tolerance: store.get_float(
                "DRV_DIST_TOL",
                DEFAULT_DISTANCE_TOL,
                MIN_TOL,
                MAX_DISTANCE_TOL,
            ),
            heading_tolerance_deg: store.get_float(
                "DRV_HDG_TOL",
                DEFAULT_HEADING_TOL,
                MIN_TOL,
                MAX_HEADING_TOL,
            ),
        }
    }

    /// Validate drivetrain parameters
    pub fn is_valid(&self) -> bool {
        let gains_ok = [self.straight_gains, self.pivot_gains].iter().all(|g| {
            [g.p, g.i, g.d]
                .iter()
                .all(|v| (MIN_GAIN..=MAX_GAIN).contains(v))
        });
        if !gains_ok {
            return false;
        }
        if self.heading_max_deg <= self.heading_min_deg {
            return false;
        }
        (MIN_TOL..=MAX_DISTANCE_TOL).contains(&self.distance_tolerance)
            && (MIN_TOL..=MAX_HEADING_TOL).contains(&self.heading_tolerance_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drive_params_defaults() {
        let params = DriveParams::default();
        assert!((params.straight_gains.p - 0.1).abs() < 0.001);
        assert!((params.straight_gains.i - 0.01).abs() < 0.001);
        assert!((params.heading_max_deg - params.heading_min_deg - 360.0).abs() < 0.001);
        assert!(params.is_valid());
    }

    #[test]
    fn test_from_store_reads_defaults() {
        let mut store = ParameterStore::new();
        DriveParams::register_defaults(&mut store).unwrap();
        assert_eq!(DriveParams::from_store(&store), DriveParams::default());
    }

    #[test]
    fn test_from_store_custom_and_clamped() {
        let mut store = ParameterStore::new();
        DriveParams::register_defaults(&mut store).unwrap();
        store.set("DRV_PIV_P", ParamValue::Float(0.05)).unwrap();
        store.set("DRV_STR_P", ParamValue::Float(99.0)).unwrap();
        store.set("DRV_HDG_TOL", ParamValue::Float(-1.0)).unwrap();

        let params = DriveParams::from_store(&store);
        assert!((params.pivot_gains.p - 0.05).abs() < 0.001);
        assert!((params.straight_gains.p - MAX_GAIN).abs() < 0.001);
        assert!((params.heading_tolerance_deg - 0.0).abs() < 0.001);
        assert!(params.is_valid());
    }

    #[test]
    fn test_heading_range_is_read_only() {
        let mut store = ParameterStore::new();
        DriveParams::register_defaults(&mut store).unwrap();
        assert!(store.set("DRV_HDG_MAX", ParamValue::Float(90.0)).is_err());
    }

    #[test]
    fn test_is_valid_rejects_inverted_range() {
        let params = DriveParams {
            heading_min_deg: 10.0,
            heading_max_deg: -10.0,
            ..DriveParams::default()
        };
        assert!(!params.is_valid());
    }
}
