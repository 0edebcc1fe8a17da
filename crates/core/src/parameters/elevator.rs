//! Elevator Parameter Definitions
//!
//! # Parameters
//!
//! - `ELEV_MIN`, `ELEV_MAX` - Setpoint travel range in inches
//! - `ELEV_STRONG_P` - Proportional gain, strong tracking
//! - `ELEV_GENTLE_P`, `ELEV_GENTLE_D` - Gains, gentle tracking
//! - `ELEV_STRONG_MAX`, `ELEV_GENTLE_MAX` - Proportional term ceilings
//! - `ELEV_DAMP_MAX` - Rate damping ceiling (gentle only)
//! - `ELEV_STEER_P`, `ELEV_STEER_MAX` - Side-to-side steering gain and ceiling
//! - `ELEV_HOME_SPD` - Homing descent speed (magnitude)
//! - `ELEV_TOL` - On-target tolerance in inches
//! - `ELEV_TOTE_DBNC` - Tote sensor debounce, in ticks
//! - `ELEV_H_*` - Preset heights in inches

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::control::PidGains;

const DEFAULT_MIN_HEIGHT: f32 = 0.0;
const DEFAULT_MAX_HEIGHT: f32 = 36.0;
const DEFAULT_STRONG_P: f32 = 0.5;
const DEFAULT_GENTLE_P: f32 = 0.1;
const DEFAULT_GENTLE_D: f32 = 0.05;
const DEFAULT_STRONG_CEILING: f32 = 0.9;
const DEFAULT_GENTLE_CEILING: f32 = 0.4;
const DEFAULT_DAMP_CEILING: f32 = 0.2;
const DEFAULT_STEER_GAIN: f32 = 0.1;
const DEFAULT_STEER_CEILING: f32 = 0.15;
const DEFAULT_HOMING_SPEED: f32 = 0.1;
const DEFAULT_TOLERANCE: f32 = 0.5;
const DEFAULT_TOTE_DEBOUNCE: i32 = 5;

const DEFAULT_GROUND: f32 = 0.0;
const DEFAULT_STEP: f32 = 6.25;
const DEFAULT_READY: f32 = 14.0;
const DEFAULT_TOTE_ONE: f32 = 12.0;
const DEFAULT_TOTE_TWO: f32 = 24.0;
const DEFAULT_TOTE_THREE: f32 = 30.0;

const MAX_GAIN: f32 = 10.0;
const MAX_HEIGHT_LIMIT: f32 = 96.0;
const MAX_HOMING_SPEED: f32 = 0.5;
const MAX_TOLERANCE: f32 = 6.0;
const MAX_TOTE_DEBOUNCE: i32 = 100;

const PRESET_NAMES: [&str; PRESET_COUNT] = [
    "ELEV_H_GROUND",
    "ELEV_H_STEP",
    "ELEV_H_READY",
    "ELEV_H_TOTE1",
    "ELEV_H_TOTE2",
    "ELEV_H_TOTE3",
];

const PRESET_DEFAULTS: [f32; PRESET_COUNT] = [
    DEFAULT_GROUND,
    DEFAULT_STEP,
    DEFAULT_READY,
    DEFAULT_TOTE_ONE,
    DEFAULT_TOTE_TWO,
    DEFAULT_TOTE_THREE,
];

/// Number of named elevator heights
pub const PRESET_COUNT: usize = 6;

/// Named elevator heights
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ElevatorPreset {
    /// Carriage fully down
    Ground,
    /// Clear of the scoring step
    Step,
    /// Forks above an incoming tote
    ReadyToIntake,
    /// Holding one tote
    ToteOne,
    /// Holding two totes
    ToteTwo,
    /// Holding three totes
    ToteThree,
}

impl ElevatorPreset {
    fn index(self) -> usize {
        match self {
            ElevatorPreset::Ground => 0,
            ElevatorPreset::Step => 1,
            ElevatorPreset::ReadyToIntake => 2,
            ElevatorPreset::ToteOne => 3,
            ElevatorPreset::ToteTwo => 4,
            ElevatorPreset::ToteThree => 5,
        }
    }
}

/// Elevator tuning and travel limits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevatorParams {
    /// Lowest allowed setpoint (inches)
    pub min_height: f32,
    /// Highest allowed setpoint (inches)
    pub max_height: f32,
    /// Gains used with strong tracking (P only)
    pub strong_gains: PidGains,
    /// Gains used with gentle tracking (P and D)
    pub gentle_gains: PidGains,
    /// Ceiling on the P term, strong tracking
    pub strong_p_ceiling: f32,
    /// Ceiling on the P term, gentle tracking
    pub gentle_p_ceiling: f32,
    /// Ceiling on the D term, gentle tracking
    pub gentle_d_ceiling: f32,
    /// Gain on the difference between the two side errors
    pub steer_gain: f32,
    /// Ceiling on the steering term
    pub steer_ceiling: f32,
    /// Descent speed while homing (positive magnitude)
    pub homing_speed: f32,
    /// Default on-target tolerance (inches)
    pub tolerance: f32,
    /// Consecutive samples before the tote sensor changes level
    pub tote_debounce_samples: u16,
    /// Preset heights, indexed by `ElevatorPreset`
    pub presets: [f32; PRESET_COUNT],
}

impl Default for ElevatorParams {
    fn default() -> Self {
        Self {
            min_height: DEFAULT_MIN_HEIGHT,
            max_height: DEFAULT_MAX_HEIGHT,
            strong_gains: PidGains::proportional(DEFAULT_STRONG_P),
            gentle_gains: PidGains::pd(DEFAULT_GENTLE_P, DEFAULT_GENTLE_D),
            strong_p_ceiling: DEFAULT_STRONG_CEILING,
            gentle_p_ceiling: DEFAULT_GENTLE_CEILING,
            gentle_d_ceiling: DEFAULT_DAMP_CEILING,
            steer_gain: DEFAULT_STEER_GAIN,
            steer_ceiling: DEFAULT_STEER_CEILING,
            homing_speed: DEFAULT_HOMING_SPEED,
            tolerance: DEFAULT_TOLERANCE,
            tote_debounce_samples: DEFAULT_TOTE_DEBOUNCE as u16,
            presets: PRESET_DEFAULTS,
        }
    }
}

impl ElevatorParams {
    /// Height for a named preset (inches)
    pub fn preset_height(&self, preset: ElevatorPreset) -> f32 {
        self.presets[preset.index()]
    }

    /// Register elevator parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        let floats = [
            ("ELEV_MIN", DEFAULT_MIN_HEIGHT),
            ("ELEV_MAX", DEFAULT_MAX_HEIGHT),
            ("ELEV_STRONG_P", DEFAULT_STRONG_P),
            ("ELEV_GENTLE_P", DEFAULT_GENTLE_P),
            ("ELEV_GENTLE_D", DEFAULT_GENTLE_D),
            ("ELEV_STRONG_MAX", DEFAULT_STRONG_CEILING),
            ("ELEV_GENTLE_MAX", DEFAULT_GENTLE_CEILING),
            ("ELEV_DAMP_MAX", DEFAULT_DAMP_CEILING),
            ("ELEV_STEER_P", DEFAULT_STEER_GAIN),
            ("ELEV_STEER_MAX", DEFAULT_STEER_CEILING),
            ("ELEV_HOME_SPD", DEFAULT_HOMING_SPEED),
            ("ELEV_TOL", DEFAULT_TOLERANCE),
        ];
        for (name, value) in floats {
            store.register(name, ParamValue::Float(value), ParamFlags::empty())?;
        }
        for (name, value) in PRESET_NAMES.iter().zip(PRESET_DEFAULTS) {
            store.register(name, ParamValue::Float(value), ParamFlags::empty())?;
        }
        store.register(
            "ELEV_TOTE_DBNC",
            ParamValue::Int(DEFAULT_TOTE_DEBOUNCE),
            ParamFlags::empty(),
        )?;
        Ok(())
    }

    /// Load elevator parameters from parameter store
    pub fn from_store(store: &ParameterStore) -> Self {
        let unit = |name, default| store.get_float(name, default, 0.0, 1.0);
        let gain = |name, default| store.get_float(name, default, 0.0, MAX_GAIN);

        let min_height = store.get_float("ELEV_MIN", DEFAULT_MIN_HEIGHT, 0.0, MAX_HEIGHT_LIMIT);
        let max_height =
            store.get_float("ELEV_MAX", DEFAULT_MAX_HEIGHT, min_height, MAX_HEIGHT_LIMIT);

        let mut presets = PRESET_DEFAULTS;
        for (slot, (name, default)) in presets
            .iter_mut()
            .zip(PRESET_NAMES.iter().zip(PRESET_DEFAULTS))
        {
            *slot = store.get_float(name, default, min_height, max_height);
        }

        Self {
            min_height,
            max_height,
            strong_gains: PidGains::proportional(gain("ELEV_STRONG_P", DEFAULT_STRONG_P)),
            gentle_gains: PidGains::pd(
                gain("ELEV_GENTLE_P", DEFAULT_GENTLE_P),
                gain("ELEV_GENTLE_D", DEFAULT_GENTLE_D),
            ),
            strong_p_ceiling: unit("ELEV_STRONG_MAX", DEFAULT_STRONG_CEILING),
            gentle_p_ceiling: unit("ELEV_GENTLE_MAX", DEFAULT_GENTLE_CEILING),
            gentle_d_ceiling: unit("ELEV_DAMP_MAX", DEFAULT_DAMP_CEILING),
            steer_gain: gain("ELEV_STEER_P", DEFAULT_STEER_GAIN),
            steer_ceiling: unit("ELEV_STEER_MAX", DEFAULT_STEER_CEILING),
            homing_speed: store.get_float(
                "ELEV_HOME_SPD",
                DEFAULT_HOMING_SPEED,
                0.0,
                MAX_HOMING_SPEED,
            ),
            tolerance: store.get_float("ELEV_TOL", DEFAULT_TOLERANCE, 0.0, MAX_TOLERANCE),
            tote_debounce_samples: store.get_int(
                "ELEV_TOTE_DBNC",
                DEFAULT_TOTE_DEBOUNCE,
                1,
                MAX_TOTE_DEBOUNCE,
            ) as u16,
            presets,
        }
    }

    /// Validate elevator parameters
    pub fn is_valid(&self) -> bool {
        if self.min_height < 0.0 || self.max_height > MAX_HEIGHT_LIMIT {
            return false;
        }
        if self.max_height <= self.min_height {
            return false;
        }
        let ceilings = [
            self.strong_p_ceiling,
            self.gentle_p_ceiling,
            self.gentle_d_ceiling,
            self.steer_ceiling,
        ];
        if !ceilings.iter().all(|c| (0.0..=1.0).contains(c)) {
            return false;
        }
        if !(0.0..=MAX_HOMING_SPEED).contains(&self.homing_speed) {
            return false;
        }
        if self.tote_debounce_samples == 0 {
            return false;
        }
        self.presets
            .iter()
            .all(|h| (self.min_height..=self.max_height).contains(h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elevator_params_defaults() {
        let params = ElevatorParams::default();
        assert!((params.max_height - 36.0).abs() < 0.001);
        assert!((params.homing_speed - 0.1).abs() < 0.001);
        assert_eq!(params.tote_debounce_samples, 5);
        assert!(params.is_valid());
    }

    #[test]
    fn test_preset_lookup() {
        let params = ElevatorParams::default();
        assert!((params.preset_height(ElevatorPreset::Ground) - 0.0).abs() < 0.001);
        assert!((params.preset_height(ElevatorPreset::ToteThree) - 30.0).abs() < 0.001);
    }

    #[test]
    fn test_from_store_reads_defaults() {
        let mut store = ParameterStore::new();
        ElevatorParams::register_defaults(&mut store).unwrap();
        assert_eq!(ElevatorParams::from_store(&store), ElevatorParams::default());
    }

    #[test]
    fn test_presets_clamped_to_travel() {
        let mut store = ParameterStore::new();
        ElevatorParams::register_defaults(&mut store).unwrap();
        store.set("ELEV_MAX", ParamValue::Float(20.0)).unwrap();

        let params = ElevatorParams::from_store(&store);
        assert!((params.preset_height(ElevatorPreset::ToteThree) - 20.0).abs() < 0.001);
        assert!(params.is_valid());
    }

    #[test]
    fn test_ceilings_clamped_to_unit() {
        let mut store = ParameterStore::new();
        ElevatorParams::register_defaults(&mut store).unwrap();
        store.set("ELEV_STEER_MAX", ParamValue::Float(3.0)).unwrap();
        store.set("ELEV_TOTE_DBNC", ParamValue::Int(0)).unwrap();

        let params = ElevatorParams::from_store(&store);
        assert!((params.steer_ceiling - 1.0).abs() < 0.001);
        assert_eq!(params.tote_debounce_samples, 1);
    }

    #[test]
    fn test_is_valid_rejects_preset_outside_range() {
        let mut params = ElevatorParams::default();
        params.presets[0] = -1.0;
        assert!(!params.is_valid());
    }
}
