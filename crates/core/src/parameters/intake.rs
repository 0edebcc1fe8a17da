//! Ground Intake Parameter Definitions
//!
//! # Parameters
//!
//! - `INTK_SPEED` - Wheel speed for normal intake
//! - `INTK_SLOW` - Wheel speed for slow intake
//! - `INTK_OUT` - Wheel speed magnitude when pushing a tote out
//! - `INTK_ARM_ON` - Pressure required to close the arms (PSI)
//! - `INTK_ARM_OFF` - Pressure required to open the arms (PSI)

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};

const DEFAULT_INTAKE_SPEED: f32 = 1.0;
const DEFAULT_SLOW_SPEED: f32 = 0.4;
const DEFAULT_OUTPUT_SPEED: f32 = 1.0;
const DEFAULT_ARM_ON: f32 = 40.0;
const DEFAULT_ARM_OFF: f32 = 20.0;

const MAX_PSI: f32 = 120.0;

/// Ground intake tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntakeParams {
    /// Wheel command for `WheelsState::Intake`
    pub intake_speed: f32,
    /// Wheel command for `WheelsState::SlowIntake`
    pub slow_intake_speed: f32,
    /// Wheel command magnitude for `WheelsState::Output`
    pub output_speed: f32,
    /// Pressure required to close the arms
    pub arm_on_psi: f32,
    /// Pressure required to open the arms
    pub arm_off_psi: f32,
}

impl Default for IntakeParams {
    fn default() -> Self {
        Self {
            intake_speed: DEFAULT_INTAKE_SPEED,
            slow_intake_speed: DEFAULT_SLOW_SPEED,
            output_speed: DEFAULT_OUTPUT_SPEED,
            arm_on_psi: DEFAULT_ARM_ON,
            arm_off_psi: DEFAULT_ARM_OFF,
        }
    }
}

impl IntakeParams {
    /// Register intake parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        let floats = [
            ("INTK_SPEED", DEFAULT_INTAKE_SPEED),
            ("INTK_SLOW", DEFAULT_SLOW_SPEED),
            ("INTK_OUT", DEFAULT_OUTPUT_SPEED),
            ("INTK_ARM_ON", DEFAULT_ARM_ON),
            ("INTK_ARM_OFF", DEFAULT_ARM_OFF),
        ];
        for (name, value) in floats {
            store.register(name, ParamValue::Float(value), ParamFlags::empty())?;
        }
        Ok(())
    }

    /// Load intake parameters from parameter store
    pub fn from_store(store: &ParameterStore) -> Self {
        Self {
            intake_speed: store.get_float("INTK_SPEED", DEFAULT_INTAKE_SPEED, 0.0, 1.0),
            slow_intake_speed: store.get_float("INTK_SLOW", DEFAULT_SLOW_SPEED, 0.0, 1.0),
            output_speed: store.get_float("INTK_OUT", DEFAULT_OUTPUT_SPEED, 0.0, 1.0),
            arm_on_psi: store.get_float("INTK_ARM_ON", DEFAULT_ARM_ON, 0.0, MAX_PSI),
            arm_off_psi: store.get_float("INTK_ARM_OFF", DEFAULT_ARM_OFF, 0.0, MAX_PSI),
        }
    }

    /// Validate intake parameters
    pub fn is_valid(&self) -> bool {
        let speeds = [self.intake_speed, self.slow_intake_speed, self.output_speed];
        if !speeds.iter().all(|s| (0.0..=1.0).contains(s)) {
            return false;
        }
        if self.slow_intake_speed > self.intake_speed {
            return false;
        }
        (0.0..=MAX_PSI).contains(&self.arm_on_psi) && (0.0..=MAX_PSI).contains(&self.arm_off_psi)
    }
}
