//! Ground intake controller
//!
//! Two wheels pull totes in or push them out, and a pair of pneumatic
//! actuators swing the intake arms closed around a tote. The arms go through
//! the pressure gate like every other pneumatic mechanism.

use crate::control::clamp_output;
use crate::parameters::IntakeParams;
use crate::pneumatics::GatedActuatorPair;

/// Intake wheel behaviour
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WheelsState {
    /// Wheels off
    #[default]
    Stopped,
    /// Pull a tote in at full speed
    Intake,
    /// Pull a tote in gently
    SlowIntake,
    /// Push a tote out
    Output,
}

/// Intake arm position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorsState {
    /// Arms apart (actuators off)
    #[default]
    Open,
    /// Arms closed around a tote (actuators on)
    Closed,
}

impl ActuatorsState {
    fn as_level(self) -> bool {
        matches!(self, ActuatorsState::Closed)
    }

    fn from_level(on: bool) -> Self {
        if on {
            ActuatorsState::Closed
        } else {
            ActuatorsState::Open
        }
    }
}

/// Intake commands for one tick
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IntakeOutput {
    /// Left wheel command (-1.0 to +1.0)
    pub left_wheel: f32,
    /// Right wheel command (-1.0 to +1.0)
    pub right_wheel: f32,
    /// Solenoid levels for both arm actuators
    pub actuators: [bool; 2],
}

/// Intake controller
pub struct IntakeController {
    params: IntakeParams,
    wheels: WheelsState,
    arms: GatedActuatorPair,
}

impl IntakeController {
    /// Create a controller with wheels stopped and arms open
    pub fn new(params: IntakeParams) -> Self {
        let arms = GatedActuatorPair::new(false, params.arm_on_psi, params.arm_off_psi);
        Self {
            params,
            wheels: WheelsState::Stopped,
            arms,
        }
    }

    /// Set the wheel behaviour
    pub fn set_wheels(&mut self, state: WheelsState) {
        self.wheels = state;
    }

    /// Current wheel behaviour
    pub fn wheels(&self) -> WheelsState {
        self.wheels
    }

    /// Request an arm position; dropped if `pressure_psi` is too low
    pub fn set_actuators(&mut self, state: ActuatorsState, pressure_psi: f32) {
        self.arms.request_state(state.as_level(), pressure_psi);
    }

    /// Move the arms regardless of pressure
    pub fn force_actuators(&mut self, state: ActuatorsState) {
        self.arms.force_state(state.as_level());
    }

    /// Actual arm position
    pub fn actuators(&self) -> ActuatorsState {
        ActuatorsState::from_level(self.arms.state())
    }

    /// Active tuning
    pub fn params(&self) -> &IntakeParams {
        &self.params
    }

    /// Compute this tick's commands
    pub fn update(&self) -> IntakeOutput {
        let speed = match self.wheels {
            WheelsState::Stopped => 0.0,
            WheelsState::Intake => self.params.intake_speed,
            WheelsState::SlowIntake => self.params.slow_intake_speed,
            WheelsState::Output => -self.params.output_speed,
        };
        let speed = clamp_output(speed);
        IntakeOutput {
            left_wheel: speed,
            right_wheel: speed,
            actuators: self.arms.outputs(),
        }
    }
}
