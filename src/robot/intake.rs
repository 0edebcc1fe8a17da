//! Ground intake subsystem

use totebot_core::intake::IntakeController;
use totebot_core::parameters::IntakeParams;

use super::subsystem::{log_write, Subsystem};
use crate::platform::traits::{MotorOutput, SolenoidOutput};

/// Devices owned by the intake
pub struct IntakeHardware {
    /// Left intake wheel
    pub left_wheel: Box<dyn MotorOutput>,
    /// Right intake wheel
    pub right_wheel: Box<dyn MotorOutput>,
    /// First arm valve
    pub left_arm: Box<dyn SolenoidOutput>,
    /// Second arm valve
    pub right_arm: Box<dyn SolenoidOutput>,
}

/// Intake: an `IntakeController` bound to its devices
pub struct IntakeSubsystem {
    controller: IntakeController,
    hardware: IntakeHardware,
}

impl IntakeSubsystem {
    /// Create the subsystem with wheels stopped and arms open
    pub fn new(params: IntakeParams, hardware: IntakeHardware) -> Self {
        Self {
            controller: IntakeController::new(params),
            hardware,
        }
    }

    /// Controller, for queries
    pub fn controller(&self) -> &IntakeController {
        &self.controller
    }

    /// Controller, for commands
    pub fn controller_mut(&mut self) -> &mut IntakeController {
        &mut self.controller
    }
}

impl Subsystem for IntakeSubsystem {
    fn name(&self) -> &'static str {
        "intake"
    }

    fn update(&mut self) {
        let output = self.controller.update();
        log_write(
            self.hardware.left_wheel.set_command(output.left_wheel),
            "intake left wheel",
        );
        log_write(
            self.hardware.right_wheel.set_command(output.right_wheel),
            "intake right wheel",
        );
        let [left, right] = output.actuators;
        log_write(self.hardware.left_arm.set_state(left), "intake left arm");
        log_write(self.hardware.right_arm.set_state(right), "intake right arm");
    }
}
