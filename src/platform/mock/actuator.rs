//! Mock output devices for testing

use std::cell::Cell;
use std::rc::Rc;

use crate::platform::{
    traits::{MotorOutput, SolenoidOutput},
    PlatformError, Result,
};

/// Mock motor controller
///
/// Clones share state: keep one handle in the test, hand the other to the
/// subsystem.
#[derive(Debug, Clone, Default)]
pub struct MockMotor {
    command: Rc<Cell<f32>>,
    writes: Rc<Cell<u32>>,
    failing: Rc<Cell<bool>>,
}

impl MockMotor {
    /// Create a motor at rest
    pub fn new() -> Self {
        Self::default()
    }

    /// Last accepted command
    pub fn command(&self) -> f32 {
        self.command.get()
    }

    /// Number of accepted writes
    pub fn writes(&self) -> u32 {
        self.writes.get()
    }

    /// Make subsequent writes fail (simulates a dropped controller)
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }
}

impl MotorOutput for MockMotor {
    fn set_command(&mut self, command: f32) -> Result<()> {
        if self.failing.get() {
            return Err(PlatformError::NotResponding {
                device: "mock motor",
            });
        }
        self.command.set(command);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

/// Mock solenoid valve
#[derive(Debug, Clone, Default)]
pub struct MockSolenoid {
    on: Rc<Cell<bool>>,
    failing: Rc<Cell<bool>>,
}

impl MockSolenoid {
    /// Create a released valve
    pub fn new() -> Self {
        Self::default()
    }

    /// Last accepted state
    pub fn is_on(&self) -> bool {
        self.on.get()
    }

    /// Make subsequent writes fail
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }
}

impl SolenoidOutput for MockSolenoid {
    fn set_state(&mut self, on: bool) -> Result<()> {
        if self.failing.get() {
            return Err(PlatformError::Fault {
                device: "mock solenoid",
            });
        }
        self.on.set(on);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_motor_shares_state_between_clones() {
        let motor = MockMotor::new();
        let mut handle = motor.clone();
        handle.set_command(0.5).unwrap();
        assert_eq!(motor.command(), 0.5);
        assert_eq!(motor.writes(), 1);
    }

    #[test]
    fn test_mock_motor_failure_keeps_last_command() {
        let mut motor = MockMotor::new();
        motor.set_command(0.25).unwrap();
        motor.set_failing(true);
        assert!(motor.set_command(1.0).is_err());
        assert_eq!(motor.command(), 0.25);
    }

    #[test]
    fn test_mock_solenoid() {
        let mut solenoid = MockSolenoid::new();
        solenoid.set_state(true).unwrap();
        assert!(solenoid.is_on());
        solenoid.set_failing(true);
        assert_eq!(
            solenoid.set_state(false),
            Err(PlatformError::Fault {
                device: "mock solenoid"
            })
        );
        assert!(solenoid.is_on());
    }
}
