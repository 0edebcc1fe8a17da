//! Mock robot for testing
//!
//! Bundles one mock handle per device and hands out [`RobotHardware`] built
//! from clones of them, so a test can drive sensors and read outputs while
//! the subsystems own the devices.

use super::{MockAnalogInput, MockDigitalInput, MockEncoder, MockHeading, MockMotor, MockSolenoid};
use crate::platform::traits::{EncoderInput, HeadingSensor};
use crate::robot::{DriveHardware, ElevatorHardware, IntakeHardware, RobotHardware};
use totebot_core::pneumatics::PressureTransducer;

/// Drivetrain travel per tick at full command (inches)
const DRIVE_INCHES_PER_TICK: f32 = 2.0;
/// Heading change per tick per unit of left/right command difference (degrees)
const TURN_DEG_PER_TICK: f32 = 3.0;
/// Lift travel per tick at full command (inches)
const LIFT_INCHES_PER_TICK: f32 = 0.2;

/// Mock robot
///
/// # Example
///
/// ```
/// use totebot::config::RobotConfig;
/// use totebot::platform::mock::MockRobot;
/// use totebot::robot::Subsystems;
///
/// let mock = MockRobot::new();
/// let mut subsystems = Subsystems::new(&RobotConfig::default(), mock.hardware());
/// subsystems.drive.controller_mut().tank_drive(0.5, 0.5);
/// subsystems.update();
/// assert_eq!(mock.drive_left_motor.command(), 0.5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockRobot {
    pub drive_left_motor: MockMotor,
    pub drive_right_motor: MockMotor,
    pub drive_left_encoder: MockEncoder,
    pub drive_right_encoder: MockEncoder,
    pub heading: MockHeading,
    pub lift_left_motor: MockMotor,
    pub lift_right_motor: MockMotor,
    pub lift_left_encoder: MockEncoder,
    pub lift_right_encoder: MockEncoder,
    pub lift_home: MockDigitalInput,
    pub tote: MockDigitalInput,
    pub intake_left_wheel: MockMotor,
    pub intake_right_wheel: MockMotor,
    pub intake_left_arm: MockSolenoid,
    pub intake_right_arm: MockSolenoid,
    pub pressure: MockAnalogInput,
}

impl MockRobot {
    /// Robot at rest with the lift on its home sensor
    pub fn new() -> Self {
        let mock = Self::default();
        mock.lift_home.set_level(true);
        mock
    }

    /// Device bundle for `Subsystems::new`; every device is a clone of a
    /// handle kept here
    pub fn hardware(&self) -> RobotHardware {
        RobotHardware {
            drive: DriveHardware {
                left_motor: Box::new(self.drive_left_motor.clone()),
                right_motor: Box::new(self.drive_right_motor.clone()),
                left_encoder: Box::new(self.drive_left_encoder.clone()),
                right_encoder: Box::new(self.drive_right_encoder.clone()),
                heading: Box::new(self.heading.clone()),
            },
            elevator: ElevatorHardware {
                left_motor: Box::new(self.lift_left_motor.clone()),
                right_motor: Box::new(self.lift_right_motor.clone()),
                left_encoder: Box::new(self.lift_left_encoder.clone()),
                right_encoder: Box::new(self.lift_right_encoder.clone()),
                home: Box::new(self.lift_home.clone()),
                tote: Box::new(self.tote.clone()),
            },
            intake: IntakeHardware {
                left_wheel: Box::new(self.intake_left_wheel.clone()),
                right_wheel: Box::new(self.intake_right_wheel.clone()),
                left_arm: Box::new(self.intake_left_arm.clone()),
                right_arm: Box::new(self.intake_right_arm.clone()),
            },
            pressure: Box::new(self.pressure.clone()),
        }
    }

    /// Set the transducer voltage that reads as `psi` under `transducer`
    pub fn set_pressure_psi(&self, psi: f32, transducer: &PressureTransducer) {
        self.pressure
            .set_voltage((psi - transducer.offset) / transducer.scale);
    }

    /// Move the mechanisms one tick according to the last motor commands.
    ///
    /// A crude plant: sides travel in proportion to their command, the
    /// heading turns with the left/right difference, and the lift bottoms out
    /// on its home sensor. `period_secs` scales the reported lift rate.
    pub fn simulate_tick(&self, period_secs: f32) {
        let left = self.drive_left_motor.command();
        let right = self.drive_right_motor.command();
        self.drive_left_encoder.advance(left * DRIVE_INCHES_PER_TICK);
        self.drive_right_encoder.advance(right * DRIVE_INCHES_PER_TICK);
        let heading = self.heading.heading_deg().unwrap_or(0.0);
        self.heading
            .set_heading(wrap_heading(heading + (left - right) * TURN_DEG_PER_TICK));

        // Right lift motor is mounted mirrored
        let sides = [
            (&self.lift_left_encoder, self.lift_left_motor.command()),
            (&self.lift_right_encoder, -self.lift_right_motor.command()),
        ];
        let mut at_home = true;
        for (encoder, command) in sides {
            let before = encoder.distance().unwrap_or(0.0);
            let after = (before + command * LIFT_INCHES_PER_TICK).max(0.0);
            encoder.set_distance(after);
            encoder.set_rate((after - before) / period_secs);
            at_home &= after <= 0.0;
        }
        self.lift_home.set_level(at_home);
    }
}

fn wrap_heading(degrees: f32) -> f32 {
    (degrees + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::traits::{DigitalInput, MotorOutput};

    #[test]
    fn test_wrap_heading() {
        assert!((wrap_heading(190.0) + 170.0).abs() < 1e-4);
        assert!((wrap_heading(-190.0) - 170.0).abs() < 1e-4);
        assert!((wrap_heading(45.0) - 45.0).abs() < 1e-4);
    }

    #[test]
    fn test_simulate_drive_forward() {
        let mock = MockRobot::new();
        mock.drive_left_motor.clone().set_command(0.5).unwrap();
        mock.drive_right_motor.clone().set_command(0.5).unwrap();
        mock.simulate_tick(0.02);
        assert_eq!(mock.drive_left_encoder.distance().unwrap(), 1.0);
        assert_eq!(mock.heading.heading_deg().unwrap(), 0.0);
    }

    #[test]
    fn test_simulate_lift_leaves_home() {
        let mock = MockRobot::new();
        mock.lift_left_motor.clone().set_command(1.0).unwrap();
        mock.lift_right_motor.clone().set_command(-1.0).unwrap();
        mock.simulate_tick(0.02);
        assert!((mock.lift_right_encoder.distance().unwrap() - 0.2).abs() < 1e-6);
        assert!((mock.lift_left_encoder.rate().unwrap() - 10.0).abs() < 1e-4);
        assert!(!mock.lift_home.read().unwrap());
    }
}
