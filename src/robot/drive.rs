//! Drivetrain subsystem

use totebot_core::drive::{DriveController, DriveMode, DriveSensors};
use totebot_core::parameters::DriveParams;

use super::subsystem::{log_write, read_or_keep, Subsystem};
use crate::log_info;
use crate::platform::traits::{EncoderInput, HeadingSensor, MotorOutput};

/// Devices owned by the drivetrain
pub struct DriveHardware {
    /// Left side speed controller
    pub left_motor: Box<dyn MotorOutput>,
    /// Right side speed controller
    pub right_motor: Box<dyn MotorOutput>,
    /// Left side encoder
    pub left_encoder: Box<dyn EncoderInput>,
    /// Right side encoder
    pub right_encoder: Box<dyn EncoderInput>,
    /// Gyro
    pub heading: Box<dyn HeadingSensor>,
}

/// Drivetrain: a `DriveController` bound to its devices
pub struct DriveSubsystem {
    controller: DriveController,
    hardware: DriveHardware,
    sensors: DriveSensors,
}

impl DriveSubsystem {
    /// Create the subsystem in tank mode at rest
    pub fn new(params: DriveParams, hardware: DriveHardware) -> Self {
        Self {
            controller: DriveController::new(params),
            hardware,
            sensors: DriveSensors::default(),
        }
    }

    /// Controller, for queries
    pub fn controller(&self) -> &DriveController {
        &self.controller
    }

    /// Controller, for commands
    pub fn controller_mut(&mut self) -> &mut DriveController {
        &mut self.controller
    }

    fn sample(&mut self) -> DriveSensors {
        let last = self.sensors;
        self.sensors = DriveSensors {
            left_distance: read_or_keep(
                self.hardware.left_encoder.distance(),
                last.left_distance,
                "drive left encoder",
            ),
            right_distance: read_or_keep(
                self.hardware.right_encoder.distance(),
                last.right_distance,
                "drive right encoder",
            ),
            heading_deg: read_or_keep(
                self.hardware.heading.heading_deg(),
                last.heading_deg,
                "gyro",
            ),
        };
        self.sensors
    }
}

impl Subsystem for DriveSubsystem {
    fn name(&self) -> &'static str {
        "drive"
    }

    fn update(&mut self) {
        let sensors = self.sample();
        let output = self.controller.update(&sensors);
        log_write(
            self.hardware.left_motor.set_command(output.left),
            "drive left motor",
        );
        log_write(
            self.hardware.right_motor.set_command(output.right),
            "drive right motor",
        );
    }

    fn teleop_init(&mut self) {
        log_info!("drive: tank control");
        self.controller.set_mode(DriveMode::Tank);
        self.controller.tank_drive(0.0, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{MockEncoder, MockHeading, MockMotor};

    struct Rig {
        left_motor: MockMotor,
        right_motor: MockMotor,
        left_encoder: MockEncoder,
        right_encoder: MockEncoder,
        heading: MockHeading,
    }

    fn rig() -> (DriveSubsystem, Rig) {
        let rig = Rig {
            left_motor: MockMotor::new(),
            right_motor: MockMotor::new(),
            left_encoder: MockEncoder::new(),
            right_encoder: MockEncoder::new(),
            heading: MockHeading::new(),
        };
        let hardware = DriveHardware {
            left_motor: Box::new(rig.left_motor.clone()),
            right_motor: Box::new(rig.right_motor.clone()),
            left_encoder: Box::new(rig.left_encoder.clone()),
            right_encoder: Box::new(rig.right_encoder.clone()),
            heading: Box::new(rig.heading.clone()),
        };
        (DriveSubsystem::new(DriveParams::default(), hardware), rig)
    }

    #[test]
    fn test_tank_reaches_motors() {
        let (mut drive, rig) = rig();
        drive.controller_mut().tank_drive(0.3, -0.2);
        drive.update();
        assert_eq!(rig.left_motor.command(), 0.3);
        assert_eq!(rig.right_motor.command(), -0.2);
    }

    #[test]
    fn test_pivot_uses_gyro() {
        let (mut drive, rig) = rig();
        rig.heading.set_heading(80.0);
        drive.controller_mut().set_heading_setpoint(90.0);
        drive.controller_mut().set_mode(DriveMode::HoldHeading);
        drive.update();
        assert!(rig.left_motor.command() > 0.0);
        assert!((rig.left_motor.command() + rig.right_motor.command()).abs() < 1e-6);
    }

    #[test]
    fn test_failed_encoder_keeps_last_reading() {
        let (mut drive, rig) = rig();
        rig.left_encoder.set_distance(10.0);
        rig.right_encoder.set_distance(10.0);
        drive.update();

        rig.left_encoder.set_distance(50.0);
        rig.left_encoder.set_failing(true);
        drive.update();
        assert!((drive.controller().distance() - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_failed_motor_does_not_stop_the_other_side() {
        let (mut drive, rig) = rig();
        rig.left_motor.set_failing(true);
        drive.controller_mut().tank_drive(0.5, 0.5);
        drive.update();
        assert_eq!(rig.left_motor.command(), 0.0);
        assert_eq!(rig.right_motor.command(), 0.5);
    }

    #[test]
    fn test_teleop_init_drops_to_tank_at_rest() {
        let (mut drive, rig) = rig();
        rig.heading.set_heading(0.0);
        drive.controller_mut().set_heading_setpoint(90.0);
        drive.controller_mut().set_mode(DriveMode::HoldHeading);
        drive.update();
        assert_eq!(rig.left_motor.command(), 1.0);

        drive.teleop_init();
        assert_eq!(drive.controller().mode(), DriveMode::Tank);
        drive.update();
        assert_eq!(rig.left_motor.command(), 0.0);
        assert_eq!(rig.right_motor.command(), 0.0);
    }
}
