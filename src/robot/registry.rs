//! Subsystem registry
//!
//! Owns every subsystem plus the per-tick pressure sample. Autonomous actions
//! command the robot through this type, and the phase loop updates it once
//! per tick.

use totebot_core::pneumatics::PressureTransducer;

use super::drive::{DriveHardware, DriveSubsystem};
use super::elevator::{ElevatorHardware, ElevatorSubsystem};
use super::intake::{IntakeHardware, IntakeSubsystem};
use super::subsystem::{read_or_keep, Subsystem};
use crate::config::RobotConfig;
use crate::{log_debug, log_info};
use crate::platform::traits::AnalogInput;

/// Every device on the robot, grouped by owner
pub struct RobotHardware {
    /// Drivetrain devices
    pub drive: DriveHardware,
    /// Elevator devices
    pub elevator: ElevatorHardware,
    /// Intake devices
    pub intake: IntakeHardware,
    /// Pressure transducer channel
    pub pressure: Box<dyn AnalogInput>,
}

/// All subsystems, updated in a fixed order
pub struct Subsystems {
    /// Drivetrain
    pub drive: DriveSubsystem,
    /// Elevator
    pub elevator: ElevatorSubsystem,
    /// Ground intake
    pub intake: IntakeSubsystem,
    pressure_sensor: Box<dyn AnalogInput>,
    transducer: PressureTransducer,
    /// Voltage from the last successful pressure read
    pressure_voltage: f32,
}

impl Subsystems {
    /// Build every subsystem from its configuration block and devices
    pub fn new(config: &RobotConfig, hardware: RobotHardware) -> Self {
        log_info!(
            "subsystems: loop {} ms, elevator range {}..{} in",
            config.loop_period_ms,
            config.elevator.min_height,
            config.elevator.max_height
        );
        let transducer = config.pneumatics.transducer();
        Self {
            drive: DriveSubsystem::new(config.drive, hardware.drive),
            elevator: ElevatorSubsystem::new(config.elevator, hardware.elevator),
            intake: IntakeSubsystem::new(config.intake, hardware.intake),
            pressure_sensor: hardware.pressure,
            // Zero PSI until the first sample, so nothing pneumatic fires early
            pressure_voltage: (0.0 - transducer.offset) / transducer.scale,
            transducer,
        }
    }

    /// Read the pressure transducer for this tick
    pub fn sample_pressure(&mut self) -> f32 {
        self.pressure_voltage = read_or_keep(
            self.pressure_sensor.voltage(),
            self.pressure_voltage,
            "pressure transducer",
        );
        self.pressure_psi()
    }

    /// Pressure sampled at the start of this tick (PSI)
    pub fn pressure_psi(&self) -> f32 {
        self.transducer.pressure_psi(self.pressure_voltage)
    }

    /// Update every subsystem: drive, then elevator, then intake
    pub fn update(&mut self) {
        for subsystem in self.all_mut() {
            subsystem.update();
        }
    }

    /// Tell every subsystem the operator is taking over
    pub fn teleop_init(&mut self) {
        for subsystem in self.all_mut() {
            log_debug!("{}: teleop init", subsystem.name());
            subsystem.teleop_init();
        }
    }

    fn all_mut(&mut self) -> [&mut dyn Subsystem; 3] {
        [&mut self.drive, &mut self.elevator, &mut self.intake]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockRobot;
    use totebot_core::elevator::{ElevatorMode, Strength};
    use totebot_core::intake::{ActuatorsState, WheelsState};

    fn subsystems() -> (Subsystems, MockRobot) {
        let mock = MockRobot::new();
        let subsystems = Subsystems::new(&RobotConfig::default(), mock.hardware());
        (subsystems, mock)
    }

    #[test]
    fn test_pressure_is_zero_before_first_sample() {
        let (subsystems, _mock) = subsystems();
        assert!(subsystems.pressure_psi().abs() < 1e-4);
    }

    #[test]
    fn test_sample_pressure_uses_transducer() {
        let (mut subsystems, mock) = subsystems();
        let transducer = RobotConfig::default().pneumatics.transducer();
        mock.set_pressure_psi(60.0, &transducer);
        assert!((subsystems.sample_pressure() - 60.0).abs() < 1e-3);
    }

    #[test]
    fn test_failed_pressure_read_keeps_last_sample() {
        let (mut subsystems, mock) = subsystems();
        let transducer = RobotConfig::default().pneumatics.transducer();
        mock.set_pressure_psi(55.0, &transducer);
        subsystems.sample_pressure();

        mock.pressure.set_failing(true);
        mock.set_pressure_psi(5.0, &transducer);
        assert!((subsystems.sample_pressure() - 55.0).abs() < 1e-3);
    }

    #[test]
    fn test_update_reaches_every_subsystem() {
        let (mut subsystems, mock) = subsystems();
        let transducer = RobotConfig::default().pneumatics.transducer();
        mock.set_pressure_psi(60.0, &transducer);
        let psi = subsystems.sample_pressure();

        subsystems.drive.controller_mut().tank_drive(0.3, 0.3);
        subsystems
            .elevator
            .controller_mut()
            .set_mode(ElevatorMode::Track);
        subsystems
            .elevator
            .controller_mut()
            .set_setpoint(10.0, Strength::Strong);
        subsystems
            .intake
            .controller_mut()
            .set_wheels(WheelsState::Intake);
        subsystems
            .intake
            .controller_mut()
            .set_actuators(ActuatorsState::Closed, psi);
        subsystems.update();

        assert_eq!(mock.drive_left_motor.command(), 0.3);
        assert!(mock.lift_left_motor.command() > 0.0);
        assert!(mock.intake_left_wheel.command() > 0.0);
        assert!(mock.intake_left_arm.is_on());
        assert!(mock.intake_right_arm.is_on());
    }

    #[test]
    fn test_update_order() {
        let (mut subsystems, _mock) = subsystems();
        let names = subsystems.all_mut().map(|subsystem| subsystem.name());
        assert_eq!(names, ["drive", "elevator", "intake"]);
    }

    #[test]
    fn test_teleop_init_puts_elevator_in_manual() {
        let (mut subsystems, _mock) = subsystems();
        subsystems
            .elevator
            .controller_mut()
            .set_mode(ElevatorMode::Track);
        subsystems.teleop_init();
        assert_eq!(subsystems.elevator.controller().mode(), ElevatorMode::Manual);
    }
}
