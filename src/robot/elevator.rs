//! Elevator subsystem

use totebot_core::control::Debouncer;
use totebot_core::elevator::{ElevatorController, ElevatorMode, ElevatorSensors};
use totebot_core::parameters::ElevatorParams;

use super::subsystem::{log_write, read_or_keep, Subsystem};
use crate::log_info;
use crate::platform::traits::{DigitalInput, EncoderInput, MotorOutput};

/// Devices owned by the elevator
pub struct ElevatorHardware {
    /// Left lift motor
    pub left_motor: Box<dyn MotorOutput>,
    /// Right lift motor (mounted mirrored)
    pub right_motor: Box<dyn MotorOutput>,
    /// Left lift encoder
    pub left_encoder: Box<dyn EncoderInput>,
    /// Right lift encoder
    pub right_encoder: Box<dyn EncoderInput>,
    /// Bottom-of-travel sensor
    pub home: Box<dyn DigitalInput>,
    /// Tote-staged sensor at the intake
    pub tote: Box<dyn DigitalInput>,
}

/// Elevator: an `ElevatorController` bound to its devices
pub struct ElevatorSubsystem {
    controller: ElevatorController,
    hardware: ElevatorHardware,
    tote_debounce: Debouncer,
    /// Last raw tote level, reused when the sensor read fails
    tote_raw: bool,
    sensors: ElevatorSensors,
}

impl ElevatorSubsystem {
    /// Create the subsystem in manual mode at rest
    pub fn new(params: ElevatorParams, hardware: ElevatorHardware) -> Self {
        Self {
            tote_debounce: Debouncer::new(false, params.tote_debounce_samples),
            controller: ElevatorController::new(params),
            hardware,
            tote_raw: false,
            sensors: ElevatorSensors::default(),
        }
    }

    /// Controller, for queries
    pub fn controller(&self) -> &ElevatorController {
        &self.controller
    }

    /// Controller, for commands
    pub fn controller_mut(&mut self) -> &mut ElevatorController {
        &mut self.controller
    }

    fn sample(&mut self) -> ElevatorSensors {
        let last = self.sensors;
        self.tote_raw = read_or_keep(self.hardware.tote.read(), self.tote_raw, "tote sensor");
        self.sensors = ElevatorSensors {
            left_position: read_or_keep(
                self.hardware.left_encoder.distance(),
                last.left_position,
                "elevator left encoder",
            ),
            right_position: read_or_keep(
                self.hardware.right_encoder.distance(),
                last.right_position,
                "elevator right encoder",
            ),
            left_rate: read_or_keep(
                self.hardware.left_encoder.rate(),
                last.left_rate,
                "elevator left encoder",
            ),
            right_rate: read_or_keep(
                self.hardware.right_encoder.rate(),
                last.right_rate,
                "elevator right encoder",
            ),
            at_home: read_or_keep(self.hardware.home.read(), last.at_home, "elevator home"),
            tote_staged: self.tote_debounce.sample(self.tote_raw),
        };
        self.sensors
    }
}

impl Subsystem for ElevatorSubsystem {
    fn name(&self) -> &'static str {
        "elevator"
    }

    fn update(&mut self) {
        let sensors = self.sample();
        let output = self.controller.update(&sensors);
        log_write(
            self.hardware.left_motor.set_command(output.left),
            "elevator left motor",
        );
        log_write(
            self.hardware.right_motor.set_command(output.right),
            "elevator right motor",
        );
    }

    fn teleop_init(&mut self) {
        log_info!("elevator: manual control");
        self.controller.set_mode(ElevatorMode::Manual);
        self.controller.set_manual_speed(0.0);
    }
}
