//! Robot configuration
//!
//! Collects every typed parameter block into one value that is built once at
//! startup and handed to the subsystems by value.

use totebot_core::parameters::{
    DriveParams, ElevatorParams, IntakeParams, ParamFlags, ParamValue, ParameterError,
    ParameterStore, PneumaticsParams,
};

const DEFAULT_LOOP_PERIOD_MS: i32 = 20;
const MIN_LOOP_PERIOD_MS: i32 = 5;
const MAX_LOOP_PERIOD_MS: i32 = 100;

/// Full robot configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobotConfig {
    /// Drivetrain tuning
    pub drive: DriveParams,
    /// Elevator tuning and presets
    pub elevator: ElevatorParams,
    /// Pressure transducer calibration
    pub pneumatics: PneumaticsParams,
    /// Intake speeds and arm thresholds
    pub intake: IntakeParams,
    /// Control loop period
    pub loop_period_ms: u32,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            drive: DriveParams::default(),
            elevator: ElevatorParams::default(),
            pneumatics: PneumaticsParams::default(),
            intake: IntakeParams::default(),
            loop_period_ms: DEFAULT_LOOP_PERIOD_MS as u32,
        }
    }
}

impl RobotConfig {
    /// Register every block's parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        DriveParams::register_defaults(store)?;
        ElevatorParams::register_defaults(store)?;
        PneumaticsParams::register_defaults(store)?;
        IntakeParams::register_defaults(store)?;
        store.register(
            "LOOP_MS",
            ParamValue::Int(DEFAULT_LOOP_PERIOD_MS),
            ParamFlags::READ_ONLY,
        )?;
        Ok(())
    }

    /// Load the configuration from a parameter store
    pub fn from_store(store: &ParameterStore) -> Self {
        Self {
            drive: DriveParams::from_store(store),
            elevator: ElevatorParams::from_store(store),
            pneumatics: PneumaticsParams::from_store(store),
            intake: IntakeParams::from_store(store),
            loop_period_ms: store.get_int(
                "LOOP_MS",
                DEFAULT_LOOP_PERIOD_MS,
                MIN_LOOP_PERIOD_MS,
                MAX_LOOP_PERIOD_MS,
            ) as u32,
        }
    }

    /// Validate every block
    pub fn is_valid(&self) -> bool {
        self.drive.is_valid()
            && self.elevator.is_valid()
            && self.pneumatics.is_valid()
            && self.intake.is_valid()
            && (MIN_LOOP_PERIOD_MS as u32..=MAX_LOOP_PERIOD_MS as u32)
                .contains(&self.loop_period_ms)
    }

    /// Loop period in seconds
    pub fn loop_period_secs(&self) -> f32 {
        self.loop_period_ms as f32 / 1000.0
    }
}
