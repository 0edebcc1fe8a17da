//! Robot phase loop
//!
//! The host calls one phase method per control period. Every periodic call
//! samples pressure, runs the autonomous scheduler when one is active, then
//! updates all subsystems, so a command issued during a tick reaches the
//! outputs in that same tick.

pub mod drive;
pub mod elevator;
pub mod intake;
pub mod registry;
pub mod subsystem;

pub use drive::{DriveHardware, DriveSubsystem};
pub use elevator::{ElevatorHardware, ElevatorSubsystem};
pub use intake::{IntakeHardware, IntakeSubsystem};
pub use registry::{RobotHardware, Subsystems};
pub use subsystem::Subsystem;

use totebot_core::sequencing::{ActionScheduler, SchedulerError};

use crate::config::RobotConfig;
use crate::{log_error, log_info};

/// Competition phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Outputs live, nobody commanding
    #[default]
    Disabled,
    /// Running an autonomous routine
    Autonomous,
    /// Operator in control
    Teleop,
}

impl Phase {
    /// Phase name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Disabled => "disabled",
            Phase::Autonomous => "autonomous",
            Phase::Teleop => "teleop",
        }
    }
}

/// Robot loop errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RobotError {
    /// The autonomous routine failed to start or broke its lifecycle
    /// contract, and was dropped
    #[error("autonomous routine aborted: {0}")]
    Autonomous(SchedulerError),
}

impl From<SchedulerError> for RobotError {
    fn from(e: SchedulerError) -> Self {
        RobotError::Autonomous(e)
    }
}

/// The robot: subsystems plus the active autonomous routine
pub struct Robot {
    subsystems: Subsystems,
    auton: Option<ActionScheduler<Subsystems>>,
    phase: Phase,
}

impl Robot {
    /// Build the robot disabled
    pub fn new(config: &RobotConfig, hardware: RobotHardware) -> Self {
        Self {
            subsystems: Subsystems::new(config, hardware),
            auton: None,
            phase: Phase::Disabled,
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Subsystems, for telemetry
    pub fn subsystems(&self) -> &Subsystems {
        &self.subsystems
    }

    /// Subsystems, for operator commands
    pub fn subsystems_mut(&mut self) -> &mut Subsystems {
        &mut self.subsystems
    }

    /// True while an autonomous routine still has work to do
    pub fn autonomous_running(&self) -> bool {
        self.auton
            .as_ref()
            .is_some_and(|scheduler| !scheduler.is_finished())
    }

    /// Disabled tick: keep sensors fresh and outputs consistent
    pub fn disabled_periodic(&mut self) {
        self.enter(Phase::Disabled);
        self.subsystems.sample_pressure();
        self.subsystems.update();
    }

    /// Start an autonomous routine, then run the first update
    pub fn autonomous_init(
        &mut self,
        mut routine: ActionScheduler<Subsystems>,
    ) -> Result<(), RobotError> {
        self.enter(Phase::Autonomous);
        self.subsystems.sample_pressure();
        let started = routine.start(&mut self.subsystems);
        self.auton = match started {
            Ok(()) => Some(routine),
            Err(e) => {
                log_error!("autonomous: failed to start routine: {}", e);
                None
            }
        };
        self.subsystems.update();
        started.map_err(RobotError::from)
    }

    /// Autonomous tick: advance the routine, then update.
    ///
    /// A scheduler error drops the routine; the subsystems are still updated
    /// so outputs stay consistent.
    pub fn autonomous_periodic(&mut self) -> Result<(), RobotError> {
        self.enter(Phase::Autonomous);
        self.subsystems.sample_pressure();
        let mut result = Ok(());
        if let Some(scheduler) = self.auton.as_mut() {
            if let Err(e) = scheduler.tick(&mut self.subsystems) {
                log_error!("autonomous: {} (routine dropped)", e);
                self.auton = None;
                result = Err(RobotError::from(e));
            }
        }
        self.subsystems.update();
        result
    }

    /// Hand control to the operator
    pub fn teleop_init(&mut self) {
        self.enter(Phase::Teleop);
        if self.auton.take().is_some() {
            log_info!("teleop: autonomous routine discarded");
        }
        self.subsystems.teleop_init();
    }

    /// Operator tick
    pub fn teleop_periodic(&mut self) {
        self.enter(Phase::Teleop);
        self.subsystems.sample_pressure();
        self.subsystems.update();
    }

    fn enter(&mut self, phase: Phase) {
        if self.phase != phase {
            log_info!("robot: {} -> {}", self.phase.name(), phase.name());
            self.phase = phase;
        }
    }
}
