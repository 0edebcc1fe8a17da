//! Autonomous routines
//!
//! A routine is an [`ActionScheduler`] filled with actions, ready for
//! `Robot::autonomous_init`.

use totebot_core::elevator::Strength;
use totebot_core::intake::{ActuatorsState, WheelsState};
use totebot_core::parameters::ElevatorPreset;
use totebot_core::sequencing::{ActionScheduler, SchedulerError};
use totebot_core::traits::TimeSource;

use super::actions::{
    DriveStraight, ElevatorMove, HoldStill, Pivot, SetIntakeActuators, SetIntakeWheels, Wait,
};
use crate::config::RobotConfig;
use crate::robot::Subsystems;

/// Distance covered by the drive-forward routine (inches)
const DRIVE_FORWARD_DISTANCE: f32 = 50.0;

/// Approach to the first tote (inches)
const TOTE_APPROACH_DISTANCE: f32 = 35.0;
const TOTE_APPROACH_TOLERANCE: f32 = 1.3;
/// Heading the tote is thrown towards (degrees)
const TOTE_TOSS_HEADING: f32 = 90.0;
const PIVOT_TOLERANCE: f32 = 5.0;
/// How long the wheels push the tote out (seconds)
const TOTE_EJECT_SECS: f32 = 0.3;

/// Selectable autonomous routine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Routine {
    /// Hold every mechanism still
    #[default]
    DoNothing,
    /// Drive straight ahead out of the start zone
    DriveForward,
    /// Grab the tote in front, toss it aside, face forward again
    ToteGrab,
}

impl Routine {
    /// Routine name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Routine::DoNothing => "do nothing",
            Routine::DriveForward => "drive forward",
            Routine::ToteGrab => "tote grab",
        }
    }

    /// Build the routine's action queue. `time` drives any waits.
    pub fn build<T: TimeSource + 'static>(
        &self,
        config: &RobotConfig,
        time: &T,
    ) -> Result<ActionScheduler<Subsystems>, SchedulerError> {
        match self {
            Routine::DoNothing => do_nothing(),
            Routine::DriveForward => drive_forward(config),
            Routine::ToteGrab => tote_grab(config, time),
        }
    }
}

/// Hold still for the whole period
pub fn do_nothing() -> Result<ActionScheduler<Subsystems>, SchedulerError> {
    let mut scheduler = ActionScheduler::<Subsystems>::new();
    scheduler.push(Box::new(HoldStill))?;
    Ok(scheduler)
}

/// Drive forward and stop
pub fn drive_forward(config: &RobotConfig) -> Result<ActionScheduler<Subsystems>, SchedulerError> {
    let mut scheduler = ActionScheduler::<Subsystems>::new();
    scheduler.push(Box::new(DriveStraight::new(
        DRIVE_FORWARD_DISTANCE,
        config.drive.distance_tolerance,
    )))?;
    Ok(scheduler)
}

/// Pick up the tote ahead, pivot, eject it to the side, and turn back
pub fn tote_grab<T: TimeSource + 'static>(
    config: &RobotConfig,
    time: &T,
) -> Result<ActionScheduler<Subsystems>, SchedulerError> {
    let ready_height = config.elevator.preset_height(ElevatorPreset::ReadyToIntake);
    let mut scheduler = ActionScheduler::<Subsystems>::new();
    scheduler.push(Box::new(SetIntakeActuators(ActuatorsState::Open)))?;
    // Forks are empty, so the strong loop is safe here
    scheduler.push(Box::new(ElevatorMove::new(
        ready_height,
        Strength::Strong,
        config.elevator.tolerance,
    )))?;
    scheduler.push(Box::new(DriveStraight::new(
        TOTE_APPROACH_DISTANCE,
        TOTE_APPROACH_TOLERANCE,
    )))?;
    scheduler.push(Box::new(SetIntakeWheels(WheelsState::SlowIntake)))?;
    scheduler.push(Box::new(SetIntakeActuators(ActuatorsState::Closed)))?;
    scheduler.push(Box::new(Pivot::new(TOTE_TOSS_HEADING, PIVOT_TOLERANCE)))?;
    scheduler.push(Box::new(SetIntakeWheels(WheelsState::Output)))?;
    scheduler.push(Box::new(Wait::new(time.clone(), TOTE_EJECT_SECS)))?;
    scheduler.push(Box::new(SetIntakeWheels(WheelsState::Stopped)))?;
    scheduler.push(Box::new(SetIntakeActuators(ActuatorsState::Open)))?;
    scheduler.push(Box::new(Pivot::new(0.0, PIVOT_TOLERANCE)))?;
    Ok(scheduler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use totebot_core::traits::MockTime;

    #[test]
    fn test_routine_sizes() {
        let config = RobotConfig::default();
        let time = MockTime::new();
        assert_eq!(Routine::DoNothing.build(&config, &time).unwrap().len(), 1);
        assert_eq!(Routine::DriveForward.build(&config, &time).unwrap().len(), 1);
        assert_eq!(Routine::ToteGrab.build(&config, &time).unwrap().len(), 11);
    }

    #[test]
    fn test_default_routine_is_do_nothing() {
        assert_eq!(Routine::default(), Routine::DoNothing);
        assert_eq!(Routine::ToteGrab.name(), "tote grab");
    }
}
