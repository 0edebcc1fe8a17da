//! Concrete autonomous actions
//!
//! Each action commands [`Subsystems`] through the controllers' setpoint API
//! and never touches a device. Outputs change when the subsystems update
//! later in the same tick.

use totebot_core::drive::DriveMode;
use totebot_core::elevator::{ElevatorMode, Strength};
use totebot_core::intake::{ActuatorsState, WheelsState};
use totebot_core::sequencing::{Action, EndState};
use totebot_core::traits::TimeSource;

use crate::log_debug;
use crate::robot::Subsystems;

/// Point the drivetrain at a distance from here, holding the current heading
fn begin_straight(ctx: &mut Subsystems, distance: f32, speed_limit: f32) {
    let drive = ctx.drive.controller_mut();
    drive.reset_distance();
    let heading = drive.heading();
    drive.set_heading_setpoint(heading);
    drive.set_distance_setpoint(distance, speed_limit);
    drive.set_mode(DriveMode::HoldDistance);
}

// ============================================================================
// Drivetrain
// ============================================================================

/// Drive a distance in a straight line; ends on target
#[derive(Debug, Clone, Copy)]
pub struct DriveStraight {
    distance: f32,
    speed_limit: f32,
    tolerance: f32,
}

impl DriveStraight {
    /// Drive `distance` inches at full speed limit
    pub fn new(distance: f32, tolerance: f32) -> Self {
        Self::with_speed_limit(distance, 1.0, tolerance)
    }

    /// Drive `distance` inches with the forward command capped at `speed_limit`
    pub fn with_speed_limit(distance: f32, speed_limit: f32, tolerance: f32) -> Self {
        Self {
            distance,
            speed_limit,
            tolerance,
        }
    }
}

impl Action<Subsystems> for DriveStraight {
    fn name(&self) -> &'static str {
        "drive straight"
    }

    fn start(&mut self, ctx: &mut Subsystems) {
        log_debug!("auton: drive straight {} in", self.distance);
        begin_straight(ctx, self.distance, self.speed_limit);
    }

    fn step(&mut self, ctx: &mut Subsystems) -> EndState {
        if ctx.drive.controller().on_target(self.tolerance) {
            EndState::End
        } else {
            EndState::Continue
        }
    }
}

/// Like [`DriveStraight`], but lets the next action start on its first step
#[derive(Debug, Clone, Copy)]
pub struct DriveStraightBackground {
    inner: DriveStraight,
    first_step: bool,
}

impl DriveStraightBackground {
    /// Drive `distance` inches in the background
    pub fn new(distance: f32, tolerance: f32) -> Self {
        Self::with_speed_limit(distance, 1.0, tolerance)
    }

    /// Drive `distance` inches in the background, capped at `speed_limit`
    pub fn with_speed_limit(distance: f32, speed_limit: f32, tolerance: f32) -> Self {
        Self {
            inner: DriveStraight::with_speed_limit(distance, speed_limit, tolerance),
            first_step: true,
        }
    }
}

impl Action<Subsystems> for DriveStraightBackground {
    fn name(&self) -> &'static str {
        "drive straight (background)"
    }

    fn start(&mut self, ctx: &mut Subsystems) {
        self.first_step = true;
        self.inner.start(ctx);
    }

    fn step(&mut self, ctx: &mut Subsystems) -> EndState {
        match self.inner.step(ctx) {
            EndState::End => EndState::End,
            _ if self.first_step => {
                self.first_step = false;
                EndState::Background
            }
            other => other,
        }
    }
}

/// Turn in place to an absolute heading; ends on target
#[derive(Debug, Clone, Copy)]
pub struct Pivot {
    heading_deg: f32,
    tolerance: f32,
}

impl Pivot {
    /// Pivot to `heading_deg` (gyro frame, -180 to +180)
    pub fn new(heading_deg: f32, tolerance: f32) -> Self {
        Self {
            heading_deg,
            tolerance,
        }
    }
}

impl Action<Subsystems> for Pivot {
    fn name(&self) -> &'static str {
        "pivot"
    }

    fn start(&mut self, ctx: &mut Subsystems) {
        log_debug!("auton: pivot to {} deg", self.heading_deg);
        let drive = ctx.drive.controller_mut();
        drive.set_heading_setpoint(self.heading_deg);
        drive.set_mode(DriveMode::HoldHeading);
    }

    fn step(&mut self, ctx: &mut Subsystems) -> EndState {
        if ctx.drive.controller().on_target(self.tolerance) {
            EndState::End
        } else {
            EndState::Continue
        }
    }
}

// ============================================================================
// Elevator
// ============================================================================

/// Move the lift to a height; ends on target
#[derive(Debug, Clone, Copy)]
pub struct ElevatorMove {
    height: f32,
    strength: Strength,
    tolerance: f32,
}

impl ElevatorMove {
    /// Track `height` inches (clamped to the lift's travel)
    pub fn new(height: f32, strength: Strength, tolerance: f32) -> Self {
        Self {
            height,
            strength,
            tolerance,
        }
    }
}

impl Action<Subsystems> for ElevatorMove {
    fn name(&self) -> &'static str {
        "elevator move"
    }

    fn start(&mut self, ctx: &mut Subsystems) {
        log_debug!("auton: elevator to {} in", self.height);
        let elevator = ctx.elevator.controller_mut();
        elevator.set_setpoint(self.height, self.strength);
        elevator.set_mode(ElevatorMode::Track);
    }

    fn step(&mut self, ctx: &mut Subsystems) -> EndState {
        if ctx.elevator.controller().on_target(self.tolerance) {
            EndState::End
        } else {
            EndState::Continue
        }
    }
}

/// Drive the lift down to its home sensor; ends once homed
#[derive(Debug, Clone, Copy, Default)]
pub struct HomeElevator;

impl Action<Subsystems> for HomeElevator {
    fn name(&self) -> &'static str {
        "home elevator"
    }

    fn start(&mut self, ctx: &mut Subsystems) {
        ctx.elevator.controller_mut().start_homing();
    }

    fn step(&mut self, ctx: &mut Subsystems) -> EndState {
        if ctx.elevator.controller().is_homing() {
            EndState::Continue
        } else {
            EndState::End
        }
    }
}

// ============================================================================
// Intake
// ============================================================================

/// Request an arm position through the pressure gate; ends immediately.
///
/// The request is dropped if pressure is too low at start.
#[derive(Debug, Clone, Copy)]
pub struct SetIntakeActuators(pub ActuatorsState);

impl Action<Subsystems> for SetIntakeActuators {
    fn name(&self) -> &'static str {
        "set intake actuators"
    }

    fn start(&mut self, ctx: &mut Subsystems) {
        let pressure = ctx.pressure_psi();
        let intake = ctx.intake.controller_mut();
        intake.set_actuators(self.0, pressure);
        if intake.actuators() != self.0 {
            log_debug!("auton: intake arms held at {} psi", pressure);
        }
    }

    fn step(&mut self, _ctx: &mut Subsystems) -> EndState {
        EndState::End
    }
}

/// Set the intake wheel behaviour; ends immediately
#[derive(Debug, Clone, Copy)]
pub struct SetIntakeWheels(pub WheelsState);

impl Action<Subsystems> for SetIntakeWheels {
    fn name(&self) -> &'static str {
        "set intake wheels"
    }

    fn start(&mut self, ctx: &mut Subsystems) {
        ctx.intake.controller_mut().set_wheels(self.0);
    }

    fn step(&mut self, _ctx: &mut Subsystems) -> EndState {
        EndState::End
    }
}

// ============================================================================
// Timing and idle
// ============================================================================

/// Do nothing for a fixed time
#[derive(Debug, Clone)]
pub struct Wait<T: TimeSource> {
    time: T,
    duration_secs: f32,
    started_us: u64,
}

impl<T: TimeSource> Wait<T> {
    /// Wait `duration_secs` seconds as measured by `time`
    pub fn new(time: T, duration_secs: f32) -> Self {
        Self {
            time,
            duration_secs,
            started_us: 0,
        }
    }
}

impl<C, T: TimeSource> Action<C> for Wait<T> {
    fn name(&self) -> &'static str {
        "wait"
    }

    fn start(&mut self, _ctx: &mut C) {
        self.started_us = self.time.now_us();
    }

    fn step(&mut self, _ctx: &mut C) -> EndState {
        if self.time.elapsed_secs(self.started_us) >= self.duration_secs {
            EndState::End
        } else {
            EndState::Continue
        }
    }
}

/// Hold every mechanism still: drive stopped, lift holding where it is,
/// wheels stopped, arms closed if pressure allows. Never ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoldStill;

impl Action<Subsystems> for HoldStill {
    fn name(&self) -> &'static str {
        "hold still"
    }

    fn start(&mut self, ctx: &mut Subsystems) {
        let pressure = ctx.pressure_psi();
        let drive = ctx.drive.controller_mut();
        drive.set_mode(DriveMode::Tank);
        drive.tank_drive(0.0, 0.0);

        let elevator = ctx.elevator.controller_mut();
        elevator.hold_position();
        elevator.set_mode(ElevatorMode::Track);

        let intake = ctx.intake.controller_mut();
        intake.set_wheels(WheelsState::Stopped);
        intake.set_actuators(ActuatorsState::Closed, pressure);
    }

    fn step(&mut self, _ctx: &mut Subsystems) -> EndState {
        EndState::Continue
    }
}
