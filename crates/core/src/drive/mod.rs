//! Differential drive controller
//!
//! Turns a drive mode plus one tick of sensor readings into left/right
//! motor commands.
//!
//! # Modes
//!
//! - **Tank**: the last `tank_drive` values pass straight through
//! - **HoldDistance**: proportional hold on encoder distance, with a heading
//!   correction blended in as a left/right differential
//! - **HoldHeading**: pivot in place toward a heading, always the short way
//!   round the gyro seam
//!
//! Every command leaving [`DriveController::update`] is saturated to
//! `[-1.0, +1.0]`.

use crate::control::{clamp_output, fold_wrapped_error, limit, within_tolerance, PidGains};
use crate::parameters::DriveParams;

/// Active drive mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveMode {
    /// Open-loop left/right speeds
    #[default]
    Tank,
    /// Hold an encoder distance
    HoldDistance,
    /// Pivot to and hold a heading
    HoldHeading,
}

impl DriveMode {
    /// Mode name for logging and telemetry
    pub fn name(&self) -> &'static str {
        match self {
            DriveMode::Tank => "tank",
            DriveMode::HoldDistance => "hold_distance",
            DriveMode::HoldHeading => "hold_heading",
        }
    }
}

/// Distance setpoint with its forward speed limit
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DistanceSetpoint {
    /// Target distance (inches, relative to the last distance reset)
    pub distance: f32,
    /// Maximum forward command magnitude (0.0-1.0)
    pub speed_limit: f32,
}

impl Default for DistanceSetpoint {
    fn default() -> Self {
        Self {
            distance: 0.0,
            speed_limit: 1.0,
        }
    }
}

/// One tick of drivetrain sensor readings
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveSensors {
    /// Left encoder distance (inches, raw counter)
    pub left_distance: f32,
    /// Right encoder distance (inches, raw counter)
    pub right_distance: f32,
    /// Gyro yaw (degrees, -180 to +180)
    pub heading_deg: f32,
}

/// Drive motor commands for one tick
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveOutput {
    /// Left side command (-1.0 to +1.0)
    pub left: f32,
    /// Right side command (-1.0 to +1.0)
    pub right: f32,
}

/// Drive controller
pub struct DriveController {
    params: DriveParams,
    mode: DriveMode,
    tank_left: f32,
    tank_right: f32,
    distance_setpoint: DistanceSetpoint,
    heading_setpoint_deg: f32,
    /// Raw encoder readings that count as distance zero
    distance_offsets: (f32, f32),
    last_sensors: DriveSensors,
    last_output: DriveOutput,
}

impl DriveController {
    /// Create a controller in tank mode with zero output
    pub fn new(params: DriveParams) -> Self {
        Self {
            params,
            mode: DriveMode::Tank,
            tank_left: 0.0,
            tank_right: 0.0,
            distance_setpoint: DistanceSetpoint::default(),
            heading_setpoint_deg: 0.0,
            distance_offsets: (0.0, 0.0),
            last_sensors: DriveSensors::default(),
            last_output: DriveOutput::default(),
        }
    }

    /// Current mode
    pub fn mode(&self) -> DriveMode {
        self.mode
    }

    /// Switch mode immediately.
    ///
    /// Leaving tank mode discards the stored tank speeds, so coming back to
    /// tank later starts from a stop.
    pub fn set_mode(&mut self, mode: DriveMode) {
        if mode == self.mode {
            return;
        }
        log::debug!("drive: {} -> {}", self.mode.name(), mode.name());
        if self.mode == DriveMode::Tank {
            self.tank_left = 0.0;
            self.tank_right = 0.0;
        }
        self.mode = mode;
    }

    /// Store open-loop speeds for tank mode
    pub fn tank_drive(&mut self, left: f32, right: f32) {
        self.tank_left = left;
        self.tank_right = right;
    }

    /// Set the distance to hold and the forward speed limit
    pub fn set_distance_setpoint(&mut self, distance: f32, speed_limit: f32) {
        self.distance_setpoint = DistanceSetpoint {
            distance,
            speed_limit: limit(speed_limit, 1.0),
        };
    }

    /// Current distance setpoint
    pub fn distance_setpoint(&self) -> DistanceSetpoint {
        self.distance_setpoint
    }

    /// Set the heading to pivot to (degrees, -180 to +180)
    pub fn set_heading_setpoint(&mut self, heading_deg: f32) {
        self.heading_setpoint_deg = heading_deg;
    }

    /// Current heading setpoint
    pub fn heading_setpoint(&self) -> f32 {
        self.heading_setpoint_deg
    }

    /// Replace the straight-driving gains
    pub fn set_straight_gains(&mut self, gains: PidGains) {
        self.params.straight_gains = gains;
    }

    /// Replace the pivot gains
    pub fn set_pivot_gains(&mut self, gains: PidGains) {
        self.params.pivot_gains = gains;
    }

    /// Active tuning
    pub fn params(&self) -> &DriveParams {
        &self.params
    }

    /// Make the current position distance zero.
    ///
    /// Uses the most recent sensor sample; raw encoder counters are left
    /// alone.
    pub fn reset_distance(&mut self) {
        self.distance_offsets = (
            self.last_sensors.left_distance,
            self.last_sensors.right_distance,
        );
    }

    /// Distance travelled since the last reset (mean of both sides)
    pub fn distance(&self) -> f32 {
        self.distance_from(&self.last_sensors)
    }

    /// Most recent gyro heading
    pub fn heading(&self) -> f32 {
        self.last_sensors.heading_deg
    }

    /// Heading error folded onto the short way round the gyro seam
    pub fn heading_error(&self) -> f32 {
        self.heading_error_from(&self.last_sensors)
    }

    /// Distance error against the current setpoint
    pub fn distance_error(&self) -> f32 {
        self.distance_setpoint.distance - self.distance()
    }

    /// True if the active closed-loop mode is within `tolerance` of its target.
    ///
    /// Always false in tank mode.
    pub fn on_target(&self, tolerance: f32) -> bool {
        match self.mode {
            DriveMode::Tank => false,
            DriveMode::HoldDistance => within_tolerance(self.distance_error(), tolerance),
            DriveMode::HoldHeading => within_tolerance(self.heading_error(), tolerance),
        }
    }

    /// Output computed by the most recent `update`
    pub fn last_output(&self) -> DriveOutput {
        self.last_output
    }

    /// Compute this tick's motor commands.
    ///
    /// A pure function of mode, setpoints and `sensors`: calling it twice
    /// with the same inputs yields the same output.
    pub fn update(&mut self, sensors: &DriveSensors) -> DriveOutput {
        self.last_sensors = *sensors;

        let (left, right) = match self.mode {
            DriveMode::Tank => (self.tank_left, self.tank_right),
            DriveMode::HoldDistance => {
                let error = self.distance_setpoint.distance - self.distance_from(sensors);
                let forward = limit(
                    error * self.params.straight_gains.p,
                    self.distance_setpoint.speed_limit,
                );
                let curve = self.heading_error_from(sensors) * self.params.pivot_gains.p;
                (forward + curve, forward - curve)
            }
            DriveMode::HoldHeading => {
                let turn = clamp_output(self.heading_error_from(sensors) * self.params.pivot_gains.p);
                (turn, -turn)
            }
        };

        self.last_output = DriveOutput {
            left: clamp_output(left),
            right: clamp_output(right),
        };
        self.last_output
    }

    fn distance_from(&self, sensors: &DriveSensors) -> f32 {
        let left = sensors.left_distance - self.distance_offsets.0;
        let right = sensors.right_distance - self.distance_offsets.1;
        (left + right) / 2.0
    }

    fn heading_error_from(&self, sensors: &DriveSensors) -> f32 {
        fold_wrapped_error(
            self.heading_setpoint_deg - sensors.heading_deg,
            self.params.heading_min_deg,
            self.params.heading_max_deg,
        )
    }
}
