//! Dual-motor elevator controller
//!
//! The lift is driven by two motors on opposite sides of the same carriage.
//! Both must move together or the carriage racks and binds, so each side
//! tracks the setpoint on its own error and a steering term couples the two
//! sides.
//!
//! # Modes
//!
//! - **Manual**: open-loop speed, both sides equal
//! - **Track**: closed-loop hold on a clamped setpoint, gentle or strong
//! - **Homing**: descend slowly until the home sensor trips, zero both
//!   position counters, then resume the previous mode
//!
//! The home sensor re-zeroes the position counters in every mode, not only
//! while homing.
//!
//! # Output convention
//!
//! The right motor is mounted mirrored, so its command is the negation of
//! the value computed for that side.

use crate::control::{clamp_output, limit, within_tolerance};
use crate::parameters::ElevatorParams;

/// Active elevator mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ElevatorMode {
    /// Open-loop speed
    #[default]
    Manual,
    /// Closed-loop setpoint tracking
    Track,
    /// Descend to the home sensor and zero
    Homing,
}

impl ElevatorMode {
    /// Mode name for logging and telemetry
    pub fn name(&self) -> &'static str {
        match self {
            ElevatorMode::Manual => "manual",
            ElevatorMode::Track => "track",
            ElevatorMode::Homing => "homing",
        }
    }
}

/// Tracking aggressiveness
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Strength {
    /// Low proportional ceiling plus rate damping, for carrying stacks
    #[default]
    Gentle,
    /// High proportional ceiling, no damping
    Strong,
}

/// One tick of elevator sensor readings
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ElevatorSensors {
    /// Left encoder position (inches, raw counter)
    pub left_position: f32,
    /// Right encoder position (inches, raw counter)
    pub right_position: f32,
    /// Left encoder rate (inches/s)
    pub left_rate: f32,
    /// Right encoder rate (inches/s)
    pub right_rate: f32,
    /// Carriage is at its lowest point
    pub at_home: bool,
    /// Debounced "tote staged at intake" level
    pub tote_staged: bool,
}

/// Elevator motor commands for one tick
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ElevatorOutput {
    /// Left motor command (-1.0 to +1.0)
    pub left: f32,
    /// Right motor command (-1.0 to +1.0, mirrored)
    pub right: f32,
}

/// Elevator controller
pub struct ElevatorController {
    params: ElevatorParams,
    mode: ElevatorMode,
    /// Mode to return to when homing finishes or is aborted
    resume_mode: ElevatorMode,
    setpoint: f32,
    strength: Strength,
    manual_speed: f32,
    /// Raw encoder readings that count as position zero
    offsets: [f32; 2],
    last_sensors: ElevatorSensors,
    last_output: ElevatorOutput,
}

impl ElevatorController {
    /// Create a controller in manual mode at rest.
    ///
    /// A travel range that is inverted or not finite is replaced by the
    /// default range.
    pub fn new(mut params: ElevatorParams) -> Self {
        let range_ok = params.min_height.is_finite()
            && params.max_height.is_finite()
            && params.min_height <= params.max_height;
        if !range_ok {
            log::warn!(
                "elevator: bad travel range {}..{}, using defaults",
                params.min_height,
                params.max_height
            );
            let defaults = ElevatorParams::default();
            params.min_height = defaults.min_height;
            params.max_height = defaults.max_height;
        }
        let setpoint = params.min_height;
        Self {
            params,
            mode: ElevatorMode::Manual,
            resume_mode: ElevatorMode::Manual,
            setpoint,
            strength: Strength::Gentle,
            manual_speed: 0.0,
            offsets: [0.0; 2],
            last_sensors: ElevatorSensors::default(),
            last_output: ElevatorOutput::default(),
        }
    }

    /// Current mode
    pub fn mode(&self) -> ElevatorMode {
        self.mode
    }

    /// Switch mode immediately.
    ///
    /// Entering `Homing` remembers the current mode so it can be resumed.
    /// Leaving `Manual` discards the stored manual speed.
    pub fn set_mode(&mut self, mode: ElevatorMode) {
        if mode == self.mode {
            return;
        }
        log::debug!("elevator: {} -> {}", self.mode.name(), mode.name());
        if mode == ElevatorMode::Homing {
            self.resume_mode = self.mode;
        }
        if self.mode == ElevatorMode::Manual {
            self.manual_speed = 0.0;
        }
        self.mode = mode;
    }

    /// Start homing (shorthand for `set_mode(Homing)`)
    pub fn start_homing(&mut self) {
        self.set_mode(ElevatorMode::Homing);
    }

    /// Stop homing early. Position counters are left untouched.
    pub fn abort_homing(&mut self) {
        if self.mode == ElevatorMode::Homing {
            log::debug!("elevator: homing aborted");
            self.mode = self.resume_mode;
        }
    }

    /// True while homing
    pub fn is_homing(&self) -> bool {
        self.mode == ElevatorMode::Homing
    }

    /// Set the tracking target, clamped to the travel range.
    ///
    /// A NaN target is ignored and the previous setpoint kept.
    pub fn set_setpoint(&mut self, value: f32, strength: Strength) {
        if value.is_nan() {
            log::warn!("elevator: NaN setpoint ignored");
            return;
        }
        self.setpoint = value.clamp(self.params.min_height, self.params.max_height);
        self.strength = strength;
    }

    /// Track the current position with the current strength
    pub fn hold_position(&mut self) {
        let position = self.position();
        self.set_setpoint(position, self.strength);
    }

    /// Current (clamped) setpoint
    pub fn setpoint(&self) -> f32 {
        self.setpoint
    }

    /// Current tracking strength
    pub fn strength(&self) -> Strength {
        self.strength
    }

    /// Set the open-loop speed used in manual mode (positive is up)
    pub fn set_manual_speed(&mut self, speed: f32) {
        self.manual_speed = speed;
    }

    /// Stored manual speed
    pub fn manual_speed(&self) -> f32 {
        self.manual_speed
    }

    /// Active tuning
    pub fn params(&self) -> &ElevatorParams {
        &self.params
    }

    /// Carriage height: mean of both zeroed position counters
    pub fn position(&self) -> f32 {
        let [left, right] = self.positions_from(&self.last_sensors);
        (left + right) / 2.0
    }

    /// True if a tote is staged at the intake
    pub fn tote_staged(&self) -> bool {
        self.last_sensors.tote_staged
    }

    /// True if the carriage is within `tolerance` of the setpoint
    pub fn on_target(&self, tolerance: f32) -> bool {
        within_tolerance(self.setpoint - self.position(), tolerance)
    }

    /// Output computed by the most recent `update`
    pub fn last_output(&self) -> ElevatorOutput {
        self.last_output
    }

    /// Compute this tick's motor commands.
    ///
    /// Zeroing and the homing exit happen first, so the output always
    /// reflects the mode the controller ends the call in. Calling it twice
    /// with the same sensors yields the same output.
    pub fn update(&mut self, sensors: &ElevatorSensors) -> ElevatorOutput {
        if sensors.at_home {
            self.offsets = [sensors.left_position, sensors.right_position];
            if self.mode == ElevatorMode::Homing {
                log::info!("elevator: homed, resuming {}", self.resume_mode.name());
                self.mode = self.resume_mode;
            }
        }
        self.last_sensors = *sensors;

        let (left, right) = match self.mode {
            ElevatorMode::Manual => (self.manual_speed, self.manual_speed),
            ElevatorMode::Homing => (-self.params.homing_speed, -self.params.homing_speed),
            ElevatorMode::Track => self.track(sensors),
        };

        self.last_output = ElevatorOutput {
            left: clamp_output(left),
            right: -clamp_output(right),
        };
        self.last_output
    }

    /// Per-side tracking commands before the mirror inversion
    fn track(&self, sensors: &ElevatorSensors) -> (f32, f32) {
        let [left_pos, right_pos] = self.positions_from(sensors);
        let errors = [self.setpoint - left_pos, self.setpoint - right_pos];
        let rates = [sensors.left_rate, sensors.right_rate];

        let (gains, p_ceiling) = match self.strength {
            Strength::Strong => (self.params.strong_gains, self.params.strong_p_ceiling),
            Strength::Gentle => (self.params.gentle_gains, self.params.gentle_p_ceiling),
        };

        let mut commands = [0.0f32; 2];
        for side in 0..2 {
            let other = 1 - side;
            let p = limit(errors[side] * gains.p, p_ceiling);
            let d = match self.strength {
                // Target rate is zero, so the rate error is the negated rate
                Strength::Gentle => limit(-rates[side] * gains.d, self.params.gentle_d_ceiling),
                Strength::Strong => 0.0,
            };
            let steer = limit(
                (errors[other] - errors[side]) * self.params.steer_gain,
                self.params.steer_ceiling,
            );
            commands[side] = clamp_output(p + d + steer);
        }
        (commands[0], commands[1])
    }

    fn positions_from(&self, sensors: &ElevatorSensors) -> [f32; 2] {
        [
            sensors.left_position - self.offsets[0],
            sensors.right_position - self.offsets[1],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::PidGains;

    fn params() -> ElevatorParams {
        ElevatorParams {
            min_height: 0.0,
            max_height: 36.0,
            strong_gains: PidGains::proportional(0.5),
            gentle_gains: PidGains::pd(0.1, 0.05),
            strong_p_ceiling: 0.9,
            gentle_p_ceiling: 0.4,
            gentle_d_ceiling: 0.2,
            steer_gain: 0.1,
            steer_ceiling: 0.15,
            homing_speed: 0.1,
            ..ElevatorParams::default()
        }
    }

    fn at(left: f32, right: f32) -> ElevatorSensors {
        ElevatorSensors {
            left_position: left,
            right_position: right,
            ..ElevatorSensors::default()
        }
    }

    // ========================================================================
    // Tests: setpoint
    // ========================================================================

    #[test]
    fn test_setpoint_clamped_at_assignment() {
        let mut elevator = ElevatorController::new(params());
        elevator.set_setpoint(-5.0, Strength::Gentle);
        assert_eq!(elevator.setpoint(), 0.0);

        elevator.set_setpoint(50.0, Strength::Strong);
        assert_eq!(elevator.setpoint(), 36.0);
        assert_eq!(elevator.strength(), Strength::Strong);

        elevator.set_setpoint(12.5, Strength::Gentle);
        assert_eq!(elevator.setpoint(), 12.5);
    }

    #[test]
    fn test_nan_setpoint_keeps_previous() {
        let mut elevator = ElevatorController::new(params());
        elevator.set_setpoint(12.0, Strength::Strong);
        elevator.set_setpoint(f32::NAN, Strength::Gentle);
        assert_eq!(elevator.setpoint(), 12.0);
        assert_eq!(elevator.strength(), Strength::Strong);

        elevator.set_mode(ElevatorMode::Track);
        elevator.update(&at(11.8, 11.8));
        assert!(elevator.on_target(0.5));
    }

    #[test]
    fn test_inverted_range_falls_back_to_defaults() {
        let defaults = ElevatorParams::default();
        let mut elevator = ElevatorController::new(ElevatorParams {
            min_height: 10.0,
            max_height: 5.0,
            ..params()
        });
        assert_eq!(elevator.params().min_height, defaults.min_height);
        assert_eq!(elevator.params().max_height, defaults.max_height);

        elevator.set_setpoint(7.0, Strength::Gentle);
        assert_eq!(elevator.setpoint(), 7.0);
        elevator.set_setpoint(100.0, Strength::Gentle);
        assert_eq!(elevator.setpoint(), defaults.max_height);
    }

    #[test]
    fn test_nan_range_falls_back_to_defaults() {
        let mut elevator = ElevatorController::new(ElevatorParams {
            max_height: f32::NAN,
            ..params()
        });
        elevator.set_setpoint(50.0, Strength::Strong);
        assert_eq!(elevator.setpoint(), ElevatorParams::default().max_height);
    }

    #[test]
    fn test_hold_position_tracks_current_height() {
        let mut elevator = ElevatorController::new(params());
        elevator.update(&at(10.0, 12.0));
        elevator.hold_position();
        assert!((elevator.setpoint() - 11.0).abs() < 1e-6);
    }

    // ========================================================================
    // Tests: manual mode
    // ========================================================================

    #[test]
    fn test_manual_mirrors_right_motor() {
        let mut elevator = ElevatorController::new(params());
        elevator.set_manual_speed(0.6);
        let out = elevator.update(&at(5.0, 5.0));
        assert_eq!(out, ElevatorOutput { left: 0.6, right: -0.6 });
    }

    #[test]
    fn test_manual_output_clamped() {
        let mut elevator = ElevatorController::new(params());
        elevator.set_manual_speed(-4.0);
        let out = elevator.update(&at(5.0, 5.0));
        assert_eq!(out, ElevatorOutput { left: -1.0, right: 1.0 });
    }

    #[test]
    fn test_leaving_manual_discards_speed() {
        let mut elevator = ElevatorController::new(params());
        elevator.set_manual_speed(0.6);
        elevator.set_mode(ElevatorMode::Track);
        elevator.set_mode(ElevatorMode::Manual);
        assert_eq!(elevator.manual_speed(), 0.0);
    }

    // ========================================================================
    // Tests: tracking
    // ========================================================================

    #[test]
    fn test_track_strong_uses_strong_ceiling() {
        let mut elevator = ElevatorController::new(params());
        elevator.set_mode(ElevatorMode::Track);
        elevator.set_setpoint(30.0, Strength::Strong);
        let out = elevator.update(&at(0.0, 0.0));
        // p = 30 * 0.5 = 15 -> ceiling 0.9, no steering when level
        assert!((out.left - 0.9).abs() < 1e-6);
        assert!((out.right + 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_track_gentle_uses_gentle_ceiling() {
        let mut elevator = ElevatorController::new(params());
        elevator.set_mode(ElevatorMode::Track);
        elevator.set_setpoint(30.0, Strength::Gentle);
        let out = elevator.update(&at(0.0, 0.0));
        assert!((out.left - 0.4).abs() < 1e-6);
        assert!((out.right + 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_track_gentle_applies_rate_damping() {
        let mut elevator = ElevatorController::new(params());
        elevator.set_mode(ElevatorMode::Track);
        elevator.set_setpoint(2.0, Strength::Gentle);
        let sensors = ElevatorSensors {
            left_rate: 2.0,
            right_rate: 2.0,
            ..at(0.0, 0.0)
        };
        let out = elevator.update(&sensors);
        // p = 0.2, d = -2 * 0.05 = -0.1
        assert!((out.left - 0.1).abs() < 1e-6, "left {}", out.left);
    }

    #[test]
    fn test_track_damping_clamped_to_ceiling() {
        let mut elevator = ElevatorController::new(params());
        elevator.set_mode(ElevatorMode::Track);
        elevator.set_setpoint(0.0, Strength::Gentle);
        let sensors = ElevatorSensors {
            left_rate: -100.0,
            right_rate: -100.0,
            ..at(0.0, 0.0)
        };
        let out = elevator.update(&sensors);
        assert!((out.left - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_track_strong_ignores_rate() {
        let mut elevator = ElevatorController::new(params());
        elevator.set_mode(ElevatorMode::Track);
        elevator.set_setpoint(1.0, Strength::Strong);
        let sensors = ElevatorSensors {
            left_rate: 5.0,
            right_rate: 5.0,
            ..at(0.0, 0.0)
        };
        let out = elevator.update(&sensors);
        assert!((out.left - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_track_steering_term() {
        let mut elevator = ElevatorController::new(params());
        elevator.set_mode(ElevatorMode::Track);
        elevator.set_setpoint(1.0, Strength::Strong);
        // left error 1.0, right error 0.5
        let out = elevator.update(&at(0.0, 0.5));
        // left: p 0.5 + steer (0.5 - 1.0) * 0.1 = 0.45
        // right: p 0.25 + steer (1.0 - 0.5) * 0.1 = 0.30, mirrored
        assert!((out.left - 0.45).abs() < 1e-5, "left {}", out.left);
        assert!((out.right + 0.30).abs() < 1e-5, "right {}", out.right);
    }

    #[test]
    fn test_track_steering_clamped_to_ceiling() {
        let mut elevator = ElevatorController::new(params());
        elevator.set_mode(ElevatorMode::Track);
        elevator.set_setpoint(0.0, Strength::Strong);
        // left error 0, right error -10: steer on left = -10 * 0.1 -> -0.15
        let out = elevator.update(&at(0.0, 10.0));
        assert!((out.left + 0.15).abs() < 1e-6, "left {}", out.left);
    }

    #[test]
    fn test_track_update_is_idempotent() {
        let mut elevator = ElevatorController::new(params());
        elevator.set_mode(ElevatorMode::Track);
        elevator.set_setpoint(20.0, Strength::Gentle);
        let sensors = ElevatorSensors {
            left_rate: 1.5,
            right_rate: 1.0,
            ..at(8.0, 9.0)
        };
        let first = elevator.update(&sensors);
        let second = elevator.update(&sensors);
        assert_eq!(first, second);
    }

    #[test]
    fn test_on_target_uses_mean_position() {
        let mut elevator = ElevatorController::new(params());
        elevator.set_setpoint(10.0, Strength::Gentle);
        elevator.update(&at(9.0, 10.0));
        assert!(elevator.on_target(0.5));
        assert!(!elevator.on_target(0.4));
    }

    // ========================================================================
    // Tests: homing and zeroing
    // ========================================================================

    #[test]
    fn test_homing_descends_until_home() {
        let mut elevator = ElevatorController::new(params());
        elevator.set_mode(ElevatorMode::Track);
        elevator.set_setpoint(20.0, Strength::Strong);
        elevator.start_homing();

        let out = elevator.update(&at(4.0, 4.0));
        assert_eq!(out, ElevatorOutput { left: -0.1, right: 0.1 });
        assert!(elevator.is_homing());
    }

    #[test]
    fn test_homing_zeroes_and_resumes_previous_mode() {
        let mut elevator = ElevatorController::new(params());
        elevator.set_mode(ElevatorMode::Track);
        elevator.start_homing();

        let home = ElevatorSensors {
            at_home: true,
            ..at(3.0, 2.5)
        };
        elevator.update(&home);
        assert_eq!(elevator.mode(), ElevatorMode::Track);
        assert!(elevator.position().abs() < 1e-6);

        elevator.update(&at(13.0, 12.5));
        assert!((elevator.position() - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_abort_homing_leaves_counters() {
        let mut elevator = ElevatorController::new(params());
        elevator.update(&at(6.0, 6.0));
        elevator.start_homing();
        elevator.update(&at(5.0, 5.0));
        elevator.abort_homing();

        assert_eq!(elevator.mode(), ElevatorMode::Manual);
        assert!((elevator.position() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_home_sensor_rezeroes_in_any_mode() {
        let mut elevator = ElevatorController::new(params());
        elevator.set_mode(ElevatorMode::Track);
        elevator.set_setpoint(0.0, Strength::Gentle);
        let home = ElevatorSensors {
            at_home: true,
            ..at(0.7, 0.4)
        };
        elevator.update(&home);
        assert_eq!(elevator.mode(), ElevatorMode::Track);
        assert!(elevator.position().abs() < 1e-6);
    }

    #[test]
    fn test_tote_staged_passthrough() {
        let mut elevator = ElevatorController::new(params());
        assert!(!elevator.tote_staged());
        elevator.update(&ElevatorSensors {
            tote_staged: true,
            ..ElevatorSensors::default()
        });
        assert!(elevator.tote_staged());
    }
}
