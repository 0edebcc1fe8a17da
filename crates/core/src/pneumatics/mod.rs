//! Pressure-gated pneumatic actuation
//!
//! A solenoid valve fired without enough stored air leaks and may leave the
//! mechanism half-moved. Every actuator here checks the pressure sample for
//! the current tick before it changes state.
//!
//! # Design
//!
//! The pressure reading is passed in explicitly on every gate check. Every
//! actuator sampled in the same tick therefore sees the same value, and no
//! actuator owns or caches it.
//!
//! A rejected request is not an error: the actuator stays where it is and
//! the caller learns the outcome by reading [`GatedActuator::state`].

/// Linear pressure transducer calibration
///
/// `pressure_psi = voltage * scale + offset`
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressureTransducer {
    /// PSI per volt
    pub scale: f32,
    /// PSI at zero volts
    pub offset: f32,
}

impl PressureTransducer {
    /// Create a transducer calibration
    pub const fn new(scale: f32, offset: f32) -> Self {
        Self { scale, offset }
    }

    /// Convert a sampled transducer voltage to PSI
    #[inline]
    pub fn pressure_psi(&self, voltage: f32) -> f32 {
        voltage * self.scale + self.offset
    }
}

/// Binary actuator whose state changes depend on stored air pressure
///
/// Two thresholds apply because the mechanism resists differently in each
/// direction: `on_threshold_psi` to switch on, `off_threshold_psi` to
/// switch off. A sample equal to the threshold satisfies it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GatedActuator {
    on: bool,
    on_threshold_psi: f32,
    off_threshold_psi: f32,
}

impl GatedActuator {
    /// Create an actuator in `initial` state.
    ///
    /// The initial state is applied unconditionally, like a valve that powers
    /// up in a known position.
    pub const fn new(initial: bool, on_threshold_psi: f32, off_threshold_psi: f32) -> Self {
        Self {
            on: initial,
            on_threshold_psi,
            off_threshold_psi,
        }
    }

    /// Current commanded state
    pub fn state(&self) -> bool {
        self.on
    }

    /// Pressure required to switch on
    pub fn on_threshold_psi(&self) -> f32 {
        self.on_threshold_psi
    }

    /// Pressure required to switch off
    pub fn off_threshold_psi(&self) -> f32 {
        self.off_threshold_psi
    }

    /// True if `pressure_psi` is enough to leave the current state.
    pub fn ok_to_toggle(&self, pressure_psi: f32) -> bool {
        (self.on && pressure_psi >= self.off_threshold_psi)
            || (!self.on && pressure_psi >= self.on_threshold_psi)
    }

    /// Change to `target` if the pressure allows it; otherwise drop the
    /// request. Nothing is queued and nothing is retried.
    pub fn request_state(&mut self, target: bool, pressure_psi: f32) {
        if self.ok_to_toggle(pressure_psi) {
            self.force_state(target);
        } else if target != self.on {
            log::debug!(
                "gated actuator: {} refused at {} psi",
                if target { "on" } else { "off" },
                pressure_psi
            );
        }
    }

    /// Change to `target` regardless of pressure.
    ///
    /// Reserved for emergency and safety overrides.
    pub fn force_state(&mut self, target: bool) {
        self.on = target;
    }

    /// Flip the state regardless of pressure.
    pub fn force_toggle(&mut self) {
        self.on = !self.on;
    }
}

/// Two actuators that move one mechanism together
///
/// A single gate decision, taken against the first actuator's state, drives
/// both so the pair never ends up split.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GatedActuatorPair {
    first: GatedActuator,
    second: GatedActuator,
}

impl GatedActuatorPair {
    /// Create a pair sharing thresholds and initial state
    pub const fn new(initial: bool, on_threshold_psi: f32, off_threshold_psi: f32) -> Self {
        Self {
            first: GatedActuator::new(initial, on_threshold_psi, off_threshold_psi),
            second: GatedActuator::new(initial, on_threshold_psi, off_threshold_psi),
        }
    }

    /// Current commanded state of the pair
    pub fn state(&self) -> bool {
        self.first.state()
    }

    /// Per-valve output levels
    pub fn outputs(&self) -> [bool; 2] {
        [self.first.state(), self.second.state()]
    }

    /// True if `pressure_psi` is enough to leave the current state.
    pub fn ok_to_toggle(&self, pressure_psi: f32) -> bool {
        self.first.ok_to_toggle(pressure_psi)
    }

    /// Gated state change for both actuators
    pub fn request_state(&mut self, target: bool, pressure_psi: f32) {
        if self.ok_to_toggle(pressure_psi) {
            self.force_state(target);
        }
    }

    /// Ungated state change for both actuators
    pub fn force_state(&mut self, target: bool) {
        self.first.force_state(target);
        self.second.force_state(target);
    }
}
