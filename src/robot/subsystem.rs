//! Per-tick subsystem interface

use crate::platform::Result;
use crate::{log_error, log_warn};

/// A mechanism updated once per control period
pub trait Subsystem {
    /// Name for logging
    fn name(&self) -> &'static str;

    /// Read sensors, run the controller, write outputs
    fn update(&mut self);

    /// Called when the operator takes control
    fn teleop_init(&mut self) {}
}

/// Unwrap a sensor read, falling back to the last known value
pub(crate) fn read_or_keep<T: Copy>(result: Result<T>, last: T, what: &'static str) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            log_warn!("{}: {} (keeping last value)", what, e);
            last
        }
    }
}

/// Log a failed output write; the tick carries on
pub(crate) fn log_write(result: Result<()>, what: &'static str) {
    if let Err(e) = result {
        log_error!("{}: {}", what, e);
    }
}
