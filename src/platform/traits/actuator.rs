//! Output device traits

use crate::platform::Result;

/// Speed controller driving one motor
///
/// Commands are normalized to -1.0..=1.0. Implementations may assume the
/// value is already clamped.
pub trait MotorOutput {
    /// Apply a new command
    ///
    /// # Errors
    ///
    /// Returns a `PlatformError` if the controller did not accept it.
    fn set_command(&mut self, command: f32) -> Result<()>;
}

/// Single-acting pneumatic valve
pub trait SolenoidOutput {
    /// Energize (`true`) or release (`false`) the valve
    ///
    /// # Errors
    ///
    /// Returns a `PlatformError` if the valve driver reports a failure.
    fn set_state(&mut self, on: bool) -> Result<()>;
}
