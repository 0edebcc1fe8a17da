//! Mock devices for testing
//!
//! Each mock is `Clone` and every clone shares the same state, so a test
//! keeps one handle to drive sensor values or inspect outputs while the
//! subsystem owns another. Every mock can be told to fail, to exercise the
//! last-known-value fallbacks. [`MockRobot`] bundles a full set.
//!
//! # Example
//!
//! ```
//! use totebot::platform::mock::MockMotor;
//! use totebot::platform::traits::MotorOutput;
//!
//! let motor = MockMotor::new();
//! let mut owned = motor.clone();
//! owned.set_command(0.5).unwrap();
//! assert_eq!(motor.command(), 0.5);
//! ```

mod actuator;
mod platform;
mod sensor;

pub use actuator::{MockMotor, MockSolenoid};
pub use platform::MockRobot;
pub use sensor::{MockAnalogInput, MockDigitalInput, MockEncoder, MockHeading};
