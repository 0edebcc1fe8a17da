//! Platform boundary
//!
//! The only place the robot touches devices. Everything behind these traits
//! is swappable: real drivers on the robot, [`mock`] devices in tests.

pub mod error;
pub mod mock;
pub mod traits;

pub use error::{PlatformError, Result};
