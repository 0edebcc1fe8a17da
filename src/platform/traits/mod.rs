//! Platform abstraction traits
//!
//! Device implementations provide these; subsystems only ever see the
//! traits.

pub mod actuator;
pub mod sensor;

pub use actuator::{MotorOutput, SolenoidOutput};
pub use sensor::{AnalogInput, DigitalInput, EncoderInput, HeadingSensor};
