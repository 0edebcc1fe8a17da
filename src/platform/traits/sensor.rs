//! Input device traits
//!
//! Every read is a snapshot. Subsystems read each device once per tick and
//! keep the value for the rest of that tick.

use crate::platform::Result;

/// Quadrature encoder scaled to inches
pub trait EncoderInput {
    /// Distance travelled since the counter was last reset (inches)
    fn distance(&self) -> Result<f32>;

    /// Current rate of travel (inches per second)
    fn rate(&self) -> Result<f32>;
}

/// Binary sensor (limit switch, hall effect, photo eye)
pub trait DigitalInput {
    /// Current level, `true` when active
    fn read(&self) -> Result<bool>;
}

/// Analog input channel
pub trait AnalogInput {
    /// Sampled voltage
    fn voltage(&self) -> Result<f32>;
}

/// Yaw sensor
pub trait HeadingSensor {
    /// Heading in degrees, in -180..180
    fn heading_deg(&self) -> Result<f32>;
}
