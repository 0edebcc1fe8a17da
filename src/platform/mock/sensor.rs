//! Mock input devices for testing

use std::cell::Cell;
use std::rc::Rc;

use crate::platform::{
    traits::{AnalogInput, DigitalInput, EncoderInput, HeadingSensor},
    PlatformError, Result,
};

/// Mock encoder
#[derive(Debug, Clone, Default)]
pub struct MockEncoder {
    distance: Rc<Cell<f32>>,
    rate: Rc<Cell<f32>>,
    failing: Rc<Cell<bool>>,
}

impl MockEncoder {
    /// Create an encoder at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reported distance
    pub fn set_distance(&self, inches: f32) {
        self.distance.set(inches);
    }

    /// Move the reported distance by `inches`
    pub fn advance(&self, inches: f32) {
        self.distance.set(self.distance.get() + inches);
    }

    /// Set the reported rate
    pub fn set_rate(&self, inches_per_sec: f32) {
        self.rate.set(inches_per_sec);
    }

    /// Make subsequent reads fail
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    fn check(&self) -> Result<()> {
        if self.failing.get() {
            return Err(PlatformError::NotResponding {
                device: "mock encoder",
            });
        }
        Ok(())
    }
}

impl EncoderInput for MockEncoder {
    fn distance(&self) -> Result<f32> {
        self.check()?;
        Ok(self.distance.get())
    }

    fn rate(&self) -> Result<f32> {
        self.check()?;
        Ok(self.rate.get())
    }
}

/// Mock digital input
#[derive(Debug, Clone, Default)]
pub struct MockDigitalInput {
    level: Rc<Cell<bool>>,
    failing: Rc<Cell<bool>>,
}

impl MockDigitalInput {
    /// Create an inactive input
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input level (simulates the external signal)
    pub fn set_level(&self, active: bool) {
        self.level.set(active);
    }

    /// Make subsequent reads fail
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }
}

impl DigitalInput for MockDigitalInput {
    fn read(&self) -> Result<bool> {
        if self.failing.get() {
            return Err(PlatformError::NotResponding {
                device: "mock digital input",
            });
        }
        Ok(self.level.get())
    }
}

/// Mock analog input
#[derive(Debug, Clone, Default)]
pub struct MockAnalogInput {
    voltage: Rc<Cell<f32>>,
    failing: Rc<Cell<bool>>,
}

impl MockAnalogInput {
    /// Create an input reading 0 V
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sampled voltage
    pub fn set_voltage(&self, volts: f32) {
        self.voltage.set(volts);
    }

    /// Make subsequent reads fail
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }
}

impl AnalogInput for MockAnalogInput {
    fn voltage(&self) -> Result<f32> {
        if self.failing.get() {
            return Err(PlatformError::NotResponding {
                device: "mock analog input",
            });
        }
        Ok(self.voltage.get())
    }
}

/// Mock heading sensor
#[derive(Debug, Clone, Default)]
pub struct MockHeading {
    heading: Rc<Cell<f32>>,
    failing: Rc<Cell<bool>>,
}

impl MockHeading {
    /// Create a sensor pointing at 0 degrees
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reported heading
    pub fn set_heading(&self, degrees: f32) {
        self.heading.set(degrees);
    }

    /// Make subsequent reads fail
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }
}

impl HeadingSensor for MockHeading {
    fn heading_deg(&self) -> Result<f32> {
        if self.failing.get() {
            return Err(PlatformError::NotResponding {
                device: "mock heading",
            });
        }
        let heading = self.heading.get();
        if !(-180.0..=180.0).contains(&heading) {
            return Err(PlatformError::OutOfRange {
                device: "mock heading",
            });
        }
        Ok(heading)
    }
}
