//! Pneumatics Parameter Definitions
//!
//! # Parameters
//!
//! - `PNEU_XDCR_SCALE` - Pressure transducer PSI per volt (read-only)
//! - `PNEU_XDCR_OFS` - Pressure transducer PSI at zero volts (read-only)

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::pneumatics::PressureTransducer;

const DEFAULT_SCALE: f32 = 50.0;
const DEFAULT_OFFSET: f32 = -25.0;

/// Pressure sensing calibration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PneumaticsParams {
    /// PSI per volt
    pub transducer_scale: f32,
    /// PSI at zero volts
    pub transducer_offset: f32,
}

impl Default for PneumaticsParams {
    fn default() -> Self {
        Self {
            transducer_scale: DEFAULT_SCALE,
            transducer_offset: DEFAULT_OFFSET,
        }
    }
}

impl PneumaticsParams {
    /// Register pneumatics parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            "PNEU_XDCR_SCALE",
            ParamValue::Float(DEFAULT_SCALE),
            ParamFlags::READ_ONLY,
        )?;
        store.register(
            "PNEU_XDCR_OFS",
            ParamValue::Float(DEFAULT_OFFSET),
            ParamFlags::READ_ONLY,
        )?;
        Ok(())
    }

    /// Load pneumatics parameters from parameter store
    pub fn from_store(store: &ParameterStore) -> Self {
        Self {
            transducer_scale: store.get_float("PNEU_XDCR_SCALE", DEFAULT_SCALE, 1.0, 200.0),
            transducer_offset: store.get_float("PNEU_XDCR_OFS", DEFAULT_OFFSET, -100.0, 100.0),
        }
    }

    /// Transducer calibration built from these parameters
    pub fn transducer(&self) -> PressureTransducer {
        PressureTransducer::new(self.transducer_scale, self.transducer_offset)
    }

    /// Validate pneumatics parameters
    pub fn is_valid(&self) -> bool {
        self.transducer_scale > 0.0 && self.transducer_offset.is_finite()
    }
}
