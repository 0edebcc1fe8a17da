//! Parameter management types
//!
//! [`ParameterStore`] holds named values; each subsystem's typed block
//! registers defaults there and loads itself back with range clamping.

pub mod drive;
pub mod elevator;
pub mod error;
pub mod intake;
pub mod pneumatics;
pub mod storage;

pub use drive::DriveParams;
pub use elevator::{ElevatorParams, ElevatorPreset, PRESET_COUNT};
pub use error::ParameterError;
pub use intake::IntakeParams;
pub use pneumatics::PneumaticsParams;
pub use storage::{ParamFlags, ParamValue, ParameterStore, MAX_PARAMS, PARAM_NAME_LEN};
