//! Shared control primitives
//!
//! Pure building blocks used by every subsystem controller.
//!
//! # Contents
//!
//! - `PidGains` tuning coefficients (immutable, replaced wholesale)
//! - Output saturation and wrap-around error folding
//! - `Debouncer` for noisy digital inputs

mod debounce;
mod gains;
mod math;

pub use debounce::Debouncer;
pub use gains::PidGains;
pub use math::{clamp_output, fold_wrapped_error, limit, within_tolerance};
