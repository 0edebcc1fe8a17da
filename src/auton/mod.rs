//! Autonomous mode
//!
//! - [`actions`]: behaviours that command the subsystems
//! - [`routines`]: ordered action lists selectable before a match

pub mod actions;
pub mod routines;

pub use routines::Routine;
