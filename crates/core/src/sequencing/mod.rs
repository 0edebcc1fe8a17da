//! Autonomous action sequencing
//!
//! - [`Action`]: one behaviour with start/step semantics
//! - [`ActionScheduler`]: runs a queue of actions with background support
//!
//! Actions are generic over the context they command, so this module knows
//! nothing about drivetrains or lifts.

pub mod action;
pub mod scheduler;

pub use action::{Action, ActionError, EndState, Lifecycle};
pub use scheduler::{ActionScheduler, SchedulerError, MAX_ACTIONS};
