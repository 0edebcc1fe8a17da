//! totebot_core - Pure no_std control logic for the tote-stacking robot
//!
//! Every algorithm that decides what the robot does lives here, free of any
//! device or runtime dependency, so it can be tested on a host.
//!
//! # Design Principles
//!
//! - **Zero cfg**: no feature-gated behaviour (only optional `defmt` derives)
//! - **Pure no_std**: heap use is limited to boxed actions
//! - **Explicit inputs**: controllers take a sensor snapshot and return the
//!   next outputs; nothing reads hardware
//!
//! # Modules
//!
//! - [`control`]: gains, clamping, wrap-around error, debouncing
//! - [`drive`]: tank / distance-hold / heading-hold drivetrain controller
//! - [`elevator`]: dual-motor lift controller with steering and homing
//! - [`intake`]: ground intake wheels and arms
//! - [`pneumatics`]: pressure-gated actuators and transducer calibration
//! - [`sequencing`]: actions and the cooperative action scheduler
//! - [`parameters`]: parameter store and typed parameter blocks
//! - [`traits`]: time source abstraction

#![no_std]

extern crate alloc;

pub mod control;
pub mod drive;
pub mod elevator;
pub mod intake;
pub mod parameters;
pub mod pneumatics;
pub mod sequencing;
pub mod traits;
