//! totebot - Drivetrain, elevator and intake control for a tote-stacking robot
//!
//! This library binds the `totebot_core` controllers to devices, and runs
//! them from a fixed-period phase loop with autonomous routines.

// Device traits, mocks and platform errors
pub mod platform;

// Logging macros
pub mod core;

// Tuning and loop period
pub mod config;

// Hardware-bound subsystems and the phase loop
pub mod robot;

// Autonomous actions and routines
pub mod auton;
