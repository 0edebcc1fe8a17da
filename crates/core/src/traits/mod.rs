//! Platform-agnostic service traits
//!
//! Platform services reach the core through these traits. Mock
//! implementations are always compiled so host tests need no feature flags.

pub mod time;

pub use time::{MockTime, TimeSource};
