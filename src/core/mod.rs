//! Cross-cutting infrastructure shared by every robot module

pub mod logging;
