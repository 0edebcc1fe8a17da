//! Logging abstraction
//!
//! One set of macros for every target:
//! - `defmt` feature: forwards to `defmt`
//! - otherwise: forwards to the `log` facade, so the host binary or test
//!   picks the logger
//!
//! Call sites use `log_info!("...")` and never name a backend.

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($($arg)*);

        #[cfg(not(feature = "defmt"))]
        ::log::info!($($arg)*);
    }};
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg)*);

        #[cfg(not(feature = "defmt"))]
        ::log::warn!($($arg)*);
    }};
}

/// Log error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::error!($($arg)*);

        #[cfg(not(feature = "defmt"))]
        ::log::error!($($arg)*);
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)*);

        #[cfg(not(feature = "defmt"))]
        ::log::debug!($($arg)*);
    }};
}

/// Log trace message
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::trace!($($arg)*);

        #[cfg(not(feature = "defmt"))]
        ::log::trace!($($arg)*);
    }};
}
