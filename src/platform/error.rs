//! Platform error types

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;

/// Device-level failures
///
/// Every device implementation maps its driver errors onto these variants.
/// `device` names the device for log messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlatformError {
    /// Device did not answer (unplugged, bus down)
    #[error("{device}: not responding")]
    NotResponding {
        /// Device name
        device: &'static str,
    },
    /// Device reported a fault
    #[error("{device}: hardware fault")]
    Fault {
        /// Device name
        device: &'static str,
    },
    /// Reading outside the device's physical range
    #[error("{device}: reading out of range")]
    OutOfRange {
        /// Device name
        device: &'static str,
    },
}
