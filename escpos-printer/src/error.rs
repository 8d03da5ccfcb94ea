//! Error types for the printer library

use thiserror::Error;

/// Printer error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// Missing or malformed caller input (empty name, interior NUL)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The spooler refused to hand out a queue handle
    #[error("Failed to open printer {printer}: {reason}")]
    OpenFailed { printer: String, reason: String },

    /// Second-phase spooler enumeration failed
    #[error("Failed to enumerate printers: {0}")]
    EnumerationFailed(String),

    /// USB inventory query failed. Never leaves the inventory module:
    /// it is logged and turned into an empty inventory.
    #[error("USB inventory unavailable: {0}")]
    Inventory(String),
}

impl PrintError {
    #[cfg_attr(not(windows), allow(dead_code))]
    pub(crate) fn open_failed(printer: &str, reason: impl ToString) -> Self {
        Self::OpenFailed {
            printer: printer.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;
