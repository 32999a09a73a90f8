//! Error type for driver operations

use thiserror::Error;

/// Errors a driver operation can complete with
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DriverError {
    /// The driver does not implement this operation
    #[error("operation not supported by driver")]
    NotSupported,

    /// The modem reported a failure
    #[error("driver failure: {0}")]
    Failure(String),

    /// The driver task is gone
    #[error("driver disconnected")]
    Disconnected,
}
