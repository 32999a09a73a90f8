//! Error types for settings requests

use rat_driver::DriverError;
use rat_types::ValueError;
use thiserror::Error;

/// Errors a settings request can complete with
///
/// Every failure is terminal for its request; nothing is retried. A failed
/// write leaves all externally observable state as it was before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// The driver does not implement the operation this property needs
    #[error("not supported by this modem")]
    NotSupported,

    /// The value is well-formed but outside the driver's supported set
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    /// The value does not parse for the target property's domain
    #[error(transparent)]
    InvalidValue(#[from] ValueError),

    /// Unknown property name, or a value of the wrong type for it
    #[error("invalid property: {0}")]
    InvalidProperty(String),

    /// The driver mutation completed with an error
    #[error(transparent)]
    Driver(#[from] DriverError),

    /// The settings instance has been torn down
    #[error("settings shut down")]
    Shutdown,
}
