//! Error types for value parsing

use thiserror::Error;

/// Errors that can occur while parsing radio settings values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// Unknown technology word
    #[error("unknown technology: {0}")]
    UnknownTechnology(String),

    /// Unparseable technology preference string
    #[error("invalid technology preference: {0}")]
    InvalidMode(String),

    /// Unparseable GSM band string
    #[error("invalid GSM band: {0}")]
    InvalidGsmBand(String),

    /// Unparseable UMTS band string
    #[error("invalid UMTS band: {0}")]
    InvalidUmtsBand(String),
}
