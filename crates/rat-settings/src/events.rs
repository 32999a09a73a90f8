//! Change notifications emitted by the settings actor

/// Property names used by requests and change notifications
pub mod names {
    /// Technology preference property
    pub const TECHNOLOGY_PREFERENCE: &str = "TechnologyPreference";
    /// GSM band property
    pub const GSM_BAND: &str = "GsmBand";
    /// UMTS band property
    pub const UMTS_BAND: &str = "UmtsBand";
    /// Fast dormancy property
    pub const FAST_DORMANCY: &str = "FastDormancy";
}

/// A property value as seen by external clients
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PropertyValue {
    /// String-typed value (modes, bands)
    Text(String),
    /// Boolean value (fast dormancy)
    Bool(bool),
}

/// Events emitted by the settings actor
///
/// A `PropertyChanged` fires exactly once per field per committed write
/// that actually changes the confirmed value; rolled-back writes emit
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    /// A confirmed property value changed
    PropertyChanged {
        /// Property name
        name: &'static str,
        /// New confirmed value
        value: PropertyValue,
    },
}
