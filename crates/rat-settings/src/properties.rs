//! Externally visible property snapshot

use rat_driver::DriverChannel;
use rat_types::Tech;
use serde::{Deserialize, Serialize};

use crate::state::SettingsState;

/// Snapshot of the radio settings as exposed to property clients
///
/// Optional fields are present only when the driver implements the
/// corresponding query; `available_technologies` only once the supported
/// set has been enumerated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    /// Current technology preference
    pub technology_preference: String,
    /// Current GSM band restriction
    pub gsm_band: Option<String>,
    /// Current UMTS band restriction
    pub umts_band: Option<String>,
    /// Whether fast dormancy is enabled
    pub fast_dormancy: Option<bool>,
    /// Technologies and combinations this modem can be set to
    pub available_technologies: Option<Vec<String>>,
}

impl Properties {
    /// Assemble the snapshot from settings state and driver capabilities
    pub fn from_state(state: &SettingsState, driver: &DriverChannel) -> Properties {
        let caps = driver.caps();

        let available_technologies = state.available_modes.as_ref().map(|modes| {
            if driver.is_legacy() {
                // Legacy drivers enumerate single technologies
                modes
                    .iter()
                    .filter_map(|m| m.single())
                    .map(|t| t.name().to_string())
                    .collect()
            } else {
                // Legacy words the driver can realize, then the combinations
                let mut rats: Vec<String> = Tech::TIERS
                    .iter()
                    .filter(|t| driver.map_legacy_rat(**t).is_some())
                    .map(|t| t.name().to_string())
                    .collect();
                rats.extend(modes.iter().map(|m| m.to_string()));
                rats
            }
        });

        Properties {
            technology_preference: state.mode.to_string(),
            gsm_band: caps.query_band.then(|| state.band_gsm.to_string()),
            umts_band: caps.query_band.then(|| state.band_umts.to_string()),
            fast_dormancy: caps.query_fast_dormancy.then_some(state.fast_dormancy),
            available_technologies,
        }
    }
}
