//! In-memory settings record

use rat_types::{AccessMode, GsmBand, TechSet, UmtsBand};

/// Confirmed and pending radio settings
///
/// Each settable field exists twice: the confirmed value the driver has
/// acknowledged, and the pending value currently being pushed. A
/// successful mutation copies pending into confirmed; a failed one copies
/// confirmed back into pending, so the pair is equal whenever no request
/// is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsState {
    /// Confirmed technology preference
    pub mode: AccessMode,
    /// Pending technology preference
    pub pending_mode: AccessMode,
    /// Confirmed GSM band
    pub band_gsm: GsmBand,
    /// Pending GSM band
    pub pending_band_gsm: GsmBand,
    /// Confirmed UMTS band
    pub band_umts: UmtsBand,
    /// Pending UMTS band
    pub pending_band_umts: UmtsBand,
    /// Confirmed fast dormancy state
    pub fast_dormancy: bool,
    /// Pending fast dormancy state
    pub pending_fast_dormancy: bool,
    /// Supported technology combinations, once queried
    ///
    /// Replaced wholesale, never mutated in place. `None` until the
    /// pipeline has run (or when the driver cannot enumerate support).
    pub available_modes: Option<Vec<TechSet>>,
    /// Whether the initialization pipeline has completed
    pub cached: bool,
}

impl Default for SettingsState {
    fn default() -> Self {
        SettingsState {
            mode: AccessMode::Any,
            pending_mode: AccessMode::Any,
            band_gsm: GsmBand::Any,
            pending_band_gsm: GsmBand::Any,
            band_umts: UmtsBand::Any,
            pending_band_umts: UmtsBand::Any,
            fast_dormancy: false,
            pending_fast_dormancy: false,
            available_modes: None,
            cached: false,
        }
    }
}

impl SettingsState {
    /// Create a state record from loaded settings
    pub fn with_loaded(mode: AccessMode, band_gsm: GsmBand, band_umts: UmtsBand) -> SettingsState {
        SettingsState {
            mode,
            pending_mode: mode,
            band_gsm,
            pending_band_gsm: band_gsm,
            band_umts,
            pending_band_umts: band_umts,
            ..SettingsState::default()
        }
    }

    /// Whether the driver supports the given mode mask
    ///
    /// `ANY` is always supported. When support was never enumerated,
    /// everything is assumed supported.
    pub fn is_mode_supported(&self, mode: TechSet) -> bool {
        if mode.is_any() {
            return true;
        }
        match &self.available_modes {
            Some(modes) => modes.contains(&mode),
            None => true,
        }
    }

    /// Discard an attempted mode change
    pub fn rollback_mode(&mut self) {
        self.pending_mode = self.mode;
    }

    /// Discard an attempted band change
    pub fn rollback_band(&mut self) {
        self.pending_band_gsm = self.band_gsm;
        self.pending_band_umts = self.band_umts;
    }

    /// Discard an attempted fast dormancy change
    pub fn rollback_fast_dormancy(&mut self) {
        self.pending_fast_dormancy = self.fast_dormancy;
    }
}
