//! Settings engine
//!
//! Owns the settings state, the driver channel, the persistent store and
//! the event stream, and implements the write discipline: validate, stage
//! pending, push to the driver, then commit or roll back.

use rat_driver::DriverChannel;
use rat_types::{AccessMode, GsmBand, Tech, TechSet, UmtsBand};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::actor::{run_settings_actor, SettingsHandle, SettingsRequest};
use crate::error::SettingsError;
use crate::events::{names, PropertyValue, SettingsEvent};
use crate::properties::Properties;
use crate::state::SettingsState;
use crate::storage::{decode_stored, SettingsStore, StoredSettings};

/// The radio settings engine
///
/// All mutation happens on the actor task that owns this value, so none of
/// the state needs locking.
pub struct Settings {
    driver: DriverChannel,
    state: SettingsState,
    store: Box<dyn SettingsStore>,
    event_tx: mpsc::Sender<SettingsEvent>,
}

impl Settings {
    /// Create the engine, seeding state from the store
    ///
    /// An outdated stored preference format is rewritten immediately.
    pub fn new(
        driver: DriverChannel,
        store: Box<dyn SettingsStore>,
        event_tx: mpsc::Sender<SettingsEvent>,
    ) -> Settings {
        let stored = store.load().unwrap_or_default();
        let loaded = decode_stored(&stored, &driver);
        info!(
            "loaded settings: preference {} gsm band {} umts band {}",
            loaded.mode, loaded.band_gsm, loaded.band_umts
        );

        let mut settings = Settings {
            driver,
            state: SettingsState::with_loaded(loaded.mode, loaded.band_gsm, loaded.band_umts),
            store,
            event_tx,
        };
        if loaded.migrated {
            settings.persist();
        }
        settings
    }

    /// Spawn the actor task and return a client handle
    pub fn spawn(self) -> SettingsHandle {
        let (tx, rx) = mpsc::channel::<SettingsRequest>(64);
        tokio::spawn(run_settings_actor(self, rx));
        SettingsHandle::new(tx)
    }

    /// The current state record
    pub fn state(&self) -> &SettingsState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut SettingsState {
        &mut self.state
    }

    pub(crate) fn driver(&self) -> &DriverChannel {
        &self.driver
    }

    /// Assemble the property snapshot for the current state
    pub fn properties(&self) -> Properties {
        Properties::from_state(&self.state, &self.driver)
    }

    /// Push the loaded settings to the modem at attach time
    ///
    /// Failures here are logged and do not delay readiness; no client is
    /// listening yet and nothing is retried.
    pub(crate) async fn push_stored_settings(&mut self) {
        let caps = self.driver.caps();

        if caps.set_band {
            if let Err(e) = self
                .driver
                .set_band(self.state.band_gsm, self.state.band_umts)
                .await
            {
                warn!("initial band push failed: {}", e);
            }
        }

        if caps.set_rat_mode {
            let wire = match self.state.mode {
                AccessMode::Any => TechSet::ANY,
                AccessMode::Legacy(tech) => {
                    if self.driver.is_legacy() {
                        TechSet::from(tech)
                    } else {
                        self.driver.map_legacy_rat(tech).unwrap_or(TechSet::ANY)
                    }
                }
                AccessMode::Modern(set) => set,
            };
            if let Err(e) = self.driver.set_rat_mode(wire).await {
                warn!("initial preference push failed: {}", e);
            }
        }
    }

    fn persist(&mut self) {
        self.store.save(&StoredSettings {
            technology_preference: self.state.mode.to_string(),
            gsm_band: self.state.band_gsm.to_stored(),
            umts_band: self.state.band_umts.to_stored(),
        });
    }

    async fn notify(&self, name: &'static str, value: PropertyValue) {
        let _ = self
            .event_tx
            .send(SettingsEvent::PropertyChanged { name, value })
            .await;
    }

    /// Confirm a technology preference, notifying and persisting on change
    pub(crate) async fn confirm_mode(&mut self, mode: AccessMode) {
        if self.state.mode == mode {
            return;
        }
        self.state.mode = mode;
        self.state.pending_mode = mode;
        self.notify(
            names::TECHNOLOGY_PREFERENCE,
            PropertyValue::Text(mode.to_string()),
        )
        .await;
        self.persist();
    }

    /// Commit the pending band pair, notifying and persisting per change
    pub(crate) async fn commit_band(&mut self) {
        let mut changed = false;

        if self.state.band_gsm != self.state.pending_band_gsm {
            self.state.band_gsm = self.state.pending_band_gsm;
            self.notify(
                names::GSM_BAND,
                PropertyValue::Text(self.state.band_gsm.to_string()),
            )
            .await;
            changed = true;
        }
        if self.state.band_umts != self.state.pending_band_umts {
            self.state.band_umts = self.state.pending_band_umts;
            self.notify(
                names::UMTS_BAND,
                PropertyValue::Text(self.state.band_umts.to_string()),
            )
            .await;
            changed = true;
        }
        if changed {
            self.persist();
        }
    }

    /// Commit the pending fast dormancy state, notifying on change
    pub(crate) async fn commit_fast_dormancy(&mut self) {
        if self.state.fast_dormancy == self.state.pending_fast_dormancy {
            return;
        }
        self.state.fast_dormancy = self.state.pending_fast_dormancy;
        self.notify(
            names::FAST_DORMANCY,
            PropertyValue::Bool(self.state.fast_dormancy),
        )
        .await;
    }

    /// Dispatch a property write to its field handler
    pub(crate) async fn set_property(
        &mut self,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), SettingsError> {
        match (name, value) {
            (names::TECHNOLOGY_PREFERENCE, PropertyValue::Text(s)) => {
                self.set_technology_preference(&s).await
            }
            (names::GSM_BAND, PropertyValue::Text(s)) => self.set_gsm_band(&s).await,
            (names::UMTS_BAND, PropertyValue::Text(s)) => self.set_umts_band(&s).await,
            (names::FAST_DORMANCY, PropertyValue::Bool(enable)) => {
                self.set_fast_dormancy(enable).await
            }
            (name, _) => Err(SettingsError::InvalidProperty(name.to_string())),
        }
    }

    async fn set_technology_preference(&mut self, value: &str) -> Result<(), SettingsError> {
        if !self.driver.caps().set_rat_mode {
            return Err(SettingsError::NotSupported);
        }

        let requested: AccessMode = value.parse()?;
        let (mode, wire) = match requested {
            AccessMode::Any => (AccessMode::Any, TechSet::ANY),
            AccessMode::Legacy(tech) => {
                if self.driver.is_legacy() {
                    if !self.state.is_mode_supported(TechSet::from(tech)) {
                        return Err(SettingsError::UnsupportedValue(value.to_string()));
                    }
                    (AccessMode::Legacy(tech), TechSet::from(tech))
                } else {
                    // Map the legacy word to what this driver can realize
                    let mapped = self
                        .driver
                        .map_legacy_rat(tech)
                        .ok_or_else(|| SettingsError::UnsupportedValue(value.to_string()))?;
                    (AccessMode::Legacy(tech), mapped)
                }
            }
            AccessMode::Modern(set) => {
                if self.driver.is_legacy() || !self.state.is_mode_supported(set) {
                    return Err(SettingsError::UnsupportedValue(value.to_string()));
                }
                (AccessMode::Modern(set), set)
            }
        };

        if self.state.mode == mode {
            return Ok(());
        }

        self.state.pending_mode = mode;
        match self.driver.set_rat_mode(wire).await {
            Ok(()) => {
                let pending = self.state.pending_mode;
                self.confirm_mode(pending).await;
                Ok(())
            }
            Err(e) => {
                self.state.rollback_mode();
                Err(e.into())
            }
        }
    }

    async fn set_gsm_band(&mut self, value: &str) -> Result<(), SettingsError> {
        if !self.driver.caps().set_band {
            return Err(SettingsError::NotSupported);
        }

        let band: GsmBand = value.parse()?;
        if self.state.band_gsm == band {
            return Ok(());
        }

        self.state.pending_band_gsm = band;
        self.push_band().await
    }

    async fn set_umts_band(&mut self, value: &str) -> Result<(), SettingsError> {
        if !self.driver.caps().set_band {
            return Err(SettingsError::NotSupported);
        }

        let band: UmtsBand = value.parse()?;
        if self.state.band_umts == band {
            return Ok(());
        }

        self.state.pending_band_umts = band;
        self.push_band().await
    }

    async fn push_band(&mut self) -> Result<(), SettingsError> {
        match self
            .driver
            .set_band(self.state.pending_band_gsm, self.state.pending_band_umts)
            .await
        {
            Ok(()) => {
                self.commit_band().await;
                Ok(())
            }
            Err(e) => {
                self.state.rollback_band();
                Err(e.into())
            }
        }
    }

    async fn set_fast_dormancy(&mut self, enable: bool) -> Result<(), SettingsError> {
        if !self.driver.caps().set_fast_dormancy {
            return Err(SettingsError::NotSupported);
        }

        if self.state.fast_dormancy == enable {
            return Ok(());
        }

        self.state.pending_fast_dormancy = enable;
        match self.driver.set_fast_dormancy(enable).await {
            Ok(()) => {
                self.commit_fast_dormancy().await;
                Ok(())
            }
            Err(e) => {
                self.state.rollback_fast_dormancy();
                Err(e.into())
            }
        }
    }

    /// Report whether a legacy tier maps to the given driver-reported mask
    ///
    /// This is the stickiness check: a previously set legacy preference is
    /// kept across a read when the driver's reported mode still corresponds
    /// to it.
    pub(crate) fn legacy_still_maps(&self, tech: Tech, reported: TechSet) -> bool {
        self.driver.map_legacy_rat(tech) == Some(reported)
    }
}
