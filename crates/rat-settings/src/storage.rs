//! Persisted settings
//!
//! Last-known settings are persisted per subscriber so that a preference
//! survives restarts. Storage failures are never fatal: a missing or
//! unreadable store just yields defaults, and a failed save is logged.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rat_driver::DriverChannel;
use rat_types::{AccessMode, GsmBand, UmtsBand};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// On-disk layout of the per-subscriber settings group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSettings {
    /// Technology preference: a legacy word, a `+`-joined combination, or
    /// (old installs) a bare decimal tier
    pub technology_preference: String,
    /// GSM band as a stored integer
    pub gsm_band: u8,
    /// UMTS band as a stored integer
    pub umts_band: u8,
}

impl Default for StoredSettings {
    fn default() -> Self {
        StoredSettings {
            technology_preference: "any".to_string(),
            gsm_band: 0,
            umts_band: 0,
        }
    }
}

/// Backend holding one subscriber's settings group
pub trait SettingsStore: Send + Sync {
    /// Load the stored settings, `None` when absent or unreadable
    fn load(&self) -> Option<StoredSettings>;

    /// Write the settings back; failures are the backend's to log
    fn save(&mut self, settings: &StoredSettings);
}

/// Settings decoded from storage, ready to seed the state record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSettings {
    /// Decoded technology preference
    pub mode: AccessMode,
    /// Decoded GSM band
    pub band_gsm: GsmBand,
    /// Decoded UMTS band
    pub band_umts: UmtsBand,
    /// Whether the stored form was outdated and should be rewritten
    pub migrated: bool,
}

/// Decode stored settings against the attached driver
///
/// Out-of-range or unparseable entries fall back to `any`. A bare decimal
/// preference is the pre-combination format and migrates to the word form.
/// A legacy word the driver cannot realize loads as `any`.
pub fn decode_stored(stored: &StoredSettings, driver: &DriverChannel) -> LoadedSettings {
    let band_gsm = GsmBand::from_stored(stored.gsm_band).unwrap_or_default();
    let band_umts = UmtsBand::from_stored(stored.umts_band).unwrap_or_default();

    let pref = stored.technology_preference.as_str();
    let mut migrated = false;

    let mode = match pref.parse::<AccessMode>() {
        Ok(AccessMode::Legacy(tech)) => {
            if driver.is_legacy() || driver.map_legacy_rat(tech).is_some() {
                AccessMode::Legacy(tech)
            } else {
                AccessMode::Any
            }
        }
        Ok(mode) => mode,
        Err(_) => {
            // Old installs stored the legacy tier as a decimal integer
            let mode = pref
                .parse::<u32>()
                .ok()
                .and_then(AccessMode::from_stored_int)
                .unwrap_or(AccessMode::Any);
            migrated = true;
            debug!("migrating stored preference {:?} -> {}", pref, mode);
            mode
        }
    };

    LoadedSettings {
        mode,
        band_gsm,
        band_umts,
        migrated,
    }
}

/// JSON file store, one file per subscriber
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for the given subscriber under a storage directory
    pub fn new(dir: impl AsRef<Path>, subscriber: &str) -> JsonFileStore {
        JsonFileStore {
            path: dir.as_ref().join(format!("{subscriber}-radio-settings.json")),
        }
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self) -> Option<StoredSettings> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) => {
                debug!("no stored settings at {:?}: {}", self.path, e);
                return None;
            }
        };
        match serde_json::from_slice(&data) {
            Ok(settings) => Some(settings),
            Err(e) => {
                warn!("unreadable settings at {:?}: {}", self.path, e);
                None
            }
        }
    }

    fn save(&mut self, settings: &StoredSettings) {
        let data = match serde_json::to_vec_pretty(settings) {
            Ok(data) => data,
            Err(e) => {
                warn!("failed to encode settings: {}", e);
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, data) {
            warn!("failed to write settings to {:?}: {}", self.path, e);
        }
    }
}

/// In-memory store with shared visibility, for tests
///
/// Clones share the same contents, so a test can keep one clone while the
/// settings actor owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    settings: Option<StoredSettings>,
    saves: usize,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    /// Create a store preloaded with settings
    pub fn with_settings(settings: StoredSettings) -> MemoryStore {
        let store = MemoryStore::new();
        store.inner.lock().unwrap().settings = Some(settings);
        store
    }

    /// The current contents
    pub fn contents(&self) -> Option<StoredSettings> {
        self.inner.lock().unwrap().settings.clone()
    }

    /// How many saves have happened
    pub fn save_count(&self) -> usize {
        self.inner.lock().unwrap().saves
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Option<StoredSettings> {
        self.inner.lock().unwrap().settings.clone()
    }

    fn save(&mut self, settings: &StoredSettings) {
        let mut inner = self.inner.lock().unwrap();
        inner.settings = Some(settings.clone());
        inner.saves += 1;
    }
}
