//! Virtual modem driver
//!
//! Runs as a driver task answering commands from internal state, the same
//! way a hardware driver would from the modem. Set operations mutate the
//! internal state on success, so a later query reports what was set.

use std::sync::{Arc, Mutex};

use rat_driver::{DriverCaps, DriverChannel, DriverCommand, DriverError};
use rat_types::{GsmBand, LegacyRatTable, TechSet, UmtsBand};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

/// A driver command as recorded in the journal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    /// Band pair query
    QueryBand,
    /// Band pair mutation
    SetBand(GsmBand, UmtsBand),
    /// Fast dormancy query
    QueryFastDormancy,
    /// Fast dormancy mutation
    SetFastDormancy(bool),
    /// Technology preference query
    QueryRatMode,
    /// Technology preference mutation
    SetRatMode(TechSet),
    /// Legacy tier bitmask query
    QueryAvailableRats,
    /// Mode combination list query
    QueryAvailableRatModes,
}

/// Shared record of every command the virtual modem serviced
#[derive(Debug, Clone, Default)]
pub struct CallJournal {
    calls: Arc<Mutex<Vec<DriverCall>>>,
}

impl CallJournal {
    fn record(&self, call: DriverCall) {
        self.calls.lock().unwrap().push(call);
    }

    /// Snapshot of all recorded calls, in service order
    pub fn calls(&self) -> Vec<DriverCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls
    pub fn len(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.calls.lock().unwrap().is_empty()
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

/// Configuration for a virtual modem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualModemConfig {
    /// Declared capabilities
    pub caps: DriverCapsConfig,
    /// Supported mode combinations (bitmask-capable modems)
    pub supported_modes: Vec<TechSet>,
    /// Supported technologies as a tier bitmask (legacy modems)
    pub available_rats: u32,
    /// Initial technology preference
    pub mode: TechSet,
    /// Initial GSM band
    pub band_gsm: GsmBand,
    /// Initial UMTS band
    pub band_umts: UmtsBand,
    /// Initial fast dormancy state
    pub fast_dormancy: bool,
    /// Scripted failures, one switch per operation
    pub failures: FailureConfig,
}

/// Capability flags in serializable form
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DriverCapsConfig {
    /// Can report the band pair
    pub query_band: bool,
    /// Can change the band pair
    pub set_band: bool,
    /// Can report fast dormancy
    pub query_fast_dormancy: bool,
    /// Can change fast dormancy
    pub set_fast_dormancy: bool,
    /// Can report the technology preference
    pub query_rat_mode: bool,
    /// Can change the technology preference
    pub set_rat_mode: bool,
    /// Can report support as a tier bitmask
    pub query_available_rats: bool,
    /// Can report support as a combination list
    pub query_available_rat_modes: bool,
}

impl From<DriverCaps> for DriverCapsConfig {
    fn from(caps: DriverCaps) -> Self {
        DriverCapsConfig {
            query_band: caps.query_band,
            set_band: caps.set_band,
            query_fast_dormancy: caps.query_fast_dormancy,
            set_fast_dormancy: caps.set_fast_dormancy,
            query_rat_mode: caps.query_rat_mode,
            set_rat_mode: caps.set_rat_mode,
            query_available_rats: caps.query_available_rats,
            query_available_rat_modes: caps.query_available_rat_modes,
        }
    }
}

impl From<DriverCapsConfig> for DriverCaps {
    fn from(config: DriverCapsConfig) -> Self {
        DriverCaps {
            query_band: config.query_band,
            set_band: config.set_band,
            query_fast_dormancy: config.query_fast_dormancy,
            set_fast_dormancy: config.set_fast_dormancy,
            query_rat_mode: config.query_rat_mode,
            set_rat_mode: config.set_rat_mode,
            query_available_rats: config.query_available_rats,
            query_available_rat_modes: config.query_available_rat_modes,
        }
    }
}

/// Per-operation failure switches
///
/// A set switch makes the operation complete with a driver failure instead
/// of touching the modem state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FailureConfig {
    /// Fail band queries
    pub query_band: bool,
    /// Fail band mutations
    pub set_band: bool,
    /// Fail fast dormancy queries
    pub query_fast_dormancy: bool,
    /// Fail fast dormancy mutations
    pub set_fast_dormancy: bool,
    /// Fail technology preference queries
    pub query_rat_mode: bool,
    /// Fail technology preference mutations
    pub set_rat_mode: bool,
    /// Fail supported-technology queries (both styles)
    pub query_available: bool,
}

impl VirtualModemConfig {
    /// A fully featured bitmask-capable modem with the given mode support
    pub fn modern(supported: &[TechSet]) -> VirtualModemConfig {
        VirtualModemConfig {
            caps: DriverCaps::modern_full().into(),
            supported_modes: supported.to_vec(),
            available_rats: 0,
            mode: TechSet::ANY,
            band_gsm: GsmBand::Any,
            band_umts: UmtsBand::Any,
            fast_dormancy: false,
            failures: FailureConfig::default(),
        }
    }

    /// A fully featured legacy modem supporting the given technology tiers
    pub fn legacy(available_rats: u32) -> VirtualModemConfig {
        VirtualModemConfig {
            caps: DriverCaps::legacy_full().into(),
            supported_modes: Vec::new(),
            available_rats,
            mode: TechSet::ANY,
            band_gsm: GsmBand::Any,
            band_umts: UmtsBand::Any,
            fast_dormancy: false,
            failures: FailureConfig::default(),
        }
    }

    /// A modem that only implements the technology preference operations
    pub fn rat_mode_only() -> VirtualModemConfig {
        VirtualModemConfig {
            caps: DriverCaps::rat_mode_only().into(),
            supported_modes: Vec::new(),
            available_rats: 0,
            mode: TechSet::ANY,
            band_gsm: GsmBand::Any,
            band_umts: UmtsBand::Any,
            fast_dormancy: false,
            failures: FailureConfig::default(),
        }
    }
}

/// A simulated modem driver
pub struct VirtualModem {
    config: VirtualModemConfig,
}

impl VirtualModem {
    /// Spawn the driver task for the given configuration
    ///
    /// Returns the channel the settings core attaches to and the shared
    /// call journal. Bitmask-capable configurations get their legacy table
    /// built from `supported_modes`, the way a real driver does at attach.
    pub fn spawn(config: VirtualModemConfig) -> (DriverChannel, CallJournal) {
        let caps: DriverCaps = config.caps.into();
        let legacy_map = caps
            .query_available_rat_modes
            .then(|| LegacyRatTable::build(&config.supported_modes));

        let (tx, rx) = mpsc::channel(32);
        let channel = DriverChannel::new(caps, legacy_map, tx);
        let journal = CallJournal::default();

        let modem = VirtualModem { config };
        tokio::spawn(modem.run(rx, journal.clone()));

        (channel, journal)
    }

    async fn run(mut self, mut rx: mpsc::Receiver<DriverCommand>, journal: CallJournal) {
        while let Some(command) = rx.recv().await {
            self.service(command, &journal);
        }
        debug!("virtual modem stopped");
    }

    fn service(&mut self, command: DriverCommand, journal: &CallJournal) {
        let failures = self.config.failures;

        match command {
            DriverCommand::QueryBand { reply } => {
                journal.record(DriverCall::QueryBand);
                let _ = reply.send(if failures.query_band {
                    Err(failure())
                } else {
                    Ok((self.config.band_gsm, self.config.band_umts))
                });
            }
            DriverCommand::SetBand { gsm, umts, reply } => {
                journal.record(DriverCall::SetBand(gsm, umts));
                let _ = reply.send(if failures.set_band {
                    Err(failure())
                } else {
                    self.config.band_gsm = gsm;
                    self.config.band_umts = umts;
                    Ok(())
                });
            }
            DriverCommand::QueryFastDormancy { reply } => {
                journal.record(DriverCall::QueryFastDormancy);
                let _ = reply.send(if failures.query_fast_dormancy {
                    Err(failure())
                } else {
                    Ok(self.config.fast_dormancy)
                });
            }
            DriverCommand::SetFastDormancy { enable, reply } => {
                journal.record(DriverCall::SetFastDormancy(enable));
                let _ = reply.send(if failures.set_fast_dormancy {
                    Err(failure())
                } else {
                    self.config.fast_dormancy = enable;
                    Ok(())
                });
            }
            DriverCommand::QueryRatMode { reply } => {
                journal.record(DriverCall::QueryRatMode);
                let _ = reply.send(if failures.query_rat_mode {
                    Err(failure())
                } else {
                    Ok(self.config.mode)
                });
            }
            DriverCommand::SetRatMode { mode, reply } => {
                journal.record(DriverCall::SetRatMode(mode));
                let _ = reply.send(if failures.set_rat_mode {
                    Err(failure())
                } else {
                    self.config.mode = mode;
                    Ok(())
                });
            }
            DriverCommand::QueryAvailableRats { reply } => {
                journal.record(DriverCall::QueryAvailableRats);
                let _ = reply.send(if failures.query_available {
                    Err(failure())
                } else {
                    Ok(self.config.available_rats)
                });
            }
            DriverCommand::QueryAvailableRatModes { reply } => {
                journal.record(DriverCall::QueryAvailableRatModes);
                let _ = reply.send(if failures.query_available {
                    Err(failure())
                } else {
                    Ok(self.config.supported_modes.clone())
                });
            }
        }
    }
}

fn failure() -> DriverError {
    DriverError::Failure("simulated failure".to_string())
}
