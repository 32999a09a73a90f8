//! Client handle for talking to a driver task

use rat_types::{GsmBand, LegacyRatTable, Tech, TechSet, UmtsBand};
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::caps::DriverCaps;
use crate::command::DriverCommand;
use crate::error::DriverError;

/// Handle to a running modem driver
///
/// Pairs the command channel with the driver's declared capabilities and,
/// for bitmask-capable drivers, the legacy mapping table built at attach
/// time. Cloneable; all clones talk to the same driver task.
#[derive(Debug, Clone)]
pub struct DriverChannel {
    caps: DriverCaps,
    legacy_map: Option<LegacyRatTable>,
    tx: mpsc::Sender<DriverCommand>,
}

impl DriverChannel {
    /// Create a handle from a driver's capabilities and command sender
    ///
    /// `legacy_map` is the driver-supplied legacy mapping; bitmask-capable
    /// drivers build it from their supported-mode list when they attach.
    pub fn new(
        caps: DriverCaps,
        legacy_map: Option<LegacyRatTable>,
        tx: mpsc::Sender<DriverCommand>,
    ) -> DriverChannel {
        debug!(?caps, has_legacy_map = legacy_map.is_some(), "driver attached");
        DriverChannel {
            caps,
            legacy_map,
            tx,
        }
    }

    /// The driver's declared capabilities
    pub fn caps(&self) -> DriverCaps {
        self.caps
    }

    /// Whether this driver only understands single-technology preferences
    ///
    /// A driver is legacy exactly when it cannot enumerate bitmask mode
    /// combinations.
    pub fn is_legacy(&self) -> bool {
        !self.caps.query_available_rat_modes
    }

    /// Map a legacy tier to the mode mask this driver can realize for it
    ///
    /// Consults the driver's table when it supplied one, otherwise widens
    /// the tier to include every lower tier. `None` means the driver cannot
    /// honor this legacy preference at all.
    pub fn map_legacy_rat(&self, tech: Tech) -> Option<TechSet> {
        match &self.legacy_map {
            Some(table) => table.map(tech),
            None => {
                let mask = TechSet::from(tech).fill_down();
                (!mask.is_any()).then_some(mask)
            }
        }
    }

    async fn roundtrip<T>(
        &self,
        command: DriverCommand,
        rx: oneshot::Receiver<Result<T, DriverError>>,
    ) -> Result<T, DriverError> {
        self.tx
            .send(command)
            .await
            .map_err(|_| DriverError::Disconnected)?;
        rx.await.map_err(|_| DriverError::Disconnected)?
    }

    /// Query the current band pair
    pub async fn query_band(&self) -> Result<(GsmBand, UmtsBand), DriverError> {
        if !self.caps.query_band {
            return Err(DriverError::NotSupported);
        }
        let (reply, rx) = oneshot::channel();
        self.roundtrip(DriverCommand::QueryBand { reply }, rx).await
    }

    /// Change the band pair
    pub async fn set_band(&self, gsm: GsmBand, umts: UmtsBand) -> Result<(), DriverError> {
        if !self.caps.set_band {
            return Err(DriverError::NotSupported);
        }
        let (reply, rx) = oneshot::channel();
        self.roundtrip(DriverCommand::SetBand { gsm, umts, reply }, rx)
            .await
    }

    /// Query whether fast dormancy is enabled
    pub async fn query_fast_dormancy(&self) -> Result<bool, DriverError> {
        if !self.caps.query_fast_dormancy {
            return Err(DriverError::NotSupported);
        }
        let (reply, rx) = oneshot::channel();
        self.roundtrip(DriverCommand::QueryFastDormancy { reply }, rx)
            .await
    }

    /// Enable or disable fast dormancy
    pub async fn set_fast_dormancy(&self, enable: bool) -> Result<(), DriverError> {
        if !self.caps.set_fast_dormancy {
            return Err(DriverError::NotSupported);
        }
        let (reply, rx) = oneshot::channel();
        self.roundtrip(DriverCommand::SetFastDormancy { enable, reply }, rx)
            .await
    }

    /// Query the current technology preference
    pub async fn query_rat_mode(&self) -> Result<TechSet, DriverError> {
        if !self.caps.query_rat_mode {
            return Err(DriverError::NotSupported);
        }
        let (reply, rx) = oneshot::channel();
        self.roundtrip(DriverCommand::QueryRatMode { reply }, rx)
            .await
    }

    /// Change the technology preference
    pub async fn set_rat_mode(&self, mode: TechSet) -> Result<(), DriverError> {
        if !self.caps.set_rat_mode {
            return Err(DriverError::NotSupported);
        }
        let (reply, rx) = oneshot::channel();
        self.roundtrip(DriverCommand::SetRatMode { mode, reply }, rx)
            .await
    }

    /// Query supported technologies as a legacy tier bitmask
    pub async fn query_available_rats(&self) -> Result<u32, DriverError> {
        if !self.caps.query_available_rats {
            return Err(DriverError::NotSupported);
        }
        let (reply, rx) = oneshot::channel();
        self.roundtrip(DriverCommand::QueryAvailableRats { reply }, rx)
            .await
    }

    /// Query supported technologies as an ordered list of combinations
    pub async fn query_available_rat_modes(&self) -> Result<Vec<TechSet>, DriverError> {
        if !self.caps.query_available_rat_modes {
            return Err(DriverError::NotSupported);
        }
        let (reply, rx) = oneshot::channel();
        self.roundtrip(DriverCommand::QueryAvailableRatModes { reply }, rx)
            .await
    }
}
