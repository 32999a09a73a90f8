//! Commands serviced by a modem driver task

use rat_types::{GsmBand, TechSet, UmtsBand};
use tokio::sync::oneshot;

use crate::error::DriverError;

/// One request to the modem, with its completion reply
///
/// The driver resolves each reply exactly once. Replies may be sent from a
/// deferred context; senders must tolerate a dropped receiver (the settings
/// instance was torn down) by discarding the send result.
#[derive(Debug)]
pub enum DriverCommand {
    /// Query the current GSM/UMTS band pair
    QueryBand {
        /// Completion reply
        reply: oneshot::Sender<Result<(GsmBand, UmtsBand), DriverError>>,
    },

    /// Change the band pair
    SetBand {
        /// Requested GSM band
        gsm: GsmBand,
        /// Requested UMTS band
        umts: UmtsBand,
        /// Completion reply
        reply: oneshot::Sender<Result<(), DriverError>>,
    },

    /// Query whether fast dormancy is enabled
    QueryFastDormancy {
        /// Completion reply
        reply: oneshot::Sender<Result<bool, DriverError>>,
    },

    /// Enable or disable fast dormancy
    SetFastDormancy {
        /// Requested state
        enable: bool,
        /// Completion reply
        reply: oneshot::Sender<Result<(), DriverError>>,
    },

    /// Query the current technology preference
    QueryRatMode {
        /// Completion reply
        reply: oneshot::Sender<Result<TechSet, DriverError>>,
    },

    /// Change the technology preference
    SetRatMode {
        /// Requested mode mask (`ANY` for no preference)
        mode: TechSet,
        /// Completion reply
        reply: oneshot::Sender<Result<(), DriverError>>,
    },

    /// Query supported technologies as a legacy tier bitmask
    QueryAvailableRats {
        /// Completion reply
        reply: oneshot::Sender<Result<u32, DriverError>>,
    },

    /// Query supported technologies as an ordered list of combinations
    QueryAvailableRatModes {
        /// Completion reply
        reply: oneshot::Sender<Result<Vec<TechSet>, DriverError>>,
    },
}
