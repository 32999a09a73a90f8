//! Simulated modem drivers
//!
//! Provides a virtual modem that services driver commands from in-memory
//! state, for exercising the settings core without hardware. Capabilities,
//! initial state and per-operation failures are all configurable, and every
//! serviced command is recorded in a journal for test assertions.

pub mod modem;

pub use modem::{CallJournal, DriverCall, VirtualModem, VirtualModemConfig};
