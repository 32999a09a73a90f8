//! Modem driver boundary
//!
//! A modem driver runs as its own task and services [`DriverCommand`]s
//! received over an mpsc channel; each command carries a oneshot reply
//! sender that the driver resolves exactly once. The settings core talks to
//! the driver through a [`DriverChannel`], which pairs the command sender
//! with the driver's declared [`DriverCaps`].
//!
//! Real modems implement only a subset of the operations. Callers must gate
//! on the capability flags before issuing a command; the channel enforces
//! this by answering [`DriverError::NotSupported`] locally, without a
//! round trip, when the flag is absent.
//!
//! Dropping a reply receiver makes the driver's completion a no-op, which
//! is how a torn-down settings instance cancels in-flight work.

pub mod caps;
pub mod channel;
pub mod command;
pub mod error;

pub use caps::DriverCaps;
pub use channel::DriverChannel;
pub use command::DriverCommand;
pub use error::DriverError;
