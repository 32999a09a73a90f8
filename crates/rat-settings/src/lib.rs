//! Radio access settings core
//!
//! This crate owns a modem's radio-access configuration — technology
//! preference, frequency bands and fast dormancy — on behalf of external
//! property clients, while the actual hardware driver sits behind a
//! [`rat_driver::DriverChannel`].
//!
//! # Architecture
//!
//! All state lives in a single actor task ([`actor::run_settings_actor`]).
//! The actor's mpsc request channel is the request queue: requests are
//! serviced strictly in arrival order, and the loop fully completes one
//! request — including any driver round trip and the commit or rollback of
//! pending state — before receiving the next. That gives the
//! single-active-request discipline without any locking.
//!
//! The first `GetProperties` runs the initialization query pipeline
//! (technology preference, bands, fast dormancy, supported technologies),
//! skipping operations the driver lacks and tolerating per-stage failures.
//! Once the pipeline finishes the state is cached for the lifetime of the
//! instance and later reads are answered without touching the driver.
//!
//! Writes stage the requested value as pending, issue the driver mutation,
//! and on success commit it — emitting a [`SettingsEvent::PropertyChanged`]
//! and resyncing the persistent store — or on failure roll the pending
//! value back so no partial state is ever observable.
//!
//! # Example
//!
//! ```rust,no_run
//! use rat_settings::{MemoryStore, PropertyValue, Settings};
//! use rat_driver::DriverChannel;
//! use tokio::sync::mpsc;
//!
//! # async fn demo(driver: DriverChannel) {
//! let (event_tx, mut event_rx) = mpsc::channel(64);
//! let settings = Settings::new(driver, Box::new(MemoryStore::new()), event_tx);
//! let handle = settings.spawn();
//!
//! let props = handle.get_properties().await.unwrap();
//! println!("preference: {}", props.technology_preference);
//!
//! handle
//!     .set_property("TechnologyPreference", PropertyValue::Text("lte".into()))
//!     .await
//!     .unwrap();
//! # }
//! ```

pub mod actor;
pub mod engine;
pub mod error;
pub mod events;
pub mod pipeline;
pub mod properties;
pub mod state;
pub mod storage;

pub use actor::{run_settings_actor, SettingsHandle, SettingsRequest};
pub use engine::Settings;
pub use error::SettingsError;
pub use events::{PropertyValue, SettingsEvent};
pub use properties::Properties;
pub use state::SettingsState;
pub use storage::{JsonFileStore, MemoryStore, SettingsStore, StoredSettings};
