//! Settings actor
//!
//! The actor serializes all access to one modem's settings. Requests queue
//! on the mpsc channel and are serviced strictly in arrival order; the loop
//! does not receive request *N+1* until request *N* has fully completed,
//! including its driver round trip and commit or rollback. Driver replies
//! therefore never interleave with other requests, and the state needs no
//! locking.
//!
//! Dropping every [`SettingsHandle`] closes the request channel and stops
//! the actor; replies to requests still in flight are dropped, which makes
//! their completions no-ops.

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::engine::Settings;
use crate::error::SettingsError;
use crate::events::PropertyValue;
use crate::properties::Properties;

/// Requests accepted by the settings actor
#[derive(Debug)]
pub enum SettingsRequest {
    /// Read the full property snapshot
    ///
    /// The first read triggers the initialization query pipeline; reads
    /// queued behind it are answered from the cached state.
    GetProperties {
        /// Completion reply
        reply: oneshot::Sender<Properties>,
    },

    /// Write one property
    SetProperty {
        /// Property name
        name: String,
        /// Requested value
        value: PropertyValue,
        /// Completion reply
        reply: oneshot::Sender<Result<(), SettingsError>>,
    },
}

/// Run the settings actor until the request channel closes
///
/// Pushes the loaded settings to the modem first, then services requests
/// one at a time.
pub async fn run_settings_actor(
    mut settings: Settings,
    mut request_rx: mpsc::Receiver<SettingsRequest>,
) {
    settings.push_stored_settings().await;

    while let Some(request) = request_rx.recv().await {
        match request {
            SettingsRequest::GetProperties { reply } => {
                if !settings.state().cached {
                    settings.run_query_pipeline().await;
                }
                let _ = reply.send(settings.properties());
            }
            SettingsRequest::SetProperty { name, value, reply } => {
                let result = settings.set_property(&name, value).await;
                let _ = reply.send(result);
            }
        }
    }

    debug!("settings actor stopped");
}

/// Client handle to a running settings actor
#[derive(Debug, Clone)]
pub struct SettingsHandle {
    tx: mpsc::Sender<SettingsRequest>,
}

impl SettingsHandle {
    /// Wrap a request sender
    pub fn new(tx: mpsc::Sender<SettingsRequest>) -> SettingsHandle {
        SettingsHandle { tx }
    }

    /// Read the full property snapshot
    pub async fn get_properties(&self) -> Result<Properties, SettingsError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(SettingsRequest::GetProperties { reply })
            .await
            .map_err(|_| SettingsError::Shutdown)?;
        rx.await.map_err(|_| SettingsError::Shutdown)
    }

    /// Write one property
    pub async fn set_property(
        &self,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), SettingsError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(SettingsRequest::SetProperty {
                name: name.to_string(),
                value,
                reply,
            })
            .await
            .map_err(|_| SettingsError::Shutdown)?;
        rx.await.map_err(|_| SettingsError::Shutdown)?
    }
}
