//! The shared notification hub and the machinery behind it.
//!
//! The hub composes an ordered channel registry with a concurrent dispatcher
//! and is handed out by [`HubGate`], which guarantees that construction runs
//! exactly once no matter how many callers race for the first instance.

pub mod dispatch;
pub mod gate;
pub mod registry;

use crate::core::{BroadcastReport, Channel, Notification};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

pub use dispatch::Dispatcher;
pub use gate::{HubGate, HubGateBuilder};
pub use registry::ChannelRegistry;

/// Raised when the one-time hub construction fails.
///
/// `Clone` because the same rejection fans out to every caller attached to
/// the pending construction attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InitError {
    #[error("hub construction failed: {0}")]
    Construction(String),
}

/// Raised by an individual channel during a broadcast. Captured per channel
/// and surfaced only through the [`BroadcastReport`].
#[derive(Error, Debug)]
pub enum SendError {
    #[error("channel '{channel}' failed to deliver: {message}")]
    Delivery { channel: String, message: String },

    #[error("channel '{channel}' panicked during send")]
    Panicked { channel: String },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no channel registered under the name '{0}'")]
    UnknownChannel(String),
}

/// The shared notification coordinator.
///
/// Exists at most once per [`HubGate`] and is always handed out as the same
/// `Arc`. Channel registration mutates the hub's registry; broadcasting fans
/// the notification out to the channel set registered at call time.
pub struct NotificationHub {
    registry: ChannelRegistry,
    dispatcher: Dispatcher,
}

impl std::fmt::Debug for NotificationHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationHub")
            .field("channel_count", &self.channel_count())
            .finish()
    }
}

impl NotificationHub {
    /// Creates a hub over an initial, ordered channel set.
    pub fn new(initial_channels: Vec<Arc<dyn Channel>>) -> Self {
        Self {
            registry: ChannelRegistry::new(initial_channels),
            dispatcher: Dispatcher::new(),
        }
    }

    /// Appends a channel to the delivery set.
    ///
    /// Registering the same channel twice is allowed and results in two
    /// deliveries per broadcast.
    pub fn register_channel(&self, channel: Arc<dyn Channel>) {
        self.registry.register(channel);
    }

    /// Removes the first channel registered under `name`.
    pub fn unregister_channel(&self, name: &str) -> Result<(), RegistryError> {
        self.registry.unregister(name)
    }

    /// Number of currently registered channels.
    pub fn channel_count(&self) -> usize {
        self.registry.len()
    }

    /// Fans the notification out to every registered channel concurrently.
    ///
    /// The registry is snapshotted once at call time: channels registered
    /// while the broadcast is in flight are not part of it. Individual
    /// delivery failures are recorded in the returned report, never raised.
    pub async fn broadcast(&self, notification: &Notification) -> BroadcastReport {
        let snapshot = self.registry.snapshot();
        debug!(
            channels = snapshot.len(),
            title = %notification.title,
            "broadcasting notification"
        );
        self.dispatcher.broadcast(&snapshot, notification).await
    }
}
