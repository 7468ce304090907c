//! Ordered, snapshot-consistent collection of registered channels.

use crate::core::Channel;
use crate::hub::RegistryError;
use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::debug;

/// The ordered set of channels a broadcast fans out to.
///
/// The channel list is atomically swappable: a dispatch loads one consistent
/// snapshot and iterates it, so registrations and removals that land while a
/// broadcast is in flight only affect later broadcasts.
pub struct ChannelRegistry {
    channels: ArcSwap<Vec<Arc<dyn Channel>>>,
}

impl ChannelRegistry {
    /// Creates a registry seeded with an initial, ordered channel set.
    pub fn new(initial: Vec<Arc<dyn Channel>>) -> Self {
        Self {
            channels: ArcSwap::from_pointee(initial),
        }
    }

    /// Appends a channel, preserving registration order.
    ///
    /// No uniqueness is enforced: the same channel registered twice yields
    /// two deliveries per broadcast.
    pub fn register(&self, channel: Arc<dyn Channel>) {
        debug!(channel = channel.name(), "registering channel");
        self.channels.rcu(|current| {
            let mut next = Vec::clone(current);
            next.push(channel.clone());
            next
        });
    }

    /// Removes the first channel registered under `name`.
    pub fn unregister(&self, name: &str) -> Result<(), RegistryError> {
        let previous = self.channels.rcu(|current| {
            let mut next = Vec::clone(current);
            if let Some(index) = next.iter().position(|c| c.name() == name) {
                next.remove(index);
            }
            next
        });

        if previous.iter().any(|c| c.name() == name) {
            debug!(channel = name, "unregistered channel");
            Ok(())
        } else {
            Err(RegistryError::UnknownChannel(name.to_string()))
        }
    }

    /// Returns the current ordered channel list for one dispatch operation.
    pub fn snapshot(&self) -> Arc<Vec<Arc<dyn Channel>>> {
        self.channels.load_full()
    }

    /// Number of registered channels.
    pub fn len(&self) -> usize {
        self.channels.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.load().is_empty()
    }
}
