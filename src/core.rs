//! Core domain types and the channel service trait.
//!
//! This module defines the fundamental data structures and trait contracts
//! that govern component interactions throughout the crate.

use crate::hub::SendError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A notification payload delivered to every registered channel.
///
/// The dispatcher hands each channel its own clone, so a caller that keeps
/// mutating its copy after calling `broadcast` cannot change what any
/// channel observes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Notification {
    /// Short human-readable headline.
    pub title: String,
    /// Free-form message body.
    pub body: String,
}

impl Notification {
    /// Creates a new notification from a title and body.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

// =============================================================================
// Service Traits
// =============================================================================

/// Delivers notifications to a single destination.
#[async_trait]
pub trait Channel: Send + Sync {
    /// A unique, descriptive name for the channel (e.g., "email", "webhook").
    /// Used for logging, metrics, and unregistration.
    fn name(&self) -> &str;

    /// Delivers a notification to this channel's destination.
    ///
    /// # Arguments
    /// * `notification` - The notification to deliver
    ///
    /// # Returns
    /// * `Ok(())` if the notification was delivered
    /// * `Err` if delivery failed (network error, formatting error, etc.)
    async fn send(&self, notification: &Notification) -> anyhow::Result<()>;
}

/// The recorded result of a single channel's delivery attempt.
#[derive(Debug)]
pub struct ChannelOutcome {
    /// Name of the channel the attempt was made against.
    pub channel: String,
    /// The delivery result, with failures captured as data.
    pub result: Result<(), SendError>,
}

/// Aggregate outcome of one broadcast, in registry snapshot order.
///
/// A broadcast never fails as a whole: individual delivery errors are only
/// visible here. Callers that need strict semantics inspect the counts.
#[derive(Debug, Default)]
pub struct BroadcastReport {
    /// One outcome per channel in the dispatch snapshot, in snapshot order.
    pub outcomes: Vec<ChannelOutcome>,
}

impl BroadcastReport {
    /// Number of channels that accepted the notification.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Number of channels that failed or panicked.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// True when every channel in the snapshot accepted the notification.
    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }
}
