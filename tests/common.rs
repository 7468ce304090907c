//! Common fixtures for integration tests.

#![allow(dead_code)] // Not every test file uses every fixture.

use async_trait::async_trait;
use notifyhub::core::{Channel, Notification};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// A channel that records every notification it receives.
pub struct RecordingChannel {
    name: String,
    received: Mutex<Vec<Notification>>,
}

impl RecordingChannel {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            received: Mutex::new(Vec::new()),
        })
    }

    /// The notifications this channel has received, in delivery order.
    pub fn received(&self) -> Vec<Notification> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl Channel for RecordingChannel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, notification: &Notification) -> anyhow::Result<()> {
        self.received.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

/// A channel whose every send fails.
pub struct FailingChannel {
    name: String,
}

impl FailingChannel {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
        })
    }
}

#[async_trait]
impl Channel for FailingChannel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, _notification: &Notification) -> anyhow::Result<()> {
        anyhow::bail!("simulated delivery failure")
    }
}

/// A channel that parks inside `send` until released, to hold a broadcast
/// in flight while the test mutates the registry.
pub struct BlockingChannel {
    name: String,
    entered: Notify,
    release: Notify,
}

impl BlockingChannel {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            entered: Notify::new(),
            release: Notify::new(),
        })
    }

    /// Resolves once a broadcast has reached this channel's `send`.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Lets the parked `send` complete.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl Channel for BlockingChannel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, _notification: &Notification) -> anyhow::Result<()> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(())
    }
}
