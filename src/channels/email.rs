//! Email delivery channel.
//!
//! A stand-in transport that records deliveries in the log stream; a real
//! mail relay would slot in behind the same interface.

use crate::core::{Channel, Notification};
use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

pub struct EmailChannel {
    recipient: String,
}

impl EmailChannel {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
        }
    }
}

#[async_trait]
impl Channel for EmailChannel {
    fn name(&self) -> &str {
        "email"
    }

    async fn send(&self, notification: &Notification) -> Result<()> {
        info!(
            recipient = %self.recipient,
            title = %notification.title,
            body = %notification.body,
            "delivering email notification"
        );
        Ok(())
    }
}
