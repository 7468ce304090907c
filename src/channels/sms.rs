//! SMS delivery channel.

use crate::core::{Channel, Notification};
use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

pub struct SmsChannel {
    recipient: String,
}

impl SmsChannel {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
        }
    }
}

#[async_trait]
impl Channel for SmsChannel {
    fn name(&self) -> &str {
        "sms"
    }

    async fn send(&self, notification: &Notification) -> Result<()> {
        info!(
            recipient = %self.recipient,
            title = %notification.title,
            body = %notification.body,
            "delivering sms notification"
        );
        Ok(())
    }
}
