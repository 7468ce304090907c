//! A channel that POSTs notifications to an HTTP webhook.

use crate::core::{Channel, Notification};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::time::Duration;
use tracing::{error, info};

/// Delivers notifications as JSON to a configured webhook endpoint.
pub struct WebhookChannel {
    url: String,
    client: reqwest::Client,
}

impl WebhookChannel {
    /// Creates a new `WebhookChannel` with a per-request timeout.
    pub fn new(url: String, timeout: Duration) -> Result<Self> {
        anyhow::ensure!(!url.is_empty(), "webhook channel requires a url");
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl Channel for WebhookChannel {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn send(&self, notification: &Notification) -> Result<()> {
        let payload = json!({
            "title": notification.title,
            "body": notification.body,
            "sent_at": Utc::now().to_rfc3339(),
        });

        let response = self.client.post(&self.url).json(&payload).send().await?;

        if response.status().is_success() {
            info!(url = %self.url, "delivered notification to webhook");
            Ok(())
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            error!(
                status = %status,
                body = %text,
                "webhook rejected notification"
            );
            anyhow::bail!("webhook returned status {}: {}", status, text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_webhook_channel_send_success() {
        // Arrange
        let server = MockServer::start().await;
        let notification = Notification::new("Deploy finished", "v1.4.2 is live");

        Mock::given(method("POST"))
            .and(path("/notify"))
            .and(body_partial_json(json!({
                "title": "Deploy finished",
                "body": "v1.4.2 is live",
            })))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let channel = WebhookChannel::new(
            format!("{}/notify", server.uri()),
            Duration::from_secs(5),
        )
        .unwrap();

        // Act
        let result = channel.send(&notification).await;

        // Assert
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_webhook_channel_handles_server_error() {
        // Arrange
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/notify"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let channel = WebhookChannel::new(
            format!("{}/notify", server.uri()),
            Duration::from_secs(5),
        )
        .unwrap();

        // Act
        let result = channel.send(&Notification::default()).await;

        // Assert
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_webhook_channel_handles_timeout() {
        // Arrange
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/notify"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let channel = WebhookChannel::new(
            format!("{}/notify", server.uri()),
            Duration::from_millis(200),
        )
        .unwrap();

        // Act
        let result = channel.send(&Notification::default()).await;

        // Assert
        let err = result.unwrap_err();
        let is_timeout = err
            .chain()
            .any(|cause| {
                cause
                    .downcast_ref::<reqwest::Error>()
                    .map_or(false, |e| e.is_timeout())
            });
        assert!(is_timeout, "error should be a timeout, but was: {}", err);
    }

    #[test]
    fn test_webhook_channel_rejects_empty_url() {
        let result = WebhookChannel::new(String::new(), Duration::from_secs(1));
        assert!(result.is_err());
    }
}
