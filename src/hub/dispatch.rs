//! Concurrent fan-out of a notification to a channel snapshot.

use crate::core::{BroadcastReport, Channel, ChannelOutcome, Notification};
use crate::hub::SendError;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

/// Fans one notification out to every channel in a snapshot and waits for
/// all deliveries to settle before reporting.
///
/// Dispatch is stateless across calls; each invocation spawns one task per
/// channel so that a slow, failing, or panicking channel never blocks or
/// cancels the others.
pub struct Dispatcher;

impl Dispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Invokes `send` on every channel concurrently, settling all of them.
    ///
    /// Outcomes are recorded at the channel's fixed snapshot index even
    /// though completions arrive out of order. A panicking channel is caught
    /// at its task boundary and recorded as a failure.
    pub async fn broadcast(
        &self,
        channels: &[Arc<dyn Channel>],
        notification: &Notification,
    ) -> BroadcastReport {
        metrics::counter!("broadcasts_total").increment(1);

        let names: Vec<String> = channels.iter().map(|c| c.name().to_string()).collect();
        let handles: Vec<_> = channels
            .iter()
            .map(|channel| {
                let channel = channel.clone();
                let notification = notification.clone();
                tokio::spawn(async move { channel.send(&notification).await })
            })
            .collect();

        let settled = join_all(handles).await;

        let mut outcomes = Vec::with_capacity(names.len());
        for (name, joined) in names.into_iter().zip(settled) {
            let result = match joined {
                Ok(Ok(())) => Ok(()),
                Ok(Err(error)) => {
                    warn!(channel = %name, error = %error, "channel failed to deliver notification");
                    metrics::counter!("channel_send_failures", "channel" => name.clone())
                        .increment(1);
                    Err(SendError::Delivery {
                        channel: name.clone(),
                        message: error.to_string(),
                    })
                }
                Err(join_error) => {
                    warn!(channel = %name, error = %join_error, "channel panicked during delivery");
                    metrics::counter!("channel_send_failures", "channel" => name.clone())
                        .increment(1);
                    Err(SendError::Panicked {
                        channel: name.clone(),
                    })
                }
            };
            outcomes.push(ChannelOutcome {
                channel: name,
                result,
            });
        }

        let report = BroadcastReport { outcomes };
        debug!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            "broadcast settled"
        );
        report
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingChannel {
        name: &'static str,
        sends: AtomicUsize,
    }

    impl CountingChannel {
        fn new(name: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                sends: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl Channel for CountingChannel {
        fn name(&self) -> &str {
            self.name
        }

        async fn send(&self, _notification: &Notification) -> anyhow::Result<()> {
            self.sends.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct PanickingChannel;

    #[async_trait]
    impl Channel for PanickingChannel {
        fn name(&self) -> &str {
            "panicking"
        }

        async fn send(&self, _notification: &Notification) -> anyhow::Result<()> {
            panic!("channel blew up");
        }
    }

    #[tokio::test]
    async fn test_empty_snapshot_settles_immediately() {
        let report = Dispatcher::new()
            .broadcast(&[], &Notification::default())
            .await;
        assert!(report.outcomes.is_empty());
        assert!(report.all_succeeded());
    }

    #[tokio::test]
    async fn test_panicking_channel_is_isolated_and_recorded() {
        let before = CountingChannel::new("before");
        let after = CountingChannel::new("after");
        let channels: Vec<Arc<dyn Channel>> = vec![
            before.clone(),
            Arc::new(PanickingChannel),
            after.clone(),
        ];

        let report = Dispatcher::new()
            .broadcast(&channels, &Notification::new("t", "b"))
            .await;

        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(before.sends.load(Ordering::SeqCst), 1);
        assert_eq!(after.sends.load(Ordering::SeqCst), 1);
        assert!(matches!(
            report.outcomes[1].result,
            Err(SendError::Panicked { .. })
        ));
    }

    #[tokio::test]
    async fn test_outcomes_keep_snapshot_order() {
        let channels: Vec<Arc<dyn Channel>> = vec![
            CountingChannel::new("a"),
            CountingChannel::new("b"),
            CountingChannel::new("c"),
        ];

        let report = Dispatcher::new()
            .broadcast(&channels, &Notification::default())
            .await;

        let order: Vec<&str> = report.outcomes.iter().map(|o| o.channel.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }
}
