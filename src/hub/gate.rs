//! One-time, race-free construction of the shared [`NotificationHub`].

use crate::channels::{EmailChannel, SmsChannel, WebhookChannel};
use crate::config::HubConfig;
use crate::core::Channel;
use crate::hub::{InitError, NotificationHub};
use futures::future::{BoxFuture, FutureExt, Shared};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// The async routine that builds the hub on first demand.
///
/// Injectable through [`HubGateBuilder::constructor_override`] so tests can
/// count invocations or force construction failures.
pub type Constructor = Arc<
    dyn Fn(
            HubConfig,
            Vec<Arc<dyn Channel>>,
        ) -> BoxFuture<'static, Result<NotificationHub, InitError>>
        + Send
        + Sync,
>;

/// The memoized in-flight construction shared by all concurrent callers.
type PendingInit = Shared<BoxFuture<'static, Result<Arc<NotificationHub>, InitError>>>;

/// Construction lifecycle of the hub behind the gate.
///
/// Legal transitions: `Uninitialized -> Initializing -> Ready`, plus
/// `Initializing -> Uninitialized` when construction fails so that a later
/// call can retry.
enum GateState {
    Uninitialized,
    Initializing(PendingInit),
    Ready(Arc<NotificationHub>),
}

/// Enforces single construction of the shared hub under concurrency.
///
/// A gate is an explicit value rather than a hidden static, so independent
/// gates can coexist (one per test, one per embedding application context).
/// Within one gate, the construction routine runs exactly once per attempt
/// no matter how many callers race for the instance.
pub struct HubGate {
    state: Mutex<GateState>,
    config: HubConfig,
    constructor: Constructor,
}

impl HubGate {
    /// Creates a gate that constructs the hub from the configuration.
    pub fn new(config: HubConfig) -> Self {
        Self::builder(config).build()
    }

    /// Creates a new `HubGateBuilder` to construct a `HubGate`.
    pub fn builder(config: HubConfig) -> HubGateBuilder {
        HubGateBuilder::new(config)
    }

    /// Returns the shared hub, constructing it on first demand.
    ///
    /// Callers that arrive while construction is in flight attach to the
    /// same pending attempt and resolve to the identical instance. Once the
    /// hub is ready, `initial_channels` from later calls is discarded, not
    /// merged: whichever call won the construction race determined the
    /// initial channel set.
    pub async fn get_instance(
        &self,
        initial_channels: Vec<Arc<dyn Channel>>,
    ) -> Result<Arc<NotificationHub>, InitError> {
        let pending = {
            let mut state = self.state.lock().unwrap();
            match &*state {
                GateState::Ready(hub) => {
                    if !initial_channels.is_empty() {
                        debug!(
                            discarded = initial_channels.len(),
                            "hub already initialized, discarding initial channels"
                        );
                    }
                    return Ok(hub.clone());
                }
                GateState::Initializing(pending) => pending.clone(),
                GateState::Uninitialized => {
                    debug!("starting hub construction");
                    let attempt = (self.constructor)(self.config.clone(), initial_channels)
                        .map(|result| result.map(Arc::new))
                        .boxed()
                        .shared();
                    *state = GateState::Initializing(attempt.clone());
                    attempt
                }
            }
        };

        // The lock is released while the shared construction future runs;
        // every waiter drives and observes the same attempt.
        let result = pending.clone().await;
        self.settle(&pending, &result);
        result
    }

    /// Records the outcome of a settled construction attempt.
    ///
    /// A waiter from a superseded attempt must not clobber the state of a
    /// newer one, hence the pending-future identity check.
    fn settle(&self, attempt: &PendingInit, result: &Result<Arc<NotificationHub>, InitError>) {
        let mut state = self.state.lock().unwrap();
        let superseded = match &*state {
            GateState::Initializing(current) => !current.ptr_eq(attempt),
            _ => true,
        };
        if superseded {
            return;
        }
        match result {
            Ok(hub) => {
                info!(channels = hub.channel_count(), "notification hub ready");
                *state = GateState::Ready(hub.clone());
            }
            Err(error) => {
                warn!(%error, "hub construction failed, gate reset for retry");
                *state = GateState::Uninitialized;
            }
        }
    }
}

/// Builder for a [`HubGate`].
///
/// This pattern allows test code to swap the construction routine while the
/// production path sticks to the configuration-driven default.
pub struct HubGateBuilder {
    config: HubConfig,
    constructor_override: Option<Constructor>,
}

impl HubGateBuilder {
    pub fn new(config: HubConfig) -> Self {
        Self {
            config,
            constructor_override: None,
        }
    }

    /// Overrides the construction routine for testing.
    pub fn constructor_override(mut self, constructor: Constructor) -> Self {
        self.constructor_override = Some(constructor);
        self
    }

    pub fn build(self) -> HubGate {
        let constructor = self.constructor_override.unwrap_or_else(|| {
            Arc::new(|config, channels| default_construct(config, channels).boxed())
        });
        HubGate {
            state: Mutex::new(GateState::Uninitialized),
            config: self.config,
            constructor,
        }
    }
}

/// Default construction: waits out the configured setup delay, then builds
/// the channel set declared in the configuration and appends the caller's
/// initial channels.
async fn default_construct(
    config: HubConfig,
    initial_channels: Vec<Arc<dyn Channel>>,
) -> Result<NotificationHub, InitError> {
    if config.init_delay_ms > 0 {
        debug!(delay_ms = config.init_delay_ms, "simulating backend setup");
        sleep(Duration::from_millis(config.init_delay_ms)).await;
    }

    let mut channels = channels_from_config(&config)?;
    channels.extend(initial_channels);
    info!(channels = channels.len(), "constructed notification hub");
    Ok(NotificationHub::new(channels))
}

fn channels_from_config(config: &HubConfig) -> Result<Vec<Arc<dyn Channel>>, InitError> {
    let mut channels: Vec<Arc<dyn Channel>> = Vec::new();

    if let Some(email) = &config.channels.email {
        channels.push(Arc::new(EmailChannel::new(email.recipient.clone())));
    }
    if let Some(sms) = &config.channels.sms {
        channels.push(Arc::new(SmsChannel::new(sms.recipient.clone())));
    }
    if let Some(webhook) = &config.channels.webhook {
        let channel = WebhookChannel::new(
            webhook.url.clone(),
            Duration::from_millis(webhook.timeout_ms),
        )
        .map_err(|e| InitError::Construction(e.to_string()))?;
        channels.push(Arc::new(channel));
    }

    Ok(channels)
}
