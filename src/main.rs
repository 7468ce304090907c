//! NotifyHub - Notification fan-out demo
//!
//! Obtains the shared hub through its initialization gate and broadcasts a
//! single notification to every configured delivery channel.

use anyhow::Result;
use clap::Parser;
use notifyhub::{cli::Cli, config::HubConfig, core::Notification, hub::HubGate};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration by layering sources: defaults, file, environment, and CLI args.
    let config = HubConfig::load(&cli)?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    info!("NotifyHub starting up...");
    info!("Init Delay: {}ms", config.init_delay_ms);
    info!(
        "Email Channel: {}",
        if config.channels.email.is_some() {
            "Enabled"
        } else {
            "Disabled"
        }
    );
    info!(
        "SMS Channel: {}",
        if config.channels.sms.is_some() {
            "Enabled"
        } else {
            "Disabled"
        }
    );
    info!(
        "Webhook Channel: {}",
        if config.channels.webhook.is_some() {
            "Enabled"
        } else {
            "Disabled"
        }
    );

    let gate = HubGate::new(config);
    let hub = gate.get_instance(vec![]).await?;

    let notification = Notification::new(
        cli.title
            .unwrap_or_else(|| "Test Notification".to_string()),
        cli.body
            .unwrap_or_else(|| "This is a test notification message.".to_string()),
    );

    let report = hub.broadcast(&notification).await;
    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(()) => info!(channel = %outcome.channel, "delivered"),
            Err(error) => warn!(channel = %outcome.channel, %error, "delivery failed"),
        }
    }
    info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        "broadcast complete"
    );

    Ok(())
}
