//! Configuration management for the notification hub.
//!
//! This module defines the main `HubConfig` struct and its sub-structs,
//! responsible for holding all application settings. It uses the `figment`
//! crate to load configuration from a `notifyhub.toml` file and merge it
//! with environment variables and command-line arguments.

use crate::cli::Cli;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HubConfig {
    /// The logging level for the application.
    pub log_level: String,
    /// Setup latency applied before the hub becomes ready, in milliseconds.
    /// Stands in for whatever initialization the concrete backend requires.
    pub init_delay_ms: u64,
    /// Channels constructed together with the hub.
    pub channels: ChannelsConfig,
}

/// Channels the default construction routine instantiates.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ChannelsConfig {
    pub email: Option<EmailConfig>,
    pub sms: Option<SmsConfig>,
    pub webhook: Option<WebhookConfig>,
}

/// Configuration for the email channel.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EmailConfig {
    /// Address notifications are delivered to.
    pub recipient: String,
}

/// Configuration for the SMS channel.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SmsConfig {
    /// Phone number notifications are delivered to.
    pub recipient: String,
}

/// Configuration for the webhook channel.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WebhookConfig {
    /// The endpoint notifications are POSTed to.
    pub url: String,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_webhook_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_webhook_timeout_ms() -> u64 {
    10_000
}

impl HubConfig {
    /// Loads the configuration by layering sources: defaults, file,
    /// environment, and CLI arguments.
    pub fn load(cli: &Cli) -> Result<Self> {
        let file = cli
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from("notifyhub.toml"));
        let config: HubConfig = Figment::new()
            .merge(Serialized::defaults(HubConfig::default()))
            .merge(Toml::file(file))
            // Allow overriding with environment variables, e.g., NOTIFYHUB_INIT_DELAY_MS=250
            .merge(Env::prefixed("NOTIFYHUB_"))
            .merge(cli)
            .extract()?;
        Ok(config)
    }
}

// Provide a default implementation for tests and easy setup.
impl Default for HubConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            init_delay_ms: 0,
            channels: ChannelsConfig::default(),
        }
    }
}
