//! Command-Line Interface (CLI) argument parsing.
//!
//! This module defines the command-line arguments for the application using
//! the `clap` crate. These arguments are parsed at startup and then merged
//! with the configuration from the `notifyhub.toml` file and environment
//! variables.

use clap::Parser;
use figment::{
    value::{Dict, Map, Value},
    Error, Metadata, Profile, Provider,
};
use std::path::PathBuf;

/// A process-wide notification hub that fans messages out to registered
/// delivery channels.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Logging level (e.g. "info", "debug").
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Setup latency applied before the hub becomes ready, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub init_delay_ms: Option<u64>,

    /// Title of the notification to broadcast.
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Body of the notification to broadcast.
    #[arg(long, value_name = "TEXT")]
    pub body: Option<String>,
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();

        if let Some(level) = &self.log_level {
            dict.insert("log_level".into(), Value::from(level.clone()));
        }

        if let Some(delay) = self.init_delay_ms {
            dict.insert("init_delay_ms".into(), Value::from(delay));
        }

        // `title` and `body` describe the one-shot payload the binary
        // broadcasts; they are not configuration keys.

        let mut map = Map::new();
        map.insert(Profile::Default, dict);
        Ok(map)
    }
}
