//! NotifyHub - A process-wide notification coordinator
//!
//! This library provides a shared notification hub that is constructed
//! exactly once under concurrency and fans notifications out to dynamically
//! registered delivery channels with partial-failure isolation.

pub mod channels;
pub mod cli;
pub mod config;
pub mod core;
pub mod hub;

// Re-export core types for convenience
pub use crate::core::*;
pub use crate::hub::{HubGate, HubGateBuilder, InitError, NotificationHub};
