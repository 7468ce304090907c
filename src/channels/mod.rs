//! Concrete delivery channels.
//!
//! Each channel implements the [`Channel`](crate::core::Channel) trait
//! independently; the hub's core holds them through the trait only and never
//! sees the concrete types.

pub mod email;
pub mod sms;
pub mod webhook;

pub use email::EmailChannel;
pub use sms::SmsChannel;
pub use webhook::WebhookChannel;
