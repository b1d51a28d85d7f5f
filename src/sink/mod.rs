//! Notification delivery.
//!
//! A sink takes a rendered [`Notification`] and delivers it somewhere:
//! a Discord webhook, or the terminal for dry runs.

mod console;
mod discord;

pub use console::ConsoleSink;
pub use discord::{DiscordConfig, DiscordWebhook, JACKET_ATTACHMENT};

use async_trait::async_trait;
use thiserror::Error;

use crate::config::ConfigError;
use crate::render::Notification;

/// Errors from notification delivery.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Webhook URL not configured (set DISCORD_WEBHOOK_URL or use --dry-run)")]
    MissingWebhookUrl,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Webhook request failed: {0}")]
    RequestFailed(String),
    #[error("Webhook returned HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("Webhook rate limit exceeded after {0} attempts")]
    RateLimited(u32),
    #[error("Webhook request timed out")]
    Timeout,
}

/// Destination for rendered notifications.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Sink type name for logs.
    fn sink_type(&self) -> &'static str;

    /// Deliver one notification.
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}
