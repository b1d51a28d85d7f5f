//! Discord webhook sink.
//!
//! Sends each notification as one embed. When a jacket is available it is
//! uploaded as a multipart attachment and referenced as the embed image.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde_json::json;

use super::{NotificationSink, NotifyError};
use crate::config::NotifierConfig;
use crate::render::Notification;

/// Connection timeout for HTTP requests.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Overall request timeout for HTTP requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum number of attempts when Discord answers 429.
const MAX_RATE_LIMIT_ATTEMPTS: u32 = 3;

/// File name the jacket is uploaded under.
pub const JACKET_ATTACHMENT: &str = "1080_base.jpg";

/// Build an HTTP client with proper timeout configuration.
fn build_http_client() -> Result<Client, NotifyError> {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| NotifyError::RequestFailed(e.to_string()))
}

/// Discord webhook settings.
#[derive(Debug, Clone)]
pub struct DiscordConfig {
    /// Webhook URL.
    pub webhook_url: String,
    /// Embed accent color.
    pub color: u32,
    /// Optional username override.
    pub username: Option<String>,
}

impl DiscordConfig {
    /// Build from notifier configuration.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::MissingWebhookUrl` if no URL is configured, or
    /// `NotifyError::Config` if the color is invalid.
    pub fn from_notifier(config: &NotifierConfig) -> Result<Self, NotifyError> {
        let webhook_url = config
            .webhook_url
            .clone()
            .filter(|url| !url.is_empty())
            .ok_or(NotifyError::MissingWebhookUrl)?;
        Ok(Self {
            webhook_url,
            color: config.color()?,
            username: config.username.clone(),
        })
    }
}

/// Discord webhook notification sink.
#[derive(Debug, Clone)]
pub struct DiscordWebhook {
    config: DiscordConfig,
    client: Client,
}

impl DiscordWebhook {
    /// Create a new webhook sink.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::RequestFailed` if the HTTP client cannot be built.
    pub fn new(config: DiscordConfig) -> Result<Self, NotifyError> {
        Ok(Self {
            config,
            client: build_http_client()?,
        })
    }

    /// Build the JSON payload for a notification.
    fn build_payload(&self, notification: &Notification, with_jacket: bool) -> serde_json::Value {
        let mut embed = json!({
            "title": notification.title,
            "description": notification.body,
            "color": self.config.color,
        });
        if with_jacket {
            embed["image"] = json!({ "url": format!("attachment://{JACKET_ATTACHMENT}") });
        }

        let mut payload = json!({ "embeds": [embed] });
        if let Some(username) = &self.config.username {
            payload["username"] = json!(username);
        }
        payload
    }

    /// Read the jacket, logging and dropping it on failure.
    async fn read_jacket(path: &Path) -> Option<Vec<u8>> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to read jacket, sending without image"
                );
                None
            }
        }
    }

    async fn post(
        &self,
        payload: &serde_json::Value,
        jacket: Option<&[u8]>,
    ) -> Result<Response, NotifyError> {
        let request = self.client.post(&self.config.webhook_url);
        let request = match jacket {
            Some(bytes) => {
                let part = Part::bytes(bytes.to_vec())
                    .file_name(JACKET_ATTACHMENT)
                    .mime_str("image/jpeg")
                    .map_err(|e| NotifyError::RequestFailed(e.to_string()))?;
                let form = Form::new()
                    .text("payload_json", payload.to_string())
                    .part("files[0]", part);
                request.multipart(form)
            }
            None => request.json(payload),
        };

        request.send().await.map_err(|e| {
            if e.is_timeout() {
                NotifyError::Timeout
            } else {
                NotifyError::RequestFailed(e.to_string())
            }
        })
    }

    /// Send the payload, waiting out 429 responses.
    async fn send_with_retry(
        &self,
        payload: &serde_json::Value,
        jacket: Option<&[u8]>,
    ) -> Result<(), NotifyError> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let response = self.post(payload, jacket).await?;
            let status = response.status();

            if status.is_success() {
                return Ok(());
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                if attempts >= MAX_RATE_LIMIT_ATTEMPTS {
                    return Err(NotifyError::RateLimited(attempts));
                }
                let wait = parse_retry_after(&response).unwrap_or(Duration::from_secs(1));
                tracing::debug!(
                    wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                    attempt = attempts,
                    "Discord rate limited, waiting before retry"
                );
                tokio::time::sleep(wait).await;
                continue;
            }

            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
    }
}

/// Parse the wait time from a 429 response.
fn parse_retry_after(response: &Response) -> Option<Duration> {
    ["Retry-After", "X-RateLimit-Reset-After"]
        .into_iter()
        .filter_map(|name| response.headers().get(name))
        .filter_map(|value| value.to_str().ok()?.trim().parse::<f64>().ok())
        .find(|secs| secs.is_finite() && *secs >= 0.0)
        .map(Duration::from_secs_f64)
}

#[async_trait]
impl NotificationSink for DiscordWebhook {
    fn sink_type(&self) -> &'static str {
        "discord"
    }

    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let jacket = match &notification.illustration {
            Some(path) => Self::read_jacket(path).await,
            None => None,
        };
        let payload = self.build_payload(notification, jacket.is_some());
        self.send_with_retry(&payload, jacket.as_deref()).await?;

        tracing::debug!(title = %notification.title, "Discord notification sent");
        Ok(())
    }
}
