//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// What to do with log lines that match no known template.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UnmatchedLines {
    /// Skip the line without notifying.
    #[default]
    Drop,
    /// Send a generic info notification echoing the raw line.
    Forward,
}

/// Configuration for the notifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// Linkplay server log to tail.
    pub log_file: Option<PathBuf>,
    /// Songlist JSON used to resolve song titles.
    pub songlist: Option<PathBuf>,
    /// Root folder holding one jacket folder per song.
    pub jacket_dir: Option<PathBuf>,
    /// Embed accent color as a hex string.
    pub message_color: String,
    /// Discord webhook endpoint.
    pub webhook_url: Option<String>,
    /// Username shown on webhook messages.
    pub username: Option<String>,
    /// Delay between polls when the log has no new lines.
    pub poll_interval_ms: u64,
    /// Handling of lines no template recognizes.
    pub unmatched: UnmatchedLines,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            log_file: None,
            songlist: None,
            jacket_dir: None,
            message_color: default_message_color(),
            webhook_url: None,
            username: None,
            poll_interval_ms: default_poll_interval_ms(),
            unmatched: UnmatchedLines::default(),
        }
    }
}

fn default_message_color() -> String {
    "3498db".to_string()
}

fn default_poll_interval_ms() -> u64 {
    800
}

impl NotifierConfig {
    /// Override fields from environment variables.
    ///
    /// `lookup` is usually `|key| std::env::var(key).ok()`; empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("LOG_FILE_PATH") {
            self.log_file = Some(PathBuf::from(v));
        }
        if let Some(v) = get("SONGLIST_PATH") {
            self.songlist = Some(PathBuf::from(v));
        }
        if let Some(v) = get("JACKET_PATH") {
            self.jacket_dir = Some(PathBuf::from(v));
        }
        if let Some(v) = get("MESSAGE_COLOR") {
            self.message_color = v;
        }
        if let Some(v) = get("DISCORD_WEBHOOK_URL") {
            self.webhook_url = Some(v);
        }
        if let Some(v) = get("POLL_INTERVAL_MS") {
            match v.trim().parse() {
                Ok(ms) => self.poll_interval_ms = ms,
                Err(e) => {
                    tracing::warn!(value = %v, error = %e, "Ignoring invalid POLL_INTERVAL_MS");
                }
            }
        }
    }

    /// Poll interval as a [`Duration`].
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Embed color parsed from [`Self::message_color`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidColor` if the value is not a 24-bit hex color.
    pub fn color(&self) -> Result<u32, ConfigError> {
        parse_color(&self.message_color)
    }

    /// Check the configuration before starting the monitor.
    ///
    /// The songlist and jacket folder are optional; lookups degrade when
    /// they are missing. The log file is required.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_file.is_none() {
            return Err(ConfigError::MissingLogFile);
        }
        self.color()?;
        if let Some(webhook_url) = &self.webhook_url {
            url::Url::parse(webhook_url).map_err(|source| ConfigError::InvalidWebhookUrl {
                url: webhook_url.clone(),
                source,
            })?;
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidPollInterval);
        }
        Ok(())
    }
}

/// Parse a hex color such as `3498db`, `#3498db` or `0x3498db`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidColor` for non-hex input or values above `0xFFFFFF`.
pub fn parse_color(value: &str) -> Result<u32, ConfigError> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    match u32::from_str_radix(digits, 16) {
        Ok(color) if color <= 0x00FF_FFFF && !digits.is_empty() => Ok(color),
        _ => Err(ConfigError::InvalidColor(value.to_string())),
    }
}
