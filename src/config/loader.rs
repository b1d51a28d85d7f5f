//! Locates and parses the notifier's TOML settings file.

use std::path::{Path, PathBuf};

use super::NotifierConfig;

/// File name looked up in the working directory.
const LOCAL_FILE: &str = ".linkplay-notifier.toml";

/// Finds the first existing settings file among a list of candidates.
#[derive(Debug)]
pub struct ConfigLoader {
    candidates: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Look in the working directory, then in the per-user config dir.
    #[must_use]
    pub fn new() -> Self {
        let candidates = std::iter::once(PathBuf::from(LOCAL_FILE))
            .chain(dirs::config_dir().map(|dir| dir.join("linkplay-notifier").join("config.toml")))
            .collect();
        Self { candidates }
    }

    /// Only consider `path`.
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            candidates: vec![path],
        }
    }

    /// Parse the first candidate that exists; defaults when none does.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be read or is not valid
    /// TOML for [`NotifierConfig`].
    pub fn load(&self) -> Result<NotifierConfig, ConfigError> {
        let Some(path) = self.candidates.iter().find(|path| path.is_file()) else {
            tracing::debug!(candidates = ?self.candidates, "No settings file, using defaults");
            return Ok(NotifierConfig::default());
        };
        tracing::debug!(path = %path.display(), "Reading settings file");
        Self::parse_file(path)
    }

    fn parse_file(path: &Path) -> Result<NotifierConfig, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Candidate files in lookup order.
    #[must_use]
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.candidates
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings file and validation failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Log file path not configured (set LOG_FILE_PATH or log_file)")]
    MissingLogFile,

    #[error("Invalid message color: {0}")]
    InvalidColor(String),

    #[error("Invalid webhook URL {url}: {source}")]
    InvalidWebhookUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Poll interval must be greater than zero")]
    InvalidPollInterval,
}
