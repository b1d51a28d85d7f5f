//! Notification payload.

use std::path::PathBuf;

use serde::Serialize;

/// A rendered notification ready for a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Short heading.
    pub title: String,
    /// Markdown body.
    pub body: String,
    /// Song the notification is about, used to find a jacket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub song_id: Option<String>,
    /// Jacket image to attach.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub illustration: Option<PathBuf>,
}

impl Notification {
    /// Create a notification without song or jacket.
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            song_id: None,
            illustration: None,
        }
    }

    /// Set the song id.
    #[must_use]
    pub fn with_song(mut self, song_id: impl Into<String>) -> Self {
        self.song_id = Some(song_id.into());
        self
    }

    /// Set the jacket image.
    #[must_use]
    pub fn with_illustration(mut self, path: PathBuf) -> Self {
        self.illustration = Some(path);
        self
    }
}
