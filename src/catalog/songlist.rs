//! Songlist dataset model.
//!
//! The dataset is a JSON object with a `songs` array. Each record carries
//! a numeric `idx` used in log lines, a string `id` naming its asset
//! folder, and `title_localized` titles keyed by locale.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::CatalogError;

/// A song key that may be stored as a JSON number or string.
///
/// Keys are compared by their string form, so `10` and `"10"` are equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SongKey {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for SongKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl SongKey {
    fn matches(&self, song_id: &str) -> bool {
        match self {
            Self::Number(n) => n.to_string() == song_id,
            Self::Text(s) => s == song_id,
        }
    }
}

/// One entry of the songlist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SongRecord {
    /// Index used by the server in log lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idx: Option<SongKey>,
    /// Catalog id, also the asset folder name fragment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SongKey>,
    /// Titles keyed by locale (`en`, `ja`, ...).
    #[serde(default)]
    pub title_localized: BTreeMap<String, String>,
}

impl SongRecord {
    /// Build a record with an index, catalog id and English title.
    #[must_use]
    pub fn new(idx: i64, id: impl Into<String>, title_en: impl Into<String>) -> Self {
        let mut title_localized = BTreeMap::new();
        title_localized.insert("en".to_string(), title_en.into());
        Self {
            idx: Some(SongKey::Number(idx)),
            id: Some(SongKey::Text(id.into())),
            title_localized,
        }
    }

    /// Key used for title lookups: `idx`, falling back to `id`.
    #[must_use]
    pub fn lookup_key(&self) -> Option<&SongKey> {
        self.idx.as_ref().or(self.id.as_ref())
    }

    /// English title, if present.
    #[must_use]
    pub fn english_title(&self) -> Option<&str> {
        self.title_localized.get("en").map(String::as_str)
    }
}

/// Parsed songlist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Songlist {
    songs: Vec<SongRecord>,
}

impl Songlist {
    /// Create a songlist from records, keeping their order.
    #[must_use]
    pub fn new(songs: Vec<SongRecord>) -> Self {
        Self { songs }
    }

    /// Parse songlist JSON.
    ///
    /// A missing `songs` key yields an empty list. Entries that are not
    /// song objects are skipped.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidJson` for invalid JSON and
    /// `CatalogError::Malformed` if the document or `songs` has the wrong type.
    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let document: serde_json::Value = serde_json::from_str(content)?;
        let object = document
            .as_object()
            .ok_or_else(|| CatalogError::Malformed("top level is not an object".to_string()))?;

        let Some(songs) = object.get("songs") else {
            return Ok(Self::default());
        };
        let entries = songs
            .as_array()
            .ok_or_else(|| CatalogError::Malformed("`songs` is not an array".to_string()))?;

        let songs = entries
            .iter()
            .filter(|entry| entry.is_object())
            .filter_map(|entry| match SongRecord::deserialize(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping unreadable songlist entry");
                    None
                }
            })
            .collect();

        Ok(Self { songs })
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Check if the songlist is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// First record whose lookup key equals `song_id`.
    #[must_use]
    pub fn find(&self, song_id: &str) -> Option<&SongRecord> {
        self.songs
            .iter()
            .find(|song| song.lookup_key().is_some_and(|key| key.matches(song_id)))
    }

    /// First record whose `idx` equals `song_id`, ignoring `id`.
    #[must_use]
    pub fn find_by_idx(&self, song_id: &str) -> Option<&SongRecord> {
        self.songs
            .iter()
            .find(|song| song.idx.as_ref().is_some_and(|idx| idx.matches(song_id)))
    }

    /// Display title for `song_id`, or `Song <id>` when unknown or untitled.
    #[must_use]
    pub fn title(&self, song_id: &str) -> String {
        self.find(song_id)
            .and_then(SongRecord::english_title)
            .map_or_else(|| placeholder_title(song_id), str::to_string)
    }
}

/// Title used when a song cannot be resolved.
#[must_use]
pub fn placeholder_title(song_id: &str) -> String {
    format!("Song {song_id}")
}
