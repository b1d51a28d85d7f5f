//! Song catalog lookups.
//!
//! Resolves song ids found in log lines to display titles, difficulty
//! codes to labels, and song ids to jacket images.

mod difficulty;
mod error;
mod file;
mod jacket;
mod songlist;

use std::path::PathBuf;

pub use difficulty::{difficulty_label, Difficulty, UNKNOWN_DIFFICULTY};
pub use error::CatalogError;
pub use file::FileSongCatalog;
pub use jacket::{
    find_jacket_image, find_song_folder, locate_jacket, FALLBACK_JACKET, PRIMARY_JACKET,
};
pub use songlist::{placeholder_title, SongKey, SongRecord, Songlist};

/// Read-only song metadata used to enrich notifications.
///
/// Lookups never fail: misses fall back to placeholder text or `None`.
/// They may block on file I/O, so async callers run them through
/// `tokio::task::spawn_blocking`.
pub trait SongCatalog: Send + Sync {
    /// Display title for a song id.
    fn song_title(&self, song_id: &str) -> String;

    /// Jacket image for a song id, if one can be found.
    fn illustration(&self, song_id: &str) -> Option<PathBuf>;

    /// Label for a difficulty code.
    fn difficulty_label(&self, code: &str) -> &'static str {
        difficulty_label(code)
    }
}

/// In-memory catalog with a fixed songlist.
#[derive(Debug, Clone, Default)]
pub struct StaticSongCatalog {
    songs: Songlist,
    jacket_dir: Option<PathBuf>,
}

impl StaticSongCatalog {
    /// Create a catalog from records.
    #[must_use]
    pub fn new(songs: Vec<SongRecord>) -> Self {
        Self {
            songs: Songlist::new(songs),
            jacket_dir: None,
        }
    }

    /// Resolve jackets from this folder.
    #[must_use]
    pub fn with_jacket_dir(mut self, jacket_dir: PathBuf) -> Self {
        self.jacket_dir = Some(jacket_dir);
        self
    }
}

impl SongCatalog for StaticSongCatalog {
    fn song_title(&self, song_id: &str) -> String {
        self.songs.title(song_id)
    }

    fn illustration(&self, song_id: &str) -> Option<PathBuf> {
        locate_jacket(&self.songs, self.jacket_dir.as_deref(), song_id)
            .map_err(|e| tracing::debug!(song_id = %song_id, error = %e, "No jacket for song"))
            .ok()
    }
}
