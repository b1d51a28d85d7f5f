//! Songlist catalog backed by a file on disk.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::SystemTime;

use super::jacket::locate_jacket;
use super::{CatalogError, SongCatalog, Songlist};

/// Parsed songlist together with the file state it was read from.
#[derive(Debug)]
struct CachedSonglist {
    modified: Option<SystemTime>,
    len: u64,
    songs: Arc<Songlist>,
}

/// Song catalog that reads the songlist file and jacket folder.
///
/// The parsed songlist is cached and re-read whenever the file's
/// modification time or length changes, so lookups always reflect the
/// current file content.
#[derive(Debug)]
pub struct FileSongCatalog {
    songlist: Option<PathBuf>,
    jacket_dir: Option<PathBuf>,
    cache: Mutex<Option<CachedSonglist>>,
}

impl FileSongCatalog {
    /// Create a catalog. Either path may be absent; lookups then degrade.
    #[must_use]
    pub fn new(songlist: Option<PathBuf>, jacket_dir: Option<PathBuf>) -> Self {
        Self {
            songlist,
            jacket_dir,
            cache: Mutex::new(None),
        }
    }

    /// Load the songlist, reusing the cached copy if the file is unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not configured, the file is missing
    /// or unreadable, or the content is not a valid songlist. Failures are
    /// not cached.
    pub fn load(&self) -> Result<Arc<Songlist>, CatalogError> {
        let path = self
            .songlist
            .as_ref()
            .ok_or(CatalogError::SonglistNotConfigured)?;

        let metadata = match std::fs::metadata(path) {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CatalogError::SonglistNotFound(path.clone()));
            }
            Err(e) => {
                return Err(CatalogError::Read {
                    path: path.clone(),
                    source: e,
                })
            }
        };
        let modified = metadata.modified().ok();
        let len = metadata.len();

        if let Some(songs) = self.cached(modified, len) {
            return Ok(songs);
        }

        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Read {
            path: path.clone(),
            source: e,
        })?;
        let songs = Arc::new(Songlist::from_json(&content)?);
        tracing::debug!(
            path = %path.display(),
            songs = songs.len(),
            "Loaded songlist"
        );

        *self.cache.lock().unwrap_or_else(PoisonError::into_inner) = Some(CachedSonglist {
            modified,
            len,
            songs: Arc::clone(&songs),
        });
        Ok(songs)
    }

    /// Cached songlist, if it was read from a file in the same state.
    ///
    /// The lock is only held for the comparison, never across file I/O.
    fn cached(&self, modified: Option<SystemTime>, len: u64) -> Option<Arc<Songlist>> {
        let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache
            .as_ref()
            .filter(|c| c.modified.is_some() && c.modified == modified && c.len == len)
            .map(|c| Arc::clone(&c.songs))
    }

    /// Songlist for a lookup; an unavailable songlist counts as empty.
    fn songs_or_empty(&self) -> Arc<Songlist> {
        match self.load() {
            Ok(songs) => songs,
            Err(e) => {
                tracing::warn!(error = %e, "Songlist unavailable, treating catalog as empty");
                Arc::new(Songlist::default())
            }
        }
    }
}

impl SongCatalog for FileSongCatalog {
    fn song_title(&self, song_id: &str) -> String {
        self.songs_or_empty().title(song_id)
    }

    fn illustration(&self, song_id: &str) -> Option<PathBuf> {
        if !self.jacket_dir.as_deref().is_some_and(Path::is_dir) {
            tracing::warn!(error = %CatalogError::JacketDirMissing, "Skipping jacket");
            return None;
        }

        let songs = self.songs_or_empty();
        match locate_jacket(&songs, self.jacket_dir.as_deref(), song_id) {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!(song_id = %song_id, error = %e, "No jacket for song");
                None
            }
        }
    }
}
