//! Song catalog error types.

use std::path::PathBuf;

/// Errors that can occur while resolving songs and jackets.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    /// No songlist path was configured.
    #[error("Songlist path not configured (set SONGLIST_PATH)")]
    SonglistNotConfigured,

    /// Configured songlist does not exist.
    #[error("Songlist file not found: {0}")]
    SonglistNotFound(PathBuf),

    /// Songlist exists but could not be read.
    #[error("Failed to read songlist {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Songlist is not valid JSON.
    #[error("Invalid JSON in songlist: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Songlist is valid JSON with an unexpected shape.
    #[error("Malformed songlist: {0}")]
    Malformed(String),

    /// Jacket folder missing or not configured.
    #[error("Jacket folder not found (set JACKET_PATH)")]
    JacketDirMissing,

    /// No song with this index, or the song has no catalog id.
    #[error("No song with idx {0}")]
    UnknownSong(String),

    /// No jacket folder name contains the catalog id.
    #[error("No jacket folder matching {0}")]
    NoJacketFolder(String),

    /// Folder found but neither jacket image exists.
    #[error("No jacket image (1080_base.jpg / base.jpg) in {0}")]
    NoJacketImage(PathBuf),

    /// Jacket folder listing failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
