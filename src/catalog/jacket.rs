//! Jacket (cover art) lookup.

use std::path::{Path, PathBuf};

use super::{CatalogError, Songlist};

/// Preferred jacket image inside a song folder.
pub const PRIMARY_JACKET: &str = "1080_base.jpg";

/// Fallback jacket image inside a song folder.
pub const FALLBACK_JACKET: &str = "base.jpg";

/// Resolve the jacket for a song index.
///
/// The song is found by `idx`, its catalog `id` is matched as a substring
/// against folder names under `jacket_dir`, and the folder must contain
/// [`PRIMARY_JACKET`] or [`FALLBACK_JACKET`].
///
/// # Errors
///
/// Returns the step that failed: missing jacket folder, unknown song,
/// no matching folder, or no image in the folder.
pub fn locate_jacket(
    songs: &Songlist,
    jacket_dir: Option<&Path>,
    song_id: &str,
) -> Result<PathBuf, CatalogError> {
    let root = jacket_dir
        .filter(|dir| dir.is_dir())
        .ok_or(CatalogError::JacketDirMissing)?;

    let catalog_id = songs
        .find_by_idx(song_id)
        .and_then(|song| song.id.as_ref())
        .map(ToString::to_string)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| CatalogError::UnknownSong(song_id.to_string()))?;

    let folder = find_song_folder(root, &catalog_id)?;
    find_jacket_image(&folder)
}

/// First folder under `root` whose name contains `catalog_id`.
///
/// Candidates are visited in name order so the choice does not depend on
/// directory listing order.
///
/// # Errors
///
/// Returns `CatalogError::NoJacketFolder` if nothing matches, or an I/O
/// error if `root` cannot be listed.
pub fn find_song_folder(root: &Path, catalog_id: &str) -> Result<PathBuf, CatalogError> {
    let mut folders: Vec<PathBuf> = std::fs::read_dir(root)?
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().contains(catalog_id))
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    folders.sort();

    folders
        .into_iter()
        .next()
        .ok_or_else(|| CatalogError::NoJacketFolder(catalog_id.to_string()))
}

/// Jacket image inside a song folder.
///
/// # Errors
///
/// Returns `CatalogError::NoJacketImage` if neither file exists.
pub fn find_jacket_image(folder: &Path) -> Result<PathBuf, CatalogError> {
    [PRIMARY_JACKET, FALLBACK_JACKET]
        .into_iter()
        .map(|name| folder.join(name))
        .find(|path| path.is_file())
        .ok_or_else(|| CatalogError::NoJacketImage(folder.to_path_buf()))
}
