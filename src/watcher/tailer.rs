//! Incremental log file tailer.
//!
//! Reads complete lines appended to a text log since the last read.

use std::fs::Metadata;
use std::io::{ErrorKind, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};

use super::error::WatcherError;

/// Open the log, mapping a missing file through `missing`.
async fn open_log(
    path: &Path,
    missing: fn(PathBuf) -> WatcherError,
) -> Result<File, WatcherError> {
    File::open(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => missing(path.to_path_buf()),
        ErrorKind::PermissionDenied => WatcherError::PermissionDenied(path.to_path_buf()),
        _ => WatcherError::Io(e),
    })
}

/// Which file currently sits behind the log path.
///
/// A different value between two reads means the log was deleted and
/// recreated, or renamed over, even if the new file is already longer
/// than the stored offset.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FileIdentity {
    device: u64,
    inode: u64,
    created: Option<SystemTime>,
}

impl FileIdentity {
    #[cfg(unix)]
    fn of(metadata: &Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;
        Self {
            device: metadata.dev(),
            inode: metadata.ino(),
            created: metadata.created().ok(),
        }
    }

    #[cfg(not(unix))]
    fn of(metadata: &Metadata) -> Self {
        Self {
            device: 0,
            inode: 0,
            created: metadata.created().ok(),
        }
    }
}

/// Incremental log reader that tracks read position.
///
/// The file is re-opened by path on every read, so a rotated, replaced or
/// truncated log is picked up instead of reading a stale handle.
#[derive(Debug)]
pub struct LogTailer {
    /// Path to the log file.
    path: PathBuf,
    /// Byte offset just past the last complete line read.
    offset: u64,
    /// File the offset belongs to; unknown until the first read.
    identity: Option<FileIdentity>,
}

impl LogTailer {
    /// Open the log and start at its current end, skipping existing content.
    ///
    /// # Errors
    ///
    /// Returns `WatcherError::FileNotFound` if the file does not exist,
    /// `WatcherError::PermissionDenied` if it cannot be read, or an I/O error.
    pub async fn open_at_end(path: PathBuf) -> Result<Self, WatcherError> {
        let file = open_log(&path, WatcherError::FileNotFound).await?;
        let metadata = file.metadata().await?;
        let offset = metadata.len();
        tracing::debug!(path = %path.display(), offset, "Seeked to end of log");
        Ok(Self {
            path,
            offset,
            identity: Some(FileIdentity::of(&metadata)),
        })
    }

    /// Create a tailer starting at a specific offset.
    #[must_use]
    pub fn with_offset(path: PathBuf, offset: u64) -> Self {
        Self {
            path,
            offset,
            identity: None,
        }
    }

    /// Byte offset of the next unread line.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Log file path.
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Read complete lines appended since the last read.
    ///
    /// Trailing whitespace is stripped and blank lines are skipped. A final
    /// fragment without a newline is left unread until it is completed.
    /// Invalid UTF-8 is replaced rather than rejected.
    ///
    /// Reading restarts from the beginning when the file is smaller than the
    /// current offset (truncated), when a different file now sits at the
    /// path (replaced), or after the file was found missing (deleted, to be
    /// recreated).
    ///
    /// # Errors
    ///
    /// Returns an error if the file was deleted, cannot be accessed, or an
    /// I/O error occurs while reading.
    pub async fn read_new_lines(&mut self) -> Result<Vec<String>, WatcherError> {
        let mut file = match open_log(&self.path, WatcherError::FileDeleted).await {
            Ok(file) => file,
            Err(e) => {
                if matches!(e, WatcherError::FileDeleted(_)) {
                    self.offset = 0;
                    self.identity = None;
                }
                return Err(e);
            }
        };
        let metadata = file.metadata().await?;
        let file_len = metadata.len();

        let identity = FileIdentity::of(&metadata);
        if self.identity.as_ref().is_some_and(|known| *known != identity) {
            tracing::warn!(
                path = %self.path.display(),
                old_offset = self.offset,
                "Log replaced, reading new file from the start"
            );
            self.offset = 0;
        }
        self.identity = Some(identity);

        if file_len < self.offset {
            tracing::warn!(
                path = %self.path.display(),
                old_offset = self.offset,
                new_len = file_len,
                "Log truncated, resetting offset to 0"
            );
            self.offset = 0;
        }

        if file_len == self.offset {
            return Ok(Vec::new());
        }

        file.seek(SeekFrom::Start(self.offset)).await?;
        let mut reader = BufReader::new(file);
        let mut lines = Vec::new();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let bytes_read = reader.read_until(b'\n', &mut buf).await?;

            if bytes_read == 0 || buf.last() != Some(&b'\n') {
                // EOF, or a line still being written
                break;
            }

            self.offset += bytes_read as u64;

            let line = String::from_utf8_lossy(&buf);
            let trimmed = line.trim_end();
            if trimmed.is_empty() {
                continue;
            }
            lines.push(trimmed.to_string());
        }

        Ok(lines)
    }
}
