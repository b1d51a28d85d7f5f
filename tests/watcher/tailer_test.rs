//! Tests for tailing a growing log file.

use std::fs::OpenOptions;
use std::io::Write;

use linkplay_notifier::watcher::{LogTailer, WatcherError};
use tempfile::{NamedTempFile, TempDir};

fn append(file: &NamedTempFile, text: &str) {
    let mut handle = OpenOptions::new().append(true).open(file.path()).unwrap();
    handle.write_all(text.as_bytes()).unwrap();
    handle.flush().unwrap();
}

#[tokio::test]
async fn existing_content_is_skipped() {
    let file = NamedTempFile::new().unwrap();
    append(&file, "Create room `OLD` by player `Alice`\n");

    let mut tailer = LogTailer::open_at_end(file.path().to_path_buf())
        .await
        .unwrap();
    assert!(tailer.read_new_lines().await.unwrap().is_empty());

    append(&file, "Clean room `NEW`\n");
    assert_eq!(tailer.read_new_lines().await.unwrap(), vec!["Clean room `NEW`"]);
}

#[tokio::test]
async fn line_split_across_writes_is_read_once_complete() {
    let file = NamedTempFile::new().unwrap();
    let mut tailer = LogTailer::open_at_end(file.path().to_path_buf())
        .await
        .unwrap();

    append(&file, "Clean room ");
    assert!(tailer.read_new_lines().await.unwrap().is_empty());

    append(&file, "`A1`\r\n");
    assert_eq!(tailer.read_new_lines().await.unwrap(), vec!["Clean room `A1`"]);
    assert!(tailer.read_new_lines().await.unwrap().is_empty());
}

#[tokio::test]
async fn truncated_log_is_read_from_start() {
    let file = NamedTempFile::new().unwrap();
    append(&file, "a fairly long line that will be rotated away\n");
    let mut tailer = LogTailer::open_at_end(file.path().to_path_buf())
        .await
        .unwrap();

    std::fs::write(file.path(), "Clean room `R2`\n").unwrap();
    assert_eq!(tailer.read_new_lines().await.unwrap(), vec!["Clean room `R2`"]);
}

#[tokio::test]
async fn missing_log_is_rejected_at_open() {
    let dir = TempDir::new().unwrap();
    let err = LogTailer::open_at_end(dir.path().join("server.log"))
        .await
        .unwrap_err();
    assert!(matches!(err, WatcherError::FileNotFound(_)));
    assert!(err.to_string().contains("does not exist"));
}

#[tokio::test]
async fn deleted_log_reports_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("server.log");
    std::fs::write(&path, "").unwrap();
    let mut tailer = LogTailer::open_at_end(path.clone()).await.unwrap();

    std::fs::remove_file(&path).unwrap();
    assert!(matches!(
        tailer.read_new_lines().await,
        Err(WatcherError::FileDeleted(_))
    ));
}

#[tokio::test]
async fn recreated_log_is_read_from_start() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("server.log");
    std::fs::write(&path, "Create room `OLD1` by player `Bob`\n").unwrap();
    let mut tailer = LogTailer::open_at_end(path.clone()).await.unwrap();

    std::fs::remove_file(&path).unwrap();
    std::fs::write(
        &path,
        "Create room `NEW1` by player `Alice`\nClean room `NEW1`\n",
    )
    .unwrap();

    assert_eq!(
        tailer.read_new_lines().await.unwrap(),
        vec!["Create room `NEW1` by player `Alice`", "Clean room `NEW1`"]
    );
}

#[tokio::test]
async fn log_seen_missing_is_read_from_start_once_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("server.log");
    std::fs::write(&path, "Create room `OLD1` by player `Bob`\n").unwrap();
    let mut tailer = LogTailer::open_at_end(path.clone()).await.unwrap();

    std::fs::remove_file(&path).unwrap();
    assert!(tailer.read_new_lines().await.is_err());

    std::fs::write(
        &path,
        "Create room `NEW1` by player `Alice`\nClean room `NEW1`\n",
    )
    .unwrap();
    assert_eq!(
        tailer.read_new_lines().await.unwrap(),
        vec!["Create room `NEW1` by player `Alice`", "Clean room `NEW1`"]
    );
}

#[tokio::test]
async fn log_renamed_over_is_read_from_start() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("server.log");
    std::fs::write(&path, "Clean room `OLD1`\n").unwrap();
    let mut tailer = LogTailer::open_at_end(path.clone()).await.unwrap();

    let rotated = dir.path().join("server.log.new");
    std::fs::write(&rotated, "Clean room `NEW1`\nClean room `NEW2`\n").unwrap();
    std::fs::rename(&rotated, &path).unwrap();

    assert_eq!(
        tailer.read_new_lines().await.unwrap(),
        vec!["Clean room `NEW1`", "Clean room `NEW2`"]
    );
}
