//! End-to-end tests: log lines in, notifications out.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use linkplay_notifier::catalog::{FileSongCatalog, SongRecord, StaticSongCatalog};
use linkplay_notifier::config::UnmatchedLines;
use linkplay_notifier::render::INFO_TITLE;
use linkplay_notifier::watcher::{LogTailer, Monitor, Sleeper};
use tempfile::{NamedTempFile, TempDir};
use tokio::sync::Notify;

use super::RecordingSink;

const SCORE_LINE: &str = "Player `Bob` - Score: 900000, Cleartype: 2, Difficulty: 2, Timer: 120, Best Score Flag: 1, Best Player Flag: 0, Shiny Perfect: 50, Perfect: 900, Near: 10, Miss: 2, Early: 5, Late: 5, Healthy: 100";

fn append(path: &Path, lines: &[&str]) {
    let mut handle = OpenOptions::new().append(true).open(path).unwrap();
    for line in lines {
        writeln!(handle, "{line}").unwrap();
    }
    handle.flush().unwrap();
}

async fn monitor_for(path: &Path, sink: Arc<RecordingSink>) -> Monitor {
    let tailer = LogTailer::open_at_end(path.to_path_buf()).await.unwrap();
    let catalog = StaticSongCatalog::new(vec![SongRecord::new(10, "songx", "Song X")]);
    Monitor::new(tailer, Arc::new(catalog), sink)
}

#[tokio::test]
async fn room_and_score_lines_dispatch_in_order() {
    let file = NamedTempFile::new().unwrap();
    let sink = RecordingSink::new();
    let mut monitor = monitor_for(file.path(), Arc::clone(&sink)).await;

    append(file.path(), &["Create room `Z1` by player `Bob`", SCORE_LINE]);
    assert_eq!(monitor.poll_once().await.unwrap(), 2);

    let sent = sink.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].title, "🎉 Room Created");
    assert!(sent[0].body.contains("Z1"));
    assert!(sent[0].body.contains("Bob"));
    assert_eq!(sent[1].title, "🏆 Player Score");
    assert!(sent[1].body.contains("900000"));
    assert!(sent[1].body.contains("Future"));
}

#[tokio::test]
async fn unmatched_lines_follow_configured_handling() {
    let file = NamedTempFile::new().unwrap();

    let dropped = RecordingSink::new();
    let mut monitor = monitor_for(file.path(), Arc::clone(&dropped)).await;
    append(file.path(), &["Server heartbeat"]);
    assert_eq!(monitor.poll_once().await.unwrap(), 1);
    assert!(dropped.sent().is_empty());

    let forwarded = RecordingSink::new();
    let mut monitor = monitor_for(file.path(), Arc::clone(&forwarded))
        .await
        .with_unmatched(UnmatchedLines::Forward);
    append(file.path(), &["Server heartbeat"]);
    monitor.poll_once().await.unwrap();

    let sent = forwarded.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, INFO_TITLE);
    assert_eq!(sent[0].body, "Server heartbeat");
}

#[tokio::test]
async fn jacket_attached_from_catalog_folder() {
    let dir = TempDir::new().unwrap();
    let songlist = dir.path().join("songlist");
    std::fs::write(
        &songlist,
        r#"{"songs": [{"idx": 10, "id": "songx", "title_localized": {"en": "Song X"}}]}"#,
    )
    .unwrap();
    let jackets = dir.path().join("songs");
    let folder = jackets.join("dl_songx");
    std::fs::create_dir_all(&folder).unwrap();
    std::fs::write(folder.join("base.jpg"), b"jpeg").unwrap();

    let log = dir.path().join("server.log");
    std::fs::write(&log, "").unwrap();

    let sink = RecordingSink::new();
    let tailer = LogTailer::open_at_end(log.clone()).await.unwrap();
    let catalog = FileSongCatalog::new(Some(songlist), Some(jackets));
    let mut monitor = Monitor::new(tailer, Arc::new(catalog), Arc::clone(&sink) as Arc<_>);

    append(&log, &["Room `Z1` selected song `10`", "Room `Z1` selected song `99`"]);
    monitor.poll_once().await.unwrap();

    let sent = sink.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent[0].body.contains("Song X"));
    assert_eq!(sent[0].illustration, Some(folder.join("base.jpg")));
    assert!(sent[1].body.contains("Song 99"));
    assert!(sent[1].illustration.is_none());
}

type Step = Box<dyn Fn() + Send + Sync>;

/// Runs one step per idle sleep, then requests shutdown.
struct ScriptedSleeper {
    steps: Vec<Step>,
    done: Arc<Notify>,
    calls: AtomicUsize,
}

impl ScriptedSleeper {
    fn new(steps: Vec<Step>, done: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            steps,
            done,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl Sleeper for ScriptedSleeper {
    async fn sleep(&self, _duration: Duration) {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        match self.steps.get(call) {
            Some(step) => step(),
            None => self.done.notify_one(),
        }
        tokio::task::yield_now().await;
    }
}

async fn run_script(monitor: &mut Monitor, done: Arc<Notify>) {
    tokio::time::timeout(
        Duration::from_secs(5),
        monitor.run_until(async move { done.notified().await }),
    )
    .await
    .expect("monitor did not stop");
}

#[tokio::test]
async fn run_until_processes_lines_then_stops() {
    let file = NamedTempFile::new().unwrap();
    let log = file.path().to_path_buf();
    let steps: Vec<Step> = vec![Box::new(move || {
        append(&log, &["Clean room `A1`", "Clean room `B2`"]);
    })];
    let done = Arc::new(Notify::new());
    let sleeper = ScriptedSleeper::new(steps, Arc::clone(&done));
    let sink = RecordingSink::new();
    let mut monitor = monitor_for(file.path(), Arc::clone(&sink))
        .await
        .with_sleeper(sleeper);

    run_script(&mut monitor, done).await;

    let bodies: Vec<String> = sink.sent().iter().map(|n| n.body.clone()).collect();
    assert_eq!(bodies.len(), 2);
    assert!(bodies[0].contains("A1"));
    assert!(bodies[1].contains("B2"));
}

#[tokio::test]
async fn run_until_resumes_after_log_is_recreated() {
    let dir = TempDir::new().unwrap();
    let log: PathBuf = dir.path().join("server.log");
    std::fs::write(&log, "Create room `OLD1` by player `Bob`\n").unwrap();

    let deleted = log.clone();
    let recreated = log.clone();
    let appended = log.clone();
    let steps: Vec<Step> = vec![
        Box::new(move || std::fs::remove_file(&deleted).unwrap()),
        Box::new(|| {}),
        Box::new(move || {
            std::fs::write(&recreated, "Create room `NEW1` by player `Alice`\n").unwrap();
        }),
        Box::new(move || append(&appended, &["Clean room `NEW1`"])),
    ];
    let done = Arc::new(Notify::new());
    let sink = RecordingSink::new();
    let mut monitor = monitor_for(&log, Arc::clone(&sink))
        .await
        .with_sleeper(ScriptedSleeper::new(steps, Arc::clone(&done)));

    run_script(&mut monitor, done).await;

    let sent = sink.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].title, "🎉 Room Created");
    assert!(sent[0].body.contains("NEW1"));
    assert!(sent[0].body.contains("Alice"));
    assert_eq!(sent[1].title, "🧹 Room Closed");
}
