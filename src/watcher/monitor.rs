//! Log monitor loop.
//!
//! Polls the tailer for new lines and pushes each through
//! classify, render, jacket lookup and dispatch, strictly in order.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::error::WatcherError;
use super::tailer::LogTailer;
use crate::catalog::SongCatalog;
use crate::config::UnmatchedLines;
use crate::parser::{LineClassifier, LogEvent};
use crate::render::{EventRenderer, Notification};
use crate::sink::NotificationSink;

/// Default delay between polls when the log is idle.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(800);

/// Waits between idle polls.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Wait for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Tails the server log and dispatches a notification per recognized line.
pub struct Monitor {
    tailer: LogTailer,
    classifier: LineClassifier,
    renderer: EventRenderer,
    catalog: Arc<dyn SongCatalog>,
    sink: Arc<dyn NotificationSink>,
    sleeper: Arc<dyn Sleeper>,
    poll_interval: Duration,
    unmatched: UnmatchedLines,
}

impl std::fmt::Debug for Monitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Monitor")
            .field("tailer", &self.tailer)
            .field("rules", &self.classifier.len())
            .field("sink", &self.sink.sink_type())
            .field("poll_interval", &self.poll_interval)
            .field("unmatched", &self.unmatched)
            .finish_non_exhaustive()
    }
}

impl Monitor {
    /// Create a monitor with the default rules, tokio sleeper and poll interval.
    #[must_use]
    pub fn new(
        tailer: LogTailer,
        catalog: Arc<dyn SongCatalog>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            tailer,
            classifier: LineClassifier::with_default_rules(),
            renderer: EventRenderer::new(Arc::clone(&catalog)),
            catalog,
            sink,
            sleeper: Arc::new(TokioSleeper),
            poll_interval: DEFAULT_POLL_INTERVAL,
            unmatched: UnmatchedLines::default(),
        }
    }

    /// Set the delay between idle polls.
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Set the handling of unrecognized lines.
    #[must_use]
    pub fn with_unmatched(mut self, unmatched: UnmatchedLines) -> Self {
        self.unmatched = unmatched;
        self
    }

    /// Replace the sleeper used between idle polls.
    #[must_use]
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Replace the line classifier.
    #[must_use]
    pub fn with_classifier(mut self, classifier: LineClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Process one line.
    ///
    /// Returns the notification handed to the sink, or `None` if the line
    /// was dropped. Delivery failures are logged, not returned.
    pub async fn handle_line(&self, line: &str) -> Option<Notification> {
        let event = match self.classifier.classify(line) {
            Some(event) => event,
            None => match self.unmatched {
                UnmatchedLines::Drop => {
                    tracing::debug!(line = %line, "Skipping unrecognized line");
                    return None;
                }
                UnmatchedLines::Forward => LogEvent::Unrecognized {
                    line: line.to_string(),
                },
            },
        };
        tracing::info!(kind = %event.kind(), "Recognized log event");

        let notification = self.enrich(event).await?;

        if let Err(e) = self.sink.send(&notification).await {
            tracing::warn!(
                sink = self.sink.sink_type(),
                title = %notification.title,
                error = %e,
                "Failed to deliver notification"
            );
        }
        Some(notification)
    }

    /// Render the event and attach its jacket.
    ///
    /// Catalog lookups read the songlist and scan the jacket folder with
    /// blocking file I/O, so they run on the blocking thread pool.
    async fn enrich(&self, event: LogEvent) -> Option<Notification> {
        let renderer = self.renderer.clone();
        let catalog = Arc::clone(&self.catalog);
        let kind = event.kind();
        let rendered = tokio::task::spawn_blocking(move || {
            let mut notification = renderer.render(&event);
            if let Some(song_id) = notification.song_id.as_deref() {
                notification.illustration = catalog.illustration(song_id);
            }
            notification
        })
        .await;

        match rendered {
            Ok(notification) => Some(notification),
            Err(e) => {
                tracing::warn!(kind = %kind, error = %e, "Failed to render notification");
                None
            }
        }
    }

    /// Read and process every complete line appended since the last poll.
    ///
    /// Returns the number of lines read.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be read.
    pub async fn poll_once(&mut self) -> Result<usize, WatcherError> {
        let lines = self.tailer.read_new_lines().await?;
        for line in &lines {
            self.handle_line(line).await;
        }
        Ok(lines.len())
    }

    /// Poll until `shutdown` resolves.
    ///
    /// Sleeps for the poll interval whenever a poll finds no new lines.
    /// Read errors are logged and retried on the next poll.
    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut failing = false;

        loop {
            let read = match self.poll_once().await {
                Ok(read) => {
                    if failing {
                        tracing::info!(path = %self.tailer.path().display(), "Log readable again");
                        failing = false;
                    }
                    read
                }
                Err(e) => {
                    if !failing {
                        tracing::warn!(error = %e, "Failed to read log, will keep polling");
                        failing = true;
                    }
                    0
                }
            };

            if read > 0 {
                continue;
            }

            tokio::select! {
                biased;
                () = &mut shutdown => {
                    tracing::info!("Monitor stopped");
                    return;
                }
                () = self.sleeper.sleep(self.poll_interval) => {}
            }
        }
    }

    /// Poll forever.
    pub async fn run(&mut self) {
        self.run_until(std::future::pending()).await;
    }
}
