//! Watcher module for the Linkplay server log.
//!
//! Tails the log file and drives the notification pipeline.

mod error;
mod monitor;
mod tailer;

pub use error::WatcherError;
pub use monitor::{Monitor, Sleeper, TokioSleeper, DEFAULT_POLL_INTERVAL};
pub use tailer::LogTailer;
