//! Colored CLI display utilities for monitor output.
//!
//! Used for the startup banner and for printing notifications in dry-run
//! mode instead of sending them.

use std::io::{self, Write};
use std::path::Path;

use chrono::Utc;
use owo_colors::OwoColorize;

use crate::render::Notification;

/// Get current timestamp in the same format as tracing.
fn timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// Truncate a string to a maximum number of characters, adding ellipsis if truncated.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{kept}...")
    }
}

/// Print the banner shown when monitoring starts.
pub fn print_monitoring_start(path: &Path, sink_type: &str) {
    println!(
        "{} {} Monitoring {}... (sink={})",
        timestamp().dimmed(),
        "[MONITOR]".blue().bold(),
        path.display().cyan(),
        sink_type.dimmed()
    );
    let _ = io::stdout().flush();
}

/// Print a notification as it would be sent.
pub fn print_notification(notification: &Notification) {
    println!(
        "{} {} {}",
        timestamp().dimmed(),
        "[NOTIFY]".green().bold(),
        notification.title.bold()
    );
    for line in notification.body.lines() {
        println!("    {}", truncate(line, 200));
    }
    if let Some(path) = &notification.illustration {
        println!("    {} {}", "jacket:".dimmed(), path.display().dimmed());
    }
    let _ = io::stdout().flush();
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "[ERROR]".red().bold(), message);
    let _ = io::stderr().flush();
}
