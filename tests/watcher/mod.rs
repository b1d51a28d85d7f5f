//! Integration tests for the log monitor.

mod monitor_test;
mod tailer_test;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use linkplay_notifier::render::Notification;
use linkplay_notifier::sink::{NotificationSink, NotifyError};

/// Sink that keeps every notification it receives.
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    fn sink_type(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}
