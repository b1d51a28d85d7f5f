//! Terminal sink for dry runs.

use async_trait::async_trait;

use super::{NotificationSink, NotifyError};
use crate::display;
use crate::render::Notification;

/// Prints notifications to stdout instead of sending them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

#[async_trait]
impl NotificationSink for ConsoleSink {
    fn sink_type(&self) -> &'static str {
        "console"
    }

    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        display::print_notification(notification);
        Ok(())
    }
}
