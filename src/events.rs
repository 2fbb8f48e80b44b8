//! Notifications for the presentation layer.
//!
//! Delivery is fire-and-forget: `notify` cannot fail and the board never
//! waits on it.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::task::Completion;

pub const COMPLETED_TITLE: &str = "Task Completed! 🎉";

/// A toast-style message: short title plus one line of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// The message shown when a task lands in the completed column.
    pub fn completed(completion: &Completion) -> Self {
        Self::new(
            COMPLETED_TITLE,
            format!("\"{}\" moved to completed. Well done!", completion.title),
        )
    }
}

/// Receiver of notifications.
pub trait Notifier {
    fn notify(&mut self, notification: &Notification);
}

/// Logs notifications through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, notification: &Notification) {
        tracing::info!(
            title = %notification.title,
            message = %notification.message,
            "notification"
        );
    }
}

/// Collects notifications in memory. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    entries: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Notification> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove and return everything collected so far.
    pub fn drain(&self) -> Vec<Notification> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        std::mem::take(&mut *entries)
    }
}

impl Notifier for NotificationLog {
    fn notify(&mut self, notification: &Notification) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(notification.clone());
    }
}
