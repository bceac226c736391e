//! User-facing notifications
//!
//! Every console operation ends in at most one [`Notification`]. They are
//! published on a broadcast channel; the CLI (or any other front end)
//! subscribes and renders them.

use shared::ErrorCode;
use tokio::sync::broadcast;

use crate::error::AdminError;

/// Capacity of the notification channel
const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    pub code: Option<ErrorCode>,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
            code: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
            code: None,
        }
    }

    /// Error notification; remote failures use the server text or `fallback`
    pub fn error(err: &AdminError, fallback: &str) -> Self {
        Self {
            level: Level::Error,
            message: err.user_message(fallback),
            code: Some(err.error_code()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

/// Publishing side of the notification channel
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notification>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    pub fn notify(&self, notification: Notification) {
        match notification.level {
            Level::Error => tracing::warn!(message = %notification.message, code = ?notification.code, "Operation failed"),
            _ => tracing::info!(message = %notification.message, "Operation completed"),
        }
        // No subscriber is fine: nothing is rendering right now
        if self.tx.send(notification).is_err() {
            tracing::trace!("Notification dropped, no subscribers");
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(Notification::success(message));
    }

    pub fn error(&self, err: &AdminError, fallback: &str) {
        self.notify(Notification::error(err, fallback));
    }
}
