//! User-visible notifications raised by mutating operations.

use std::sync::Mutex;

use tracing::info;

/// Sink for short confirmation messages ("added to favourites", ...).
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Prints notifications to stderr so stdout stays parseable.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleNotifier {
    enabled: bool,
}

impl ConsoleNotifier {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        if self.enabled {
            eprintln!("{message}");
        }
    }
}

/// Routes notifications into the tracing log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        info!(message, "notification");
    }
}

/// Keeps every message; used to assert on side effects.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}
