//! # Notifier
//!
//! Where success toasts go. Fire-and-forget: a notifier never reports back.

use std::sync::Mutex;

use tracing::{info, warn};

use vitrine_core::{Notification, NotificationStatus};

/// Receives `{ message, status }` notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Writes notifications to the log. Used by the CLI.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.status {
            NotificationStatus::Success => {
                info!(status = %notification.status, "{}", notification.message)
            }
            NotificationStatus::Error => {
                warn!(status = %notification.status, "{}", notification.message)
            }
        }
    }
}

/// Keeps every notification in memory, in delivery order.
///
/// Useful for UI bindings that drain toasts themselves, and in tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .expect("notifier mutex poisoned")
            .clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .map(|n| n.message)
            .collect()
    }

    /// Removes and returns everything recorded so far.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.notifications.lock().expect("notifier mutex poisoned"))
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        self.notifications
            .lock()
            .expect("notifier mutex poisoned")
            .push(notification.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(&Notification::success("Product created"));
        notifier.notify(&Notification::error("Upload failed"));

        assert_eq!(notifier.messages(), vec!["Product created", "Upload failed"]);
        assert_eq!(notifier.drain().len(), 2);
        assert!(notifier.notifications().is_empty());
    }
}
