//! Desktop notification support.
//!
//! Sending a notification is fire-and-forget: a missing notification
//! service or a failed delivery is reported as a [`NotificationError`] that
//! callers are expected to log and ignore.
//!
//! # Example
//!
//! ```rust,no_run
//! use tomato_clock::notification::{DesktopNotifier, NotificationContent, NotificationSender};
//!
//! let notifier = DesktopNotifier::new(true);
//! if notifier.is_available() {
//!     let _ = notifier.send(&NotificationContent::completion());
//! }
//! ```

mod content;
mod desktop;
pub mod error;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub use self::content::{
    sanitize_text, NotificationContent, NotificationContentBuilder, COMPLETION_BODY,
    COMPLETION_TITLE,
};
pub use self::desktop::DesktopNotifier;
pub use self::error::NotificationError;

/// Trait for notification sending, allowing mock implementations.
pub trait NotificationSender {
    /// Dispatches a notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification could not be dispatched.
    fn send(&self, content: &NotificationContent) -> Result<(), NotificationError>;

    /// Returns true if notifications can currently be shown.
    fn is_available(&self) -> bool;
}

impl<T: NotificationSender + ?Sized> NotificationSender for std::sync::Arc<T> {
    fn send(&self, content: &NotificationContent) -> Result<(), NotificationError> {
        (**self).send(content)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

/// Mock notification sender for testing.
#[derive(Debug)]
pub struct MockNotificationSender {
    sent: Mutex<Vec<NotificationContent>>,
    available: AtomicBool,
    should_fail: AtomicBool,
}

impl Default for MockNotificationSender {
    fn default() -> Self {
        Self::new()
    }
}

impl MockNotificationSender {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            available: AtomicBool::new(true),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn get_notifications(&self) -> Vec<NotificationContent> {
        self.sent.lock().unwrap().clone()
    }

    #[must_use]
    pub fn notification_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn clear_recorded(&self) {
        self.sent.lock().unwrap().clear();
    }
}

impl NotificationSender for MockNotificationSender {
    fn send(&self, content: &NotificationContent) -> Result<(), NotificationError> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(NotificationError::NotAvailable);
        }
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(NotificationError::SendFailed("Mock failure".to_string()));
        }
        self.sent.lock().unwrap().push(content.clone());
        Ok(())
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_notification_sender_basic() {
        let mock = MockNotificationSender::new();

        mock.send(&NotificationContent::completion()).unwrap();

        assert_eq!(mock.notification_count(), 1);
        assert_eq!(mock.get_notifications()[0].title, COMPLETION_TITLE);

        mock.clear_recorded();
        assert_eq!(mock.notification_count(), 0);
    }

    #[test]
    fn test_mock_notification_sender_failure() {
        let mock = MockNotificationSender::new();
        mock.set_should_fail(true);

        let result = mock.send(&NotificationContent::completion());
        assert!(matches!(result, Err(NotificationError::SendFailed(_))));
        assert_eq!(mock.notification_count(), 0);
    }

    #[test]
    fn test_mock_notification_sender_availability() {
        let mock = MockNotificationSender::new();
        assert!(mock.is_available());

        mock.set_available(false);
        assert!(!mock.is_available());
        assert!(matches!(
            mock.send(&NotificationContent::completion()),
            Err(NotificationError::NotAvailable)
        ));
    }
}
