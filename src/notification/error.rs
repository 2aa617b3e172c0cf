//! Notification system error types.

use thiserror::Error;

/// Errors that can occur in the notification system.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Failed to send a notification.
    #[error("failed to send notification: {0}")]
    SendFailed(String),

    /// Notifications were turned off by configuration.
    #[error("notifications are disabled")]
    Disabled,

    /// Invalid input provided to the notification system.
    #[error("invalid notification content: {0}")]
    InvalidInput(String),

    /// The platform notification service is not available.
    #[error("notification service not available")]
    NotAvailable,
}

impl NotificationError {
    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::SendFailed(_) => "check that a notification daemon is running",
            Self::Disabled => "remove --no-notify to enable notifications",
            Self::InvalidInput(_) => "check the notification text",
            Self::NotAvailable => "desktop notifications need a graphical session",
        }
    }
}
