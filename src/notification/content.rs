//! Notification content construction.
//!
//! This module provides a builder for notification content with a fluent
//! API, plus the fixed content shown when a countdown completes.

use super::error::NotificationError;

/// Maximum length for notification text fields, in characters.
const MAX_FIELD_LENGTH: usize = 200;

/// Title of the completion notification.
pub const COMPLETION_TITLE: &str = "Pomodoro Timer";

/// Body of the completion notification.
pub const COMPLETION_BODY: &str = "Time's up! Take a break!";

/// Text of a desktop notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    /// Summary line
    pub title: String,
    /// Body text
    pub body: String,
}

impl NotificationContent {
    /// Starts building a notification.
    #[must_use]
    pub fn builder() -> NotificationContentBuilder {
        NotificationContentBuilder::default()
    }

    /// Content shown when a countdown reaches zero.
    #[must_use]
    pub fn completion() -> Self {
        Self {
            title: COMPLETION_TITLE.to_string(),
            body: COMPLETION_BODY.to_string(),
        }
    }
}

/// Builder for constructing notification content.
#[derive(Debug, Default)]
pub struct NotificationContentBuilder {
    title: Option<String>,
    body: Option<String>,
}

impl NotificationContentBuilder {
    /// Sets the notification title.
    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Sets the notification body text.
    #[must_use]
    pub fn body(mut self, body: &str) -> Self {
        self.body = Some(body.to_string());
        self
    }

    /// Builds the content, sanitizing both fields.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::InvalidInput` if the title is missing or
    /// empty after sanitizing.
    pub fn build(self) -> Result<NotificationContent, NotificationError> {
        let title = self
            .title
            .as_deref()
            .and_then(sanitize_text)
            .ok_or_else(|| NotificationError::InvalidInput("title is empty".to_string()))?;
        let body = self.body.as_deref().and_then(sanitize_text).unwrap_or_default();

        Ok(NotificationContent { title, body })
    }
}

/// Sanitizes a text field for display in a notification.
///
/// Returns the cleaned text or None if nothing printable remains.
pub fn sanitize_text(text: &str) -> Option<String> {
    let sanitized: String = text
        .chars()
        .filter(|c| !c.is_control())
        .take(MAX_FIELD_LENGTH)
        .collect();

    let trimmed = sanitized.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
