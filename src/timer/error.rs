//! Timer error types.
//!
//! The controller has exactly one way to fail: the duration typed into the
//! input surface cannot start a countdown.

use thiserror::Error;

/// Errors raised by the timer controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// The entered duration is non-numeric, not positive, or too large.
    #[error("invalid duration '{input}': enter a positive whole number")]
    InvalidDuration {
        /// The offending input, trimmed
        input: String,
    },
}

impl TimerError {
    /// Creates an `InvalidDuration` error for the given input.
    pub fn invalid_duration(input: impl Into<String>) -> Self {
        Self::InvalidDuration {
            input: input.into(),
        }
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::InvalidDuration { .. } => "try for example `set 25` or `set 90 seconds`",
        }
    }
}
