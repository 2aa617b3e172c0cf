//! Preference store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing the preference file.
///
/// These never reach the timer controller: the [`super::PreferenceStore`]
/// implementations log them and carry on.
#[derive(Debug, Error)]
pub enum PreferenceError {
    /// No configuration directory exists on this platform.
    #[error("no configuration directory available")]
    NoConfigDir,

    /// Reading or writing the preference file failed.
    #[error("preference file {path}: {source}")]
    Io {
        /// File that was being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The preference file does not contain a valid record.
    #[error("malformed preference file {path}: {source}")]
    Malformed {
        /// File that was being parsed
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PreferenceError::Io {
            path: PathBuf::from("/tmp/prefs.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/tmp/prefs.json"));
        assert!(err.to_string().contains("denied"));
    }
}
