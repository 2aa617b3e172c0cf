//! JSON file backed preference store.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::error::PreferenceError;
use super::PreferenceStore;
use crate::types::PreferenceRecord;

/// Directory name under the platform configuration directory.
const APP_DIR_NAME: &str = "tomato-clock";

/// File name of the preference record.
const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Returns the default preference file location.
///
/// # Errors
///
/// Returns `PreferenceError::NoConfigDir` if the platform has no
/// configuration directory (e.g. `$HOME` is unset).
pub fn default_preferences_path() -> Result<PathBuf, PreferenceError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(PREFERENCES_FILE_NAME))
        .ok_or(PreferenceError::NoConfigDir)
}

/// Preference store that keeps the record in a small JSON file.
#[derive(Debug, Clone)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
}

impl JsonFilePreferenceStore {
    /// Creates a store backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the default location.
    pub fn at_default_location() -> Result<Self, PreferenceError> {
        default_preferences_path().map(Self::new)
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored record.
    ///
    /// A missing file is `Ok(None)`.
    pub fn read(&self) -> Result<Option<PreferenceRecord>, PreferenceError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PreferenceError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let record = serde_json::from_str(&contents).map_err(|source| {
            PreferenceError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;
        Ok(Some(record))
    }

    /// Writes the record, creating parent directories as needed.
    pub fn write(&self, record: &PreferenceRecord) -> Result<(), PreferenceError> {
        let io_err = |source| PreferenceError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(record).map_err(|source| {
            PreferenceError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, json).map_err(io_err)?;

        debug!("Preferences written to {}", self.path.display());
        Ok(())
    }

    /// Removes the stored record. Returns true if a file was removed.
    pub fn clear(&self) -> Result<bool, PreferenceError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(PreferenceError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn load(&self) -> Option<PreferenceRecord> {
        match self.read() {
            Ok(record) => record,
            Err(e) => {
                warn!("Ignoring stored preferences: {}", e);
                None
            }
        }
    }

    fn save(&self, record: &PreferenceRecord) {
        if let Err(e) = self.write(record) {
            warn!("Could not save preferences: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DurationUnit;

    fn record(value: u32, unit: DurationUnit) -> PreferenceRecord {
        PreferenceRecord {
            duration_value: value,
            duration_unit: unit,
        }
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFilePreferenceStore::new(dir.path().join("prefs.json"));

        assert!(store.read().unwrap().is_none());
        assert!(store.load().is_none());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFilePreferenceStore::new(dir.path().join("nested/dir/prefs.json"));

        store.write(&record(90, DurationUnit::Seconds)).unwrap();

        assert_eq!(store.load(), Some(record(90, DurationUnit::Seconds)));
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFilePreferenceStore::new(dir.path().join("prefs.json"));

        store.save(&record(25, DurationUnit::Minutes));
        store.save(&record(40, DurationUnit::Minutes));

        assert_eq!(store.load(), Some(record(40, DurationUnit::Minutes)));
    }

    #[test]
    fn test_malformed_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();
        let store = JsonFilePreferenceStore::new(&path);

        assert!(matches!(
            store.read(),
            Err(PreferenceError::Malformed { .. })
        ));
        assert!(store.load().is_none());
    }

    #[test]
    fn test_save_to_unwritable_location_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file cannot be used as a parent directory
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let store = JsonFilePreferenceStore::new(blocker.join("prefs.json"));

        store.save(&record(25, DurationUnit::Minutes));

        assert!(store.write(&record(25, DurationUnit::Minutes)).is_err());
    }

    #[test]
    fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFilePreferenceStore::new(dir.path().join("prefs.json"));

        assert!(!store.clear().unwrap());
        store.save(&record(5, DurationUnit::Minutes));
        assert!(store.clear().unwrap());
        assert!(store.load().is_none());
    }

    #[test]
    fn test_reads_legacy_record_without_unit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{"pomodoroTime": 40}"#).unwrap();

        let store = JsonFilePreferenceStore::new(&path);
        assert_eq!(store.load(), Some(record(40, DurationUnit::Minutes)));
    }
}
