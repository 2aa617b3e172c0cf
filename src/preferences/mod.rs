//! Persisted user preference.
//!
//! The timer remembers the last duration and unit that successfully started a
//! countdown. Storage is best-effort: loading and saving never fail from the
//! controller's point of view.
//!
//! # Usage
//!
//! ```rust,no_run
//! use tomato_clock::preferences::{JsonFilePreferenceStore, PreferenceStore};
//!
//! let store = JsonFilePreferenceStore::new("/tmp/tomato-clock/preferences.json");
//! if let Some(record) = store.load() {
//!     println!("last used: {} {}", record.duration_value, record.duration_unit);
//! }
//! ```

mod error;
mod file;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

pub use error::PreferenceError;
pub use file::{default_preferences_path, JsonFilePreferenceStore};

use crate::types::PreferenceRecord;

/// Key-value persistence of the last-used configuration.
pub trait PreferenceStore {
    /// Loads the stored record, or `None` if nothing usable is stored.
    fn load(&self) -> Option<PreferenceRecord>;

    /// Stores the record, replacing any previous one.
    fn save(&self, record: &PreferenceRecord);
}

/// Store used when there is nowhere to persist to.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPreferenceStore;

impl PreferenceStore for NullPreferenceStore {
    fn load(&self) -> Option<PreferenceRecord> {
        None
    }

    fn save(&self, _record: &PreferenceRecord) {}
}

/// In-memory store for testing.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    record: Mutex<Option<PreferenceRecord>>,
    save_count: AtomicUsize,
    unavailable: AtomicBool,
}

impl MemoryPreferenceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds a record.
    #[must_use]
    pub fn with_record(record: PreferenceRecord) -> Self {
        let store = Self::new();
        *store.record.lock().unwrap() = Some(record);
        store
    }

    /// Simulates storage being unavailable: loads return nothing and saves
    /// are dropped.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    #[must_use]
    pub fn record(&self) -> Option<PreferenceRecord> {
        *self.record.lock().unwrap()
    }

    #[must_use]
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Option<PreferenceRecord> {
        if self.unavailable.load(Ordering::SeqCst) {
            return None;
        }
        self.record()
    }

    fn save(&self, record: &PreferenceRecord) {
        if self.unavailable.load(Ordering::SeqCst) {
            return;
        }
        *self.record.lock().unwrap() = Some(*record);
        self.save_count.fetch_add(1, Ordering::SeqCst);
    }
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for std::sync::Arc<T> {
    fn load(&self) -> Option<PreferenceRecord> {
        (**self).load()
    }

    fn save(&self, record: &PreferenceRecord) {
        (**self).save(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DurationUnit;

    fn record() -> PreferenceRecord {
        PreferenceRecord {
            duration_value: 40,
            duration_unit: DurationUnit::Minutes,
        }
    }

    #[test]
    fn test_null_store() {
        let store = NullPreferenceStore;
        store.save(&record());
        assert!(store.load().is_none());
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryPreferenceStore::new();
        assert!(store.load().is_none());

        store.save(&record());
        assert_eq!(store.load(), Some(record()));
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_memory_store_unavailable() {
        let store = MemoryPreferenceStore::with_record(record());
        store.set_unavailable(true);

        assert!(store.load().is_none());
        store.save(&record());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_arc_store_delegates() {
        let store = std::sync::Arc::new(MemoryPreferenceStore::new());
        let shared: Box<dyn PreferenceStore> = Box::new(store.clone());

        shared.save(&record());
        assert_eq!(store.save_count(), 1);
    }
}
