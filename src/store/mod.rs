//! Persisted entry store.
//!
//! An append-only, insertion-ordered sequence of [`EntryRow`] backed by an
//! injected key-value [`Storage`]. The full sequence is written back after
//! every mutation; there is no deferred or batched write, so a save the UI
//! reports as successful is already durable. A failed persist rolls the
//! in-memory append back, so the table never shows rows that would vanish
//! on reload.

mod file;

pub use file::FileStorage;

use crate::rows::EntryRow;

/// The single storage key holding the serialized row sequence.
pub const STORE_KEY: &str = "entries";

/// Store and persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored entries are not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Durable key-value storage, the persistence boundary of the store.
pub trait Storage: Send + Sync {
    /// Read a key. Absent keys are `Ok(None)`, not an error.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Write a key, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Ordered, append-only collection of saved entry rows.
pub struct EntryStore {
    storage: Box<dyn Storage>,
    entries: Vec<EntryRow>,
}

impl EntryStore {
    /// Create an empty store over the given storage. Call [`hydrate`]
    /// before use to load previously persisted rows.
    ///
    /// [`hydrate`]: EntryStore::hydrate
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self {
            storage,
            entries: Vec::new(),
        }
    }

    /// Create a store and immediately hydrate it.
    pub fn open(storage: Box<dyn Storage>) -> Result<Self, StoreError> {
        let mut store = Self::new(storage);
        store.hydrate()?;
        Ok(store)
    }

    /// Load the persisted row sequence, replacing the in-memory one. A
    /// store that was never persisted starts empty.
    pub fn hydrate(&mut self) -> Result<(), StoreError> {
        self.entries = match self.storage.get(STORE_KEY)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };
        Ok(())
    }

    /// All rows in insertion order.
    pub fn all(&self) -> &[EntryRow] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append one row and persist. On persist failure the row is removed
    /// again and the error propagates.
    pub fn append(&mut self, row: EntryRow) -> Result<(), StoreError> {
        self.append_all(vec![row])
    }

    /// Append rows in order and persist them as one unit. Either all rows
    /// are durable or none remain in memory.
    pub fn append_all(&mut self, rows: Vec<EntryRow>) -> Result<(), StoreError> {
        let before = self.entries.len();
        self.entries.extend(rows);
        if let Err(err) = self.persist() {
            self.entries.truncate(before);
            return Err(err);
        }
        Ok(())
    }

    /// Serialize the entire sequence to storage under [`STORE_KEY`].
    pub fn persist(&self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.entries)?;
        self.storage.set(STORE_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    /// In-memory storage with a failure switch, shareable across stores.
    #[derive(Clone, Default)]
    struct MemoryStorage {
        data: Arc<Mutex<HashMap<String, String>>>,
        fail_writes: Arc<AtomicBool>,
    }

    impl MemoryStorage {
        fn set_fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }
    }

    impl Storage for MemoryStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Ok(self.data.lock().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StoreError::Io(std::io::Error::other("quota exceeded")));
            }
            self.data
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    fn sample_row(tube: &str) -> EntryRow {
        EntryRow {
            tube: tube.to_string(),
            comments: "Start - ".to_string(),
            ..EntryRow::default()
        }
    }

    #[test]
    fn test_hydrate_empty_storage() {
        let store = EntryStore::open(Box::new(MemoryStorage::default())).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let mut store = EntryStore::open(Box::new(MemoryStorage::default())).unwrap();
        store.append(sample_row("1")).unwrap();
        store.append(sample_row("2")).unwrap();
        store.append(sample_row("3")).unwrap();
        let tubes: Vec<_> = store.all().iter().map(|r| r.tube.as_str()).collect();
        assert_eq!(tubes, ["1", "2", "3"]);
    }

    #[test]
    fn test_persist_round_trip() {
        let storage = MemoryStorage::default();

        let mut store = EntryStore::open(Box::new(storage.clone())).unwrap();
        store
            .append_all(vec![sample_row("10482"), sample_row("10483")])
            .unwrap();

        // A fresh store over the same storage sees the same sequence.
        let rehydrated = EntryStore::open(Box::new(storage)).unwrap();
        assert_eq!(rehydrated.all(), store.all());
    }

    #[test]
    fn test_failed_persist_rolls_back_append() {
        let storage = MemoryStorage::default();
        storage.set_fail_writes(true);
        let mut store = EntryStore::new(Box::new(storage));

        let err = store.append_all(vec![sample_row("1"), sample_row("2")]);
        assert!(err.is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_rollback_keeps_earlier_rows() {
        let storage = MemoryStorage::default();
        let mut store = EntryStore::new(Box::new(storage.clone()));
        store.append(sample_row("1")).unwrap();

        storage.set_fail_writes(true);
        assert!(store.append_all(vec![sample_row("2"), sample_row("3")]).is_err());
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].tube, "1");

        // Recovery: once storage accepts writes again the append succeeds.
        storage.set_fail_writes(false);
        store.append(sample_row("2")).unwrap();
        assert_eq!(store.len(), 2);
    }
}
