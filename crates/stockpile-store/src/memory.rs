use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use stockpile_types::FieldMap;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::HashStore;

/// In-memory, HashMap-based hash store.
///
/// Intended for tests and embedding. Records are held behind a `RwLock` for
/// safe concurrent access and cloned on read/write. Data is lost when the
/// store is dropped.
pub struct InMemoryHashStore {
    records: RwLock<HashMap<String, FieldMap>>,
}

impl InMemoryHashStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Number of records currently stored.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read_records()?.len())
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read_records()?.is_empty())
    }

    /// Remove all records from the store.
    pub fn clear(&self) -> StoreResult<()> {
        self.write_records()?.clear();
        Ok(())
    }

    fn read_records(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<String, FieldMap>>> {
        self.records
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    fn check_keys(records: &[(String, FieldMap)]) -> StoreResult<()> {
        match records.iter().find(|(key, _)| key.is_empty()) {
            Some((key, _)) => Err(StoreError::InvalidKey(key.clone())),
            None => Ok(()),
        }
    }

    fn write_records(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<String, FieldMap>>> {
        self.records
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }
}

impl Default for InMemoryHashStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HashStore for InMemoryHashStore {
    fn set(&self, key: &str, fields: &FieldMap) -> StoreResult<()> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        let mut records = self.write_records()?;
        let replaced = records.insert(key.to_string(), fields.clone()).is_some();
        debug!(key, fields = fields.len(), replaced, "hash set");
        Ok(())
    }

    fn set_batch(&self, records: &[(String, FieldMap)]) -> StoreResult<()> {
        Self::check_keys(records)?;
        let mut stored = self.write_records()?;
        for (key, fields) in records {
            stored.insert(key.clone(), fields.clone());
        }
        debug!(count = records.len(), "hash set batch");
        Ok(())
    }

    fn set_batch_if_absent(&self, records: &[(String, FieldMap)]) -> StoreResult<()> {
        Self::check_keys(records)?;
        let mut stored = self.write_records()?;
        let mut seen = HashSet::with_capacity(records.len());
        for (key, _) in records {
            if !seen.insert(key.as_str()) || stored.contains_key(key) {
                debug!(key = %key, "hash set batch conflict");
                return Err(StoreError::KeyExists(key.clone()));
            }
        }
        for (key, fields) in records {
            stored.insert(key.clone(), fields.clone());
        }
        debug!(count = records.len(), "hash set batch if absent");
        Ok(())
    }

    fn get(&self, key: &str) -> StoreResult<Option<FieldMap>> {
        Ok(self.read_records()?.get(key).cloned())
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        let removed = self.write_records()?.remove(key).is_some();
        debug!(key, removed, "hash delete");
        Ok(removed)
    }

    fn exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self.read_records()?.contains_key(key))
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let mut keys: Vec<String> = self.read_records()?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

impl std::fmt::Debug for InMemoryHashStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len().unwrap_or_default();
        f.debug_struct("InMemoryHashStore")
            .field("record_count", &count)
            .finish()
    }
}
