use std::collections::HashSet;

use stockpile_types::FieldMap;

use crate::error::{StoreError, StoreResult};

/// Hash-oriented key-value store.
///
/// Every key addresses one record made of string fields. Implementations
/// must be thread-safe and propagate every backend error.
pub trait HashStore: Send + Sync {
    /// Store `fields` under `key`, replacing any previous record.
    fn set(&self, key: &str, fields: &FieldMap) -> StoreResult<()>;

    /// Read the record under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    fn get(&self, key: &str) -> StoreResult<Option<FieldMap>>;

    /// Delete the record under `key`. Returns `true` if it existed.
    fn delete(&self, key: &str) -> StoreResult<bool>;

    /// Check whether a record exists under `key`.
    fn exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// All keys currently stored, sorted.
    fn keys(&self) -> StoreResult<Vec<String>>;

    /// Store every record, replacing existing ones. A key repeated in
    /// `records` keeps its last fields.
    ///
    /// Default implementation calls `set()` for each record, so a failure
    /// can leave a prefix written. Backends should override to write the
    /// batch as a unit.
    fn set_batch(&self, records: &[(String, FieldMap)]) -> StoreResult<()> {
        for (key, fields) in records {
            self.set(key, fields)?;
        }
        Ok(())
    }

    /// Store every record only if no key exists yet and no key repeats
    /// within `records`.
    ///
    /// Fails with [`StoreError::KeyExists`] naming the first conflicting key
    /// and writes nothing. The default implementation checks and then
    /// writes; backends shared between writers must override it so the
    /// check and the write are one step.
    fn set_batch_if_absent(&self, records: &[(String, FieldMap)]) -> StoreResult<()> {
        let mut seen = HashSet::with_capacity(records.len());
        for (key, _) in records {
            if !seen.insert(key.as_str()) || self.exists(key)? {
                return Err(StoreError::KeyExists(key.clone()));
            }
        }
        self.set_batch(records)
    }

    /// Read several records.
    ///
    /// Default implementation calls `get()` for each key. Backends may
    /// override for fewer round-trips.
    fn get_batch(&self, keys: &[String]) -> StoreResult<Vec<Option<FieldMap>>> {
        keys.iter().map(|key| self.get(key)).collect()
    }
}
