//! In-memory key-value store
//!
//! Holds serialized values in a map. Useful for tests and throwaway
//! sessions. An optional byte quota mimics the size limit of browser
//! local storage.

use std::collections::HashMap;

use super::error::{StorageError, StorageResult};
use super::persistence::KeyValueStore;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects writes once the total stored bytes exceed `quota`
    pub fn with_quota(quota: usize) -> Self {
        Self {
            values: HashMap::new(),
            quota: Some(quota),
        }
    }

    /// Change or clear the byte quota
    pub fn set_quota(&mut self, quota: Option<usize>) {
        self.quota = quota;
    }

    /// Bytes currently stored across all keys
    pub fn used_bytes(&self) -> usize {
        self.values.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn read_raw(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn write_raw(&mut self, key: &str, value: String) -> StorageResult<()> {
        if let Some(quota) = self.quota {
            let existing = self.values.get(key).map_or(0, |v| key.len() + v.len());
            let needed = self.used_bytes() - existing + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    quota,
                    needed,
                });
            }
        }
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}
