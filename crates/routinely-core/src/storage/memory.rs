//! In-memory key-value store.
//!
//! Holds state for the lifetime of the process only. Used by tests and
//! by callers that want a session without touching disk.

use std::collections::HashMap;
use std::sync::Mutex;

use routinely_types::error::StorageError;

use super::kv_store::KvStore;

#[derive(Debug, Default)]
pub struct MemoryKvStore {
    values: Mutex<HashMap<String, serde_json::Value>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `entries`.
    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, serde_json::Value)>,
        K: Into<String>,
    {
        let values = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self {
            values: Mutex::new(values),
        }
    }

    /// Synchronous read, for assertions.
    pub fn snapshot(&self, key: &str) -> Option<serde_json::Value> {
        self.values
            .lock()
            .ok()
            .and_then(|values| values.get(key).cloned())
    }
}

impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        let values = self
            .values
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), StorageError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        values.insert(key.to_string(), value.clone());
        Ok(())
    }
}
