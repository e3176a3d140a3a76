//! Persistent state abstractions for Routinely.
//!
//! Defines the key-value store trait and the keys the application writes.
//! The file-backed implementation lives in routinely-infra.

pub mod kv_store;
pub mod memory;

use serde::Serialize;
use serde::de::DeserializeOwned;

use routinely_types::error::StorageError;

use self::kv_store::KvStore;

/// Selected product ids, a JSON array of strings.
pub const SELECTED_PRODUCTS_KEY: &str = "selectedProducts";

/// Conversation log, a JSON array of `{role, content}`.
pub const CHAT_HISTORY_KEY: &str = "chatHistory";

/// Text direction preference, `"ltr"` or `"rtl"`.
pub const DIRECTION_KEY: &str = "dir";

/// Read `key` and deserialize it, falling back to `T::default()`.
///
/// Missing keys, unreadable storage and malformed values all restore as the
/// default so that a damaged state file never blocks startup.
pub async fn restore_or_default<S, T>(store: &S, key: &str) -> T
where
    S: KvStore,
    T: DeserializeOwned + Default,
{
    match store.get(key).await {
        Ok(Some(value)) => match serde_json::from_value(value) {
            Ok(restored) => restored,
            Err(e) => {
                tracing::warn!(key, error = %e, "Malformed persisted value, using default");
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read persisted value, using default");
            T::default()
        }
    }
}

/// Read a persisted JSON array under `key`, keeping every entry that
/// deserializes as `T`.
///
/// A bad entry is skipped with a warning instead of discarding the whole
/// array, so the next write does not erase the entries that were fine.
pub async fn restore_entries<S, T>(store: &S, key: &str) -> Vec<T>
where
    S: KvStore,
    T: DeserializeOwned,
{
    let entries: Vec<serde_json::Value> = restore_or_default(store, key).await;
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(key, index, error = %e, "Skipping malformed persisted entry");
                None
            }
        })
        .collect()
}

/// Serialize `value` and write it under `key`.
pub async fn persist<S, T>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    S: KvStore,
    T: Serialize + ?Sized,
{
    let json =
        serde_json::to_value(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
    store.set(key, &json).await
}
