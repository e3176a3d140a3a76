//! File-backed key-value store implementation.
//!
//! Implements `KvStore` from `routinely-core` with one JSON document per key
//! under `{data_dir}/state/`:
//!
//! ```text
//! {data_dir}/state/
//!   selectedProducts.json
//!   chatHistory.json
//!   dir.json
//! ```
//!
//! Writes go to a sibling temp file first and are renamed into place, so a
//! crash mid-write leaves the previous value intact.

use std::path::{Path, PathBuf};

use routinely_core::storage::kv_store::KvStore;
use routinely_types::error::StorageError;

/// JSON-file-backed implementation of `KvStore`.
pub struct JsonFileKvStore {
    state_dir: PathBuf,
}

impl JsonFileKvStore {
    /// Create a store rooted at `{data_dir}/state/`. The directory is created
    /// lazily on the first write.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            state_dir: data_dir.join("state"),
        }
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    /// Path of the document holding `key`.
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.state_dir.join(format!("{key}.json"))
    }
}

impl KvStore for JsonFileKvStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        let path = self.key_path(key);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::Io(format!(
                    "failed to read {}: {e}",
                    path.display()
                )));
            }
        };

        let value = serde_json::from_str(&content).map_err(|e| {
            StorageError::Serialization(format!("invalid JSON in {}: {e}", path.display()))
        })?;
        Ok(Some(value))
    }

    async fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.state_dir).await.map_err(|e| {
            StorageError::Io(format!(
                "failed to create {}: {e}",
                self.state_dir.display()
            ))
        })?;

        let content = serde_json::to_string(value)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let path = self.key_path(key);
        let tmp = self.state_dir.join(format!(".{key}.json.tmp"));
        tokio::fs::write(&tmp, content)
            .await
            .map_err(|e| StorageError::Io(format!("failed to write {}: {e}", tmp.display())))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| StorageError::Io(format!("failed to replace {}: {e}", path.display())))?;

        tracing::trace!(key, path = %path.display(), "State persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routinely_core::selection::SelectionSet;
    use routinely_core::storage::SELECTED_PRODUCTS_KEY;
    use routinely_types::product::ProductId;
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_get_missing_key_is_none() {
        let dir = tempdir().unwrap();
        let store = JsonFileKvStore::new(dir.path());
        assert!(store.get("dir").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_creates_state_dir_and_roundtrips() {
        let dir = tempdir().unwrap();
        let store = JsonFileKvStore::new(dir.path());

        store.set("dir", &json!("rtl")).await.unwrap();

        assert!(dir.path().join("state").join("dir.json").exists());
        assert_eq!(store.get("dir").await.unwrap(), Some(json!("rtl")));
    }

    #[tokio::test]
    async fn test_set_overwrites_and_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let store = JsonFileKvStore::new(dir.path());

        store.set("chatHistory", &json!([1])).await.unwrap();
        store.set("chatHistory", &json!([1, 2])).await.unwrap();

        assert_eq!(store.get("chatHistory").await.unwrap(), Some(json!([1, 2])));
        let names: Vec<String> = std::fs::read_dir(store.state_dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["chatHistory.json".to_string()]);
    }

    #[tokio::test]
    async fn test_malformed_document_is_serialization_error() {
        let dir = tempdir().unwrap();
        let store = JsonFileKvStore::new(dir.path());
        std::fs::create_dir_all(store.state_dir()).unwrap();
        std::fs::write(store.key_path("dir"), "{not json").unwrap();

        let err = store.get("dir").await.unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_selection_survives_reopen() {
        let dir = tempdir().unwrap();

        let store = Arc::new(JsonFileKvStore::new(dir.path()));
        let mut selection = SelectionSet::restore(store).await;
        selection.toggle(ProductId::from("7")).await.unwrap();
        selection.toggle(ProductId::from("3")).await.unwrap();

        let reopened = Arc::new(JsonFileKvStore::new(dir.path()));
        assert_eq!(
            reopened.get(SELECTED_PRODUCTS_KEY).await.unwrap(),
            Some(json!(["3", "7"]))
        );
        let restored = SelectionSet::restore(reopened).await;
        assert!(restored.contains(&ProductId::from("7")));
        assert_eq!(restored.len(), 2);
    }
}
