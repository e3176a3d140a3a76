//! The user's current product picks.
//!
//! Every mutation writes the full set back to storage as a JSON array of
//! id strings. Ids that no longer exist in the catalog are kept; they just
//! never match a card.

use std::collections::BTreeSet;
use std::sync::Arc;

use routinely_types::error::StorageError;
use routinely_types::product::ProductId;

use crate::storage::kv_store::KvStore;
use crate::storage::{SELECTED_PRODUCTS_KEY, persist, restore_entries};

pub struct SelectionSet<S: KvStore> {
    ids: BTreeSet<ProductId>,
    store: Arc<S>,
}

impl<S: KvStore> SelectionSet<S> {
    /// Restore the selection persisted by a previous session.
    pub async fn restore(store: Arc<S>) -> Self {
        let ids: Vec<ProductId> = restore_entries(store.as_ref(), SELECTED_PRODUCTS_KEY).await;
        Self {
            ids: ids.into_iter().collect(),
            store,
        }
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &ProductId> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Flip membership of `id`. Returns whether it is selected afterwards.
    pub async fn toggle(&mut self, id: ProductId) -> Result<bool, StorageError> {
        let selected = if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        };
        self.persist().await?;
        Ok(selected)
    }

    /// Remove `id` whether or not it was selected.
    pub async fn remove(&mut self, id: &ProductId) -> Result<(), StorageError> {
        self.ids.remove(id);
        self.persist().await
    }

    pub async fn clear(&mut self) -> Result<(), StorageError> {
        self.ids.clear();
        self.persist().await
    }

    async fn persist(&self) -> Result<(), StorageError> {
        let ids: Vec<&ProductId> = self.ids.iter().collect();
        persist(self.store.as_ref(), SELECTED_PRODUCTS_KEY, &ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryKvStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_restore_from_empty_store() {
        let selection = SelectionSet::restore(Arc::new(MemoryKvStore::new())).await;
        assert!(selection.is_empty());
    }

    #[tokio::test]
    async fn test_restore_tolerates_numbers_and_stale_ids() {
        let store = MemoryKvStore::with_entries([(SELECTED_PRODUCTS_KEY, json!([1, "2", "gone"]))]);
        let selection = SelectionSet::restore(Arc::new(store)).await;
        assert_eq!(selection.len(), 3);
        assert!(selection.contains(&ProductId::from("1")));
        assert!(selection.contains(&ProductId::from("gone")));
    }

    #[tokio::test]
    async fn test_restore_skips_unusable_ids_and_keeps_the_rest() {
        let store = Arc::new(MemoryKvStore::with_entries([(
            SELECTED_PRODUCTS_KEY,
            json!(["a", {"id": "b"}, null, 3]),
        )]));
        let mut selection = SelectionSet::restore(store.clone()).await;
        assert_eq!(selection.len(), 2);

        selection.toggle(ProductId::from("c")).await.unwrap();
        assert_eq!(
            store.snapshot(SELECTED_PRODUCTS_KEY),
            Some(json!(["3", "a", "c"]))
        );
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_membership() {
        let store = Arc::new(MemoryKvStore::new());
        let mut selection = SelectionSet::restore(store.clone()).await;
        selection.toggle(ProductId::from("a")).await.unwrap();

        let before: Vec<ProductId> = selection.ids().cloned().collect();
        assert!(selection.toggle(ProductId::from("b")).await.unwrap());
        assert!(!selection.toggle(ProductId::from("b")).await.unwrap());
        let after: Vec<ProductId> = selection.ids().cloned().collect();

        assert_eq!(before, after);
        assert_eq!(store.snapshot(SELECTED_PRODUCTS_KEY), Some(json!(["a"])));
    }

    #[tokio::test]
    async fn test_remove_is_unconditional() {
        let store = Arc::new(MemoryKvStore::new());
        let mut selection = SelectionSet::restore(store.clone()).await;
        selection.remove(&ProductId::from("never-added")).await.unwrap();
        assert!(selection.is_empty());
        assert_eq!(store.snapshot(SELECTED_PRODUCTS_KEY), Some(json!([])));
    }

    #[tokio::test]
    async fn test_clear_persists_empty_array() {
        let store = Arc::new(MemoryKvStore::new());
        let mut selection = SelectionSet::restore(store.clone()).await;
        selection.toggle(ProductId::from("1")).await.unwrap();
        selection.toggle(ProductId::from("2")).await.unwrap();
        selection.clear().await.unwrap();
        assert!(selection.is_empty());
        assert_eq!(store.snapshot(SELECTED_PRODUCTS_KEY), Some(json!([])));
    }

    #[tokio::test]
    async fn test_persist_and_restore_roundtrip() {
        let store = Arc::new(MemoryKvStore::new());
        let mut selection = SelectionSet::restore(store.clone()).await;
        for id in ["3", "1", "2"] {
            selection.toggle(ProductId::from(id)).await.unwrap();
        }

        let restored = SelectionSet::restore(store).await;
        let original: Vec<&ProductId> = selection.ids().collect();
        let reloaded: Vec<&ProductId> = restored.ids().collect();
        assert_eq!(original, reloaded);
    }
}
