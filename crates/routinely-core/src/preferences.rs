//! Persisted interface preferences (text direction).

use std::sync::Arc;

use routinely_types::error::StorageError;
use routinely_types::preferences::TextDirection;

use crate::storage::kv_store::KvStore;
use crate::storage::{DIRECTION_KEY, persist, restore_or_default};

pub struct Preferences<S: KvStore> {
    direction: TextDirection,
    store: Arc<S>,
}

impl<S: KvStore> Preferences<S> {
    pub async fn restore(store: Arc<S>) -> Self {
        let direction = restore_or_default(store.as_ref(), DIRECTION_KEY).await;
        Self { direction, store }
    }

    pub fn direction(&self) -> TextDirection {
        self.direction
    }

    pub async fn set_direction(&mut self, direction: TextDirection) -> Result<(), StorageError> {
        self.direction = direction;
        persist(self.store.as_ref(), DIRECTION_KEY, &direction).await
    }

    /// Flip between `ltr` and `rtl`. Returns the new direction.
    pub async fn toggle_direction(&mut self) -> Result<TextDirection, StorageError> {
        let next = self.direction.toggled();
        self.set_direction(next).await?;
        Ok(next)
    }
}
