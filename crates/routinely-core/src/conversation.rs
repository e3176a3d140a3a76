//! The persisted conversation log.
//!
//! An insertion-ordered list of user and assistant messages. The whole log
//! is written back after every append and replayed into the view on start.

use std::sync::Arc;

use routinely_types::chat::ChatMessage;
use routinely_types::error::StorageError;

use crate::storage::kv_store::KvStore;
use crate::storage::{CHAT_HISTORY_KEY, persist, restore_entries};

pub struct ConversationLog<S: KvStore> {
    messages: Vec<ChatMessage>,
    store: Arc<S>,
}

impl<S: KvStore> ConversationLog<S> {
    pub async fn restore(store: Arc<S>) -> Self {
        let messages = restore_entries(store.as_ref(), CHAT_HISTORY_KEY).await;
        Self { messages, store }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Append a message and persist the full log.
    pub async fn append(&mut self, message: ChatMessage) -> Result<(), StorageError> {
        self.messages.push(message);
        persist(self.store.as_ref(), CHAT_HISTORY_KEY, &self.messages).await
    }
}
