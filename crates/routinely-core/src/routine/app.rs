//! Application state and the two conversation flows.
//!
//! `RoutineApp` owns the catalog, the selection, the conversation log, the
//! preferences and the assistant client. Front ends hold one instance and
//! drive it from their event loop.
//!
//! # Flows
//!
//! Both flows move `Idle -> Awaiting -> Idle`. They take `&mut self`, so a
//! second request cannot start while one is outstanding.
//!
//! - [`RoutineApp::generate_routine`]: selected products become a routine
//!   instruction. The log and view get a short placeholder; the assistant
//!   gets the full instruction.
//! - [`RoutineApp::follow_up`]: free text from the chat prompt. The text is
//!   logged before the request, so the assistant sees it at the end of the
//!   history and again as the new user turn.

use std::sync::Arc;

use routinely_types::chat::ChatMessage;
use routinely_types::error::{CatalogError, StorageError};
use routinely_types::preferences::TextDirection;
use routinely_types::product::{ProductId, ProductSummary};

use crate::assistant::client::AssistantClient;
use crate::assistant::prompt::{NOTHING_SELECTED_NOTICE, ROUTINE_PLACEHOLDER, routine_instruction};
use crate::assistant::transport::AssistantTransport;
use crate::catalog::store::{CatalogSource, CatalogStore};
use crate::catalog::view::{self, CatalogFilter, CatalogView};
use crate::conversation::ConversationLog;
use crate::preferences::Preferences;
use crate::selection::SelectionSet;
use crate::storage::kv_store::KvStore;

use super::view::{ChatView, LoadingGuard, LoadingIndicator};

/// Which part of the log goes out ahead of the new user turn.
#[derive(Debug, Clone, Copy)]
enum History {
    /// Everything logged before the shown message (routine placeholder).
    BeforeShown,
    /// The whole log, including the message just shown.
    AfterShown,
}

/// Whether a remote request is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Awaiting,
}

/// Result of a routine generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutineOutcome {
    /// Nothing was selected; the guidance notice was shown and nothing sent.
    NothingSelected,
    /// The assistant's reply (or the apology on failure).
    Replied(String),
}

pub struct RoutineApp<S: KvStore, T: AssistantTransport> {
    catalog: CatalogStore,
    selection: SelectionSet<S>,
    conversation: ConversationLog<S>,
    preferences: Preferences<S>,
    assistant: AssistantClient<T>,
    phase: Phase,
}

impl<S: KvStore, T: AssistantTransport> RoutineApp<S, T> {
    /// Restore persisted state from `store`. The catalog starts empty.
    pub async fn restore(store: Arc<S>, assistant: AssistantClient<T>) -> Self {
        let selection = SelectionSet::restore(store.clone()).await;
        let conversation = ConversationLog::restore(store.clone()).await;
        let preferences = Preferences::restore(store).await;

        tracing::debug!(
            selected = selection.len(),
            messages = conversation.len(),
            "Restored session state"
        );

        Self {
            catalog: CatalogStore::new(),
            selection,
            conversation,
            preferences,
            assistant,
            phase: Phase::Idle,
        }
    }

    pub async fn load_catalog<C: CatalogSource>(&mut self, source: &C) -> Result<usize, CatalogError> {
        self.catalog.load(source).await
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionSet<S> {
        &self.selection
    }

    pub fn conversation(&self) -> &ConversationLog<S> {
        &self.conversation
    }

    pub fn assistant(&self) -> &AssistantClient<T> {
        &self.assistant
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    // -- Catalog view --------------------------------------------------------

    /// The product grid for `filter`, with selected cards marked.
    pub fn render(&self, filter: &CatalogFilter) -> CatalogView<'_> {
        view::render(self.catalog.products(), filter, |id| self.selection.contains(id))
    }

    /// The selected-items list.
    pub fn render_selected(&self) -> CatalogView<'_> {
        view::render_selected(self.catalog.products(), |id| self.selection.contains(id))
    }

    // -- Selection -----------------------------------------------------------

    pub async fn toggle(&mut self, id: ProductId) -> Result<bool, StorageError> {
        self.selection.toggle(id).await
    }

    pub async fn remove(&mut self, id: &ProductId) -> Result<(), StorageError> {
        self.selection.remove(id).await
    }

    pub async fn clear_selection(&mut self) -> Result<(), StorageError> {
        self.selection.clear().await
    }

    // -- Preferences ---------------------------------------------------------

    pub fn direction(&self) -> TextDirection {
        self.preferences.direction()
    }

    pub async fn set_direction(&mut self, direction: TextDirection) -> Result<(), StorageError> {
        self.preferences.set_direction(direction).await
    }

    pub async fn toggle_direction(&mut self) -> Result<TextDirection, StorageError> {
        self.preferences.toggle_direction().await
    }

    // -- Conversation --------------------------------------------------------

    /// Show the whole persisted log. Returns the number of messages shown.
    pub fn replay(&self, view: &mut impl ChatView) -> usize {
        for message in self.conversation.messages() {
            view.show_message(message);
        }
        self.conversation.len()
    }

    /// Ask for a routine built from the selected products.
    pub async fn generate_routine<V, L>(
        &mut self,
        view: &mut V,
        loading: &L,
    ) -> Result<RoutineOutcome, StorageError>
    where
        V: ChatView,
        L: LoadingIndicator + ?Sized,
    {
        let products: Vec<ProductSummary> = self
            .catalog
            .products()
            .iter()
            .filter(|p| self.selection.contains(&p.id))
            .map(|p| p.summary())
            .collect();

        if products.is_empty() {
            tracing::info!("Routine requested with no products selected");
            view.show_message(&ChatMessage::assistant(NOTHING_SELECTED_NOTICE));
            return Ok(RoutineOutcome::NothingSelected);
        }

        tracing::info!(products = products.len(), "Generating routine");
        let instruction = routine_instruction(&products);
        let placeholder = ChatMessage::user(ROUTINE_PLACEHOLDER);

        let reply = self
            .exchange(placeholder, &instruction, History::BeforeShown, view, loading)
            .await?;
        Ok(RoutineOutcome::Replied(reply))
    }

    /// Send a chat follow-up. Blank input is ignored and returns `None`.
    pub async fn follow_up<V, L>(
        &mut self,
        text: &str,
        view: &mut V,
        loading: &L,
    ) -> Result<Option<String>, StorageError>
    where
        V: ChatView,
        L: LoadingIndicator + ?Sized,
    {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let reply = self
            .exchange(ChatMessage::user(text), text, History::AfterShown, view, loading)
            .await?;
        Ok(Some(reply))
    }

    /// One round trip: log `shown`, send `outbound` after the history cut
    /// given by `history`, then log the reply.
    async fn exchange<V, L>(
        &mut self,
        shown: ChatMessage,
        outbound: &str,
        history: History,
        view: &mut V,
        loading: &L,
    ) -> Result<String, StorageError>
    where
        V: ChatView,
        L: LoadingIndicator + ?Sized,
    {
        let before = self.conversation.len();

        view.show_message(&shown);
        self.conversation.append(shown).await?;

        let prior = match history {
            History::BeforeShown => self.conversation.messages()[..before].to_vec(),
            History::AfterShown => self.conversation.messages().to_vec(),
        };

        self.phase = Phase::Awaiting;
        let reply = {
            let _loading = LoadingGuard::new(loading);
            self.assistant.ask(&prior, outbound).await
        };
        self.phase = Phase::Idle;

        let message = ChatMessage::assistant(reply.clone());
        view.show_message(&message);
        self.conversation.append(message).await?;

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::mock::MockTransport;
    use crate::assistant::prompt::APOLOGY_REPLY;
    use crate::catalog::view::Placeholder;
    use crate::routine::view::NoIndicator;
    use crate::storage::memory::MemoryKvStore;
    use crate::storage::{CHAT_HISTORY_KEY, SELECTED_PRODUCTS_KEY};
    use routinely_types::chat::MessageRole;
    use routinely_types::error::AssistantError;
    use routinely_types::product::Product;
    use serde_json::json;
    use std::cell::Cell;

    struct StaticSource(Vec<Product>);

    impl CatalogSource for StaticSource {
        fn location(&self) -> &str {
            "static"
        }

        async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct Tracking {
        visible: Cell<bool>,
        shows: Cell<u32>,
    }

    impl LoadingIndicator for Tracking {
        fn show(&self) {
            self.visible.set(true);
            self.shows.set(self.shows.get() + 1);
        }

        fn hide(&self) {
            self.visible.set(false);
        }
    }

    fn cleanser_catalog() -> Vec<Product> {
        serde_json::from_value(json!([
            {"id": 1, "name": "Cleanser", "brand": "A", "category": "cleanser", "description": "gentle"},
            {"id": 2, "name": "Toner", "brand": "B", "category": "toner", "description": "balancing"}
        ]))
        .unwrap()
    }

    async fn app_with(
        store: Arc<MemoryKvStore>,
        transport: MockTransport,
    ) -> RoutineApp<MemoryKvStore, MockTransport> {
        let assistant = AssistantClient::new(transport, "sys");
        let mut app = RoutineApp::restore(store, assistant).await;
        app.load_catalog(&StaticSource(cleanser_catalog())).await.unwrap();
        app
    }

    #[tokio::test]
    async fn test_generate_with_empty_selection_sends_nothing() {
        let store = Arc::new(MemoryKvStore::new());
        let mut app = app_with(store.clone(), MockTransport::replying(json!({"reply": "x"}))).await;
        let mut view: Vec<ChatMessage> = Vec::new();
        let loading = Tracking::default();

        let outcome = app.generate_routine(&mut view, &loading).await.unwrap();

        assert_eq!(outcome, RoutineOutcome::NothingSelected);
        assert_eq!(view, vec![ChatMessage::assistant(NOTHING_SELECTED_NOTICE)]);
        assert_eq!(app.assistant().transport().call_count(), 0);
        assert_eq!(loading.shows.get(), 0);
        assert!(app.conversation().is_empty());
        assert!(store.snapshot(CHAT_HISTORY_KEY).is_none());
    }

    #[tokio::test]
    async fn test_generate_ignores_stale_selection() {
        let store = Arc::new(MemoryKvStore::with_entries([(
            SELECTED_PRODUCTS_KEY,
            json!(["from-old-catalog"]),
        )]));
        let mut app = app_with(store, MockTransport::replying(json!({"reply": "x"}))).await;
        let mut view: Vec<ChatMessage> = Vec::new();

        let outcome = app.generate_routine(&mut view, &NoIndicator).await.unwrap();
        assert_eq!(outcome, RoutineOutcome::NothingSelected);
        assert_eq!(app.assistant().transport().call_count(), 0);
    }

    #[tokio::test]
    async fn test_generate_routine_end_to_end() {
        let store = Arc::new(MemoryKvStore::new());
        let transport = MockTransport::replying(json!({"choices": [{"message": {"content": "Use daily."}}]}));
        let mut app = app_with(store.clone(), transport).await;
        app.toggle(ProductId::from("1")).await.unwrap();

        let mut view: Vec<ChatMessage> = Vec::new();
        let loading = Tracking::default();
        let outcome = app.generate_routine(&mut view, &loading).await.unwrap();

        assert_eq!(outcome, RoutineOutcome::Replied("Use daily.".to_string()));

        let user_messages: Vec<&ChatMessage> = app
            .conversation()
            .messages()
            .iter()
            .filter(|m| m.role == MessageRole::User)
            .collect();
        assert_eq!(user_messages.len(), 1);
        assert!(user_messages[0].content.contains("Generate"));

        let sent = app.assistant().transport().last_request().unwrap();
        let last = sent.messages.last().unwrap();
        assert_eq!(last.role, MessageRole::User);
        assert!(last.content.contains("\"Cleanser\""));
        assert!(last.content.contains("\"A\""));
        assert!(!last.content.contains("Toner"));

        assert_eq!(
            app.conversation().last(),
            Some(&ChatMessage::assistant("Use daily."))
        );
        assert_eq!(view.last(), Some(&ChatMessage::assistant("Use daily.")));
        assert_eq!(loading.shows.get(), 1);
        assert!(!loading.visible.get());
        assert_eq!(app.phase(), Phase::Idle);

        let persisted = store.snapshot(CHAT_HISTORY_KEY).unwrap();
        assert_eq!(persisted.as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_generate_sends_prior_history_without_placeholder() {
        let store = Arc::new(MemoryKvStore::with_entries([(
            CHAT_HISTORY_KEY,
            json!([{"role": "user", "content": "hello"}, {"role": "assistant", "content": "hi!"}]),
        )]));
        let mut app = app_with(store, MockTransport::replying(json!({"reply": "Steps"}))).await;
        app.toggle(ProductId::from("2")).await.unwrap();

        let mut view: Vec<ChatMessage> = Vec::new();
        app.generate_routine(&mut view, &NoIndicator).await.unwrap();

        let sent = app.assistant().transport().last_request().unwrap();
        let contents: Vec<&str> = sent.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents.len(), 4);
        assert_eq!(contents[0], "sys");
        assert_eq!(contents[1], "hello");
        assert_eq!(contents[2], "hi!");
        assert!(contents[3].contains("Toner"));
        assert_eq!(app.conversation().len(), 4);
    }

    #[tokio::test]
    async fn test_generate_failure_records_apology_and_hides_indicator() {
        let store = Arc::new(MemoryKvStore::new());
        let transport = MockTransport::failing(AssistantError::Status { status: 500 });
        let mut app = app_with(store, transport).await;
        app.toggle(ProductId::from("1")).await.unwrap();

        let mut view: Vec<ChatMessage> = Vec::new();
        let loading = Tracking::default();
        let outcome = app.generate_routine(&mut view, &loading).await.unwrap();

        assert_eq!(outcome, RoutineOutcome::Replied(APOLOGY_REPLY.to_string()));
        assert_eq!(app.conversation().last(), Some(&ChatMessage::assistant(APOLOGY_REPLY)));
        assert!(!loading.visible.get());
        assert_eq!(app.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_follow_up_blank_is_noop() {
        let store = Arc::new(MemoryKvStore::new());
        let mut app = app_with(store, MockTransport::replying(json!({"reply": "x"}))).await;
        let mut view: Vec<ChatMessage> = Vec::new();

        let reply = app.follow_up("   ", &mut view, &NoIndicator).await.unwrap();

        assert!(reply.is_none());
        assert!(view.is_empty());
        assert!(app.conversation().is_empty());
        assert_eq!(app.assistant().transport().call_count(), 0);
    }

    #[tokio::test]
    async fn test_follow_up_sends_logged_history_then_question() {
        let store = Arc::new(MemoryKvStore::new());
        let transport = MockTransport::replying(json!({"content": "second"}))
            .then_reply(json!({"reply": "first"}));
        let mut app = app_with(store.clone(), transport).await;
        let mut view: Vec<ChatMessage> = Vec::new();

        let first = app.follow_up(" Is it safe? ", &mut view, &NoIndicator).await.unwrap();
        let second = app.follow_up("And at night?", &mut view, &NoIndicator).await.unwrap();

        assert_eq!(first.as_deref(), Some("first"));
        assert_eq!(second.as_deref(), Some("second"));
        assert_eq!(
            app.conversation().messages(),
            &[
                ChatMessage::user("Is it safe?"),
                ChatMessage::assistant("first"),
                ChatMessage::user("And at night?"),
                ChatMessage::assistant("second"),
            ]
        );

        // The logged question ends the history and is sent again as the new turn.
        let sent = app.assistant().transport().last_request().unwrap();
        let contents: Vec<&str> = sent.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(
            contents,
            vec!["sys", "Is it safe?", "first", "And at night?", "And at night?"]
        );

        let restored = ConversationLog::restore(store).await;
        assert_eq!(restored.messages(), app.conversation().messages());
    }

    #[tokio::test]
    async fn test_render_marks_selection() {
        let store = Arc::new(MemoryKvStore::new());
        let mut app = app_with(store, MockTransport::replying(json!({}))).await;
        app.toggle(ProductId::from("2")).await.unwrap();

        let view = app.render(&CatalogFilter::default());
        let selected: Vec<bool> = view.cards().iter().map(|c| c.selected).collect();
        assert_eq!(selected, vec![false, true]);

        app.clear_selection().await.unwrap();
        assert_eq!(
            app.render_selected(),
            CatalogView::Placeholder(Placeholder::NothingSelected)
        );
    }

    #[tokio::test]
    async fn test_replay_shows_history_in_order() {
        let store = Arc::new(MemoryKvStore::with_entries([(
            CHAT_HISTORY_KEY,
            json!([{"role": "user", "content": "a"}, {"role": "assistant", "content": "b"}]),
        )]));
        let app = app_with(store, MockTransport::replying(json!({}))).await;
        let mut view: Vec<ChatMessage> = Vec::new();
        assert_eq!(app.replay(&mut view), 2);
        assert_eq!(view, vec![ChatMessage::user("a"), ChatMessage::assistant("b")]);
    }
}
