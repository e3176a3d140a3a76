//! Conversation commands: routine, ask, history.

use anyhow::Result;
use console::style;

use routinely_core::assistant::prompt::GREETING_PLACEHOLDER;
use routinely_core::routine::{LoadingIndicator, RoutineOutcome};
use routinely_types::chat::ChatMessage;

use crate::state::{AppState, ConcreteApp};

use super::chat::renderer::ChatRenderer;
use super::require_catalog;
use super::view::{SpinnerIndicator, TerminalChatView};

/// Run the routine flow, printing each message as it is recorded.
pub async fn run_generate<L: LoadingIndicator>(
    app: &mut ConcreteApp,
    renderer: &ChatRenderer,
    loading: &L,
) -> Result<RoutineOutcome> {
    let mut view = TerminalChatView::new(renderer);
    Ok(app.generate_routine(&mut view, loading).await?)
}

/// The stored conversation as rendered blocks, or the greeting when it is
/// empty.
pub fn history_blocks(app: &ConcreteApp, renderer: &ChatRenderer) -> Vec<String> {
    if app.conversation().is_empty() {
        return vec![renderer.format_notice(GREETING_PLACEHOLDER)];
    }
    let mut replayed: Vec<ChatMessage> = Vec::new();
    app.replay(&mut replayed);
    replayed
        .iter()
        .map(|message| renderer.format_message(message))
        .collect()
}

/// Print the stored conversation, or the greeting when it is empty.
pub fn print_history(app: &ConcreteApp, renderer: &ChatRenderer) {
    for block in history_blocks(app, renderer) {
        println!("{block}");
        println!();
    }
}

/// `rtn routine`
pub async fn generate_routine(state: &mut AppState, json: bool, quiet: bool) -> Result<()> {
    if !require_catalog(state, json).await {
        return Ok(());
    }

    if json {
        let mut shown: Vec<ChatMessage> = Vec::new();
        let outcome = state
            .app
            .generate_routine(&mut shown, &SpinnerIndicator::disabled())
            .await?;
        let reply = match outcome {
            RoutineOutcome::Replied(reply) => Some(reply),
            RoutineOutcome::NothingSelected => None,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "reply": reply,
                "messages": shown,
            }))?
        );
        return Ok(());
    }

    let renderer = ChatRenderer::new(state.app.direction());
    let spinner = if quiet {
        SpinnerIndicator::disabled()
    } else {
        SpinnerIndicator::new("Generating routine...")
    };
    println!();
    run_generate(&mut state.app, &renderer, &spinner).await?;
    Ok(())
}

/// `rtn ask <text>`
pub async fn ask(state: &mut AppState, text: &str, json: bool, quiet: bool) -> Result<()> {
    if text.trim().is_empty() {
        anyhow::bail!("Nothing to ask: the question is empty");
    }

    if json {
        let mut shown: Vec<ChatMessage> = Vec::new();
        let reply = state
            .app
            .follow_up(text, &mut shown, &SpinnerIndicator::disabled())
            .await?;
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "reply": reply,
                "messages": shown,
            }))?
        );
        return Ok(());
    }

    let renderer = ChatRenderer::new(state.app.direction());
    let spinner = if quiet {
        SpinnerIndicator::disabled()
    } else {
        SpinnerIndicator::new("thinking...")
    };
    let mut view = TerminalChatView::new(&renderer);
    println!();
    state.app.follow_up(text, &mut view, &spinner).await?;
    Ok(())
}

/// `rtn history`
pub fn show_history(state: &AppState, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(state.app.conversation().messages())?
        );
        return Ok(());
    }

    let renderer = ChatRenderer::new(state.app.direction());
    println!();
    print_history(&state.app, &renderer);
    if !state.app.conversation().is_empty() {
        println!(
            "  {} message{}",
            style(state.app.conversation().len()).bold(),
            if state.app.conversation().len() == 1 { "" } else { "s" }
        );
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StateOptions;
    use routinely_core::assistant::prompt::APOLOGY_REPLY;
    use routinely_core::routine::NoIndicator;
    use routinely_types::chat::MessageRole;
    use routinely_types::preferences::TextDirection;
    use tempfile::tempdir;

    async fn state_with_catalog(dir: &std::path::Path) -> AppState {
        std::fs::write(
            dir.join("products.json"),
            r#"{"products":[{"id":1,"name":"Cleanser","brand":"A","category":"cleanser","description":"gentle"}]}"#,
        )
        .unwrap();
        AppState::init(StateOptions {
            data_dir: Some(dir.to_path_buf()),
            endpoint: Some("http://127.0.0.1:9/".to_string()),
            catalog: None,
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_run_generate_without_selection_leaves_log_alone() {
        let dir = tempdir().unwrap();
        let mut state = state_with_catalog(dir.path()).await;
        assert!(state.ensure_catalog().await);

        let renderer = ChatRenderer::with_width(TextDirection::Ltr, 60);
        let outcome = run_generate(&mut state.app, &renderer, &NoIndicator)
            .await
            .unwrap();

        assert_eq!(outcome, RoutineOutcome::NothingSelected);
        assert!(state.app.conversation().is_empty());
    }

    #[tokio::test]
    async fn test_ask_records_apology_when_endpoint_is_down() {
        let dir = tempdir().unwrap();
        let mut state = state_with_catalog(dir.path()).await;

        ask(&mut state, "  Is this ok at night?  ", true, true)
            .await
            .unwrap();

        let messages = state.app.conversation().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], ChatMessage::user("Is this ok at night?"));
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert_eq!(messages[1].content, APOLOGY_REPLY);
    }

    #[tokio::test]
    async fn test_ask_rejects_blank_text() {
        let dir = tempdir().unwrap();
        let mut state = state_with_catalog(dir.path()).await;

        assert!(ask(&mut state, "   ", true, true).await.is_err());
        assert!(state.app.conversation().is_empty());
    }

    #[tokio::test]
    async fn test_history_on_empty_log_is_the_greeting() {
        let dir = tempdir().unwrap();
        let state = state_with_catalog(dir.path()).await;
        let renderer = ChatRenderer::with_width(TextDirection::Ltr, 80);

        let blocks = history_blocks(&state.app, &renderer);
        assert_eq!(blocks.len(), 1);
        assert!(console::strip_ansi_codes(&blocks[0]).contains(GREETING_PLACEHOLDER));
    }

    #[tokio::test]
    async fn test_history_replays_logged_turns() {
        let dir = tempdir().unwrap();
        let mut state = state_with_catalog(dir.path()).await;
        ask(&mut state, "Is this ok at night?", true, true)
            .await
            .unwrap();
        let renderer = ChatRenderer::with_width(TextDirection::Ltr, 80);

        let blocks = history_blocks(&state.app, &renderer);
        assert_eq!(blocks.len(), 2);
        assert!(console::strip_ansi_codes(&blocks[0]).contains("Is this ok at night?"));
        assert!(!blocks.iter().any(|b| b.contains(GREETING_PLACEHOLDER)));
    }
}
