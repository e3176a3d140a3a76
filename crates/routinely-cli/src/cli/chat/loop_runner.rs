//! Main chat loop orchestration.
//!
//! Prints the banner, replays the stored conversation, then alternates
//! between reading a line and running either a slash command or a
//! follow-up turn. The next line is only read once the current turn has
//! settled.

use console::style;

use crate::cli::routine::{print_history, run_generate};
use crate::cli::selection::print_selected_list;
use crate::cli::view::{SpinnerIndicator, TerminalChatView};
use crate::state::AppState;

use super::banner::{BannerInfo, print_welcome_banner};
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

/// What the loop does with one input event.
#[derive(Debug, PartialEq, Eq)]
enum LoopStep {
    End,
    Hint,
    Skip,
    Line(String),
}

/// Ctrl+D ends the session; Ctrl+C only prints a hint.
fn next_step(event: InputEvent) -> LoopStep {
    match event {
        InputEvent::Eof => LoopStep::End,
        InputEvent::Interrupted => LoopStep::Hint,
        InputEvent::Message(text) if text.is_empty() => LoopStep::Skip,
        InputEvent::Message(text) => LoopStep::Line(text),
    }
}

/// Run the interactive chat loop.
pub async fn run_chat_loop(state: &mut AppState) -> anyhow::Result<()> {
    let catalog_loaded = state.ensure_catalog().await;

    print_welcome_banner(&BannerInfo {
        endpoint: &state.config.endpoint_url,
        catalog_count: catalog_loaded.then(|| state.app.catalog().len()),
        selected: state.app.selection().len(),
        messages: state.app.conversation().len(),
    });

    let mut renderer = ChatRenderer::new(state.app.direction());
    print_history(&state.app, &renderer);

    let spinner = SpinnerIndicator::new("thinking...");
    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    tracing::info!(
        messages = state.app.conversation().len(),
        "Chat session started"
    );

    loop {
        let text = match next_step(chat_input.read_line().await) {
            LoopStep::End => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            LoopStep::Hint => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            LoopStep::Skip => continue,
            LoopStep::Line(text) => text,
        };

        if let Some(command) = commands::parse(&text) {
            match command {
                ChatCommand::Help => commands::print_help(),
                ChatCommand::Generate => {
                    run_generate(&mut state.app, &renderer, &spinner).await?;
                }
                ChatCommand::Selected => {
                    print_selected_list(&state.app, renderer.direction());
                }
                ChatCommand::History => print_history(&state.app, &renderer),
                ChatCommand::Direction => {
                    let direction = state.app.toggle_direction().await?;
                    renderer.set_direction(direction);
                    println!(
                        "{}",
                        renderer.format_notice(&format!("Text direction: {direction}"))
                    );
                }
                ChatCommand::Clear => chat_input.clear(),
                ChatCommand::Exit => {
                    println!("  {}", style("Session ended.").dim());
                    break;
                }
                ChatCommand::Unknown(name) => {
                    println!(
                        "  {} Unknown command {}. Type {} for the list.",
                        style("?").yellow().bold(),
                        style(name).yellow(),
                        style("/help").cyan()
                    );
                }
            }
            continue;
        }

        let mut view = TerminalChatView::without_user_echo(&renderer);
        state.app.follow_up(&text, &mut view, &spinner).await?;
    }

    chat_input.flush();
    Ok(())
}
