//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and trigger the routine flow or local controls.
//! Anything else is sent to the assistant as a follow-up.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Generate a routine from the selected products.
    Generate,
    /// List the selected products.
    Selected,
    /// Replay the conversation history.
    History,
    /// Flip the text direction.
    Direction,
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_lowercase();

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/generate" | "/gen" | "/routine" => Some(ChatCommand::Generate),
        "/selected" | "/sel" => Some(ChatCommand::Selected),
        "/history" => Some(ChatCommand::History),
        "/dir" | "/rtl" => Some(ChatCommand::Direction),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {} {}", style("/generate").cyan(), "Generate a routine from selected products");
    println!("  {} {}", style("/selected").cyan(), "Show selected products");
    println!("  {}  {}", style("/history").cyan(), "Replay the conversation");
    println!("  {}      {}", style("/dir").cyan(), "Toggle left-to-right / right-to-left");
    println!("  {}    {}", style("/clear").cyan(), "Clear the screen");
    println!("  {}     {}", style("/help").cyan(), "Show this help message");
    println!("  {}     {}", style("/exit").cyan(), "End the chat session");
    println!();
    println!(
        "  {}",
        style("Anything else is sent to the assistant. Ctrl+D to exit.").dim()
    );
    println!();
}
