//! Welcome banner display for chat sessions.

use console::style;

/// What the banner reports about the current session.
pub struct BannerInfo<'a> {
    pub endpoint: &'a str,
    pub catalog_count: Option<usize>,
    pub selected: usize,
    pub messages: usize,
}

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(info: &BannerInfo<'_>) {
    let catalog = match info.catalog_count {
        Some(count) => format!("{count} products"),
        None => "unavailable".to_string(),
    };

    println!();
    println!("  {}", style("Routinely").cyan().bold());
    println!("  {}", style("Your beauty routine assistant").dim());
    println!();
    println!("  {}   {}", style("Catalog:").bold(), style(catalog).dim());
    println!("  {}  {}", style("Selected:").bold(), style(info.selected).dim());
    println!("  {}   {}", style("History:").bold(), style(info.messages).dim());
    println!("  {}  {}", style("Endpoint:").bold(), style(info.endpoint).dim());
    println!();
    println!(
        "  {}",
        style("Type /generate for a routine, /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
