//! Terminal rendering of conversation messages.
//!
//! Assistant replies go through `termimad` so that list markers and bold
//! step labels in a routine display as formatted text. Under `rtl` every
//! line is right-aligned to the terminal width.

use console::{Alignment, style};
use termimad::MadSkin;

use routinely_types::chat::{ChatMessage, MessageRole};
use routinely_types::preferences::TextDirection;

/// Narrowest width used for layout, whatever the terminal reports.
const MIN_WIDTH: usize = 20;

pub struct ChatRenderer {
    skin: MadSkin,
    direction: TextDirection,
    width: usize,
}

impl ChatRenderer {
    /// Create a renderer sized to the current terminal.
    pub fn new(direction: TextDirection) -> Self {
        let (_, columns) = console::Term::stdout().size();
        Self::with_width(direction, columns as usize)
    }

    pub fn with_width(direction: TextDirection, width: usize) -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(termimad::crossterm::style::Color::Cyan);
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);

        Self {
            skin,
            direction,
            width: width.max(MIN_WIDTH),
        }
    }

    pub fn direction(&self) -> TextDirection {
        self.direction
    }

    pub fn set_direction(&mut self, direction: TextDirection) {
        self.direction = direction;
    }

    /// A labeled message block, aligned for the current direction.
    pub fn format_message(&self, message: &ChatMessage) -> String {
        let label = match message.role {
            MessageRole::User => style("You").green().bold().to_string(),
            MessageRole::Assistant => style("Assistant").cyan().bold().to_string(),
            MessageRole::System => style("System").dim().to_string(),
        };

        let body = match message.role {
            MessageRole::Assistant => self.render_markdown(&message.content),
            _ => message.content.clone(),
        };

        let mut lines = vec![label];
        lines.extend(body.lines().map(|line| line.trim_end().to_string()));
        self.align(&lines)
    }

    /// A dim notice line, such as the empty-conversation greeting.
    pub fn format_notice(&self, text: &str) -> String {
        self.align(&[style(text).dim().to_string()])
    }

    fn render_markdown(&self, markdown: &str) -> String {
        let width = self.width.saturating_sub(4).max(MIN_WIDTH);
        self.skin.text(markdown, Some(width)).to_string()
    }

    fn align(&self, lines: &[String]) -> String {
        lines
            .iter()
            .map(|line| {
                if self.direction.is_rtl() {
                    console::pad_str(line, self.width.saturating_sub(2), Alignment::Right, None)
                        .into_owned()
                } else {
                    format!("  {line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
