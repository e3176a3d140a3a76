//! Terminal implementations of the routine flow seams.

use std::cell::RefCell;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use routinely_core::routine::{ChatView, LoadingIndicator};
use routinely_types::chat::{ChatMessage, MessageRole};

use super::chat::renderer::ChatRenderer;

/// Prints each message through the chat renderer.
pub struct TerminalChatView<'a> {
    renderer: &'a ChatRenderer,
    echo_user: bool,
}

impl<'a> TerminalChatView<'a> {
    pub fn new(renderer: &'a ChatRenderer) -> Self {
        Self {
            renderer,
            echo_user: true,
        }
    }

    /// Skip user messages whose text the prompt has already echoed.
    pub fn without_user_echo(renderer: &'a ChatRenderer) -> Self {
        Self {
            renderer,
            echo_user: false,
        }
    }
}

impl ChatView for TerminalChatView<'_> {
    fn show_message(&mut self, message: &ChatMessage) {
        if !self.echo_user && message.role == MessageRole::User {
            return;
        }
        println!("{}", self.renderer.format_message(message));
        println!();
    }
}

/// "thinking..." spinner on stderr.
///
/// `show` creates the spinner only if none is running, so nested or repeated
/// calls never stack two spinners.
pub struct SpinnerIndicator {
    message: String,
    enabled: bool,
    bar: RefCell<Option<ProgressBar>>,
}

impl SpinnerIndicator {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            enabled: true,
            bar: RefCell::new(None),
        }
    }

    /// A spinner that never draws (for `--quiet` and `--json`).
    pub fn disabled() -> Self {
        Self {
            message: String::new(),
            enabled: false,
            bar: RefCell::new(None),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.bar.borrow().is_some()
    }
}

impl LoadingIndicator for SpinnerIndicator {
    fn show(&self) {
        if !self.enabled {
            return;
        }
        let mut bar = self.bar.borrow_mut();
        if bar.is_some() {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(template);
        }
        spinner.set_message(self.message.clone());
        spinner.enable_steady_tick(Duration::from_millis(80));
        *bar = Some(spinner);
    }

    fn hide(&self) {
        if let Some(spinner) = self.bar.borrow_mut().take() {
            spinner.finish_and_clear();
        }
    }
}

impl Drop for SpinnerIndicator {
    fn drop(&mut self) {
        self.hide();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_is_idempotent() {
        let spinner = SpinnerIndicator::new("thinking...");
        spinner.show();
        spinner.show();
        assert!(spinner.is_visible());
        spinner.hide();
        assert!(!spinner.is_visible());
    }

    #[test]
    fn test_disabled_never_shows() {
        let spinner = SpinnerIndicator::disabled();
        spinner.show();
        assert!(!spinner.is_visible());
    }

    #[test]
    fn test_hide_without_show_is_noop() {
        let spinner = SpinnerIndicator::new("x");
        spinner.hide();
        assert!(!spinner.is_visible());
    }
}
