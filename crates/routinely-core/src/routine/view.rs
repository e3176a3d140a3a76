//! Output seams of the routine flows.
//!
//! The flows push messages into a [`ChatView`] and bracket each remote call
//! with a [`LoadingGuard`]. Terminal implementations live in routinely-cli.

use routinely_types::chat::ChatMessage;

/// Where conversation messages are displayed.
pub trait ChatView {
    fn show_message(&mut self, message: &ChatMessage);
}

/// Collects shown messages in order.
impl ChatView for Vec<ChatMessage> {
    fn show_message(&mut self, message: &ChatMessage) {
        self.push(message.clone());
    }
}

/// Visual "thinking" indicator shown while a request is outstanding.
///
/// `show` must be idempotent: showing twice does not create a second
/// indicator.
pub trait LoadingIndicator {
    fn show(&self);
    fn hide(&self);
}

/// Shows an indicator on creation and hides it when dropped.
///
/// Dropping happens on every exit from the scope, including an early
/// return or the enclosing future being dropped mid-request.
pub struct LoadingGuard<'a, L: LoadingIndicator + ?Sized> {
    indicator: &'a L,
}

impl<'a, L: LoadingIndicator + ?Sized> LoadingGuard<'a, L> {
    pub fn new(indicator: &'a L) -> Self {
        indicator.show();
        Self { indicator }
    }
}

impl<L: LoadingIndicator + ?Sized> Drop for LoadingGuard<'_, L> {
    fn drop(&mut self) {
        self.indicator.hide();
    }
}

/// An indicator that draws nothing.
pub struct NoIndicator;

impl LoadingIndicator for NoIndicator {
    fn show(&self) {}
    fn hide(&self) {}
}
