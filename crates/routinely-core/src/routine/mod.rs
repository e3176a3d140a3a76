//! The routine assistant flows and their output seams.

pub mod app;
pub mod view;

pub use app::{Phase, RoutineApp, RoutineOutcome};
pub use view::{ChatView, LoadingGuard, LoadingIndicator, NoIndicator};
