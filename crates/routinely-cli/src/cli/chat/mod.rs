//! Interactive chat with the routine assistant.
//!
//! Replays the persisted conversation, then reads follow-up questions and
//! slash commands until exit. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
