//! Remote assistant: transport port, client wrapper, and conversation texts.

pub mod client;
pub mod prompt;
pub mod transport;

#[cfg(test)]
pub(crate) mod mock;
