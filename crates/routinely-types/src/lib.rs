//! Shared domain types for Routinely.
//!
//! This crate contains the domain types used across the workspace:
//! products, conversation messages, assistant reply shapes, configuration,
//! preferences, and the error enums.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod assistant;
pub mod chat;
pub mod config;
pub mod error;
pub mod preferences;
pub mod product;
