//! Business logic and port traits for Routinely.
//!
//! This crate defines the "ports" (storage, catalog source and assistant
//! transport traits) that the infrastructure layer implements. It depends
//! only on `routinely-types`, never on `routinely-infra` or any IO crate.

pub mod assistant;
pub mod catalog;
pub mod conversation;
pub mod preferences;
pub mod routine;
pub mod selection;
pub mod storage;
