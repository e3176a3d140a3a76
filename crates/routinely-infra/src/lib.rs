//! Infrastructure layer for Routinely.
//!
//! Contains implementations of the port traits defined in `routinely-core`:
//! JSON-file state storage, file and HTTP catalog sources, and the reqwest
//! assistant transport. Also loads `config.toml` and resolves the data
//! directory.

pub mod assistant;
pub mod catalog;
pub mod config;
pub mod filesystem;
pub mod storage;
