//! Key-value store trait.
//!
//! Defines the interface for the string-keyed, JSON-valued state that
//! survives between sessions. Implementations live in routinely-infra.

use routinely_types::error::StorageError;

/// Trait for persistent key-value storage.
///
/// Stores arbitrary JSON values keyed by string.
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait KvStore: Send + Sync {
    /// Get a value by key. Returns None if the key does not exist.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<serde_json::Value>, StorageError>> + Send;

    /// Set a value for a key, replacing any previous value.
    fn set(
        &self,
        key: &str,
        value: &serde_json::Value,
    ) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;
}
