//! Application configuration types for Routinely.
//!
//! `AppConfig` is the `config.toml` found in the data directory. Every
//! field has a default, so an empty or missing file is a valid config.

use serde::{Deserialize, Serialize};

/// Endpoint used when no `endpoint_url` is configured.
pub const DEFAULT_ENDPOINT_URL: &str = "https://broad-frog-68ee.lthomas15.workers.dev/";

/// System instruction prepended to every outbound conversation.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful beauty routine assistant. \
Answer concisely and in a friendly tone. Only discuss skincare, haircare, makeup, \
fragrance, and related topics.";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// URL of the remote assistant endpoint (single JSON POST).
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,

    /// Catalog location: a file path (relative paths resolve against the
    /// data directory) or an `http(s)://` URL.
    #[serde(default = "default_catalog")]
    pub catalog: String,

    /// System instruction sent ahead of the conversation.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Overall request timeout in seconds. Unset means the HTTP client default.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_endpoint_url() -> String {
    DEFAULT_ENDPOINT_URL.to_string()
}

fn default_catalog() -> String {
    "products.json".to_string()
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint_url(),
            catalog: default_catalog(),
            system_prompt: default_system_prompt(),
            request_timeout_secs: None,
        }
    }
}
