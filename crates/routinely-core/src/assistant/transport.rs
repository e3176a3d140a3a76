//! AssistantTransport trait definition.
//!
//! The single request/response exchange with the remote endpoint. The
//! reqwest implementation lives in routinely-infra.

use routinely_types::chat::AssistantRequest;
use routinely_types::error::AssistantError;

/// Trait for delivering a conversation to the remote assistant.
///
/// Returns the raw JSON body; shape probing happens in
/// [`super::client::AssistantClient`], not in the transport.
pub trait AssistantTransport: Send + Sync {
    /// Endpoint the transport posts to, for logs.
    fn endpoint(&self) -> &str;

    /// POST `request` once and return the parsed response body.
    fn send(
        &self,
        request: &AssistantRequest,
    ) -> impl std::future::Future<Output = Result<serde_json::Value, AssistantError>> + Send;
}
