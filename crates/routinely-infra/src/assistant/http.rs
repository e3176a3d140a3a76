//! HttpAssistantTransport: concrete [`AssistantTransport`] over reqwest.
//!
//! One JSON POST per turn with body `{"messages": [...]}`. The endpoint
//! needs no authentication. Any 2xx response body is handed back as JSON
//! for the core client to decode; other statuses become
//! [`AssistantError::Status`].

use std::time::Duration;

use routinely_core::assistant::transport::AssistantTransport;
use routinely_types::chat::AssistantRequest;
use routinely_types::error::AssistantError;

pub struct HttpAssistantTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAssistantTransport {
    /// Create a transport for `endpoint`.
    ///
    /// `timeout` bounds the whole request. `None` keeps the reqwest default
    /// (no overall timeout).
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, AssistantError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AssistantError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl AssistantTransport for HttpAssistantTransport {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, request: &AssistantRequest) -> Result<serde_json::Value, AssistantError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| AssistantError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssistantError::Status {
                status: status.as_u16(),
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| AssistantError::Decode(e.to_string()))
    }
}
