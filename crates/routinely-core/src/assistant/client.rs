//! Remote assistant client.
//!
//! Wraps an [`AssistantTransport`] with the system instruction and the reply
//! decoding. `ask` never fails: any transport or decoding error is logged
//! and replaced by [`APOLOGY_REPLY`], which the caller records like any
//! other assistant turn.

use routinely_types::assistant::AssistantReply;
use routinely_types::chat::{AssistantRequest, ChatMessage};

use super::prompt::APOLOGY_REPLY;
use super::transport::AssistantTransport;

pub struct AssistantClient<T: AssistantTransport> {
    transport: T,
    system_prompt: String,
}

impl<T: AssistantTransport> AssistantClient<T> {
    pub fn new(transport: T, system_prompt: impl Into<String>) -> Self {
        Self {
            transport,
            system_prompt: system_prompt.into(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The outbound message sequence: system, prior history, new user message.
    pub fn build_messages(&self, prior: &[ChatMessage], new_user: &str) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(prior.len() + 2);
        messages.push(ChatMessage::system(self.system_prompt.clone()));
        messages.extend(prior.iter().cloned());
        messages.push(ChatMessage::user(new_user));
        messages
    }

    /// Send one conversation turn and return the assistant's reply text.
    pub async fn ask(&self, prior: &[ChatMessage], new_user: &str) -> String {
        let request = AssistantRequest {
            messages: self.build_messages(prior, new_user),
        };

        tracing::debug!(
            endpoint = self.transport.endpoint(),
            messages = request.messages.len(),
            "Sending conversation to assistant"
        );

        let decoded = match self.transport.send(&request).await {
            Ok(body) => AssistantReply::decode(&body),
            Err(e) => Err(e),
        };

        match decoded {
            Ok(reply) => {
                tracing::debug!(shape = reply.shape(), "Assistant replied");
                reply.into_text()
            }
            Err(e) => {
                tracing::error!(endpoint = self.transport.endpoint(), error = %e, "Assistant request failed");
                APOLOGY_REPLY.to_string()
            }
        }
    }
}
