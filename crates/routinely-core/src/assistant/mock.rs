//! Scripted transport for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use routinely_types::chat::AssistantRequest;
use routinely_types::error::AssistantError;

use super::transport::AssistantTransport;

/// Records every request and answers from a queue of scripted results.
///
/// When the queue runs dry the last scripted answer is repeated.
pub struct MockTransport {
    script: Mutex<VecDeque<Result<serde_json::Value, String>>>,
    fallback: Result<serde_json::Value, String>,
    requests: Mutex<Vec<AssistantRequest>>,
}

impl MockTransport {
    pub fn replying(body: serde_json::Value) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Ok(body),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: AssistantError) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Err(error.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a reply to be returned before the fallback.
    pub fn then_reply(self, body: serde_json::Value) -> Self {
        self.script.lock().unwrap().push_back(Ok(body));
        self
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<AssistantRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl AssistantTransport for MockTransport {
    fn endpoint(&self) -> &str {
        "mock://assistant"
    }

    async fn send(&self, request: &AssistantRequest) -> Result<serde_json::Value, AssistantError> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
            .map_err(AssistantError::Transport)
    }
}
