//! Reply shapes accepted from the remote assistant endpoint.
//!
//! The endpoint's response format is not fixed. Three shapes are probed in
//! order, and anything else is kept as the raw JSON text:
//!
//! 1. `{"choices": [{"message": {"content": "..."}}]}`
//! 2. `{"reply": "..."}`
//! 3. `{"content": "..."}`

use serde_json::Value;

use crate::error::AssistantError;

/// A decoded assistant response, tagged by the shape it matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantReply {
    ChatCompletion(String),
    Reply(String),
    Content(String),
    /// No known field was present; the compact JSON of the whole body.
    Raw(String),
}

impl AssistantReply {
    /// Decode a response body, probing the known shapes in priority order.
    ///
    /// A field only counts when it holds a non-empty value: an empty string,
    /// `0`, `false` or `null` falls through to the next shape. A `null`
    /// body is an error.
    pub fn decode(body: &Value) -> Result<Self, AssistantError> {
        if body.is_null() {
            return Err(AssistantError::EmptyResponse);
        }

        let completion = body
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(present_text);
        if let Some(text) = completion {
            return Ok(Self::ChatCompletion(text));
        }

        if let Some(text) = body.get("reply").and_then(present_text) {
            return Ok(Self::Reply(text));
        }

        if let Some(text) = body.get("content").and_then(present_text) {
            return Ok(Self::Content(text));
        }

        Ok(Self::Raw(body.to_string()))
    }

    pub fn text(&self) -> &str {
        match self {
            Self::ChatCompletion(t) | Self::Reply(t) | Self::Content(t) | Self::Raw(t) => t,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::ChatCompletion(t) | Self::Reply(t) | Self::Content(t) | Self::Raw(t) => t,
        }
    }

    /// Short label of the matched shape, for logging.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::ChatCompletion(_) => "chat_completion",
            Self::Reply(_) => "reply",
            Self::Content(_) => "content",
            Self::Raw(_) => "raw",
        }
    }
}

/// Text of a field if it holds a non-empty value.
fn present_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => b.then(|| "true".to_string()),
        Value::Number(n) => (n.as_f64() != Some(0.0)).then(|| n.to_string()),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_chat_completion_shape() {
        let body = json!({"choices": [{"message": {"content": "X"}}]});
        let reply = AssistantReply::decode(&body).unwrap();
        assert_eq!(reply, AssistantReply::ChatCompletion("X".to_string()));
    }

    #[test]
    fn test_decode_reply_shape() {
        let reply = AssistantReply::decode(&json!({"reply": "X"})).unwrap();
        assert_eq!(reply.text(), "X");
        assert_eq!(reply.shape(), "reply");
    }

    #[test]
    fn test_decode_content_shape() {
        let reply = AssistantReply::decode(&json!({"content": "X"})).unwrap();
        assert_eq!(reply, AssistantReply::Content("X".to_string()));
    }

    #[test]
    fn test_decode_unknown_shape_is_raw_json() {
        let reply = AssistantReply::decode(&json!({"foo": "bar"})).unwrap();
        assert_eq!(reply.into_text(), r#"{"foo":"bar"}"#);
    }

    #[test]
    fn test_decode_priority_order() {
        let body = json!({
            "content": "third",
            "reply": "second",
            "choices": [{"message": {"content": "first"}}]
        });
        assert_eq!(AssistantReply::decode(&body).unwrap().text(), "first");

        let body = json!({"content": "third", "reply": "second"});
        assert_eq!(AssistantReply::decode(&body).unwrap().text(), "second");
    }

    #[test]
    fn test_decode_empty_completion_falls_through() {
        let body = json!({"choices": [{"message": {"content": ""}}], "reply": "fallback"});
        assert_eq!(
            AssistantReply::decode(&body).unwrap(),
            AssistantReply::Reply("fallback".to_string())
        );
    }

    #[test]
    fn test_decode_empty_choices_falls_through() {
        let body = json!({"choices": [], "content": "c"});
        assert_eq!(AssistantReply::decode(&body).unwrap().text(), "c");
    }

    #[test]
    fn test_decode_null_body_is_error() {
        assert!(matches!(
            AssistantReply::decode(&Value::Null),
            Err(AssistantError::EmptyResponse)
        ));
    }

    #[test]
    fn test_decode_non_object_body_is_raw() {
        let reply = AssistantReply::decode(&json!("hello")).unwrap();
        assert_eq!(reply, AssistantReply::Raw("\"hello\"".to_string()));
    }
}
