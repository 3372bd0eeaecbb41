use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One unit of transcribed user speech for a single dialog turn.
///
/// The upstream speech pipeline only ever hands over non-empty text, and the
/// constructor enforces the same guarantee for every other caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance(String);

impl Utterance {
    /// Creates an `Utterance` from raw transcribed text.
    ///
    /// Returns `None` if the text is empty after trimming.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Utterance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The reply returned by the remote home agent for one request.
///
/// `text` always carries the reply verbatim so it can be handed straight to
/// speech synthesis. When the agent answers with a JSON object that has a
/// `message` field, that field becomes `text` and the full object is kept in
/// `state` for callers that want the structured form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResponse {
    pub text: String,
    pub state: Option<Value>,
}

impl AgentResponse {
    /// Builds a response from a raw HTTP body.
    pub fn from_body(body: String) -> Self {
        if let Ok(value) = serde_json::from_str::<Value>(&body) {
            if let Some(message) = value.get("message").and_then(Value::as_str) {
                return Self {
                    text: message.to_string(),
                    state: Some(value),
                };
            }
        }
        Self {
            text: body,
            state: None,
        }
    }
}
