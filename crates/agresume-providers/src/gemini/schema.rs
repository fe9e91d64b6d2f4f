use serde::Deserialize;
use serde_json::Value;

/// A whole Gemini CLI chat document (`session-*.json`)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiSession {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
    /// Kept loose so one odd message does not reject the document
    #[serde(default)]
    pub messages: Vec<Value>,
}

impl GeminiSession {
    /// String contents of user-authored messages, in document order
    pub fn user_texts(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().filter_map(|value| {
            let role = value.get("type").and_then(Value::as_str)?;
            if role != "user" {
                return None;
            }
            value.get("content").and_then(Value::as_str)
        })
    }
}
