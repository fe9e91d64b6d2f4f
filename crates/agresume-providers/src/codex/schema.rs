use serde::Deserialize;
use serde_json::Value;

/// One line of a Codex rollout log.
///
/// Only the envelope is typed; the payload is interpreted per record type so
/// that unknown record types still contribute their timestamp.
#[derive(Debug, Deserialize)]
pub(crate) struct CodexRecord {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(rename = "type", default)]
    pub record_type: Option<String>,
    #[serde(default)]
    pub payload: Value,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SessionMetaPayload {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub cwd: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventMsgPayload {
    #[serde(rename = "type", default)]
    pub msg_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl CodexRecord {
    pub fn session_meta(&self) -> Option<SessionMetaPayload> {
        if self.record_type.as_deref() != Some("session_meta") {
            return None;
        }
        SessionMetaPayload::deserialize(&self.payload).ok()
    }

    /// Text of a user prompt, if this record is one
    pub fn user_message(&self) -> Option<String> {
        if self.record_type.as_deref() != Some("event_msg") {
            return None;
        }
        let payload = EventMsgPayload::deserialize(&self.payload).ok()?;
        if payload.msg_type.as_deref() != Some("user_message") {
            return None;
        }
        payload.message
    }
}
