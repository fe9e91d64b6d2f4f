use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How reliably a source's session boundaries and timestamps were extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::High => write!(f, "high"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::Low => write!(f, "low"),
        }
    }
}

/// Whether a session can be reattached or the tool has to start fresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeMode {
    /// Reattach to the session by identifier
    Resume,
    /// No native resume; relaunch the tool
    Launch,
}

/// Command needed to get back into a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeDescriptor {
    pub command: String,
    pub args: Vec<String>,
    pub mode: ResumeMode,
}

impl ResumeDescriptor {
    pub fn resume<I, S>(command: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            mode: ResumeMode::Resume,
        }
    }

    pub fn launch(command: &str) -> Self {
        Self {
            command: command.to_string(),
            args: Vec::new(),
            mode: ResumeMode::Launch,
        }
    }

    /// Shell-like rendering for display (`codex resume abc`)
    pub fn command_line(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A normalized, source-agnostic session record.
///
/// `summary` is never empty: parsers drop sessions that have no usable text
/// instead of emitting them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolEvent {
    /// `<source_id>-<session_key>`
    pub id: String,
    pub label: String,
    /// Last known activity; the only sort key
    pub occurred_at: DateTime<Utc>,
    /// Provenance (log file name), informational only
    pub source: String,
    pub confidence: Confidence,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<ResumeDescriptor>,
}

/// Build the globally unique event id for a session of a source
pub fn event_id(source_id: &str, session_key: &str) -> String {
    format!("{}-{}", source_id, session_key)
}

impl ToolEvent {
    pub fn can_resume(&self) -> bool {
        self.resume.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_joins_args() {
        let desc = ResumeDescriptor::resume("codex", ["resume", "abc-123"]);
        assert_eq!(desc.command_line(), "codex resume abc-123");
        assert_eq!(desc.mode, ResumeMode::Resume);

        let launch = ResumeDescriptor::launch("gemini");
        assert_eq!(launch.command_line(), "gemini");
        assert!(launch.args.is_empty());
    }

    #[test]
    fn test_event_id_format() {
        assert_eq!(event_id("claude", "s1"), "claude-s1");
    }

    #[test]
    fn test_serialized_shape() {
        let event = ToolEvent {
            id: event_id("gemini", "abc"),
            label: "Gemini".to_string(),
            occurred_at: DateTime::from_timestamp(0, 0).unwrap(),
            source: "session-1.json".to_string(),
            confidence: Confidence::Medium,
            summary: "hello".to_string(),
            resume: Some(ResumeDescriptor::launch("gemini")),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["confidence"], "medium");
        assert_eq!(json["resume"]["mode"], "launch");
        assert_eq!(json["occurred_at"], "1970-01-01T00:00:00Z");
    }
}
