use crate::aggregate::MessageTrail;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::path::Path;

use super::schema::GeminiSession;

/// What a single Gemini chat document says about its session
#[derive(Debug)]
pub struct GeminiSessionScan {
    pub session_id: Option<String>,
    pub last_updated: DateTime<Utc>,
    /// First usable user message, else the last one
    pub summary: Option<String>,
}

/// Read a whole Gemini session document.
///
/// Fails when the document does not parse or `lastUpdated` is missing or not
/// a valid instant.
pub fn read_gemini_session(path: &Path) -> Result<GeminiSessionScan> {
    let text = std::fs::read_to_string(path)?;
    let session: GeminiSession = serde_json::from_str(&text)?;

    let last_updated = session
        .last_updated
        .as_deref()
        .ok_or_else(|| Error::Parse("missing lastUpdated".to_string()))?;
    let last_updated = DateTime::parse_from_rfc3339(last_updated)
        .map_err(|err| Error::Parse(format!("invalid lastUpdated {:?}: {}", last_updated, err)))?
        .with_timezone(&Utc);

    let mut trail = MessageTrail::default();
    for text in session.user_texts() {
        trail.push(text);
    }

    Ok(GeminiSessionScan {
        session_id: session.session_id,
        last_updated,
        summary: trail.summary(),
    })
}
