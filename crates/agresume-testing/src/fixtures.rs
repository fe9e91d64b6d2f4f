//! Fixtures for sample data generation and placement.
//!
//! Provides utilities to:
//! - Copy sample logs into a test HOME, rewritten for a chosen project
//! - Build single log records for each of the three formats

use crate::providers::TestProvider;
use anyhow::Result;
use serde_json::json;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Working directory recorded in every sample file.
pub const SAMPLE_CWD: &str = "/Users/test_user/agent-sample";

/// Sample file manager for test data.
pub struct SampleFiles {
    samples_dir: PathBuf,
}

/// Where a sample landed and the session id it was given.
#[derive(Debug, Clone)]
pub struct PlacedSample {
    pub path: PathBuf,
    pub session_id: String,
}

impl Default for SampleFiles {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleFiles {
    /// Create a new sample file manager.
    ///
    /// Assumes samples are in `crates/agresume-providers/tests/samples/`.
    pub fn new() -> Self {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let samples_dir = manifest_dir
            .parent()
            .unwrap()
            .join("agresume-providers/tests/samples");

        Self { samples_dir }
    }

    pub fn read(&self, sample_name: &str) -> Result<String> {
        Ok(fs::read_to_string(self.samples_dir.join(sample_name))?)
    }

    /// Place the provider's sample under `home` as if it was recorded in
    /// `project_dir`.
    ///
    /// The embedded cwd is replaced with the canonicalized project dir and the
    /// session id with one derived from project dir + `dest_name`, so several
    /// placements never collide. Claude samples are appended to the shared
    /// history file; `dest_name` only feeds the session id there.
    pub fn place(
        &self,
        provider: TestProvider,
        dest_name: &str,
        project_dir: &Path,
        home: &Path,
    ) -> Result<PlacedSample> {
        let canonical_project_dir = project_dir
            .canonicalize()
            .unwrap_or_else(|_| project_dir.to_path_buf());
        let canonical_str = canonical_project_dir.to_string_lossy();

        let session_id = generate_session_id(&canonical_str, dest_name);
        let content = self
            .read(provider.sample_filename())?
            .replace(
                &serde_json::to_string(SAMPLE_CWD)?,
                &serde_json::to_string(&canonical_str)?,
            )
            .replace(provider.sample_session_id(), &session_id);

        let log_root = provider.log_root_in(home);
        let path = match provider {
            TestProvider::Codex => {
                let dest = log_root.join(dest_name);
                write_creating_dirs(&dest, &content)?;
                dest
            }
            TestProvider::Claude => {
                append_creating_dirs(&log_root, &content)?;
                log_root
            }
            TestProvider::Gemini => {
                let hash = agresume_core::project_hash_from_root(&canonical_project_dir);
                let dest = log_root.join(hash).join("chats").join(dest_name);
                write_creating_dirs(&dest, &content)?;
                dest
            }
        };

        Ok(PlacedSample { path, session_id })
    }
}

pub(crate) fn write_creating_dirs(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

pub(crate) fn append_creating_dirs(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(content.as_bytes())?;
    if !content.ends_with('\n') {
        file.write_all(b"\n")?;
    }
    Ok(())
}

/// A minimal Codex rollout: one `session_meta`, then one user message per
/// entry of `messages`, all stamped `timestamp`.
pub fn codex_session(session_id: &str, cwd: &Path, timestamp: &str, messages: &[&str]) -> String {
    let mut lines = vec![
        json!({
            "timestamp": timestamp,
            "type": "session_meta",
            "payload": {"id": session_id, "cwd": cwd.to_string_lossy()},
        })
        .to_string(),
    ];
    for message in messages {
        lines.push(
            json!({
                "timestamp": timestamp,
                "type": "event_msg",
                "payload": {"type": "user_message", "message": message},
            })
            .to_string(),
        );
    }
    lines.join("\n") + "\n"
}

/// One line of Claude's `history.jsonl`; `None` fields are left out.
pub fn claude_record(
    session_id: Option<&str>,
    project: Option<&Path>,
    timestamp_ms: Option<i64>,
    display: &str,
) -> String {
    let mut record = json!({"display": display, "pastedContents": {}});
    if let Some(session_id) = session_id {
        record["sessionId"] = json!(session_id);
    }
    if let Some(project) = project {
        record["project"] = json!(project.to_string_lossy());
    }
    if let Some(timestamp) = timestamp_ms {
        record["timestamp"] = json!(timestamp);
    }
    record.to_string()
}

/// A Gemini chat document from `(role, content)` pairs.
pub fn gemini_session(
    session_id: Option<&str>,
    last_updated: &str,
    messages: &[(&str, &str)],
) -> String {
    let messages: Vec<_> = messages
        .iter()
        .map(|(role, content)| json!({"type": role, "content": content}))
        .collect();
    let mut document = json!({"lastUpdated": last_updated, "messages": messages});
    if let Some(session_id) = session_id {
        document["sessionId"] = json!(session_id);
    }
    serde_json::to_string_pretty(&document).unwrap_or_default()
}

/// Generate a deterministic session ID based on project directory and filename.
fn generate_session_id(project_dir: &str, filename: &str) -> String {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(project_dir.as_bytes());
    hasher.update(filename.as_bytes());
    let hash = hasher.finalize();

    format!(
        "test-session-{:016x}",
        u64::from_be_bytes([
            hash[0], hash[1], hash[2], hash[3], hash[4], hash[5], hash[6], hash[7]
        ])
    )
}
