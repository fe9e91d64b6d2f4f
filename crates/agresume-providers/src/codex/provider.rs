use crate::registry::CODEX;
use crate::traits::{FetchOptions, SessionProvider};
use crate::Result;
use agresume_core::{file_name, is_within_scope, path_exists, rank_by_modified};
use agresume_types::{ResumeDescriptor, ToolEvent, event_id};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use super::io::{CodexSessionScan, scan_codex_file};

/// Sessions from a tree of Codex rollout files (one session per file)
pub struct CodexProvider {
    sessions_root: PathBuf,
    cwd: PathBuf,
}

impl CodexProvider {
    pub fn new(sessions_root: PathBuf, cwd: PathBuf) -> Self {
        Self { sessions_root, cwd }
    }

    /// Every `*.jsonl` under the root, newest first
    fn discover_files(&self) -> Result<Vec<PathBuf>> {
        if !path_exists(&self.sessions_root) {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.sessions_root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => return Err(err.into()),
                Err(err) => {
                    debug!(provider = CODEX.id, error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if entry.file_type().is_file() && entry.path().extension().is_some_and(|e| e == "jsonl")
            {
                files.push(entry.into_path());
            }
        }

        Ok(rank_by_modified(files))
    }

    fn to_event(&self, path: &Path, scan: CodexSessionScan, include_all: bool) -> Option<ToolEvent> {
        let session_id = scan.session_id?;
        let cwd = scan.cwd?;
        let occurred_at = DateTime::parse_from_rfc3339(scan.timestamp.as_deref()?)
            .ok()?
            .with_timezone(&Utc);

        if !include_all && !is_within_scope(&self.cwd, Path::new(&cwd)) {
            return None;
        }

        let summary = scan.summary?;
        Some(ToolEvent {
            id: event_id(CODEX.id, &session_id),
            label: CODEX.label.to_string(),
            occurred_at,
            source: file_name(path),
            confidence: CODEX.confidence,
            summary,
            resume: Some(ResumeDescriptor::resume(
                CODEX.command,
                ["resume", session_id.as_str()],
            )),
        })
    }
}

impl SessionProvider for CodexProvider {
    fn id(&self) -> &'static str {
        CODEX.id
    }

    fn label(&self) -> &'static str {
        CODEX.label
    }

    fn fetch_events(&self, options: &FetchOptions) -> Result<Vec<ToolEvent>> {
        let files = self.discover_files()?;
        let mut seen = HashSet::new();
        let mut events = Vec::new();
        let mut opened = 0usize;

        for path in files {
            if options.is_satisfied(events.len()) {
                break;
            }
            opened += 1;

            let scan = match scan_codex_file(&path) {
                Ok(scan) => scan,
                Err(err) => {
                    debug!(provider = CODEX.id, path = %path.display(), error = %err, "skipping unreadable file");
                    continue;
                }
            };

            let Some(event) = self.to_event(&path, scan, options.include_all) else {
                debug!(provider = CODEX.id, path = %path.display(), "no usable session");
                continue;
            };

            // Files are visited newest first, so the first copy of an id wins
            if seen.insert(event.id.clone()) {
                events.push(event);
            }
        }

        debug!(provider = CODEX.id, count = events.len(), opened, "codex scan finished");
        Ok(options.finish(events))
    }
}
