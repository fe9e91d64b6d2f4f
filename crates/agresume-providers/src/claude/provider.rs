use crate::Result;
use crate::aggregate::SessionAggregate;
use crate::registry::CLAUDE;
use crate::traits::{FetchOptions, SessionProvider};
use agresume_core::{file_name, is_within_scope, path_exists};
use agresume_types::{ResumeDescriptor, ToolEvent, event_id};
use std::collections::HashMap;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::schema::HistoryRecord;

/// Sessions from Claude Code's single append-only `history.jsonl`.
///
/// Any line may update any earlier session, so the whole file is always
/// aggregated before the limit applies.
pub struct ClaudeProvider {
    history_path: PathBuf,
    cwd: PathBuf,
}

impl ClaudeProvider {
    pub fn new(history_path: PathBuf, cwd: PathBuf) -> Self {
        Self { history_path, cwd }
    }

    fn aggregate_sessions(&self, include_all: bool) -> Result<HashMap<String, SessionAggregate>> {
        let file = std::fs::File::open(&self.history_path)?;
        let reader = BufReader::new(file);
        let mut sessions: HashMap<String, SessionAggregate> = HashMap::new();
        let mut skipped = 0usize;

        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) if err.kind() == ErrorKind::InvalidData => {
                    skipped += 1;
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let Ok(record) = serde_json::from_str::<HistoryRecord>(line) else {
                skipped += 1;
                continue;
            };
            let (Some(session_id), Some(occurred_at), Some(project)) =
                (&record.session_id, record.occurred_at(), &record.project)
            else {
                skipped += 1;
                continue;
            };

            if !include_all && !is_within_scope(&self.cwd, Path::new(project)) {
                continue;
            }

            sessions
                .entry(session_id.clone())
                .or_default()
                .observe(occurred_at, record.display.as_deref());
        }

        if skipped > 0 {
            debug!(provider = CLAUDE.id, count = skipped, "skipped malformed history records");
        }
        Ok(sessions)
    }
}

impl SessionProvider for ClaudeProvider {
    fn id(&self) -> &'static str {
        CLAUDE.id
    }

    fn label(&self) -> &'static str {
        CLAUDE.label
    }

    fn fetch_events(&self, options: &FetchOptions) -> Result<Vec<ToolEvent>> {
        if !path_exists(&self.history_path) {
            return Ok(Vec::new());
        }

        let sessions = self.aggregate_sessions(options.include_all)?;
        let source = file_name(&self.history_path);

        let events: Vec<ToolEvent> = sessions
            .into_iter()
            .filter_map(|(session_id, aggregate)| {
                let occurred_at = aggregate.last_activity()?;
                let summary = aggregate.summary()?;
                Some(ToolEvent {
                    id: event_id(CLAUDE.id, &session_id),
                    label: CLAUDE.label.to_string(),
                    occurred_at,
                    source: source.clone(),
                    confidence: CLAUDE.confidence,
                    summary,
                    resume: Some(ResumeDescriptor::resume(
                        CLAUDE.command,
                        ["--resume", session_id.as_str()],
                    )),
                })
            })
            .collect();

        debug!(provider = CLAUDE.id, count = events.len(), "claude scan finished");
        Ok(options.finish(events))
    }
}
