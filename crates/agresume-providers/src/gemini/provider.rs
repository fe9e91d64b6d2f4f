use crate::Result;
use crate::registry::GEMINI;
use crate::traits::{FetchOptions, SessionProvider};
use agresume_core::{file_name, is_dir, list_dir, project_hash_from_root, rank_by_modified};
use agresume_types::{ResumeDescriptor, ToolEvent, event_id};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use super::io::read_gemini_session;

/// Project directories keep chats up to this many levels down
/// (`<hash>/chats/session-*.json`)
const SESSION_SEARCH_DEPTH: usize = 2;

/// Sessions from Gemini CLI chat documents.
///
/// Documents carry no working directory; scoping comes from only reading the
/// directory named after the project hash.
pub struct GeminiProvider {
    tmp_root: PathBuf,
    cwd: PathBuf,
}

impl GeminiProvider {
    pub fn new(tmp_root: PathBuf, cwd: PathBuf) -> Self {
        Self { tmp_root, cwd }
    }

    fn project_dirs(&self, include_all: bool) -> Vec<PathBuf> {
        if include_all {
            return list_dir(&self.tmp_root)
                .into_iter()
                .filter(|path| is_dir(path))
                .collect();
        }

        let project_dir = self.tmp_root.join(project_hash_from_root(&self.cwd));
        if is_dir(&project_dir) {
            vec![project_dir]
        } else {
            Vec::new()
        }
    }

    fn discover_files(&self, include_all: bool) -> Vec<PathBuf> {
        let files = self
            .project_dirs(include_all)
            .iter()
            .flat_map(|dir| {
                WalkDir::new(dir)
                    .max_depth(SESSION_SEARCH_DEPTH)
                    .into_iter()
                    .filter_map(|entry| entry.ok())
            })
            .filter(|entry| entry.file_type().is_file() && is_session_file(entry.path()))
            .map(|entry| entry.into_path())
            .collect();

        rank_by_modified(files)
    }
}

fn is_session_file(path: &Path) -> bool {
    let name = file_name(path);
    name.starts_with("session-") && name.ends_with(".json")
}

impl SessionProvider for GeminiProvider {
    fn id(&self) -> &'static str {
        GEMINI.id
    }

    fn label(&self) -> &'static str {
        GEMINI.label
    }

    fn fetch_events(&self, options: &FetchOptions) -> Result<Vec<ToolEvent>> {
        let mut seen = HashSet::new();
        let mut events = Vec::new();

        for path in self.discover_files(options.include_all) {
            if options.is_satisfied(events.len()) {
                break;
            }

            let scan = match read_gemini_session(&path) {
                Ok(scan) => scan,
                Err(err) => {
                    debug!(provider = GEMINI.id, path = %path.display(), error = %err, "skipping session file");
                    continue;
                }
            };
            let Some(summary) = scan.summary else {
                debug!(provider = GEMINI.id, path = %path.display(), "no usable user message");
                continue;
            };

            let source = file_name(&path);
            let session_key = scan.session_id.unwrap_or_else(|| source.clone());
            let id = event_id(GEMINI.id, &session_key);
            // Files are visited newest first, so the first copy of an id wins
            if !seen.insert(id.clone()) {
                debug!(provider = GEMINI.id, path = %path.display(), "duplicate session");
                continue;
            }
            events.push(ToolEvent {
                id,
                label: GEMINI.label.to_string(),
                occurred_at: scan.last_updated,
                source,
                confidence: GEMINI.confidence,
                summary,
                resume: Some(ResumeDescriptor::launch(GEMINI.command)),
            });
        }

        debug!(provider = GEMINI.id, count = events.len(), "gemini scan finished");
        Ok(options.finish(events))
    }
}
