use crate::Result;
use agresume_types::ToolEvent;

/// Options every provider honours when fetching events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Maximum number of events to return
    pub limit: Option<usize>,
    /// Skip directory scoping and return sessions from every project
    pub include_all: bool,
}

impl FetchOptions {
    pub fn new(limit: Option<usize>, include_all: bool) -> Self {
        Self { limit, include_all }
    }

    /// Whether `count` collected events already satisfy the limit
    pub fn is_satisfied(&self, count: usize) -> bool {
        self.limit.is_some_and(|limit| count >= limit)
    }

    /// Sort newest-first and cap at the limit
    pub fn finish(&self, mut events: Vec<ToolEvent>) -> Vec<ToolEvent> {
        events.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        if let Some(limit) = self.limit {
            events.truncate(limit);
        }
        events
    }
}

/// A source of recent assistant sessions.
///
/// Responsibilities:
/// - Read the tool's own log store (read-only)
/// - Apply directory scoping unless `include_all` is set
/// - Normalize sessions into `ToolEvent`s, newest first, capped at the limit
///
/// Malformed records and files are skipped inside the provider; an `Err` is
/// reserved for failures that make the whole source unusable.
pub trait SessionProvider: Send + Sync {
    /// Unique provider ID ("codex", "claude", "gemini")
    fn id(&self) -> &'static str;

    /// Human-readable tool name
    fn label(&self) -> &'static str;

    fn fetch_events(&self, options: &FetchOptions) -> Result<Vec<ToolEvent>>;
}
