//! Concurrent fan-out over every session source.
//!
//! Each provider runs on the blocking pool and is awaited jointly with the
//! others. A source that errors, panics or overruns its time budget
//! contributes nothing; the rest are merged as usual.

use agresume_providers::{FetchOptions, SessionProvider};
use agresume_types::ToolEvent;
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pub limit: Option<usize>,
    pub include_all: bool,
    /// Budget for each source, measured independently
    pub timeout: Option<Duration>,
}

impl ScanOptions {
    fn fetch_options(&self) -> FetchOptions {
        FetchOptions::new(self.limit, self.include_all)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanResult {
    /// Newest first
    pub events: Vec<ToolEvent>,
    pub latest: Option<ToolEvent>,
}

impl ScanResult {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Run every provider, merge, sort newest-first and cap at the limit.
///
/// Never fails: per-source failures are logged and dropped.
pub async fn scan_providers(
    providers: &[Arc<dyn SessionProvider>],
    options: &ScanOptions,
) -> ScanResult {
    let fetch_options = options.fetch_options();
    let batches = join_all(
        providers
            .iter()
            .map(|provider| fetch_source(Arc::clone(provider), fetch_options, options.timeout)),
    )
    .await;

    let mut events: Vec<ToolEvent> = batches.into_iter().flatten().collect();
    // Stable: equal timestamps keep provider order
    events.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    if let Some(limit) = options.limit {
        events.truncate(limit);
    }

    debug!(count = events.len(), "scan finished");
    let latest = events.first().cloned();
    ScanResult { events, latest }
}

async fn fetch_source(
    provider: Arc<dyn SessionProvider>,
    options: FetchOptions,
    timeout: Option<Duration>,
) -> Vec<ToolEvent> {
    let id = provider.id();
    let task = tokio::task::spawn_blocking(move || provider.fetch_events(&options));

    let joined = match timeout {
        Some(budget) => match tokio::time::timeout(budget, task).await {
            Ok(joined) => joined,
            Err(_) => {
                warn!(provider = id, timeout_ms = budget.as_millis() as u64, "source timed out");
                return Vec::new();
            }
        },
        None => task.await,
    };

    match joined {
        Ok(Ok(events)) => {
            debug!(provider = id, count = events.len(), "source finished");
            events
        }
        Ok(Err(err)) => {
            warn!(provider = id, error = %err, "source failed");
            Vec::new()
        }
        Err(err) => {
            warn!(provider = id, error = %err, "source task aborted");
            Vec::new()
        }
    }
}
