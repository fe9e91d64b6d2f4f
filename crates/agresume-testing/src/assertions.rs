//! Custom assertions over `agresume --list --format json` output.
//!
//! The output shape is `{"events": [...], "latest": {...} | null}`.

use anyhow::{Context, Result};
use serde_json::Value;

fn events(json: &Value) -> Result<&Vec<Value>> {
    json["events"]
        .as_array()
        .context("Expected 'events' array in JSON")
}

/// Assert that JSON output contains expected number of events.
pub fn assert_event_count(json: &Value, expected: usize) -> Result<()> {
    let events = events(json)?;
    if events.len() != expected {
        anyhow::bail!("Expected {} events, got {}", expected, events.len());
    }
    Ok(())
}

/// Event ids in output order.
pub fn event_ids(json: &Value) -> Result<Vec<String>> {
    events(json)?
        .iter()
        .enumerate()
        .map(|(i, event)| {
            event["id"]
                .as_str()
                .map(String::from)
                .with_context(|| format!("Event {} missing id", i))
        })
        .collect()
}

/// Assert that events are ordered newest first and `latest` is the head.
pub fn assert_newest_first(json: &Value) -> Result<()> {
    let events = events(json)?;
    let timestamps: Vec<&str> = events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            event["occurred_at"]
                .as_str()
                .with_context(|| format!("Event {} missing occurred_at", i))
        })
        .collect::<Result<_>>()?;

    // RFC 3339 in UTC sorts lexicographically
    for pair in timestamps.windows(2) {
        if pair[0] < pair[1] {
            anyhow::bail!("Events out of order: {} before {}", pair[0], pair[1]);
        }
    }

    match events.first() {
        Some(first) if json["latest"] != *first => {
            anyhow::bail!("'latest' is not the first event")
        }
        None if !json["latest"].is_null() => anyhow::bail!("'latest' set without events"),
        _ => Ok(()),
    }
}
