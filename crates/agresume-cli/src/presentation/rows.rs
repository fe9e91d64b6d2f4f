//! Plain-text rendering of session rows, shared by `--list` and the picker.

use super::time::format_relative_time;
use agresume_runtime::ScanResult;
use agresume_types::{ROW_SEPARATOR, ToolEvent};
use anyhow::Result;
use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;

/// Shown instead of a list when the scan found nothing
pub const EMPTY_STATE: &str = "No recent sessions found for this project.";

/// Width of the label column; fits every registered label
const LABEL_WIDTH: usize = 11;

/// Display columns of one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: String,
    pub when: String,
    pub summary: String,
}

impl Row {
    pub fn new(event: &ToolEvent, now: DateTime<Utc>) -> Self {
        Self {
            label: format!("{:<width$}", event.label, width = LABEL_WIDTH),
            when: format_relative_time(event.occurred_at, now),
            summary: event.summary.clone(),
        }
    }

    fn colored(&self) -> String {
        format!(
            "{}{}{}{}{}",
            self.label.cyan().bold(),
            ROW_SEPARATOR,
            self.when.dimmed(),
            ROW_SEPARATOR,
            self.summary
        )
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            self.label, ROW_SEPARATOR, self.when, ROW_SEPARATOR, self.summary
        )
    }
}

pub fn print_plain(events: &[ToolEvent], color: bool) {
    if events.is_empty() {
        println!("{}", EMPTY_STATE);
        return;
    }

    let now = Utc::now();
    for event in events {
        let row = Row::new(event, now);
        if color {
            println!("{}", row.colored());
        } else {
            println!("{}", row);
        }
    }
}

pub fn print_json(result: &ScanResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agresume_types::{Confidence, ResumeDescriptor, SELECTION_MARKER, is_ui_echo};
    use chrono::{Duration, TimeZone};

    fn event() -> ToolEvent {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        ToolEvent {
            id: "codex-abc".to_string(),
            label: "Codex".to_string(),
            occurred_at: now - Duration::minutes(5),
            source: "rollout.jsonl".to_string(),
            confidence: Confidence::High,
            summary: "Add a retry loop".to_string(),
            resume: Some(ResumeDescriptor::resume("codex", ["resume", "abc"])),
        }
    }

    #[test]
    fn test_row_columns() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let row = Row::new(&event(), now);
        assert_eq!(row.to_string(), "Codex       │ 5 min ago │ Add a retry loop");
    }

    #[test]
    fn test_rendered_row_is_recognized_as_echo() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let row = Row::new(&event(), now).to_string();
        assert!(is_ui_echo(&row));
        assert!(is_ui_echo(&format!("{} {}", SELECTION_MARKER, row)));
    }
}
