use agresume_providers::codex::scan_codex_file;
use agresume_providers::gemini::read_gemini_session;
use agresume_providers::{ClaudeProvider, FetchOptions, SessionProvider};
use agresume_types::ResumeMode;
use std::path::{Path, PathBuf};

const SAMPLE_CWD: &str = "/Users/test_user/agent-sample";

#[test]
fn test_codex_sample_header() {
    let scan = scan_codex_file(Path::new("tests/samples/codex_session.jsonl"))
        .expect("Should scan sample");

    assert_eq!(
        scan.session_id.as_deref(),
        Some("0195a3b2-7c41-7d20-9a0e-2f1c8b6d4e11")
    );
    assert_eq!(scan.cwd.as_deref(), Some(SAMPLE_CWD));
    // turn_context is the last record carrying a timestamp
    assert_eq!(scan.timestamp.as_deref(), Some("2025-03-01T10:02:30.000Z"));
    assert_eq!(
        scan.summary.as_deref(),
        Some("Add a retry loop around the upload client")
    );
}

#[test]
fn test_gemini_sample_document() {
    let scan = read_gemini_session(Path::new("tests/samples/gemini_session.json"))
        .expect("Should read sample");

    assert_eq!(
        scan.session_id.as_deref(),
        Some("f0a689a6-b0ac-407f-afcc-4fafa9e14e8a")
    );
    assert_eq!(scan.last_updated.to_rfc3339(), "2025-03-01T09:30:00+00:00");
    assert_eq!(
        scan.summary.as_deref(),
        Some("Summarize the open TODOs in this repo")
    );
}

#[test]
fn test_claude_sample_history() {
    let provider = ClaudeProvider::new(
        PathBuf::from("tests/samples/claude_history.jsonl"),
        PathBuf::from(SAMPLE_CWD),
    );

    let events = provider
        .fetch_events(&FetchOptions::default())
        .expect("Should fetch events");

    assert_eq!(events.len(), 1, "record without sessionId is skipped");
    let event = &events[0];
    assert_eq!(event.id, "claude-7f2abd2d-7cfc-4447-9ddd-3ca8d14e02e9");
    assert_eq!(event.label, "Claude Code");
    assert_eq!(event.source, "claude_history.jsonl");
    assert_eq!(event.summary, "Explain the borrow checker error in scan.rs");
    // The echoed picker title still counts as activity
    assert_eq!(event.occurred_at.timestamp_millis(), 1_740_823_800_000);

    let resume = event.resume.as_ref().unwrap();
    assert_eq!(resume.mode, ResumeMode::Resume);
    assert_eq!(
        resume.command_line(),
        "claude --resume 7f2abd2d-7cfc-4447-9ddd-3ca8d14e02e9"
    );
}
