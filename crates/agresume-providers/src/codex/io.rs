use crate::Result;
use crate::aggregate::MessageTrail;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use super::schema::CodexRecord;

/// What a single Codex rollout file says about its session
#[derive(Debug, Default)]
pub struct CodexSessionScan {
    pub session_id: Option<String>,
    pub cwd: Option<String>,
    /// Timestamp of the last record (in file order) that carried one
    pub timestamp: Option<String>,
    pub summary: Option<String>,
}

/// Stream a Codex JSONL file, skipping malformed lines
pub fn scan_codex_file(path: &Path) -> Result<CodexSessionScan> {
    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);

    let mut scan = CodexSessionScan::default();
    let mut trail = MessageTrail::default();

    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) if err.kind() == ErrorKind::InvalidData => continue,
            Err(err) => return Err(err.into()),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Ok(record) = serde_json::from_str::<CodexRecord>(line) else {
            continue;
        };

        if let Some(timestamp) = &record.timestamp {
            scan.timestamp = Some(timestamp.clone());
        }

        if let Some(meta) = record.session_meta() {
            if meta.id.is_some() {
                scan.session_id = meta.id;
            }
            if meta.cwd.is_some() {
                scan.cwd = meta.cwd;
            }
        } else if let Some(message) = record.user_message() {
            trail.push(&message);
        }
    }

    scan.summary = trail.summary();
    Ok(scan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_lines(lines: &[&[u8]]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for line in lines {
            file.write_all(line).unwrap();
            file.write_all(b"\n").unwrap();
        }
        file
    }

    #[test]
    fn test_skips_malformed_lines() {
        let file = write_lines(&[
            br#"{"timestamp":"2025-03-01T10:00:00Z","type":"session_meta","payload":{"id":"s1","cwd":"/work"}}"#,
            b"not json at all",
            b"[1, 2, 3]",
            b"\xff\xfe broken utf8",
            br#"{"timestamp":"2025-03-01T10:05:00Z","type":"event_msg","payload":{"type":"user_message","message":"fix it"}}"#,
        ]);

        let scan = scan_codex_file(file.path()).unwrap();
        assert_eq!(scan.session_id.as_deref(), Some("s1"));
        assert_eq!(scan.cwd.as_deref(), Some("/work"));
        assert_eq!(scan.timestamp.as_deref(), Some("2025-03-01T10:05:00Z"));
        assert_eq!(scan.summary.as_deref(), Some("fix it"));
    }

    #[test]
    fn test_latest_session_meta_wins_per_field() {
        let file = write_lines(&[
            br#"{"type":"session_meta","payload":{"id":"old","cwd":"/work"}}"#,
            br#"{"type":"session_meta","payload":{"id":"new"}}"#,
        ]);

        let scan = scan_codex_file(file.path()).unwrap();
        assert_eq!(scan.session_id.as_deref(), Some("new"));
        assert_eq!(scan.cwd.as_deref(), Some("/work"));
        assert!(scan.timestamp.is_none());
        assert!(scan.summary.is_none());
    }

    #[test]
    fn test_timestamp_from_any_record_type() {
        let file = write_lines(&[
            br#"{"timestamp":"2025-03-01T10:00:00Z","type":"session_meta","payload":{"id":"s1","cwd":"/w"}}"#,
            br#"{"timestamp":"2025-03-01T11:00:00Z","type":"response_item","payload":{"type":"message"}}"#,
            br#"{"type":"event_msg","payload":{"type":"user_message","message":"no timestamp here"}}"#,
        ]);

        let scan = scan_codex_file(file.path()).unwrap();
        assert_eq!(scan.timestamp.as_deref(), Some("2025-03-01T11:00:00Z"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = scan_codex_file(Path::new("/nonexistent/rollout.jsonl"));
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }
}
