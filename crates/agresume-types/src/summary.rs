use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum summary length in characters, suffix included
pub const SUMMARY_MAX_CHARS: usize = 120;

const ELLIPSIS: &str = "...";

/// Title of the session picker
pub const PICKER_TITLE: &str = "Resume a recent session";

/// Key-hint line rendered under the picker list
pub const PICKER_HINT: &str = "type to filter · ↑/↓ move · enter resume · esc quit";

/// Column separator used by rendered picker rows
pub const ROW_SEPARATOR: &str = " │ ";

/// Marker drawn in front of the highlighted picker row
pub const SELECTION_MARKER: &str = "›";

// A rendered row is `<label> │ <when> │ <summary>`, possibly behind the marker.
static PICKER_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[›>]\s*)?[^│]{1,40} │ [^│]{1,40} │ ").expect("picker row pattern is valid")
});

/// Collapse every run of whitespace into a single space and trim the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cap `text` at `max_chars` characters, ending in "..." when cut.
///
/// Cuts on char boundaries, so multi-byte text stays valid. The result is
/// never longer than `max_chars`, which makes repeated truncation a no-op.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let head: String = text.chars().take(keep).collect();
    format!("{}{}", head.trim_end(), ELLIPSIS)
}

/// Whether `text` is something this tool rendered itself (picker title,
/// key hints or a list row) that ended up in an assistant's prompt history
pub fn is_ui_echo(text: &str) -> bool {
    let normalized = normalize_whitespace(text);
    if normalized.is_empty() {
        return false;
    }

    normalized.contains(PICKER_TITLE)
        || normalized.contains(PICKER_HINT)
        || PICKER_ROW.is_match(&normalized)
}

/// Normalize and cap a candidate summary.
///
/// Returns `None` for blank text and for UI echoes.
pub fn summarize(text: &str) -> Option<String> {
    let normalized = normalize_whitespace(text);
    if normalized.is_empty() || is_ui_echo(&normalized) {
        return None;
    }
    Some(truncate(&normalized, SUMMARY_MAX_CHARS))
}
