//! Multi-term fuzzy filtering for the picker, using nucleo.
//!
//! The query is split on whitespace and every term has to match somewhere in
//! the event's label, summary or source.

use agresume_types::ToolEvent;
use nucleo::{
    Config, Matcher, Utf32Str,
    pattern::{CaseMatching, Normalization, Pattern},
};

pub struct FuzzySearch {
    matcher: Matcher,
}

impl Default for FuzzySearch {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzySearch {
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
        }
    }

    fn match_term(&mut self, term: &str, haystack: &str) -> Option<u32> {
        let pattern = Pattern::parse(term, CaseMatching::Ignore, Normalization::Smart);
        let mut haystack_buf = Vec::new();
        let haystack_utf32 = Utf32Str::new(haystack, &mut haystack_buf);

        pattern.score(haystack_utf32, &mut self.matcher)
    }

    /// Total score when all terms match, `None` otherwise.
    ///
    /// A blank query matches everything with score 0.
    pub fn multi_term_match(&mut self, query: &str, haystack: &str) -> Option<u32> {
        let mut total_score = 0u32;
        for term in query.split_whitespace() {
            let score = self.match_term(term, haystack)?;
            total_score = total_score.saturating_add(score);
        }
        Some(total_score)
    }

    /// Indices into `haystacks` that match `query`, best first.
    ///
    /// Equal scores keep their input order, so a blank query returns every
    /// index unchanged.
    pub fn rank(&mut self, query: &str, haystacks: &[String]) -> Vec<usize> {
        let mut scored: Vec<(usize, u32)> = haystacks
            .iter()
            .enumerate()
            .filter_map(|(index, haystack)| {
                self.multi_term_match(query, haystack)
                    .map(|score| (index, score))
            })
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().map(|(index, _)| index).collect()
    }
}

/// Text searched for an event
pub fn haystack(event: &ToolEvent) -> String {
    format!("{} {} {}", event.label, event.summary, event.source)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn haystacks() -> Vec<String> {
        vec![
            "Codex Add a retry loop around the upload client rollout-1.jsonl".to_string(),
            "Claude Code Explain the borrow checker error history.jsonl".to_string(),
            "Gemini Summarize the open TODOs session-1.json".to_string(),
        ]
    }

    #[test]
    fn test_blank_query_keeps_order() {
        let mut search = FuzzySearch::new();
        assert_eq!(search.rank("", &haystacks()), vec![0, 1, 2]);
        assert_eq!(search.rank("   ", &haystacks()), vec![0, 1, 2]);
    }

    #[test]
    fn test_case_insensitive_match() {
        let mut search = FuzzySearch::new();
        assert_eq!(search.rank("BORROW", &haystacks()), vec![1]);
        assert_eq!(search.rank("gemini", &haystacks()), vec![2]);
    }

    #[test]
    fn test_all_terms_must_match() {
        let mut search = FuzzySearch::new();
        assert_eq!(search.rank("retry upload", &haystacks()), vec![0]);
        assert!(search.rank("retry gemini", &haystacks()).is_empty());
    }

    #[test]
    fn test_matches_source_file_name() {
        let mut search = FuzzySearch::new();
        assert_eq!(search.rank("history.jsonl", &haystacks()), vec![1]);
    }

    #[test]
    fn test_no_match() {
        let mut search = FuzzySearch::new();
        assert!(search.rank("zzzzqqq", &haystacks()).is_empty());
        assert_eq!(search.multi_term_match("zzzzqqq", "abc"), None);
        assert_eq!(search.multi_term_match("", "abc"), Some(0));
    }
}
