//! Ephemeral per-session state built while a parser walks a log.
//!
//! Both trackers only ever hold text that already went through
//! [`summarize`], so UI echoes and blank prompts never become summaries.

use agresume_types::summarize;
use chrono::{DateTime, Utc};

/// User messages of a single-session log, in arrival order
#[derive(Debug, Default)]
pub(crate) struct MessageTrail {
    first: Option<String>,
    previous: Option<String>,
    last: Option<String>,
}

impl MessageTrail {
    pub fn push(&mut self, text: &str) {
        let Some(text) = summarize(text) else {
            return;
        };
        if self.first.is_none() {
            self.first = Some(text.clone());
        }
        self.previous = self.last.replace(text);
    }

    /// First message, else previous, else last
    pub fn summary(self) -> Option<String> {
        self.first.or(self.previous).or(self.last)
    }
}

/// Messages of one session inside a multi-session log whose records may
/// arrive out of timestamp order
#[derive(Debug, Default)]
pub(crate) struct SessionAggregate {
    last_at: Option<DateTime<Utc>>,
    first: Option<(DateTime<Utc>, String)>,
    last: Option<(DateTime<Utc>, String)>,
    previous: Option<String>,
}

impl SessionAggregate {
    /// Record activity at `at`, optionally carrying message text.
    ///
    /// Equal timestamps replace the running last message, so among ties the
    /// later record in the file counts as more recent.
    pub fn observe(&mut self, at: DateTime<Utc>, text: Option<&str>) {
        if self.last_at.is_none_or(|last_at| at >= last_at) {
            self.last_at = Some(at);
        }

        let Some(text) = text.and_then(summarize) else {
            return;
        };

        if self.first.as_ref().is_none_or(|(first_at, _)| at < *first_at) {
            self.first = Some((at, text.clone()));
        }
        if self.last.as_ref().is_none_or(|(last_at, _)| at >= *last_at) {
            self.previous = self.last.take().map(|(_, text)| text);
            self.last = Some((at, text));
        }
    }

    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        self.last_at
    }

    /// Earliest message, else previous, else last
    pub fn summary(self) -> Option<String> {
        self.first
            .map(|(_, text)| text)
            .or(self.previous)
            .or(self.last.map(|(_, text)| text))
    }
}
