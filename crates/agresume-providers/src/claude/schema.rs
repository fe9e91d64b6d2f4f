use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One line of Claude Code's global prompt history
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HistoryRecord {
    #[serde(default)]
    pub display: Option<String>,
    /// Epoch milliseconds
    #[serde(default)]
    pub timestamp: Option<f64>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
}

impl HistoryRecord {
    /// `None` when absent, non-finite or outside the representable range
    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        let millis = self.timestamp.filter(|ts| ts.is_finite())?;
        if millis < i64::MIN as f64 || millis > i64::MAX as f64 {
            return None;
        }
        DateTime::from_timestamp_millis(millis as i64)
    }
}
