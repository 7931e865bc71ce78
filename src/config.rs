use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Inclusive date range. A missing bound leaves that side open.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if date > end {
                return false;
            }
        }
        true
    }
}

/// Snapshot of the user's selection and transform state for one render.
///
/// The UI layer builds a fresh value of this on every interaction and hands it
/// to `pipeline::build_dashboard`; nothing in the pipeline mutates it or keeps
/// state between calls.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ChartConfig {
    /// Series labels to include as frame columns.
    pub selected: Vec<String>,
    /// Rebase every column to 100 at its first observation.
    pub percent_of_baseline: bool,
    /// Z-score every column (applied after rebasing when both are on).
    pub zscore: bool,
    /// Replace every column with its trailing rolling average before
    /// rebase/z-score.
    pub smooth: bool,
    /// Rolling-average window in samples. Clamped to at least 2.
    pub smooth_window: usize,
    /// Series the lag shift and correlation table are computed against.
    pub anchor: Option<String>,
    /// Positional shift applied to the anchor column, in rows along the date
    /// axis. May be negative.
    pub lag_days: i64,
    /// Date window of the frame and the event list.
    pub range: DateRange,
    /// Event types to keep. Empty set keeps everything.
    pub event_types: HashSet<String>,
    /// Case-insensitive substring match on the event agency. Empty keeps
    /// everything.
    pub agency_filter: String,
}

impl ChartConfig {
    /// Default view over the given series: everything selected, no transforms,
    /// first series as anchor.
    pub fn for_series<S: AsRef<str>>(labels: &[S]) -> Self {
        Self {
            selected: labels.iter().map(|l| l.as_ref().to_string()).collect(),
            smooth_window: 7,
            anchor: labels.first().map(|l| l.as_ref().to_string()),
            ..Default::default()
        }
    }

    pub fn is_selected(&self, label: &str) -> bool {
        self.selected.iter().any(|s| s == label)
    }
}
