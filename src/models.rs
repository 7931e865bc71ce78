use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One observation of a series. `value` is None when the source had a row for
/// the date but no usable number in the value field (missing-field rows are
/// data gaps, not errors).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

impl SeriesPoint {
    pub fn new(date: NaiveDate, value: Option<f64>) -> Self {
        Self { date, value }
    }
}

/// Dense table aligning the selected series on a shared date axis.
/// Invariant: `columns[name].len() == dates.len()` for every column, and
/// position `i` of every column corresponds to `dates[i]`. Gaps stay `None`.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Frame {
    pub dates: Vec<NaiveDate>,
    pub columns: HashMap<String, Vec<Option<f64>>>,
}

impl Frame {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns.get(name).map(|c| c.as_slice())
    }
}

/// A dated regulatory event (proposed rulemaking etc.) for chart annotation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PolicyEvent {
    pub date: NaiveDate,
    pub title: String,
    pub event_type: String,
    pub agency: String,
    pub url: String,
}

impl PolicyEvent {
    /// Label shown on the chart marker. Falls back to the document type when
    /// the source row carries no title.
    pub fn label(&self) -> &str {
        if self.title.is_empty() {
            &self.event_type
        } else {
            &self.title
        }
    }
}

/// One row of the correlation table: a candidate series against the
/// (lag-shifted) anchor. `r` is None when fewer than 3 paired samples exist
/// or the denominator degenerates.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CorrelationEntry {
    pub series: String,
    pub r: Option<f64>,
    pub n: usize,
}

/// Everything one render cycle needs, produced in a single pass.
#[derive(Debug, Serialize, Clone)]
pub struct DashboardView {
    pub frame: Frame,
    pub events: Vec<PolicyEvent>,
    pub correlations: Vec<CorrelationEntry>,
}
