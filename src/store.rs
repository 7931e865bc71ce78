use crate::models::SeriesPoint;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

/// Owns every loaded series, keyed by display label. Series are replaced
/// wholesale on load and never mutated in place afterwards.
#[derive(Debug, Default, Clone)]
pub struct SeriesStore {
    series: HashMap<String, Vec<SeriesPoint>>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the named series. Points are sorted ascending by date so the
    /// rest of the pipeline can rely on order.
    pub fn insert(&mut self, label: impl Into<String>, mut points: Vec<SeriesPoint>) {
        points.sort_by_key(|p| p.date);
        self.series.insert(label.into(), points);
    }

    pub fn get(&self, label: &str) -> Option<&[SeriesPoint]> {
        self.series.get(label).map(|s| s.as_slice())
    }

    pub fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.series.keys().cloned().collect();
        labels.sort();
        labels
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// The merged date axis: every distinct date appearing in any series,
    /// ascending. `NaiveDate` orders chronologically, so a BTreeSet gives the
    /// sorted union directly.
    pub fn merged_dates(&self) -> Vec<NaiveDate> {
        let mut all_dates: BTreeSet<NaiveDate> = BTreeSet::new();
        for points in self.series.values() {
            for p in points {
                all_dates.insert(p.date);
            }
        }
        all_dates.into_iter().collect()
    }

    /// Earliest and latest date across all series, if any data is loaded.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let axis = self.merged_dates();
        match (axis.first(), axis.last()) {
            (Some(&first), Some(&last)) => Some((first, last)),
            _ => None,
        }
    }
}
