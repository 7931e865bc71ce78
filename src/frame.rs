use crate::config::ChartConfig;
use crate::models::Frame;
use crate::store::SeriesStore;
use crate::transform;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Build the dense date-aligned table for the current selection.
///
/// The date axis is the merged axis of the whole store filtered to the
/// configured range; every selected series is projected over it, with `None`
/// where the series has no observation for a date. No interpolation happens
/// here or anywhere downstream. When smoothing is enabled each column is
/// replaced by its trailing rolling average before any later transform sees
/// it. A range that matches no dates yields an empty frame, not an error.
pub fn build_frame(store: &SeriesStore, config: &ChartConfig) -> Frame {
    let dates: Vec<NaiveDate> = store
        .merged_dates()
        .into_iter()
        .filter(|d| config.range.contains(*d))
        .collect();

    let mut columns = HashMap::new();

    for label in &config.selected {
        let Some(points) = store.get(label) else {
            continue;
        };

        // Date-keyed lookup, then projection over the shared axis.
        let by_date: HashMap<NaiveDate, f64> = points
            .iter()
            .filter_map(|p| p.value.map(|v| (p.date, v)))
            .collect();

        let mut column: Vec<Option<f64>> =
            dates.iter().map(|d| by_date.get(d).copied()).collect();

        if config.smooth {
            column = transform::rolling_average(&column, config.smooth_window);
        }

        columns.insert(label.clone(), column);
    }

    Frame { dates, columns }
}
