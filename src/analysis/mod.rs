pub mod statistics;

use crate::config::ChartConfig;
use crate::models::{CorrelationEntry, Frame};
use crate::transform;

/// Build the correlation table: the lag-shifted anchor column against every
/// other selected column of the frame.
///
/// Recomputed from scratch on every render cycle; there is no incremental
/// update. Returns an empty table when no anchor is configured or the anchor
/// column is not part of the frame. Rows keep the frame's column iteration
/// order sorted by series name so the table is stable across rebuilds.
pub fn correlation_table(frame: &Frame, config: &ChartConfig) -> Vec<CorrelationEntry> {
    let Some(anchor_label) = config.anchor.as_deref() else {
        return Vec::new();
    };
    let Some(anchor_raw) = frame.column(anchor_label) else {
        return Vec::new();
    };

    let anchor = transform::lag_shift(anchor_raw, config.lag_days);

    let mut labels: Vec<&String> = frame.columns.keys().collect();
    labels.sort();

    let mut table = Vec::new();
    for label in labels {
        if label == anchor_label {
            continue;
        }
        let column = &frame.columns[label];
        let (r, n) = statistics::pearson_correlation(&anchor, column);
        table.push(CorrelationEntry {
            series: label.clone(),
            r,
            n,
        });
    }

    table
}
