use crate::analysis;
use crate::config::ChartConfig;
use crate::events;
use crate::models::{DashboardView, PolicyEvent};
use crate::store::SeriesStore;
use crate::transform;
use crate::frame::build_frame;

/// One full render cycle as a pure function: no ambient state, no caching.
///
/// Order of operations: frame build (smoothing happens inside the builder),
/// then per-column percent rebase, then z-score, then the correlation table
/// (which lag-shifts the anchor internally), and finally the same lag shift
/// applied to the anchor column of the outgoing frame so chart and table see
/// identical anchor values. The UI triggers this on every control change and
/// renders whatever comes back.
pub fn build_dashboard(
    store: &SeriesStore,
    event_list: &[PolicyEvent],
    config: &ChartConfig,
) -> DashboardView {
    let mut frame = build_frame(store, config);

    if config.percent_of_baseline {
        for column in frame.columns.values_mut() {
            *column = transform::percent_rebase(column);
        }
    }
    if config.zscore {
        for column in frame.columns.values_mut() {
            *column = transform::zscore(column);
        }
    }

    let correlations = analysis::correlation_table(&frame, config);

    if config.lag_days != 0 {
        if let Some(anchor) = config.anchor.as_deref() {
            if let Some(column) = frame.columns.get_mut(anchor) {
                *column = transform::lag_shift(column, config.lag_days);
            }
        }
    }

    let filtered_events = events::filter_events(event_list, config);

    DashboardView {
        frame,
        events: filtered_events,
        correlations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SeriesPoint;
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn pt(date: &str, value: f64) -> SeriesPoint {
        SeriesPoint::new(d(date), Some(value))
    }

    fn sample_store() -> SeriesStore {
        let mut store = SeriesStore::new();
        store.insert(
            "Eggs",
            vec![pt("2021-01-01", 2.0), pt("2021-01-02", 3.0), pt("2021-01-03", 4.0)],
        );
        store.insert(
            "Gas",
            vec![pt("2021-01-01", 3.0), pt("2021-01-02", 3.5), pt("2021-01-03", 4.0)],
        );
        store
    }

    #[test]
    fn test_rebase_then_zscore_order() {
        let store = sample_store();
        let mut config = ChartConfig::for_series(&["Eggs", "Gas"]);
        config.percent_of_baseline = true;
        config.zscore = true;

        let view = build_dashboard(&store, &[], &config);
        // Rebased Eggs would be [100, 150, 200]; z-scoring that gives
        // [-1, 0, 1] with sample std 50.
        let col = view.frame.column("Eggs").unwrap();
        assert!((col[0].unwrap() - (-1.0)).abs() < 1e-9);
        assert!((col[1].unwrap() - 0.0).abs() < 1e-9);
        assert!((col[2].unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_anchor_column_shifted_in_frame() {
        let store = sample_store();
        let mut config = ChartConfig::for_series(&["Eggs", "Gas"]);
        config.anchor = Some("Eggs".to_string());
        config.lag_days = 1;

        let view = build_dashboard(&store, &[], &config);
        assert_eq!(
            view.frame.column("Eggs").unwrap(),
            &[None, Some(2.0), Some(3.0)]
        );
        // Non-anchor columns are untouched by the lag.
        assert_eq!(
            view.frame.column("Gas").unwrap(),
            &[Some(3.0), Some(3.5), Some(4.0)]
        );
    }

    #[test]
    fn test_correlations_cover_non_anchor_columns() {
        let store = sample_store();
        let mut config = ChartConfig::for_series(&["Eggs", "Gas"]);
        config.anchor = Some("Eggs".to_string());

        let view = build_dashboard(&store, &[], &config);
        assert_eq!(view.correlations.len(), 1);
        assert_eq!(view.correlations[0].series, "Gas");
        assert_eq!(view.correlations[0].n, 3);
        assert!((view.correlations[0].r.unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_range_degrades_to_empty_view() {
        let store = sample_store();
        let mut config = ChartConfig::for_series(&["Eggs", "Gas"]);
        config.range = crate::config::DateRange::new(Some(d("2030-01-01")), None);

        let view = build_dashboard(&store, &[], &config);
        assert!(view.frame.is_empty());
        for entry in &view.correlations {
            assert!(entry.r.is_none());
            assert_eq!(entry.n, 0);
        }
    }

    #[test]
    fn test_events_pass_through_filter() {
        let store = sample_store();
        let event_list = vec![PolicyEvent {
            date: d("2021-01-02"),
            title: String::new(),
            event_type: "PRORULE".to_string(),
            agency: "Federal Reserve".to_string(),
            url: String::new(),
        }];
        let mut config = ChartConfig::for_series(&["Eggs"]);
        config.agency_filter = "reserve".to_string();

        let view = build_dashboard(&store, &event_list, &config);
        assert_eq!(view.events.len(), 1);
        // Empty title falls back to the type for the marker label.
        assert_eq!(view.events[0].label(), "PRORULE");
    }
}
