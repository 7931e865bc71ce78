use crate::config::ChartConfig;
use crate::models::PolicyEvent;

/// Filter the event list by date range, type set, and agency substring.
///
/// An empty type set means no type restriction; an empty agency filter means
/// no agency restriction. The agency match is a case-insensitive "contains".
/// Input order is preserved — the filter makes no assumption that the source
/// list is chronological.
pub fn filter_events(events: &[PolicyEvent], config: &ChartConfig) -> Vec<PolicyEvent> {
    let agency_needle = config.agency_filter.trim().to_lowercase();

    events
        .iter()
        .filter(|e| config.range.contains(e.date))
        .filter(|e| config.event_types.is_empty() || config.event_types.contains(&e.event_type))
        .filter(|e| {
            agency_needle.is_empty() || e.agency.to_lowercase().contains(&agency_needle)
        })
        .cloned()
        .collect()
}
