use super::DataSource;
use crate::models::{PolicyEvent, SeriesPoint};
use crate::registry::Registry;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;

/// Reads tabs of the published tracking spreadsheet as CSV
/// (`gviz/tq?tqx=out:csv&sheet=<tab>`). Price tabs become series via the
/// registry's candidate value fields; the `Policy_Events` tab becomes the
/// event list.
pub struct SheetsFetcher {
    sheet_id: String,
    client: Client,
}

impl SheetsFetcher {
    pub fn new(sheet_id: String) -> Self {
        let client = Client::builder().build().unwrap_or_else(|_| Client::new());
        Self { sheet_id, client }
    }

    fn tab_url(&self, tab: &str) -> String {
        format!(
            "https://docs.google.com/spreadsheets/d/{}/gviz/tq?tqx=out:csv&sheet={}",
            self.sheet_id, tab
        )
    }

    pub async fn fetch_tab(&self, tab: &str) -> Result<Vec<HashMap<String, String>>> {
        println!("Fetching sheet tab: {}", tab);

        let resp = self.client.get(self.tab_url(tab)).send().await?;
        if !resp.status().is_success() {
            return Err(anyhow!("Sheet tab '{}' returned {}", tab, resp.status()));
        }

        let text = resp.text().await?;
        Ok(parse_csv(&text))
    }

    pub async fn fetch_events(&self) -> Result<Vec<PolicyEvent>> {
        let rows = self.fetch_tab("Policy_Events").await?;
        Ok(rows_to_events(&rows))
    }
}

#[async_trait]
impl DataSource for SheetsFetcher {
    fn name(&self) -> &str {
        "sheets"
    }

    /// `series_id` is the registry slug; the tab name and candidate value
    /// fields come from the series metadata.
    async fn fetch_series(&self, series_id: &str) -> Result<Vec<SeriesPoint>> {
        let meta = Registry::get(series_id)
            .ok_or_else(|| anyhow!("Unknown series slug '{}'", series_id))?;
        let rows = self.fetch_tab(meta.sheet_tab).await?;
        Ok(project_series(&rows, meta.value_fields))
    }
}

/// Parse CSV text into one map per row, keyed by the header line. Handles the
/// double-quoted cells the gviz export produces, including commas inside
/// quotes (event titles need this).
pub fn parse_csv(text: &str) -> Vec<HashMap<String, String>> {
    let mut lines = text.trim().lines();
    let Some(header_line) = lines.next() else {
        return Vec::new();
    };

    let headers = split_csv_line(header_line);
    let mut rows = Vec::new();

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let cells = split_csv_line(line);
        let mut row = HashMap::new();
        for (i, header) in headers.iter().enumerate() {
            let cell = cells.get(i).cloned().unwrap_or_default();
            row.insert(header.clone(), cell);
        }
        rows.push(row);
    }

    rows
}

fn split_csv_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                // Doubled quote inside a quoted cell is an escaped quote.
                if in_quotes && chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                cells.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    cells.push(current.trim().to_string());

    cells
}

/// Project row-oriented table data to series points using the ordered list of
/// candidate value fields. A row whose date parses but whose value doesn't is
/// kept as a gap; a row without a parseable date is dropped.
pub fn project_series(
    rows: &[HashMap<String, String>],
    value_fields: &[&str],
) -> Vec<SeriesPoint> {
    let mut points = Vec::new();

    for row in rows {
        let Some(date_str) = row.get("Date") else {
            continue;
        };
        let Ok(date) = chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d") else {
            continue;
        };

        let value = value_fields
            .iter()
            .filter_map(|field| row.get(*field))
            .find_map(|raw| raw.trim().parse::<f64>().ok());

        points.push(SeriesPoint::new(date, value));
    }

    points
}

fn rows_to_events(rows: &[HashMap<String, String>]) -> Vec<PolicyEvent> {
    let mut events = Vec::new();

    for row in rows {
        let Some(date_str) = row.get("Date") else {
            continue;
        };
        let Ok(date) = chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d") else {
            continue;
        };

        let get = |key: &str| row.get(key).cloned().unwrap_or_default();

        events.push(PolicyEvent {
            date,
            title: get("Title"),
            event_type: get("Type"),
            agency: get("Agency"),
            url: get("URL"),
        });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_quoted_cells() {
        let text = "\"Date\",\"Price (USD)\"\n\"2021-01-01\",\"4.25\"\n\"2021-01-08\",\"4.30\"";
        let rows = parse_csv(text);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Date"], "2021-01-01");
        assert_eq!(rows[1]["Price (USD)"], "4.30");
    }

    #[test]
    fn test_parse_csv_comma_inside_quotes() {
        let text = "Date,Title\n2021-01-01,\"Safety Standards, Revised\"";
        let rows = parse_csv(text);
        assert_eq!(rows[0]["Title"], "Safety Standards, Revised");
    }

    #[test]
    fn test_project_series_candidate_order() {
        let text = "Date,Price (USD per gallon),California\n2021-01-01,4.10,4.20";
        let rows = parse_csv(text);
        let points = project_series(&rows, &["Price (USD per gallon)", "California"]);
        assert_eq!(points[0].value, Some(4.10));
    }

    #[test]
    fn test_project_series_falls_back() {
        let text = "Date,California,Texas\n2021-01-01,4.20,3.10";
        let rows = parse_csv(text);
        let points = project_series(&rows, &["Price (USD per gallon)", "California"]);
        assert_eq!(points[0].value, Some(4.20));
    }

    #[test]
    fn test_project_series_missing_field_is_gap() {
        let text = "Date,Other\n2021-01-01,nope";
        let rows = parse_csv(text);
        let points = project_series(&rows, &["Price (USD)"]);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].value, None);
    }

    #[test]
    fn test_project_series_bad_date_dropped() {
        let text = "Date,Price (USD)\nnot-a-date,4.10\n2021-01-01,4.20";
        let rows = parse_csv(text);
        let points = project_series(&rows, &["Price (USD)"]);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].value, Some(4.20));
    }

    #[test]
    fn test_rows_to_events() {
        let text = "Date,Type,Title,Agency,URL\n2021-03-01,PRORULE,Emissions Rule,EPA,https://example.gov/1";
        let rows = parse_csv(text);
        let events = rows_to_events(&rows);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, "PRORULE");
        assert_eq!(events[0].agency, "EPA");
        assert_eq!(events[0].label(), "Emissions Rule");
    }
}
