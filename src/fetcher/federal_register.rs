use crate::models::PolicyEvent;
use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashSet;

/// High-impact agency shortlist (Federal Register agency IDs) the tracker
/// polls for proposed rulemakings.
pub const AGENCY_IDS: &[u32] = &[497, 2, 88, 271, 367, 221, 54, 304, 43, 6];

const DOCUMENTS_URL: &str = "https://www.federalregister.gov/api/v1/documents.json";

#[derive(Debug, Deserialize)]
struct DocumentsResponse {
    #[serde(default)]
    results: Vec<Document>,
}

#[derive(Debug, Deserialize)]
struct Document {
    publication_date: String,
    #[serde(default)]
    document_type: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    html_url: Option<String>,
    #[serde(default)]
    agencies: Vec<Agency>,
}

#[derive(Debug, Deserialize)]
struct Agency {
    #[serde(default)]
    name: Option<String>,
}

pub struct FederalRegisterFetcher {
    client: Client,
}

impl FederalRegisterFetcher {
    pub fn new() -> Self {
        let client = Client::builder().build().unwrap_or_else(|_| Client::new());
        Self { client }
    }

    /// Fetch every PRORULE document from the agency shortlist in
    /// `[start, end]` (YYYY-MM-DD, inclusive), walking pages until the API
    /// runs dry. `known_urls` entries are skipped so repeated polls only
    /// surface new documents.
    pub async fn fetch_events(
        &self,
        start_date: &str,
        end_date: &str,
        known_urls: &HashSet<String>,
    ) -> Result<Vec<PolicyEvent>> {
        let mut events = Vec::new();
        let mut page = 1;

        println!("Checking for PRORULEs from top agencies ({} - {})...", start_date, end_date);

        loop {
            let mut params: Vec<(String, String)> = vec![
                ("order".into(), "newest".into()),
                ("page".into(), page.to_string()),
                ("per_page".into(), "100".into()),
                ("conditions[publication_date][gte]".into(), start_date.into()),
                ("conditions[publication_date][lte]".into(), end_date.into()),
                ("conditions[type][]".into(), "PRORULE".into()),
            ];
            for aid in AGENCY_IDS {
                params.push(("conditions[agency_ids][]".into(), aid.to_string()));
            }

            let resp = self.client.get(DOCUMENTS_URL).query(&params).send().await?;

            if !resp.status().is_success() {
                return Err(anyhow!("Federal Register API Error: {}", resp.status()));
            }

            let body: DocumentsResponse = resp.json().await?;
            if body.results.is_empty() {
                break;
            }

            let checked = body.results.len();
            for doc in body.results {
                if let Some(event) = document_to_event(doc) {
                    if known_urls.contains(&event.url) {
                        continue;
                    }
                    events.push(event);
                }
            }

            println!("  > Page {}: {} checked, {} new so far.", page, checked, events.len());
            page += 1;
        }

        events.sort_by_key(|e| e.date);
        Ok(events)
    }
}

impl Default for FederalRegisterFetcher {
    fn default() -> Self {
        Self::new()
    }
}

fn document_to_event(doc: Document) -> Option<PolicyEvent> {
    let date = chrono::NaiveDate::parse_from_str(&doc.publication_date, "%Y-%m-%d").ok()?;

    let agency = doc
        .agencies
        .into_iter()
        .find_map(|a| a.name)
        .unwrap_or_default();

    Some(PolicyEvent {
        date,
        title: doc.title.unwrap_or_default().trim().to_string(),
        event_type: doc.document_type.unwrap_or_else(|| "PRORULE".to_string()),
        agency,
        url: doc.html_url.unwrap_or_default(),
    })
}
