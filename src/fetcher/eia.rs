use super::DataSource;
use crate::models::SeriesPoint;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

pub struct EiaFetcher {
    api_key: String,
    client: Client,
}

impl EiaFetcher {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder().build().unwrap_or_else(|_| Client::new());
        Self { api_key, client }
    }

    fn parse_response(json: &Value) -> Result<Vec<SeriesPoint>> {
        // EIA v2 API structure:
        // { "response": { "data": [ { "period": "2023-01-06", "value": 4.32, ... }, ... ] } }
        let data_array = json["response"]["data"]
            .as_array()
            .ok_or_else(|| anyhow!("Invalid EIA API response format: 'response.data' missing"))?;

        let mut points = Vec::new();

        for obs in data_array {
            let Some(date_raw) = obs["period"].as_str() else {
                continue;
            };
            // Weekly periods sometimes arrive as YYYYMMDD.
            let date_str = if date_raw.len() == 8 && !date_raw.contains('-') {
                format!("{}-{}-{}", &date_raw[..4], &date_raw[4..6], &date_raw[6..])
            } else {
                date_raw.to_string()
            };

            if let Ok(date) = chrono::NaiveDate::parse_from_str(&date_str, "%Y-%m-%d") {
                // A row without a numeric value is still a dated gap.
                points.push(SeriesPoint::new(date, obs["value"].as_f64()));
            }
        }

        points.sort_by_key(|p| p.date);
        Ok(points)
    }
}

#[async_trait]
impl DataSource for EiaFetcher {
    fn name(&self) -> &str {
        "eia"
    }

    async fn fetch_series(&self, series_id: &str) -> Result<Vec<SeriesPoint>> {
        println!("Fetching EIA series: {}", series_id);

        if self.api_key.is_empty() {
            return Err(anyhow!("EIA API Key is missing"));
        }

        // Retail gasoline prices live under petroleum/pri/gnd in the v2 API;
        // `series_id` is the facet (e.g. EMM_EPMR_PTE_SCA_DPG for California).
        let params = vec![
            ("api_key", self.api_key.clone()),
            ("frequency", "weekly".to_string()),
            ("data[]", "value".to_string()),
            ("facets[series][]", series_id.to_string()),
            ("sort[0][column]", "period".to_string()),
            ("sort[0][direction]", "asc".to_string()),
        ];

        let url = "https://api.eia.gov/v2/petroleum/pri/gnd/data/";

        let resp = self.client.get(url).query(&params).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let err_body = resp
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error body".to_string());
            println!("EIA API Error Response ({}): {}", status, err_body);
            return Err(anyhow!("EIA API Error: {} - {}", status, err_body));
        }

        let json: Value = resp.json().await?;

        if let Some(total_str) = json["response"]["total"].as_str() {
            if total_str == "0" {
                println!("EIA Warning: No data returned for series '{}'", series_id);
            }
        }

        Self::parse_response(&json)
    }
}
