use super::DataSource;
use crate::models::SeriesPoint;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde_json::Value;

pub struct FredFetcher {
    api_key: String,
    client: Client,
}

impl FredFetcher {
    pub fn new(api_key: String) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("EconDashboard/1.0"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { api_key, client }
    }

    fn parse_observations(json: &Value) -> Result<Vec<SeriesPoint>> {
        let observations = json["observations"]
            .as_array()
            .ok_or_else(|| anyhow!("No observations found in FRED response"))?;

        let mut points = Vec::new();

        for obs in observations {
            // "date": "2023-01-01", "value": "123.45"
            if let (Some(date_str), Some(value_str)) = (obs["date"].as_str(), obs["value"].as_str())
            {
                let Ok(date) = chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d") else {
                    continue;
                };

                // FRED marks missing data with "." — keep the date as a gap.
                if value_str == "." || value_str.is_empty() {
                    points.push(SeriesPoint::new(date, None));
                    continue;
                }

                if let Ok(value) = value_str.parse::<f64>() {
                    points.push(SeriesPoint::new(date, Some(value)));
                }
            }
        }

        Ok(points)
    }
}

#[async_trait]
impl DataSource for FredFetcher {
    fn name(&self) -> &str {
        "fred"
    }

    async fn fetch_series(&self, series_id: &str) -> Result<Vec<SeriesPoint>> {
        let sanitized_key = self.api_key.trim().to_lowercase();

        if sanitized_key.is_empty() {
            return Err(anyhow!("FRED API Key is empty or missing!"));
        }

        println!("Fetching FRED series: {}", series_id);

        let url = format!(
            "https://api.stlouisfed.org/fred/series/observations?series_id={}&api_key={}&file_type=json",
            series_id, sanitized_key
        );

        let resp = self.client.get(&url).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_default();
            return Err(anyhow!("FRED API Error: {} - Body: {}", status, error_text));
        }

        let json: Value = resp.json().await?;
        Self::parse_observations(&json)
    }
}
