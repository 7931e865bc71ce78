use super::DataSource;
use crate::models::SeriesPoint;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use scraper::{Html, Selector};

/// Pulls the current list price for the tracked retail items off their product
/// pages. Each run yields a single (today, price) observation; history
/// accumulates in the spreadsheet, so reloading via the sheets fetcher is the
/// usual path and this one only appends the live point.
pub struct PriceScraper {
    client: Client,
}

impl PriceScraper {
    pub fn new() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("Mozilla/5.0"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(anyhow!("Scrape target {} returned {}", url, resp.status()));
        }
        Ok(resp.text().await?)
    }
}

impl Default for PriceScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DataSource for PriceScraper {
    fn name(&self) -> &str {
        "scrape"
    }

    async fn fetch_series(&self, series_id: &str) -> Result<Vec<SeriesPoint>> {
        let (url, selector) = match series_id {
            "iphone" => (
                "https://www.apple.com/shop/buy-iphone/iphone-15",
                "span.as-price-currentprice",
            ),
            "rav4" => (
                "https://www.edmunds.com/toyota/rav4/2024/xle/",
                "div.overview-cost__pricing-summary span",
            ),
            other => return Err(anyhow!("Unknown scrape target '{}'", other)),
        };

        println!("Scraping current price: {}", series_id);

        let html = self.fetch_page(url).await?;
        let price = extract_price(&html, selector)
            .ok_or_else(|| anyhow!("No price found on {} for '{}'", url, series_id))?;

        let today = chrono::Local::now().date_naive();
        Ok(vec![SeriesPoint::new(today, Some(price))])
    }
}

/// Pull the first element matching `selector` and parse its text as a dollar
/// amount ("$1,299.00" -> 1299.0).
fn extract_price(html: &str, selector: &str) -> Option<f64> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(selector).ok()?;

    let element = document.select(&selector).next()?;
    let text: String = element.text().collect::<String>();
    parse_dollar_amount(&text)
}

fn parse_dollar_amount(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_price_from_markup() {
        let html = r#"
            <html><body>
              <span class="as-price-currentprice"> $1,299.00 </span>
            </body></html>
        "#;
        let price = extract_price(html, "span.as-price-currentprice");
        assert_eq!(price, Some(1299.0));
    }

    #[test]
    fn test_extract_price_nested_span() {
        let html = r#"
            <div class="overview-cost__pricing-summary"><span>$29,825</span></div>
        "#;
        let price = extract_price(html, "div.overview-cost__pricing-summary span");
        assert_eq!(price, Some(29825.0));
    }

    #[test]
    fn test_extract_price_missing_element() {
        let html = "<html><body><p>no prices here</p></body></html>";
        assert_eq!(extract_price(html, "span.as-price-currentprice"), None);
    }

    #[test]
    fn test_parse_dollar_amount() {
        assert_eq!(parse_dollar_amount("$1,299.00"), Some(1299.0));
        assert_eq!(parse_dollar_amount("  $29,825 "), Some(29825.0));
        assert_eq!(parse_dollar_amount("call us"), None);
    }
}
