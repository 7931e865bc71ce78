use crate::fetcher::eia::EiaFetcher;
use crate::fetcher::federal_register::FederalRegisterFetcher;
use crate::fetcher::fred::FredFetcher;
use crate::fetcher::scrape::PriceScraper;
use crate::fetcher::sheets::SheetsFetcher;
use crate::fetcher::DataSource;
use crate::models::PolicyEvent;
use crate::rate_limiter::RateLimiter;
use crate::registry::{Registry, SourceType};
use crate::store::SeriesStore;
use anyhow::{anyhow, Context, Result};
use std::collections::HashSet;

/// Events are tracked from this date onwards when polling the Federal
/// Register directly.
const EVENTS_SINCE: &str = "2021-01-01";

/// Environment-driven settings for the initial load.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub fred_api_key: String,
    pub eia_api_key: String,
    /// When set, every series and the event list are read from the published
    /// tracking spreadsheet instead of the upstream APIs.
    pub sheet_id: Option<String>,
}

impl Settings {
    /// Read settings from the environment (`dotenvy` is the caller's job).
    pub fn from_env() -> Self {
        Self {
            fred_api_key: std::env::var("FRED_API_KEY").unwrap_or_default(),
            eia_api_key: std::env::var("EIA_API_KEY").unwrap_or_default(),
            sheet_id: std::env::var("SHEET_ID").ok().filter(|s| !s.is_empty()),
        }
    }
}

/// Load every registered series and the event list, sequentially and
/// all-or-nothing: the first failure aborts the whole load so callers never
/// see a partially populated store. No retries, no timeouts — a stalled fetch
/// stalls the load, and a failed one requires a manual rerun.
pub async fn load_all(settings: &Settings) -> Result<(SeriesStore, Vec<PolicyEvent>)> {
    match &settings.sheet_id {
        Some(sheet_id) => load_from_sheet(sheet_id).await,
        None => load_from_apis(settings).await,
    }
}

async fn load_from_sheet(sheet_id: &str) -> Result<(SeriesStore, Vec<PolicyEvent>)> {
    let fetcher = SheetsFetcher::new(sheet_id.to_string());
    let mut store = SeriesStore::new();

    for meta in Registry::all() {
        RateLimiter::wait("SHEETS").await;
        let points = fetcher
            .fetch_series(meta.slug)
            .await
            .with_context(|| format!("Loading series '{}' from sheet", meta.label))?;
        println!("  > {}: {} points", meta.label, points.len());
        store.insert(meta.label, points);
    }

    RateLimiter::wait("SHEETS").await;
    let events = fetcher.fetch_events().await.context("Loading policy events from sheet")?;
    println!("  > Policy events: {}", events.len());

    Ok((store, events))
}

async fn load_from_apis(settings: &Settings) -> Result<(SeriesStore, Vec<PolicyEvent>)> {
    let fred = FredFetcher::new(settings.fred_api_key.clone());
    let eia = EiaFetcher::new(settings.eia_api_key.clone());
    let scraper = PriceScraper::new();
    let mut store = SeriesStore::new();

    for meta in Registry::all() {
        let (fetcher, series_id, throttle_key): (&dyn DataSource, &str, &str) = match meta.source {
            SourceType::Fred => (&fred, meta.source_symbol, "FRED"),
            SourceType::Eia => (&eia, meta.source_symbol, "EIA"),
            SourceType::Scrape => (&scraper, meta.source_symbol, "SCRAPE"),
            SourceType::Sheet => {
                return Err(anyhow!(
                    "Series '{}' is sheet-only but no SHEET_ID is configured",
                    meta.label
                ))
            }
        };

        RateLimiter::wait(throttle_key).await;
        let points = fetcher
            .fetch_series(series_id)
            .await
            .with_context(|| format!("Loading series '{}'", meta.label))?;
        println!("  > {}: {} points", meta.label, points.len());
        store.insert(meta.label, points);
    }

    RateLimiter::wait("FEDERAL_REGISTER").await;
    let today = chrono::Local::now().date_naive().to_string();
    let events = FederalRegisterFetcher::new()
        .fetch_events(EVENTS_SINCE, &today, &HashSet::new())
        .await
        .context("Loading policy events")?;
    println!("  > Policy events: {}", events.len());

    Ok((store, events))
}
