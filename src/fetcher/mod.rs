use crate::models::SeriesPoint;
use anyhow::Result;
use async_trait::async_trait;

pub mod eia;
pub mod federal_register;
pub mod fred;
pub mod scrape;
pub mod sheets;

#[async_trait]
pub trait DataSource: Send + Sync {
    fn name(&self) -> &str;
    async fn fetch_series(&self, series_id: &str) -> Result<Vec<SeriesPoint>>;
}
