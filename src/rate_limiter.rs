use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;

pub struct RateLimiter;

impl RateLimiter {
    /// Wait an appropriate duration before hitting the given source. Jitter on
    /// the government APIs keeps the sequential bulk load from looking like a
    /// scripted burst.
    pub async fn wait(source: &str) {
        match source.to_uppercase().as_str() {
            "FRED" => {
                let delay = {
                    let mut rng = rand::thread_rng();
                    rng.gen_range(500..1500)
                };
                sleep(Duration::from_millis(delay)).await;
            }
            "EIA" | "FEDERAL_REGISTER" => {
                let delay = {
                    let mut rng = rand::thread_rng();
                    rng.gen_range(300..800)
                };
                sleep(Duration::from_millis(delay)).await;
            }
            _ => {
                // Scrapes and sheet reads get a minimal pause.
                sleep(Duration::from_millis(100)).await;
            }
        }
    }
}
