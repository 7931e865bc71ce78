use econ_dashboard::config::ChartConfig;
use econ_dashboard::loader::{self, Settings};
use econ_dashboard::pipeline;
use econ_dashboard::registry::Registry;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let settings = Settings::from_env();

    println!("Loading all series and policy events...");
    let (store, events) = match loader::load_all(&settings).await {
        Ok(loaded) => loaded,
        Err(e) => {
            // Load failures are terminal for the session; nothing partial is
            // shown, per the all-or-nothing load contract.
            eprintln!("Initial load failed: {:#}", e);
            std::process::exit(1);
        }
    };

    let config = ChartConfig::for_series(&Registry::labels());
    let view = pipeline::build_dashboard(&store, &events, &config);

    println!("\n========= FRAME SUMMARY =========\n");
    println!("Date axis: {} rows", view.frame.dates.len());
    if let (Some(first), Some(last)) = (view.frame.dates.first(), view.frame.dates.last()) {
        println!("Range:     {} - {}", first, last);
    }

    println!("\n{:<20} | {:>8} | {:>8} | {:>12}", "Series", "Points", "Gaps", "Latest");
    println!("{}", "-".repeat(58));
    let mut labels: Vec<_> = view.frame.columns.keys().collect();
    labels.sort();
    for label in labels {
        let column = &view.frame.columns[label];
        let present = column.iter().flatten().count();
        let latest = column
            .iter()
            .rev()
            .flatten()
            .next()
            .map(|v| format!("{:.2}", v))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<20} | {:>8} | {:>8} | {:>12}",
            label,
            present,
            column.len() - present,
            latest
        );
    }

    if let Some(anchor) = &config.anchor {
        println!("\n========= CORRELATION vs {} =========\n", anchor);
        println!("{:<20} | {:>8} | {:>8}", "Series", "r", "n");
        println!("{}", "-".repeat(42));
        for entry in &view.correlations {
            let r = entry
                .r
                .map(|r| format!("{:.4}", r))
                .unwrap_or_else(|| "-".to_string());
            println!("{:<20} | {:>8} | {:>8}", entry.series, r, entry.n);
        }
    }

    println!("\n========= POLICY EVENTS =========\n");
    println!("{} events in range", view.events.len());
    for event in view.events.iter().rev().take(10) {
        println!("  {} [{}] {}", event.date, event.agency, event.label());
    }

    println!("\nDone.");
}
