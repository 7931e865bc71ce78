use once_cell::sync::Lazy;
use serde::Serialize;

/// Where a series' rows come from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SourceType {
    Fred,
    Eia,
    /// Published Google Sheets tab, fetched as CSV.
    Sheet,
    /// Retail page scrape producing one point per run.
    Scrape,
}

/// Static description of one configured series.
///
/// `value_fields` is the ordered list of candidate column names tried when
/// projecting a source row to a value — the first present, parseable field
/// wins. This replaces the implicit `a || b || c` fallback chain the old
/// dashboard used.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesMetadata {
    pub slug: &'static str,
    /// Display label; also the column name in the frame.
    pub label: &'static str,
    pub source: SourceType,
    /// Source-specific ID: FRED series ID, EIA facet, or scrape target key.
    pub source_symbol: &'static str,
    /// Sheet tab carrying this series when loading from the published sheet.
    pub sheet_tab: &'static str,
    pub value_fields: &'static [&'static str],
}

static SERIES: Lazy<Vec<SeriesMetadata>> = Lazy::new(|| {
    vec![
        SeriesMetadata {
            slug: "eggs",
            label: "Eggs",
            source: SourceType::Fred,
            source_symbol: "APU0000708111",
            sheet_tab: "Egg_Prices",
            value_fields: &["Price (USD)"],
        },
        SeriesMetadata {
            slug: "gas",
            label: "Gas",
            source: SourceType::Eia,
            source_symbol: "EMM_EPMR_PTE_SCA_DPG",
            sheet_tab: "Gas_Prices",
            value_fields: &["Price (USD per gallon)", "California"],
        },
        SeriesMetadata {
            slug: "iphone",
            label: "iPhone",
            source: SourceType::Scrape,
            source_symbol: "iphone",
            sheet_tab: "iPhone_Prices",
            value_fields: &["Price (USD)"],
        },
        SeriesMetadata {
            slug: "rav4",
            label: "RAV4",
            source: SourceType::Scrape,
            source_symbol: "rav4",
            sheet_tab: "Car_Prices",
            value_fields: &["Price (USD)"],
        },
        SeriesMetadata {
            slug: "interest_rate",
            label: "Interest Rate (%)",
            source: SourceType::Fred,
            source_symbol: "FEDFUNDS",
            sheet_tab: "Interest_Rates",
            value_fields: &["Rate (%)", "Fed Funds Rate"],
        },
        SeriesMetadata {
            slug: "sp500",
            label: "S&P 500",
            source: SourceType::Fred,
            source_symbol: "SP500",
            sheet_tab: "Stock_Market",
            value_fields: &["Close", "S&P 500"],
        },
    ]
});

pub struct Registry;

impl Registry {
    pub fn all() -> &'static [SeriesMetadata] {
        &SERIES
    }

    pub fn get(slug: &str) -> Option<&'static SeriesMetadata> {
        SERIES.iter().find(|m| m.slug == slug)
    }

    pub fn labels() -> Vec<&'static str> {
        SERIES.iter().map(|m| m.label).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs_unique() {
        let mut slugs: Vec<_> = Registry::all().iter().map(|m| m.slug).collect();
        let before = slugs.len();
        slugs.sort();
        slugs.dedup();
        assert_eq!(before, slugs.len());
    }

    #[test]
    fn test_every_series_has_candidate_fields() {
        for meta in Registry::all() {
            assert!(!meta.value_fields.is_empty(), "{} has no value fields", meta.slug);
        }
    }

    #[test]
    fn test_lookup_by_slug() {
        let eggs = Registry::get("eggs").unwrap();
        assert_eq!(eggs.label, "Eggs");
        assert_eq!(eggs.source_symbol, "APU0000708111");
        assert!(Registry::get("nope").is_none());
    }
}
