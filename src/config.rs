//! Dashboard Configuration
//! Fixed settings for the data source, page copy and window layout.

use std::path::PathBuf;
use std::time::Duration;

/// Source of the exchange rate table.
pub const SOURCE_URL: &str =
    "https://linked.aub.edu.lb/pkgcube/data/c788a60a4bccd0b261d0204f9f9e281b_20240905_152400.csv";

/// Raw exchange rate category.
pub const ITEM_LCU: &str = "Local currency units per USD";
/// Normalized exchange rate category.
pub const ITEM_SLC: &str = "Standard local currency units per USD";

pub const PAGE_TITLE: &str = "Lebanese Currency Exchange Rate to USD Over the Years";

pub const PAGE_DESCRIPTION: &str = "The data represents the fluctuation of the Lebanese \
currency exchange rate to the US Dollar (USD) over time, with points distributed between \
actual local currency units per USD and standardized local currency units per USD, \
highlighting key trends in currency volatility and value changes.";

/// Settings for one dashboard session.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub source_url: String,
    pub title: String,
    pub description: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    pub export_path: PathBuf,
    /// Delay between frames while an animated chart is playing
    pub frame_interval: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source_url: SOURCE_URL.to_string(),
            title: PAGE_TITLE.to_string(),
            description: PAGE_DESCRIPTION.to_string(),
            window_size: [1200.0, 900.0],
            min_window_size: [900.0, 600.0],
            export_path: PathBuf::from("lebanese_exchange_rates.html"),
            frame_interval: Duration::from_millis(500),
        }
    }
}
