use crate::domain::logging::LogLevel;
use crate::domain::market_data::{DEFAULT_SUGGESTION_LIMIT, TimeWindow};

pub const COINGECKO_API_BASE: &str = "https://api.coingecko.com/api/v3";

/// Dashboard settings. Built in code; there is no config file or environment lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub api_base_url: String,
    /// Assets requested from the markets endpoint (single page)
    pub catalog_page_size: u32,
    pub suggestion_limit: usize,
    /// Cards on the landing grid
    pub grid_card_count: usize,
    pub default_window: TimeWindow,
    pub log_level: LogLevel,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: COINGECKO_API_BASE.to_string(),
            catalog_page_size: 100,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            grid_card_count: 9,
            default_window: TimeWindow::ThirtyDays,
            log_level: LogLevel::Info,
        }
    }
}

impl DashboardConfig {
    pub fn development() -> Self {
        Self { log_level: LogLevel::Debug, ..Self::default() }
    }

    pub fn production() -> Self {
        Self::default()
    }

    /// Debug builds log verbosely
    pub fn for_build() -> Self {
        if cfg!(debug_assertions) { Self::development() } else { Self::production() }
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}
