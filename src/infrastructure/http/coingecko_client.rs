use super::dto::{decode_catalog, decode_market_chart};
use crate::config::{COINGECKO_API_BASE, DashboardConfig};
use crate::domain::errors::{DataSourceResult, NetworkError};
use crate::domain::logging::{LogComponent, LogEntry, LogLevel, get_logger};
use crate::domain::market_data::{AssetId, AssetSummary, HistoricalSeries, MarketDataRepository, TimeWindow};
use gloo_net::http::Request;

/// REST client for the CoinGecko v3 API
#[derive(Debug, Clone)]
pub struct CoinGeckoHttpClient {
    base_url: String,
    page_size: u32,
}

impl Default for CoinGeckoHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CoinGeckoHttpClient {
    pub fn new() -> Self {
        Self {
            base_url: COINGECKO_API_BASE.to_string(),
            page_size: 100,
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            page_size: config.catalog_page_size,
        }
    }

    pub fn markets_url(&self) -> String {
        format!(
            "{}/coins/markets?vs_currency=usd&order=market_cap_desc&per_page={}&page=1&sparkline=true&price_change_percentage=7d,30d",
            self.base_url, self.page_size
        )
    }

    pub fn market_chart_url(&self, asset_id: &AssetId, window: TimeWindow) -> String {
        format!(
            "{}/coins/{}/market_chart?vs_currency=usd&days={}",
            self.base_url,
            asset_id.value(),
            window.days_param()
        )
    }

    async fn fetch_text(&self, url: &str) -> DataSourceResult<String> {
        get_logger().debug(
            LogComponent::Infrastructure("CoinGecko"),
            &format!("📡 GET {url}"),
        );

        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| NetworkError::RequestFailed(format!("Failed to send request: {e:?}")))?;

        if !response.ok() {
            return Err(NetworkError::HttpStatus {
                status: response.status(),
                status_text: response.status_text(),
            }
            .into());
        }

        Ok(response
            .text()
            .await
            .map_err(|e| NetworkError::RequestFailed(format!("Failed to read body: {e:?}")))?)
    }
}

impl MarketDataRepository for CoinGeckoHttpClient {
    async fn list_top_assets(&self) -> DataSourceResult<Vec<AssetSummary>> {
        let body = self.fetch_text(&self.markets_url()).await?;
        let assets = decode_catalog(&body)?;

        get_logger().info(
            LogComponent::Infrastructure("CoinGecko"),
            &format!("✅ Loaded {} catalog assets", assets.len()),
        );
        Ok(assets)
    }

    async fn get_historical_series(
        &self,
        asset_id: &AssetId,
        window: TimeWindow,
    ) -> DataSourceResult<HistoricalSeries> {
        let body = self.fetch_text(&self.market_chart_url(asset_id, window)).await?;
        let series = decode_market_chart(&body, asset_id, window)?;

        get_logger().log(
            LogEntry::new(
                LogLevel::Info,
                LogComponent::Infrastructure("CoinGecko"),
                format!("✅ Loaded {} price points", series.len()),
            )
            .with_field("asset", asset_id)
            .with_field("days", window.days()),
        );
        Ok(series)
    }
}
