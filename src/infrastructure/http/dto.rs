use crate::domain::errors::{DataSourceError, DataSourceResult, NetworkError};
use crate::domain::logging::{LogComponent, get_logger};
use crate::domain::market_data::{AssetId, AssetSummary, HistoricalSeries, PricePoint, Timestamp, TimeWindow};
use serde::Deserialize;

/// Row of `GET /coins/markets`. The sparkline payload is requested but never read.
#[derive(Debug, Deserialize)]
pub struct CoinMarketDto {
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_30d_in_currency: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
}

/// Body of `GET /coins/{id}/market_chart`
#[derive(Debug, Deserialize)]
pub struct MarketChartDto {
    #[serde(default)]
    pub prices: Vec<(f64, f64)>,
}

impl CoinMarketDto {
    /// `None` when the row has no usable price
    pub fn to_domain_asset(&self) -> Option<AssetSummary> {
        let id = AssetId::new(self.id.clone()).ok()?;
        let current_price = self.current_price.filter(|price| price.is_finite())?;

        Some(AssetSummary {
            id,
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            image_url: self.image.clone().unwrap_or_default(),
            current_price,
            price_change_24h_pct: self.price_change_percentage_24h.unwrap_or(0.0),
            price_change_30d_pct: self.price_change_percentage_30d_in_currency,
            market_cap: self.market_cap.unwrap_or(0.0),
        })
    }
}

impl MarketChartDto {
    pub fn to_domain_series(&self, asset_id: &AssetId, window: TimeWindow) -> DataSourceResult<HistoricalSeries> {
        if self.prices.is_empty() {
            return Err(DataSourceError::EmptyResult(format!(
                "no prices for {} over {} days",
                asset_id,
                window.days()
            )));
        }

        let mut points = Vec::with_capacity(self.prices.len());
        for &(timestamp, price) in &self.prices {
            if !timestamp.is_finite() || timestamp < 0.0 || !price.is_finite() {
                return Err(NetworkError::InvalidPayload(format!(
                    "bad price point [{}, {}]",
                    timestamp, price
                ))
                .into());
            }
            points.push(PricePoint::new(Timestamp::from_millis(timestamp as u64), price));
        }

        Ok(HistoricalSeries::new(asset_id.clone(), window, points))
    }
}

/// Decode a markets page into catalog rows, skipping rows without a price.
pub fn decode_catalog(body: &str) -> DataSourceResult<Vec<AssetSummary>> {
    let rows: Vec<CoinMarketDto> = serde_json::from_str(body)
        .map_err(|e| NetworkError::InvalidPayload(format!("Failed to parse markets JSON: {e}")))?;

    let mut assets = Vec::with_capacity(rows.len());
    for row in &rows {
        match row.to_domain_asset() {
            Some(asset) => assets.push(asset),
            None => get_logger().warn(
                LogComponent::Infrastructure("CoinGecko"),
                &format!("Skipping market row '{}' without a usable price", row.id),
            ),
        }
    }

    if assets.is_empty() {
        return Err(DataSourceError::EmptyResult("markets page has no assets".to_string()));
    }
    Ok(assets)
}

pub fn decode_market_chart(body: &str, asset_id: &AssetId, window: TimeWindow) -> DataSourceResult<HistoricalSeries> {
    let chart: MarketChartDto = serde_json::from_str(body)
        .map_err(|e| NetworkError::InvalidPayload(format!("Failed to parse market_chart JSON: {e}")))?;
    chart.to_domain_series(asset_id, window)
}
