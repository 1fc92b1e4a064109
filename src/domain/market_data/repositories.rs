use crate::domain::errors::DataSourceResult;
use crate::domain::market_data::{AssetId, AssetSummary, HistoricalSeries, TimeWindow};

/// Read-only market data source.
///
/// Futures are not `Send`: everything runs on the browser event loop.
#[allow(async_fn_in_trait)]
pub trait MarketDataRepository {
    /// Top assets by market cap, one fixed page
    async fn list_top_assets(&self) -> DataSourceResult<Vec<AssetSummary>>;

    /// Price history of one asset over one window
    async fn get_historical_series(
        &self,
        asset_id: &AssetId,
        window: TimeWindow,
    ) -> DataSourceResult<HistoricalSeries>;
}
