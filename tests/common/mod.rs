#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crypto_dashboard_wasm::application::ViewRenderer;
use crypto_dashboard_wasm::domain::errors::{DataSourceResult, NetworkError};
use crypto_dashboard_wasm::domain::market_data::{
    AssetId, AssetSummary, HistoricalSeries, MarketDataRepository, PricePoint, TimeWindow, Timestamp,
};
use futures::channel::oneshot;

pub fn asset(id: &str, name: &str, symbol: &str) -> AssetSummary {
    AssetSummary {
        id: AssetId::from(id),
        name: name.to_string(),
        symbol: symbol.to_string(),
        image_url: format!("https://assets.example/{id}.png"),
        current_price: 100.0,
        price_change_24h_pct: 1.5,
        price_change_30d_pct: Some(-3.0),
        market_cap: 1.0e9,
    }
}

pub fn btc() -> AssetSummary {
    asset("bitcoin", "Bitcoin", "BTC")
}

pub fn eth() -> AssetSummary {
    asset("ethereum", "Ethereum", "ETH")
}

pub fn series(id: &str, window: TimeWindow, prices: &[f64]) -> HistoricalSeries {
    HistoricalSeries::new(
        AssetId::from(id),
        window,
        prices
            .iter()
            .enumerate()
            .map(|(i, &price)| PricePoint::new(Timestamp::from_millis(i as u64 * 86_400_000), price))
            .collect(),
    )
}

/// Chart stand-in; counts how many are alive
pub struct ChartToken {
    pub asset_id: String,
    pub window: TimeWindow,
    live: Rc<Cell<usize>>,
}

impl Drop for ChartToken {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

/// Records every call as one line
#[derive(Default)]
pub struct RecordingRenderer {
    pub calls: Vec<String>,
    pub live_charts: Rc<Cell<usize>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_calls(&mut self) -> Vec<String> {
        std::mem::take(&mut self.calls)
    }
}

fn ids(assets: &[AssetSummary]) -> String {
    assets.iter().map(|a| a.id.value()).collect::<Vec<_>>().join(", ")
}

impl ViewRenderer for RecordingRenderer {
    type Chart = ChartToken;

    fn render_catalog_grid(&mut self, assets: &[AssetSummary]) {
        self.calls.push(format!("grid: {}", ids(assets)));
    }

    fn render_search_overlay(&mut self, results: &[AssetSummary]) {
        self.calls.push(format!("overlay: {}", ids(results)));
    }

    fn hide_search_overlay(&mut self) {
        self.calls.push("hide overlay".to_string());
    }

    fn clear_search_input(&mut self) {
        self.calls.push("clear input".to_string());
    }

    fn render_asset_detail(&mut self, asset: &AssetSummary) {
        self.calls.push(format!("detail: {}", asset.id));
    }

    fn show_catalog_view(&mut self) {
        self.calls.push("catalog view".to_string());
    }

    fn render_chart(&mut self, series: &HistoricalSeries, window: TimeWindow) -> ChartToken {
        self.calls.push(format!("chart: {} {}d ({} points)", series.asset_id(), window.days(), series.len()));
        self.live_charts.set(self.live_charts.get() + 1);
        ChartToken {
            asset_id: series.asset_id().to_string(),
            window,
            live: Rc::clone(&self.live_charts),
        }
    }

    fn set_loading_visible(&mut self, visible: bool) {
        self.calls.push(format!("loading: {visible}"));
    }

    fn set_active_window_toggle(&mut self, window: TimeWindow) {
        self.calls.push(format!("toggle: {}", window.days()));
    }
}

/// History fetch waiting for the test to settle it
pub struct PendingFetch {
    pub asset_id: AssetId,
    pub window: TimeWindow,
    reply: oneshot::Sender<DataSourceResult<HistoricalSeries>>,
}

impl PendingFetch {
    pub fn resolve(self, result: DataSourceResult<HistoricalSeries>) {
        let _ = self.reply.send(result);
    }
}

/// Repository whose history fetches settle only when the test says so
pub struct ScriptedRepository {
    catalog: DataSourceResult<Vec<AssetSummary>>,
    pending: Rc<RefCell<Vec<PendingFetch>>>,
}

impl ScriptedRepository {
    pub fn new(catalog: DataSourceResult<Vec<AssetSummary>>) -> Self {
        Self {
            catalog,
            pending: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn pending(&self) -> Rc<RefCell<Vec<PendingFetch>>> {
        Rc::clone(&self.pending)
    }
}

/// Removes and returns the oldest pending fetch for `asset_id`
pub fn take_fetch(pending: &Rc<RefCell<Vec<PendingFetch>>>, asset_id: &str) -> PendingFetch {
    let mut pending = pending.borrow_mut();
    let index = pending
        .iter()
        .position(|fetch| fetch.asset_id.value() == asset_id)
        .unwrap_or_else(|| panic!("no pending fetch for {asset_id}"));
    pending.remove(index)
}

impl MarketDataRepository for ScriptedRepository {
    async fn list_top_assets(&self) -> DataSourceResult<Vec<AssetSummary>> {
        self.catalog.clone()
    }

    async fn get_historical_series(
        &self,
        asset_id: &AssetId,
        window: TimeWindow,
    ) -> DataSourceResult<HistoricalSeries> {
        let (reply, response) = oneshot::channel();
        self.pending.borrow_mut().push(PendingFetch {
            asset_id: asset_id.clone(),
            window,
            reply,
        });
        response
            .await
            .unwrap_or_else(|_| Err(NetworkError::RequestFailed("fetch abandoned".to_string()).into()))
    }
}
