use super::view_renderer::ViewRenderer;
use crate::config::DashboardConfig;
use crate::domain::{
    errors::{AppError, DataSourceError, DataSourceResult, NetworkError},
    logging::{LogComponent, LogEntry, LogLevel, get_logger},
    market_data::{AssetId, AssetSearchService, AssetSummary, Catalog, HistoricalSeries, TimeWindow},
    state::{DashboardState, Phase},
};

/// History fetch the controller wants performed, stamped with the generation
/// it was issued in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub asset_id: AssetId,
    pub window: TimeWindow,
    pub generation: u64,
}

/// What happened to a settled history fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryOutcome {
    Applied,
    /// Superseded by a later selection or window change
    Discarded,
    Failed,
}

/// The dashboard state machine.
///
/// Owns the state, the renderer and the one live chart. Every method is one
/// synchronous transition; fetching happens outside, between
/// [`select_asset`](Self::select_asset) / [`change_window`](Self::change_window)
/// and [`apply_history`](Self::apply_history).
pub struct DashboardController<V: ViewRenderer> {
    state: DashboardState,
    renderer: V,
    chart: Option<V::Chart>,
    search: AssetSearchService,
    grid_card_count: usize,
}

impl<V: ViewRenderer> DashboardController<V> {
    pub fn new(mut renderer: V, config: &DashboardConfig) -> Self {
        renderer.set_active_window_toggle(config.default_window);
        renderer.set_loading_visible(false);
        renderer.show_catalog_view();

        Self {
            state: DashboardState::new(config.default_window),
            renderer,
            chart: None,
            search: AssetSearchService::new(config.suggestion_limit),
            grid_card_count: config.grid_card_count,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn renderer(&self) -> &V {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut V {
        &mut self.renderer
    }

    pub fn has_chart(&self) -> bool {
        self.chart.is_some()
    }

    /// Catalog fetch settled. Success replaces the snapshot wholesale.
    pub fn apply_catalog(&mut self, result: DataSourceResult<Vec<AssetSummary>>) {
        match result {
            Ok(assets) if assets.is_empty() => {
                self.record_failure(DataSourceError::EmptyResult("catalog".to_string()), "catalog");
            }
            Ok(assets) => {
                self.state.catalog = Catalog::from_assets(assets);
                get_logger().info(
                    LogComponent::Application("Controller"),
                    &format!("📊 Catalog ready: {} assets", self.state.catalog.len()),
                );
                self.renderer
                    .render_catalog_grid(self.state.catalog.top(self.grid_card_count));
            }
            Err(error) => self.record_failure(error, "catalog"),
        }
    }

    /// Search box changed. Returns the suggestions shown (empty when hidden).
    pub fn search(&mut self, query: &str) -> Vec<AssetSummary> {
        let results = self.search.search(self.state.catalog.assets(), query);
        if results.is_empty() {
            self.state.search_open = false;
            self.renderer.hide_search_overlay();
        } else {
            self.state.search_open = true;
            self.renderer.render_search_overlay(&results);
        }
        results
    }

    /// Click landed outside the overlay and the search box
    pub fn dismiss_overlay(&mut self) {
        if self.state.search_open {
            self.state.search_open = false;
            self.renderer.hide_search_overlay();
        }
    }

    /// Asset picked from the overlay or the grid.
    ///
    /// Re-picking the current selection keeps the selection value and the
    /// stored series; the returned request still supersedes any pending one.
    pub fn select_asset(&mut self, asset: AssetSummary) -> HistoryRequest {
        let asset_id = asset.id.clone();
        if self.state.selected_id() != Some(&asset_id) {
            crate::log_debug!(
                LogComponent::Application("Controller"),
                "Selecting {} ({})",
                asset.name,
                asset.id
            );
            self.release_chart();
            self.state.series = None;
            self.state.phase = Phase::Idle;
            self.state.selection = Some(asset);
        }

        self.state.search_open = false;
        self.renderer.clear_search_input();
        self.renderer.hide_search_overlay();
        if let Some(selected) = &self.state.selection {
            self.renderer.render_asset_detail(selected);
        }
        self.begin_history_fetch(asset_id)
    }

    /// Looks the asset up in the current catalog
    pub fn select_asset_by_id(&mut self, asset_id: &AssetId) -> Option<HistoryRequest> {
        let asset = self.state.catalog.find(asset_id).cloned();
        if asset.is_none() {
            get_logger().warn(
                LogComponent::Application("Controller"),
                &format!("Asset '{}' is not in the catalog", asset_id),
            );
        }
        asset.map(|asset| self.select_asset(asset))
    }

    /// Window toggle clicked. Refetches only when an asset is selected.
    pub fn change_window(&mut self, window: TimeWindow) -> Option<HistoryRequest> {
        self.state.window = window;
        self.renderer.set_active_window_toggle(window);

        match self.state.selected_id().cloned() {
            Some(asset_id) => Some(self.begin_history_fetch(asset_id)),
            None => {
                self.state.bump_generation();
                None
            }
        }
    }

    /// History fetch settled. Only the current generation touches state or view.
    pub fn apply_history(
        &mut self,
        request: HistoryRequest,
        result: DataSourceResult<HistoricalSeries>,
    ) -> HistoryOutcome {
        if request.generation != self.state.generation {
            crate::log_debug!(
                LogComponent::Application("Controller"),
                "Discarding stale history for {} ({} days), generation {} < {}",
                request.asset_id,
                request.window.days(),
                request.generation,
                self.state.generation
            );
            return HistoryOutcome::Discarded;
        }

        let result = result.and_then(|series| {
            if series.is_for(&request.asset_id, request.window) {
                Ok(series)
            } else {
                Err(NetworkError::InvalidPayload(format!(
                    "series for {} does not match request for {}",
                    series.asset_id(),
                    request.asset_id
                ))
                .into())
            }
        });

        let outcome = match result {
            Ok(series) => {
                self.release_chart();
                self.chart = Some(self.renderer.render_chart(&series, request.window));
                self.state.series = Some(series);
                self.state.phase = Phase::Loaded;
                HistoryOutcome::Applied
            }
            Err(error) => {
                self.state.phase = self.state.phase_before_fetch;
                self.record_failure(error, "history");
                HistoryOutcome::Failed
            }
        };
        self.renderer.set_loading_visible(false);
        outcome
    }

    /// Back to the grid. Invalidates any in-flight history fetch.
    pub fn return_to_catalog(&mut self) {
        if self.state.selection.take().is_none() {
            return;
        }
        self.state.bump_generation();
        self.release_chart();
        self.state.series = None;
        self.state.phase = Phase::Idle;
        self.renderer.set_loading_visible(false);
        self.renderer.show_catalog_view();
    }

    fn begin_history_fetch(&mut self, asset_id: AssetId) -> HistoryRequest {
        let generation = self.state.bump_generation();
        if self.state.phase != Phase::Loading {
            self.state.phase_before_fetch = self.state.phase;
        }
        self.state.phase = Phase::Loading;
        self.renderer.set_loading_visible(true);

        HistoryRequest {
            asset_id,
            window: self.state.window,
            generation,
        }
    }

    /// The previous chart is gone before a new one is drawn
    fn release_chart(&mut self) {
        drop(self.chart.take());
    }

    fn record_failure(&mut self, error: DataSourceError, operation: &str) {
        let mut entry = LogEntry::new(
            LogLevel::Error,
            LogComponent::Application("Controller"),
            format!("❌ {} fetch failed: {}", operation, AppError::from(error.clone())),
        );
        if let Some(asset_id) = self.state.selected_id() {
            entry = entry.with_field("asset", asset_id);
        }
        get_logger().log(entry.with_field("generation", self.state.generation));
        self.state.last_failure = Some(error);
    }
}
