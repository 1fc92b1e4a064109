use std::cell::RefCell;
use std::rc::Rc;

use super::controller::{DashboardController, HistoryOutcome, HistoryRequest};
use super::view_renderer::ViewRenderer;
use crate::config::DashboardConfig;
use crate::domain::{
    logging::{LogComponent, get_logger},
    market_data::{AssetId, AssetSummary, MarketDataRepository, TimeWindow},
};

/// Async driver around [`DashboardController`].
///
/// Each user action runs its synchronous transition, awaits the repository,
/// then hands the result back. The controller is never borrowed across an
/// `.await`, so any number of actions may interleave.
pub struct Dashboard<R, V: ViewRenderer> {
    controller: Rc<RefCell<DashboardController<V>>>,
    repository: Rc<R>,
}

impl<R, V: ViewRenderer> Clone for Dashboard<R, V> {
    fn clone(&self) -> Self {
        Self {
            controller: Rc::clone(&self.controller),
            repository: Rc::clone(&self.repository),
        }
    }
}

impl<R: MarketDataRepository, V: ViewRenderer> Dashboard<R, V> {
    pub fn new(repository: R, renderer: V, config: &DashboardConfig) -> Self {
        Self {
            controller: Rc::new(RefCell::new(DashboardController::new(renderer, config))),
            repository: Rc::new(repository),
        }
    }

    /// Loads the catalog and renders the grid
    pub async fn start(&self) {
        get_logger().info(LogComponent::Application("Dashboard"), "🚀 Loading catalog...");
        let result = self.repository.list_top_assets().await;
        self.controller.borrow_mut().apply_catalog(result);
    }

    pub fn search(&self, query: &str) {
        self.controller.borrow_mut().search(query);
    }

    pub fn dismiss_overlay(&self) {
        self.controller.borrow_mut().dismiss_overlay();
    }

    pub async fn select_asset(&self, asset: AssetSummary) -> HistoryOutcome {
        let request = self.controller.borrow_mut().select_asset(asset);
        self.fetch_history(request).await
    }

    /// `None` when the id is not in the catalog
    pub async fn select_asset_by_id(&self, asset_id: &AssetId) -> Option<HistoryOutcome> {
        let request = self.controller.borrow_mut().select_asset_by_id(asset_id)?;
        Some(self.fetch_history(request).await)
    }

    /// `None` when nothing is selected and no fetch was needed
    pub async fn change_window(&self, window: TimeWindow) -> Option<HistoryOutcome> {
        let request = self.controller.borrow_mut().change_window(window)?;
        Some(self.fetch_history(request).await)
    }

    pub fn return_to_catalog(&self) {
        self.controller.borrow_mut().return_to_catalog();
    }

    /// Read access for views and tests
    pub fn with_controller<T>(&self, f: impl FnOnce(&DashboardController<V>) -> T) -> T {
        f(&self.controller.borrow())
    }

    async fn fetch_history(&self, request: HistoryRequest) -> HistoryOutcome {
        let result = self
            .repository
            .get_historical_series(&request.asset_id, request.window)
            .await;
        self.controller.borrow_mut().apply_history(request, result)
    }
}
