use crate::domain::market_data::{AssetSummary, HistoricalSeries, TimeWindow};

/// Everything the controller asks of the UI surface.
///
/// Implementations are stateless projections of what they are handed; the
/// controller decides when each call happens.
pub trait ViewRenderer {
    /// Live chart resource. Dropping it releases the chart.
    type Chart;

    fn render_catalog_grid(&mut self, assets: &[AssetSummary]);
    fn render_search_overlay(&mut self, results: &[AssetSummary]);
    fn hide_search_overlay(&mut self);
    fn clear_search_input(&mut self);

    /// Shows the detail panel for `asset` and hides the grid
    fn render_asset_detail(&mut self, asset: &AssetSummary);
    /// Shows the grid and hides the detail panel
    fn show_catalog_view(&mut self);

    fn render_chart(&mut self, series: &HistoricalSeries, window: TimeWindow) -> Self::Chart;
    fn set_loading_visible(&mut self, visible: bool);
    fn set_active_window_toggle(&mut self, window: TimeWindow);
}
