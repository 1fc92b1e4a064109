use leptos::*;

use crate::application::ViewRenderer;
use crate::domain::{
    errors::AppError,
    formatting::format_price,
    logging::{LogComponent, get_logger},
    market_data::{AssetSummary, HistoricalSeries, TimeWindow},
};
use crate::infrastructure::rendering::{CanvasChart, ChartPlot};

pub const CHART_CANVAS_ID: &str = "price-chart";

/// Reactive view model. Components read these, the renderer writes them.
#[derive(Clone, Copy)]
pub struct ViewSignals {
    pub grid: RwSignal<Vec<AssetSummary>>,
    pub suggestions: RwSignal<Vec<AssetSummary>>,
    pub overlay_visible: RwSignal<bool>,
    pub query: RwSignal<String>,
    /// `Some` while the detail view is shown
    pub detail: RwSignal<Option<AssetSummary>>,
    pub loading: RwSignal<bool>,
    pub active_window: RwSignal<TimeWindow>,
    /// Set while a chart with points is on the canvas
    pub chart_plot: RwSignal<Option<ChartPlot>>,
    pub tooltip: RwSignal<Option<ChartTooltip>>,
}

impl ViewSignals {
    pub fn new() -> Self {
        Self {
            grid: create_rw_signal(Vec::new()),
            suggestions: create_rw_signal(Vec::new()),
            overlay_visible: create_rw_signal(false),
            query: create_rw_signal(String::new()),
            detail: create_rw_signal(None),
            loading: create_rw_signal(false),
            active_window: create_rw_signal(TimeWindow::default()),
            chart_plot: create_rw_signal(None),
            tooltip: create_rw_signal(None),
        }
    }

    /// Pointer over canvas column `canvas_x`, tooltip placed at CSS `anchor`
    pub fn hover_chart(&self, canvas_x: f64, anchor: (f64, f64)) {
        let tooltip = self
            .chart_plot
            .with_untracked(|plot| plot.as_ref().and_then(|plot| ChartTooltip::for_pointer(plot, canvas_x, anchor)));
        self.tooltip.set(tooltip);
    }

    pub fn leave_chart(&self) {
        self.tooltip.set(None);
    }
}

impl Default for ViewSignals {
    fn default() -> Self {
        Self::new()
    }
}

/// Hover readout anchored at the pointer
#[derive(Debug, Clone, PartialEq)]
pub struct ChartTooltip {
    pub left: f64,
    pub top: f64,
    pub text: String,
}

impl ChartTooltip {
    pub fn for_pointer(plot: &ChartPlot, canvas_x: f64, (left, top): (f64, f64)) -> Option<Self> {
        let point = plot.point_at(canvas_x)?;
        Some(Self {
            left,
            top,
            text: format!("price: {}", format_price(point.price)),
        })
    }
}

/// Drawn chart plus its hover data. Dropping it clears both.
pub struct LiveChart {
    _canvas: CanvasChart,
    chart_plot: RwSignal<Option<ChartPlot>>,
    tooltip: RwSignal<Option<ChartTooltip>>,
}

impl Drop for LiveChart {
    fn drop(&mut self) {
        // signals may already be disposed when the app unmounts
        let _ = self.chart_plot.try_set(None);
        let _ = self.tooltip.try_set(None);
    }
}

/// Signal-backed renderer; the chart goes straight to the canvas
pub struct LeptosViewRenderer {
    signals: ViewSignals,
    canvas_id: &'static str,
}

impl LeptosViewRenderer {
    pub fn new(signals: ViewSignals) -> Self {
        Self { signals, canvas_id: CHART_CANVAS_ID }
    }
}

impl ViewRenderer for LeptosViewRenderer {
    /// `None` when the canvas could not be drawn on
    type Chart = Option<LiveChart>;

    fn render_catalog_grid(&mut self, assets: &[AssetSummary]) {
        self.signals.grid.set(assets.to_vec());
    }

    fn render_search_overlay(&mut self, results: &[AssetSummary]) {
        self.signals.suggestions.set(results.to_vec());
        self.signals.overlay_visible.set(true);
    }

    fn hide_search_overlay(&mut self) {
        self.signals.overlay_visible.set(false);
    }

    fn clear_search_input(&mut self) {
        self.signals.query.set(String::new());
    }

    fn render_asset_detail(&mut self, asset: &AssetSummary) {
        self.signals.detail.set(Some(asset.clone()));
    }

    fn show_catalog_view(&mut self) {
        self.signals.detail.set(None);
    }

    fn render_chart(&mut self, series: &HistoricalSeries, window: TimeWindow) -> Self::Chart {
        let canvas = CanvasChart::draw(self.canvas_id, series, window)
            .map_err(|e| {
                get_logger().error(
                    LogComponent::Presentation("ViewRenderer"),
                    &format!("❌ Chart render failed: {}", AppError::from(e)),
                )
            })
            .ok()?;
        self.signals.chart_plot.set(canvas.plot().cloned());
        Some(LiveChart {
            _canvas: canvas,
            chart_plot: self.signals.chart_plot,
            tooltip: self.signals.tooltip,
        })
    }

    fn set_loading_visible(&mut self, visible: bool) {
        self.signals.loading.set(visible);
    }

    fn set_active_window_toggle(&mut self, window: TimeWindow) {
        self.signals.active_window.set(window);
    }
}
