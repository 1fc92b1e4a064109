use crate::domain::{
    errors::{UiError, UiResult},
    formatting::format_axis_price,
    logging::{LogComponent, get_logger},
    market_data::{HistoricalSeries, PricePoint, TimeWindow},
};
use crate::time_utils::{axis_ticks, format_axis_label};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const LINE_COLOR: &str = "#A855F7";
const FILL_COLOR: &str = "rgba(168, 85, 247, 0.1)";
const GRID_COLOR: &str = "rgba(55, 65, 81, 0.5)";
const TICK_COLOR: &str = "#9CA3AF";
const PRICE_TICKS: usize = 5;

/// Plot area inside the canvas and the projection from (time, price) to pixels
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub axis_space: f64,
    min_time: f64,
    max_time: f64,
    min_price: f64,
    max_price: f64,
}

impl ChartGeometry {
    /// `None` for an empty series
    pub fn fit(series: &HistoricalSeries, width: f64, height: f64) -> Option<Self> {
        let (min_price, max_price) = series.price_range()?;
        let (first, last) = series.time_range()?;
        Some(Self {
            width,
            height,
            padding: 20.0,
            axis_space: 70.0,
            min_time: first.as_f64(),
            max_time: last.as_f64(),
            min_price,
            max_price,
        })
    }

    pub fn plot_left(&self) -> f64 {
        self.padding + self.axis_space
    }

    fn plot_width(&self) -> f64 {
        (self.width - self.plot_left() - self.padding).max(1.0)
    }

    pub fn plot_bottom(&self) -> f64 {
        self.height - self.padding - 20.0
    }

    fn plot_height(&self) -> f64 {
        (self.plot_bottom() - self.padding).max(1.0)
    }

    pub fn x(&self, timestamp: f64) -> f64 {
        let span = self.max_time - self.min_time;
        let ratio = if span > 0.0 { (timestamp - self.min_time) / span } else { 0.5 };
        self.plot_left() + ratio * self.plot_width()
    }

    pub fn plot_right(&self) -> f64 {
        self.plot_left() + self.plot_width()
    }

    /// Inverse of [`x`](Self::x); `None` left or right of the plot area
    pub fn time_at(&self, x: f64) -> Option<f64> {
        if x < self.plot_left() || x > self.plot_right() {
            return None;
        }
        let ratio = (x - self.plot_left()) / self.plot_width();
        Some(self.min_time + ratio * (self.max_time - self.min_time))
    }

    /// Y grows downwards on canvas
    pub fn y(&self, price: f64) -> f64 {
        let span = self.max_price - self.min_price;
        let ratio = if span > 0.0 { (price - self.min_price) / span } else { 0.5 };
        self.plot_bottom() - ratio * self.plot_height()
    }

    /// Evenly spaced price levels from min to max
    pub fn price_levels(&self, count: usize) -> Vec<f64> {
        if count < 2 {
            return vec![self.min_price];
        }
        let step = (self.max_price - self.min_price) / (count - 1) as f64;
        (0..count).map(|i| self.min_price + step * i as f64).collect()
    }
}

/// Projection and points of a drawn chart, for mapping the pointer back to a price
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPlot {
    geometry: ChartGeometry,
    points: Vec<PricePoint>,
}

impl ChartPlot {
    pub fn new(geometry: ChartGeometry, series: &HistoricalSeries) -> Self {
        Self { geometry, points: series.points().to_vec() }
    }

    /// Point closest in time to canvas column `x`
    pub fn point_at(&self, x: f64) -> Option<PricePoint> {
        let time = self.geometry.time_at(x)?;
        self.points
            .iter()
            .min_by(|a, b| {
                let da = (a.timestamp.as_f64() - time).abs();
                let db = (b.timestamp.as_f64() - time).abs();
                da.total_cmp(&db)
            })
            .copied()
    }
}

/// One live line chart drawn on a canvas. Dropping it clears the canvas.
pub struct CanvasChart {
    context: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    plot: Option<ChartPlot>,
}

impl CanvasChart {
    pub fn draw(canvas_id: &str, series: &HistoricalSeries, window: TimeWindow) -> UiResult<Self> {
        let (canvas, context) = Self::canvas_context(canvas_id)?;
        let mut chart = Self {
            context,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
            plot: None,
        };
        chart.clear();

        match ChartGeometry::fit(series, chart.width, chart.height) {
            Some(geometry) => {
                chart.draw_grid(&geometry, series, window)?;
                chart.draw_line(&geometry, series);
                chart.plot = Some(ChartPlot::new(geometry, series));
            }
            None => get_logger().warn(
                LogComponent::Infrastructure("CanvasChart"),
                &format!("No price points to draw for {}", series.asset_id()),
            ),
        }

        get_logger().debug(
            LogComponent::Infrastructure("CanvasChart"),
            &format!("Drew {} points for {} ({})", series.len(), series.asset_id(), window.label()),
        );
        Ok(chart)
    }

    /// `None` when the series had nothing to draw
    pub fn plot(&self) -> Option<&ChartPlot> {
        self.plot.as_ref()
    }

    fn canvas_context(canvas_id: &str) -> UiResult<(HtmlCanvasElement, CanvasRenderingContext2d)> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(UiError::WindowUnavailable)?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| UiError::ElementNotFound(canvas_id.to_string()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| UiError::ElementNotFound(format!("{canvas_id} (not a canvas)")))?;
        let context = canvas
            .get_context("2d")
            .map_err(|e| UiError::CanvasContextUnavailable(format!("{e:?}")))?
            .ok_or_else(|| UiError::CanvasContextUnavailable("no 2d context".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| UiError::CanvasContextUnavailable("not a 2d context".to_string()))?;
        Ok((canvas, context))
    }

    fn clear(&self) {
        self.context.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn draw_grid(&self, geometry: &ChartGeometry, series: &HistoricalSeries, window: TimeWindow) -> UiResult<()> {
        let ctx = &self.context;
        ctx.set_stroke_style_str(GRID_COLOR);
        ctx.set_fill_style_str(TICK_COLOR);
        ctx.set_line_width(1.0);
        ctx.set_font("12px sans-serif");

        for level in geometry.price_levels(PRICE_TICKS) {
            let y = geometry.y(level);
            ctx.begin_path();
            ctx.move_to(geometry.plot_left(), y);
            ctx.line_to(geometry.width - geometry.padding, y);
            ctx.stroke();
            ctx.fill_text(&format_axis_price(level), geometry.padding, y + 4.0)
                .map_err(|e| UiError::CanvasContextUnavailable(format!("{e:?}")))?;
        }

        if let Some((first, last)) = series.time_range() {
            let granularity = window.granularity();
            for tick in axis_ticks(first.value(), last.value(), granularity) {
                let x = geometry.x(tick as f64);
                ctx.begin_path();
                ctx.move_to(x, geometry.padding);
                ctx.line_to(x, geometry.plot_bottom());
                ctx.stroke();
                ctx.fill_text(&format_axis_label(tick, granularity), x - 16.0, geometry.height - geometry.padding)
                    .map_err(|e| UiError::CanvasContextUnavailable(format!("{e:?}")))?;
            }
        }
        Ok(())
    }

    fn draw_line(&self, geometry: &ChartGeometry, series: &HistoricalSeries) {
        let ctx = &self.context;
        let points: Vec<(f64, f64)> = series
            .points()
            .iter()
            .map(|p| (geometry.x(p.timestamp.as_f64()), geometry.y(p.price)))
            .collect();
        let (Some(&(first_x, _)), Some(&(last_x, _))) = (points.first(), points.last()) else {
            return;
        };
        let baseline = geometry.plot_bottom();

        ctx.begin_path();
        ctx.move_to(first_x, baseline);
        for &(x, y) in &points {
            ctx.line_to(x, y);
        }
        ctx.line_to(last_x, baseline);
        ctx.close_path();
        ctx.set_fill_style_str(FILL_COLOR);
        ctx.fill();

        ctx.begin_path();
        for (i, &(x, y)) in points.iter().enumerate() {
            if i == 0 { ctx.move_to(x, y) } else { ctx.line_to(x, y) }
        }
        ctx.set_stroke_style_str(LINE_COLOR);
        ctx.set_line_width(2.0);
        ctx.stroke();
    }
}

impl Drop for CanvasChart {
    fn drop(&mut self) {
        self.clear();
    }
}
