pub mod components;
pub mod view_renderer;

pub use components::App;
pub use view_renderer::{CHART_CANVAS_ID, ChartTooltip, LeptosViewRenderer, LiveChart, ViewSignals};
