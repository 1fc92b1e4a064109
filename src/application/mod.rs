pub mod controller;
pub mod dashboard;
pub mod view_renderer;

pub use controller::{DashboardController, HistoryOutcome, HistoryRequest};
pub use dashboard::Dashboard;
pub use view_renderer::ViewRenderer;
