use wasm_bindgen::prelude::*;

use crate::config::DashboardConfig;
use crate::domain::logging::{LogComponent, get_logger};

pub mod application;
pub mod config;
pub mod domain;
pub mod event_utils;
pub mod infrastructure;
pub mod presentation;
pub mod time_utils;

/// Installs the logger and time provider, then mounts the dashboard
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let config = DashboardConfig::for_build();
    let console_logger = Box::new(infrastructure::services::ConsoleLogger::new());
    domain::logging::init_logger(console_logger, config.log_level);

    let browser_time_provider = Box::new(infrastructure::services::BrowserTimeProvider::new());
    domain::logging::init_time_provider(browser_time_provider);

    get_logger().info(
        LogComponent::Presentation("Initialize"),
        &format!("🚀 Crypto dashboard starting (log level {})", config.log_level.to_string().trim()),
    );

    leptos::mount_to_body(presentation::App);
}
