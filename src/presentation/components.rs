use leptos::*;
use strum::IntoEnumIterator;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlCanvasElement;

use super::view_renderer::{CHART_CANVAS_ID, LeptosViewRenderer, ViewSignals};
use crate::application::Dashboard;
use crate::config::DashboardConfig;
use crate::domain::{
    formatting::{Trend, format_market_cap, format_percent, format_price},
    logging::{LogComponent, get_logger},
    market_data::{AssetSummary, TimeWindow},
};
use crate::event_utils::on_click_outside;
use crate::infrastructure::CoinGeckoHttpClient;

type AppDashboard = Dashboard<CoinGeckoHttpClient, LeptosViewRenderer>;

const SEARCH_INPUT_ID: &str = "search-input";
const SEARCH_OVERLAY_ID: &str = "search-results";
/// Clicks inside these keep the overlay open
const SEARCH_AREA_IDS: &[&str] = &[SEARCH_INPUT_ID, SEARCH_OVERLAY_ID];

const STYLES: &str = r#"
.dashboard-app {
    font-family: 'Inter', -apple-system, BlinkMacSystemFont, sans-serif;
    background: #0b0f19;
    min-height: 100vh;
    padding: 24px;
    color: #f9fafb;
}

.hidden {
    display: none !important;
}

.header {
    display: flex;
    flex-direction: column;
    align-items: center;
    gap: 16px;
    margin-bottom: 32px;
}

.search-container {
    position: relative;
    width: 100%;
    max-width: 520px;
}

.search-input {
    width: 100%;
    padding: 12px 16px;
    border-radius: 12px;
    border: 1px solid #374151;
    background: #111827;
    color: #f9fafb;
}

.search-results {
    position: absolute;
    top: 52px;
    width: 100%;
    background: #1f2937;
    border: 1px solid #374151;
    border-radius: 12px;
    z-index: 10;
}

.search-result-item {
    display: flex;
    align-items: center;
    gap: 12px;
    width: 100%;
    padding: 10px 14px;
    background: transparent;
    border: none;
    color: inherit;
    cursor: pointer;
}

.search-result-item:hover,
.crypto-card:hover {
    background: rgba(168, 85, 247, 0.1);
}

.result-image,
.crypto-card-image,
.detail-image {
    width: 32px;
    height: 32px;
}

.result-info {
    flex: 1;
    text-align: left;
}

.result-symbol,
.crypto-card-symbol {
    color: #9ca3af;
    font-size: 12px;
}

.crypto-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(240px, 1fr));
    gap: 16px;
}

.crypto-card {
    background: #111827;
    border: 1px solid #374151;
    border-radius: 16px;
    padding: 16px;
    cursor: pointer;
}

.crypto-card-header {
    display: flex;
    gap: 12px;
    margin-bottom: 12px;
}

.crypto-card-stat {
    display: flex;
    justify-content: space-between;
}

.positive,
.badge-positive {
    color: #22c55e;
}

.negative,
.badge-negative {
    color: #ef4444;
}

.detail-stats {
    display: grid;
    grid-template-columns: repeat(4, 1fr);
    gap: 12px;
    margin: 16px 0;
}

.stat-label {
    color: #9ca3af;
    font-size: 12px;
}

.chart-card {
    background: #111827;
    border: 1px solid #374151;
    border-radius: 16px;
    padding: 16px;
}

.chart-header {
    display: flex;
    justify-content: space-between;
    align-items: center;
}

.time-btn {
    background: #1f2937;
    color: #9ca3af;
    border: none;
    border-radius: 8px;
    padding: 6px 12px;
    margin-left: 6px;
    cursor: pointer;
}

.time-btn.active {
    background: #a855f7;
    color: #f9fafb;
}

.loading-indicator {
    display: flex;
    justify-content: center;
    padding: 40px;
    color: #9ca3af;
}

.chart-wrapper {
    position: relative;
}

.price-chart {
    width: 100%;
    max-width: 800px;
}

.tooltip {
    position: absolute;
    pointer-events: none;
    background: #1f2937;
    border: 1px solid #a855f7;
    border-radius: 8px;
    padding: 6px 10px;
    font-size: 12px;
    white-space: nowrap;
}
"#;

/// Root component: wires the dashboard to the view signals and starts the catalog load
#[component]
pub fn App() -> impl IntoView {
    let config = DashboardConfig::for_build();
    let signals = ViewSignals::new();
    let dashboard: AppDashboard = Dashboard::new(
        CoinGeckoHttpClient::from_config(&config),
        LeptosViewRenderer::new(signals),
        &config,
    );
    provide_context(signals);
    provide_context(dashboard.clone());

    let outside_clicks = {
        let dashboard = dashboard.clone();
        on_click_outside(SEARCH_AREA_IDS, move || dashboard.dismiss_overlay())
    };
    on_cleanup(move || drop(outside_clicks));

    get_logger().info(LogComponent::Presentation("App"), "🚀 Dashboard mounted");
    spawn_local(async move {
        dashboard.start().await;
    });

    view! {
        <style>{STYLES}</style>
        <div class="dashboard-app">
            <header class="header">
                <h1>"crypto dashboard"</h1>
                <div class="search-container">
                    <SearchBar />
                    <SearchOverlay />
                </div>
            </header>
            <main>
                <CatalogGrid />
                <AssetDetail />
            </main>
        </div>
    }
}

#[component]
fn SearchBar() -> impl IntoView {
    let signals = expect_context::<ViewSignals>();
    let dashboard = expect_context::<AppDashboard>();

    view! {
        <input
            id=SEARCH_INPUT_ID
            type="text"
            class="search-input"
            placeholder="search cryptocurrencies..."
            prop:value=move || signals.query.get()
            on:input=move |ev| {
                let query = event_target_value(&ev);
                signals.query.set(query.clone());
                dashboard.search(&query);
            }
        />
    }
}

#[component]
fn SearchOverlay() -> impl IntoView {
    let signals = expect_context::<ViewSignals>();

    view! {
        <div
            id=SEARCH_OVERLAY_ID
            class="search-results"
            class:hidden=move || !signals.overlay_visible.get()
        >
            <For
                each=move || signals.suggestions.get().into_iter().enumerate()
                key=|(_, asset)| asset.id.value().to_string()
                children=move |(index, asset)| {
                    view! { <SearchResultItem asset=asset index=index /> }
                }
            />
        </div>
    }
}

#[component]
fn SearchResultItem(asset: AssetSummary, index: usize) -> impl IntoView {
    let dashboard = expect_context::<AppDashboard>();
    let trend = Trend::of(asset.price_change_24h_pct);
    let on_select = select_handler(dashboard, asset.clone());

    view! {
        <button
            class="search-result-item"
            style=format!("animation-delay: {}ms", index * 50)
            on:click=on_select
        >
            <img src=asset.image_url.clone() alt=asset.name.clone() class="result-image spin-slow" />
            <div class="result-info">
                <div class="result-name">{asset.name.to_lowercase()}</div>
                <div class="result-symbol">{asset.symbol.to_lowercase()}</div>
            </div>
            <div class="result-price">
                <div class="result-price-value pulse-price">{format_price(asset.current_price)}</div>
                <div class=format!("result-price-change {} bounce-subtle", trend.css_class())>
                    {format_percent(asset.price_change_24h_pct)}
                </div>
            </div>
        </button>
    }
}

/// Landing grid of the top assets
#[component]
fn CatalogGrid() -> impl IntoView {
    let signals = expect_context::<ViewSignals>();

    view! {
        <section class="popular-cryptos" class:hidden=move || signals.detail.with(Option::is_some)>
            <h2 class="section-title">"popular cryptocurrencies"</h2>
            <div class="crypto-grid">
                <For
                    each=move || signals.grid.get().into_iter().enumerate()
                    key=|(_, asset)| asset.id.value().to_string()
                    children=move |(index, asset)| {
                        view! { <AssetCard asset=asset index=index /> }
                    }
                />
            </div>
        </section>
    }
}

#[component]
fn AssetCard(asset: AssetSummary, index: usize) -> impl IntoView {
    let dashboard = expect_context::<AppDashboard>();
    let badge = if Trend::of(asset.price_change_24h_pct).is_positive() { "badge-positive" } else { "badge-negative" };
    let on_select = select_handler(dashboard, asset.clone());

    view! {
        <div
            class="crypto-card fade-in-stagger"
            style=format!("animation-delay: {}ms", index * 100)
            on:click=on_select
        >
            <div class="crypto-card-header">
                <img src=asset.image_url.clone() alt=asset.name.clone() class="crypto-card-image spin-slow" />
                <div>
                    <h3 class="crypto-card-name glow">{asset.name.to_lowercase()}</h3>
                    <p class="crypto-card-symbol pulse-slow">{asset.symbol.to_lowercase()}</p>
                </div>
            </div>
            <div class="crypto-card-stats">
                <div class="crypto-card-stat">
                    <span class="crypto-card-stat-label">"price"</span>
                    <span class="crypto-card-stat-value pulse-price">{format_price(asset.current_price)}</span>
                </div>
                <div class="crypto-card-stat">
                    <span class="crypto-card-stat-label">"24h"</span>
                    <span class=format!("badge {} bounce-subtle", badge)>
                        {format_percent(asset.price_change_24h_pct)}
                    </span>
                </div>
            </div>
        </div>
    }
}

/// Detail panel for the selection. The canvas stays mounted so the chart can draw into it.
#[component]
fn AssetDetail() -> impl IntoView {
    let signals = expect_context::<ViewSignals>();
    let dashboard = expect_context::<AppDashboard>();

    view! {
        <section class="crypto-details" class:hidden=move || signals.detail.with(Option::is_none)>
            <button class="back-button" on:click=move |_| dashboard.return_to_catalog()>
                "back"
            </button>
            {move || signals.detail.get().map(|asset| view! { <AssetStats asset=asset /> })}
            <div class="chart-card">
                <div class="chart-header">
                    <h3>"price chart"</h3>
                    <WindowToggle />
                </div>
                <p class="time-range">"last " {move || signals.active_window.get().label()}</p>
                <LoadingIndicator />
                <div class="chart-wrapper" class:hidden=move || signals.loading.get()>
                    <canvas
                        id=CHART_CANVAS_ID
                        width="800"
                        height="400"
                        class="price-chart"
                        on:mousemove=move |ev| {
                            let anchor = (ev.offset_x() as f64, ev.offset_y() as f64);
                            signals.hover_chart(canvas_x(&ev), anchor);
                        }
                        on:mouseleave=move |_| signals.leave_chart()
                    />
                    <ChartTooltipView />
                </div>
            </div>
        </section>
    }
}

#[component]
fn ChartTooltipView() -> impl IntoView {
    let signals = expect_context::<ViewSignals>();

    view! {
        <div
            class="tooltip"
            class:hidden=move || signals.tooltip.with(Option::is_none)
            style:left=move || signals.tooltip.with(|t| t.as_ref().map(|t| format!("{}px", t.left + 12.0)))
            style:top=move || signals.tooltip.with(|t| t.as_ref().map(|t| format!("{}px", t.top + 12.0)))
        >
            {move || signals.tooltip.with(|t| t.as_ref().map(|t| t.text.clone()).unwrap_or_default())}
        </div>
    }
}

/// Pointer column in canvas pixels; CSS may draw the canvas narrower than its width
fn canvas_x(ev: &ev::MouseEvent) -> f64 {
    let x = ev.offset_x() as f64;
    let Some(canvas) = ev.target().and_then(|t| t.dyn_into::<HtmlCanvasElement>().ok()) else {
        return x;
    };
    let client_width = canvas.client_width() as f64;
    if client_width <= 0.0 {
        return x;
    }
    x * canvas.width() as f64 / client_width
}

#[component]
fn AssetStats(asset: AssetSummary) -> impl IntoView {
    let change_24h = Trend::of(asset.price_change_24h_pct);
    let change_30d = asset
        .price_change_30d_pct
        .map(|change| (format_percent(change), Trend::of(change).css_class()))
        .unwrap_or_else(|| ("n/a".to_string(), ""));

    view! {
        <div class="detail-header">
            <img src=asset.image_url.clone() alt=asset.name.clone() class="detail-image" />
            <div>
                <h2 class="detail-name">{asset.name.to_lowercase()}</h2>
                <p class="detail-symbol">{asset.symbol.to_lowercase()}</p>
            </div>
        </div>
        <div class="detail-stats">
            <div class="stat">
                <span class="stat-label">"price"</span>
                <span class="stat-value pulse-price">{format_price(asset.current_price)}</span>
            </div>
            <div class="stat">
                <span class="stat-label">"24h change"</span>
                <span class=format!("stat-value pulse-price {}", change_24h.css_class())>
                    {if change_24h.is_positive() { "▲ " } else { "▼ " }}
                    {format_percent(asset.price_change_24h_pct)}
                </span>
            </div>
            <div class="stat">
                <span class="stat-label">"30d change"</span>
                <span class=format!("stat-value pulse-price {}", change_30d.1)>{change_30d.0}</span>
            </div>
            <div class="stat">
                <span class="stat-label">"market cap"</span>
                <span class="stat-value">{format_market_cap(asset.market_cap)}</span>
            </div>
        </div>
    }
}

#[component]
fn WindowToggle() -> impl IntoView {
    let signals = expect_context::<ViewSignals>();
    let dashboard = expect_context::<AppDashboard>();

    view! {
        <div class="time-range-buttons">
            {TimeWindow::iter()
                .map(|window| {
                    let dashboard = dashboard.clone();
                    view! {
                        <button
                            class="time-btn"
                            class:active=move || signals.active_window.get() == window
                            on:click=move |_| {
                                let dashboard = dashboard.clone();
                                spawn_local(async move {
                                    dashboard.change_window(window).await;
                                });
                            }
                        >
                            {window.label()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
fn LoadingIndicator() -> impl IntoView {
    let signals = expect_context::<ViewSignals>();

    view! {
        <div class="loading-indicator" class:hidden=move || !signals.loading.get()>
            <div class="spinner"></div>
            <span>"loading..."</span>
        </div>
    }
}

fn select_handler(dashboard: AppDashboard, asset: AssetSummary) -> impl Fn(ev::MouseEvent) + 'static {
    move |_| {
        let dashboard = dashboard.clone();
        let asset = asset.clone();
        spawn_local(async move {
            dashboard.select_asset(asset).await;
        });
    }
}
