use crate::domain::market_data::AxisGranularity;
use js_sys::Date;
use wasm_bindgen::JsValue;

/// Format a time-axis tick using UTC components.
///
/// - `Day` -> `DD.MM`
/// - `Week` -> `DD.MM.YY`
pub fn format_axis_label(timestamp: u64, granularity: AxisGranularity) -> String {
    let date = Date::new(&JsValue::from_f64(timestamp as f64));
    match granularity {
        AxisGranularity::Day => format!("{:02}.{:02}", date.get_utc_date(), date.get_utc_month() + 1),
        AxisGranularity::Week => format!(
            "{:02}.{:02}.{:02}",
            date.get_utc_date(),
            date.get_utc_month() + 1,
            date.get_utc_full_year() % 100
        ),
    }
}

/// Tick positions aligned to whole granularity steps inside `[start, end]`
pub fn axis_ticks(start: u64, end: u64, granularity: AxisGranularity) -> Vec<u64> {
    if end < start {
        return Vec::new();
    }
    let step = granularity.step_ms();
    let first = start.div_ceil(step) * step;
    (0..)
        .map(|i| first + i * step)
        .take_while(|tick| *tick <= end)
        .collect()
}
