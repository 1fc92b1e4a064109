use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Event, Node};

use crate::domain::logging::{LogComponent, get_logger};

/// Window listener registration. Dropping the handle removes the listener.
pub struct WindowEventListenerHandle {
    _listener: EventListener,
}

pub fn window_event_listener_with_options(
    event_name: &'static str,
    options: EventListenerOptions,
    cb: impl FnMut(&Event) + 'static,
) -> Option<WindowEventListenerHandle> {
    let Some(window) = web_sys::window() else {
        get_logger().warn(
            LogComponent::Presentation("EventUtils"),
            &format!("No window to attach '{}' listener to", event_name),
        );
        return None;
    };
    let listener = EventListener::new_with_options(&window, event_name, options, cb);
    Some(WindowEventListenerHandle { _listener: listener })
}

/// True when the event target is not inside any element with one of `ids`
pub fn is_outside(event: &Event, ids: &[&str]) -> bool {
    match event.target().and_then(|t| t.dyn_into::<Node>().ok()) {
        Some(target) => node_is_outside(&target, ids),
        None => true,
    }
}

pub fn node_is_outside(target: &Node, ids: &[&str]) -> bool {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return true;
    };
    !ids.iter()
        .filter_map(|id| document.get_element_by_id(id))
        .any(|element| element.contains(Some(target)))
}

/// Calls `cb` for every click that lands outside all of `ids`. Runs in the capture phase.
pub fn on_click_outside(
    ids: &'static [&'static str],
    mut cb: impl FnMut() + 'static,
) -> Option<WindowEventListenerHandle> {
    window_event_listener_with_options("click", EventListenerOptions::run_in_capture_phase(), move |event| {
        if is_outside(event, ids) {
            cb();
        }
    })
}
