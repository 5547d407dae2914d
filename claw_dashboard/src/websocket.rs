use claw_common::ServerEvent;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, ErrorEvent, MessageEvent, WebSocket};
use crate::state::DashboardState;

// ========== Event Stream ==========

impl DashboardState {
    /// Open the realtime event stream and route every event into this state.
    ///
    /// The socket lives for the whole page session; reconnecting is left to a
    /// page reload.
    pub fn connect_events(&self) {
        let url = self.config().events_url;
        connect(&url, *self);
    }
}

fn connect(url: &str, state: DashboardState) {
    let ws = match WebSocket::new(url) {
        Ok(ws) => ws,
        Err(e) => {
            log::error!("Failed to create WebSocket: {:?}", e);
            return;
        }
    };

    let set_connected = state.set_connected;

    // On open
    let onopen_callback = Closure::wrap(Box::new(move |_| {
        set_connected.set(true);
        log::info!("Event stream connected");
    }) as Box<dyn FnMut(JsValue)>);
    ws.set_onopen(Some(onopen_callback.as_ref().unchecked_ref()));
    onopen_callback.forget();

    // On message - every frame is a JSON ServerEvent
    let onmessage_callback = Closure::wrap(Box::new(move |e: MessageEvent| {
        let Ok(text) = e.data().dyn_into::<js_sys::JsString>() else {
            log::warn!("Ignoring non-text event frame");
            return;
        };
        let text: String = text.into();
        dispatch_event(&text, state);
    }) as Box<dyn FnMut(MessageEvent)>);
    ws.set_onmessage(Some(onmessage_callback.as_ref().unchecked_ref()));
    onmessage_callback.forget();

    let onerror_callback = Closure::wrap(Box::new(move |e: ErrorEvent| {
        log::error!("Event stream error: {:?}", e.message());
    }) as Box<dyn FnMut(ErrorEvent)>);
    ws.set_onerror(Some(onerror_callback.as_ref().unchecked_ref()));
    onerror_callback.forget();

    let onclose_callback = Closure::wrap(Box::new(move |e: CloseEvent| {
        set_connected.set(false);
        log::info!("Event stream closed (code {})", e.code());
    }) as Box<dyn FnMut(CloseEvent)>);
    ws.set_onclose(Some(onclose_callback.as_ref().unchecked_ref()));
    onclose_callback.forget();

    state.ws.set_value(Some(ws));
}

/// Hand one text frame to the matching handler.
fn dispatch_event(text: &str, state: DashboardState) {
    match decode_event(text) {
        Some(ServerEvent::StatusUpdate(sample)) => state.on_telemetry(sample),
        Some(ServerEvent::Log(payload)) => state.on_log(payload),
        None => {}
    }
}

/// Decode one text frame. Frames that do not parse (including telemetry with
/// missing fields) are dropped with a warning.
fn decode_event(text: &str) -> Option<ServerEvent> {
    match serde_json::from_str::<ServerEvent>(text) {
        Ok(event) => Some(event),
        Err(e) => {
            let preview: String = text.chars().take(120).collect();
            log::warn!("Dropping malformed event: {} ({})", e, preview);
            None
        }
    }
}
