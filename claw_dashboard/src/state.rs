//! Reactive dashboard state shared by all components through context.
//!
//! This is the effect boundary: every handler reads the current selection,
//! runs the pure routing/formatting code, and writes the result into signals.

use claw_common::{LogPayload, TelemetrySample};
use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use wasm_bindgen_futures::spawn_local;
use crate::commands::{CommandDispatcher, HttpCommandTransport};
use crate::config::{ClientVariant, DashboardConfig};
use crate::display::{self, DisplayState};
use crate::log_router::{self, LogView};
use crate::selection::DeviceSelection;
use crate::telemetry;
use web_sys::WebSocket;

/// Claw ids offered by the selector.
pub const CLAW_IDS: [i64; 4] = [0, 1, 2, 3];

/// Operating modes offered by the selector.
pub const CLAW_MODES: [&str; 3] = ["teleop", "auto", "calibrate"];

#[derive(Clone, Copy)]
pub struct DashboardState {
    pub selection: ReadSignal<DeviceSelection>,
    set_selection: WriteSignal<DeviceSelection>,
    /// Raw text of the claw id control
    pub claw_id_text: ReadSignal<String>,
    set_claw_id_text: WriteSignal<String>,
    pub display: ReadSignal<DisplayState>,
    set_display: WriteSignal<DisplayState>,
    pub log: ReadSignal<LogView>,
    set_log: WriteSignal<LogView>,
    /// Event stream is open
    pub connected: ReadSignal<bool>,
    pub(crate) set_connected: WriteSignal<bool>,
    config: StoredValue<DashboardConfig>,
    pub(crate) ws: StoredValue<Option<WebSocket>, LocalStorage>,
}

impl DashboardState {
    pub fn new(config: DashboardConfig) -> Self {
        let initial_id = CLAW_IDS[0].to_string();
        let initial = match config.variant {
            ClientVariant::MultiDevice => DeviceSelection::from_controls(&initial_id, CLAW_MODES[0]),
            ClientVariant::SingleDevice => DeviceSelection::single_device(),
        };

        let (selection, set_selection) = signal(initial);
        let (claw_id_text, set_claw_id_text) = signal(initial_id);
        let (display, set_display) = signal(DisplayState::default());
        let (log, set_log) = signal(LogView::default());
        let (connected, set_connected) = signal(false);

        Self {
            selection,
            set_selection,
            claw_id_text,
            set_claw_id_text,
            display,
            set_display,
            log,
            set_log,
            connected,
            set_connected,
            config: StoredValue::new(config),
            ws: StoredValue::new_local(None),
        }
    }

    pub fn variant(&self) -> ClientVariant {
        self.config.with_value(|c| c.variant)
    }

    pub fn config(&self) -> DashboardConfig {
        self.config.get_value()
    }

    /// Handle a `status_update` event.
    pub fn on_telemetry(&self, sample: TelemetrySample) {
        let selection = self.selection.get_untracked();
        let now_ms = js_sys::Date::now() as u64;
        match telemetry::project(&sample, &selection, now_ms) {
            Some(frame) => self.set_display.update(|d| d.apply(&frame)),
            None => log::debug!("Dropped telemetry for claw {:?}", sample.id),
        }
    }

    /// Handle a `log` event.
    pub fn on_log(&self, payload: LogPayload) {
        let selection = self.selection.get_untracked();
        self.set_log.update(|view| {
            log_router::on_log(view, payload, &selection);
        });
    }

    /// Append a client-originated line.
    pub fn append_log(&self, line: impl Into<String>) {
        let line = line.into();
        self.set_log.update(|view| view.append(line));
    }

    /// The claw id control changed.
    pub fn select_claw(&self, raw_id: String) {
        self.set_selection.update(|s| {
            *s = DeviceSelection::from_controls(&raw_id, &s.mode);
        });
        let mut display = self.display.get_untracked();
        let mut log_view = self.log.get_untracked();
        display::on_selection_change(&mut display, &mut log_view, &raw_id);
        self.set_display.set(display);
        self.set_log.set(log_view);
        self.set_claw_id_text.set(raw_id);
    }

    /// The mode control changed. The view is not reset.
    pub fn select_mode(&self, mode: String) {
        self.set_selection.update(|s| s.mode = mode);
    }

    pub fn run(&self) {
        let selection = self.selection.get_untracked();
        let dispatcher = self.dispatcher();
        let this = *self;
        spawn_local(async move {
            let lines = dispatcher.run(&selection).await;
            lines.into_iter().for_each(|line| this.append_log(line));
        });
    }

    pub fn stop(&self) {
        let dispatcher = self.dispatcher();
        let this = *self;
        spawn_local(async move {
            let lines = dispatcher.stop().await;
            lines.into_iter().for_each(|line| this.append_log(line));
        });
    }

    fn dispatcher(&self) -> CommandDispatcher<HttpCommandTransport> {
        let config = self.config.get_value();
        CommandDispatcher::new(HttpCommandTransport::new(config.exec_endpoint, config.auth_token))
    }
}
