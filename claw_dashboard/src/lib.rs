//! Browser dashboard for the MagiClaw controller.
//!
//! The routing and formatting core (`selection`, `telemetry`, `log_router`,
//! `commands`, `display`) is plain Rust and runs anywhere; `state`,
//! `websocket` and `components` bind it to Leptos signals and the browser.

use leptos::mount::mount_to_body;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

pub mod commands;
pub mod config;
pub mod display;
pub mod log_router;
pub mod selection;
pub mod telemetry;

mod components;
mod state;
mod websocket;

use config::DashboardConfig;
use components::{FingerPanel, LogPanel, StatusPanel, TopBar};
use state::DashboardState;

#[wasm_bindgen(start)]
pub fn main() {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    let state = DashboardState::new(DashboardConfig::from_location());
    provide_context(state);
    state.connect_events();

    view! {
        <div class="h-screen flex flex-col bg-[#080808] text-white">
            <TopBar/>
            <main class="flex-1 grid grid-cols-[16rem_1fr_1fr] grid-rows-[auto_1fr] gap-2 p-2 min-h-0">
                <StatusPanel/>
                <FingerPanel finger=0/>
                <FingerPanel finger=1/>
                <div class="col-span-3 min-h-0 flex flex-col">
                    <LogPanel/>
                </div>
            </main>
        </div>
    }
}
