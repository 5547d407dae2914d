//! Header with title, event stream status and the claw controls.

use leptos::prelude::*;
use crate::config::ClientVariant;
use crate::state::DashboardState;
use super::{ClawSelector, CommandButtons};

#[component]
pub fn TopBar() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");
    let connected = state.connected;
    let multi_device = state.variant() == ClientVariant::MultiDevice;

    view! {
        <header class="h-10 bg-[#111111] border-b border-[#ffffff10] flex items-center px-3 shrink-0 space-x-4">
            <div class="flex items-center space-x-2">
                <div class="w-6 h-6 bg-[#00d9ff] rounded flex items-center justify-center">
                    <svg class="w-3.5 h-3.5 text-black" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                        <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M7 4v6a5 5 0 0010 0V4M12 15v5"/>
                    </svg>
                </div>
                <h1 class="text-xs font-semibold text-white">"MagiClaw Dashboard"</h1>
            </div>

            <div class="flex items-center space-x-1.5" title="Event stream">
                <div class={move || if connected.get() {
                    "w-1.5 h-1.5 bg-[#00d9ff] rounded-full animate-pulse"
                } else {
                    "w-1.5 h-1.5 bg-[#ff4444] rounded-full"
                }}></div>
                <span class="text-[10px] text-[#888888]">
                    {move || if connected.get() { "Live" } else { "Offline" }}
                </span>
            </div>

            <div class="flex-1"></div>

            <Show when=move || multi_device>
                <ClawSelector/>
            </Show>
            <CommandButtons/>
        </header>
    }
}
