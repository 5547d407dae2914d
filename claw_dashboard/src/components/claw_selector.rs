use leptos::prelude::*;
use crate::state::{DashboardState, CLAW_IDS, CLAW_MODES};

/// Claw id and mode controls. Changing the id resets the view.
#[component]
pub fn ClawSelector() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");
    let claw_id_text = state.claw_id_text;
    let selection = state.selection;

    view! {
        <div class="flex items-center space-x-2">
            <label class="text-[10px] text-[#666666] uppercase tracking-wide" for="clawId">"Claw"</label>
            <select
                id="clawId"
                class="bg-[#0a0a0a] border border-[#ffffff15] rounded px-1.5 py-0.5 text-[11px] text-white"
                prop:value=move || claw_id_text.get()
                on:change=move |ev| state.select_claw(event_target_value(&ev))
            >
                {CLAW_IDS.iter().map(|id| {
                    let id = id.to_string();
                    view! { <option value=id.clone()>{id.clone()}</option> }
                }).collect_view()}
            </select>

            <label class="text-[10px] text-[#666666] uppercase tracking-wide" for="clawMode">"Mode"</label>
            <select
                id="clawMode"
                class="bg-[#0a0a0a] border border-[#ffffff15] rounded px-1.5 py-0.5 text-[11px] text-white"
                prop:value=move || selection.get().mode
                on:change=move |ev| state.select_mode(event_target_value(&ev))
            >
                {CLAW_MODES.iter().map(|mode| {
                    view! { <option value=*mode>{*mode}</option> }
                }).collect_view()}
            </select>
        </div>
    }
}
