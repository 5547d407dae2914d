use leptos::prelude::*;
use crate::state::DashboardState;

/// Run/Stop buttons. Each click issues an independent request.
#[component]
pub fn CommandButtons() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");

    view! {
        <div class="flex items-center space-x-2">
            <button
                id="runBtn"
                class="px-3 py-1 text-[11px] font-semibold rounded bg-[#22c55e20] text-[#22c55e] border border-[#22c55e40] hover:bg-[#22c55e30] transition-colors"
                on:click=move |_| state.run()
            >
                "Run"
            </button>
            <button
                id="stopBtn"
                class="px-3 py-1 text-[11px] font-semibold rounded bg-[#ff444420] text-[#ff4444] border border-[#ff444440] hover:bg-[#ff444430] transition-colors"
                on:click=move |_| state.stop()
            >
                "Stop"
            </button>
        </div>
    }
}
