use leptos::prelude::*;
use crate::state::DashboardState;

/// Scrolling log view. Lines are text only and the view follows the newest
/// entry after every append.
#[component]
pub fn LogPanel() -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");
    let log = state.log;
    let log_ref = NodeRef::<leptos::html::Div>::new();

    // Auto-tail
    Effect::new(move |_| {
        log.track();
        if let Some(el) = log_ref.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    view! {
        <div class="bg-[#0a0a0a] rounded border border-[#ffffff08] flex flex-col min-h-0">
            <h2 class="text-[10px] font-semibold text-[#00d9ff] p-2 pb-1 flex items-center uppercase tracking-wide">
                <svg class="w-3 h-3 mr-1" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                    <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M9 5H7a2 2 0 00-2 2v12a2 2 0 002 2h10a2 2 0 002-2V7a2 2 0 00-2-2h-2M9 5a2 2 0 002 2h2a2 2 0 002-2M9 5a2 2 0 012-2h2a2 2 0 012 2"/>
                </svg>
                "Log"
            </h2>
            <div id="logOutput" node_ref=log_ref class="flex-1 overflow-y-auto px-2 pb-2 bg-black">
                <For
                    each=move || log.with(|log_view| log_view.lines().to_vec())
                    key=|line| line.seq
                    children=move |line| {
                        let class = format!("whitespace-pre font-mono text-sm py-0.5 {}", line.severity.css_class());
                        view! { <div class=class>{line.text}</div> }
                    }
                />
            </div>
        </div>
    }
}
