use leptos::either::Either;
use leptos::prelude::*;
use crate::display::{DisplaySlot, SlotValue};
use crate::state::DashboardState;

const SCALAR_SLOTS: [DisplaySlot; 5] = [
    DisplaySlot::MotorAngle,
    DisplaySlot::MotorSpeed,
    DisplaySlot::MotorIq,
    DisplaySlot::MotorTemp,
    DisplaySlot::ClawAngle,
];

/// Motor and claw readouts plus the overall pose.
#[component]
pub fn StatusPanel() -> impl IntoView {
    view! {
        <div class="bg-[#0a0a0a] rounded border border-[#ffffff08] p-2">
            <h2 class="text-[10px] font-semibold text-[#00d9ff] mb-1.5 flex items-center uppercase tracking-wide">
                <svg class="w-3 h-3 mr-1" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                    <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M9 12l2 2 4-4m6 2a9 9 0 11-18 0 9 9 0 0118 0z"/>
                </svg>
                "Status"
            </h2>
            <div class="space-y-0.5">
                {SCALAR_SLOTS.into_iter().map(|field| view! { <SlotReadout field=field/> }).collect_view()}
                <SlotReadout field=DisplaySlot::MagiclawPose/>
            </div>
        </div>
    }
}

/// One labelled display field. Scalar values are inserted as text, array
/// values as markup.
#[component]
pub fn SlotReadout(field: DisplaySlot) -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");
    let display = state.display;
    let value = move || display.with(|d| d.get(field).clone());

    view! {
        <div class="flex justify-between items-center bg-[#111111] rounded px-1.5 py-1">
            <span class="text-[#666666] text-[10px] font-medium">{field.label()}</span>
            <span class="text-[11px] font-mono text-white tabular-nums">
                {move || match value() {
                    SlotValue::Markup(markup) => Either::Left(view! {
                        <span id=field.element_id() inner_html=markup></span>
                    }),
                    SlotValue::Text(text) => Either::Right(view! {
                        <span id=field.element_id()>{text}</span>
                    }),
                }}
                {field.unit().map(|unit| view! { <span class="text-[#555555] ml-0.5">{unit}</span> })}
            </span>
        </div>
    }
}
