use leptos::prelude::*;
use crate::display::DisplaySlot;
use crate::state::DashboardState;
use super::SlotReadout;

/// Camera frame, pose and force of one finger.
#[component]
pub fn FingerPanel(finger: usize) -> impl IntoView {
    let state = use_context::<DashboardState>().expect("DashboardState not found");
    let display = state.display;

    let (pose, force) = if finger == 0 {
        (DisplaySlot::Finger0Pose, DisplaySlot::Finger0Force)
    } else {
        (DisplaySlot::Finger1Pose, DisplaySlot::Finger1Force)
    };
    let image_src = move || {
        display.with(|d| if finger == 0 { d.finger_0_img.clone() } else { d.finger_1_img.clone() })
    };

    view! {
        <div class="bg-[#0a0a0a] rounded border border-[#ffffff08] p-2">
            <h2 class="text-[10px] font-semibold text-[#00d9ff] mb-1.5 uppercase tracking-wide">
                {format!("Finger {}", finger)}
            </h2>
            <div class="aspect-video bg-[#111111] rounded mb-1.5 overflow-hidden flex items-center justify-center">
                <img
                    id=format!("finger{}-img", finger)
                    class="w-full h-full object-contain"
                    alt=format!("Finger {} camera", finger)
                    src=image_src
                />
            </div>
            <div class="space-y-0.5">
                <SlotReadout field=pose/>
                <SlotReadout field=force/>
            </div>
        </div>
    }
}
