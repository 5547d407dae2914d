mod claw_selector;
mod command_buttons;
mod finger_panel;
mod log_panel;
mod status_panel;
mod top_bar;

pub use claw_selector::ClawSelector;
pub use command_buttons::CommandButtons;
pub use finger_panel::FingerPanel;
pub use log_panel::LogPanel;
pub use status_panel::{SlotReadout, StatusPanel};
pub use top_bar::TopBar;
