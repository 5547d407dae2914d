//! Display slots and the view reset performed on claw selection change.

use crate::log_router::LogView;
use crate::telemetry::TelemetryFrame;

/// Text shown in every slot before the first frame arrives.
pub const PLACEHOLDER: &str = "--";

/// Named UI locations bound to one telemetry field each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplaySlot {
    MotorAngle,
    MotorSpeed,
    MotorIq,
    MotorTemp,
    ClawAngle,
    Finger0Pose,
    Finger0Force,
    Finger1Pose,
    Finger1Force,
    MagiclawPose,
}

impl DisplaySlot {
    pub const ALL: [DisplaySlot; 10] = [
        DisplaySlot::MotorAngle,
        DisplaySlot::MotorSpeed,
        DisplaySlot::MotorIq,
        DisplaySlot::MotorTemp,
        DisplaySlot::ClawAngle,
        DisplaySlot::Finger0Pose,
        DisplaySlot::Finger0Force,
        DisplaySlot::Finger1Pose,
        DisplaySlot::Finger1Force,
        DisplaySlot::MagiclawPose,
    ];

    /// DOM id of the slot element.
    pub fn element_id(self) -> &'static str {
        match self {
            DisplaySlot::MotorAngle => "motor-angle",
            DisplaySlot::MotorSpeed => "motor-speed",
            DisplaySlot::MotorIq => "motor-iq",
            DisplaySlot::MotorTemp => "motor-temp",
            DisplaySlot::ClawAngle => "claw-angle",
            DisplaySlot::Finger0Pose => "finger0-pose",
            DisplaySlot::Finger0Force => "finger0-force",
            DisplaySlot::Finger1Pose => "finger1-pose",
            DisplaySlot::Finger1Force => "finger1-force",
            DisplaySlot::MagiclawPose => "magiclaw-pose",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DisplaySlot::MotorAngle => "Motor Angle",
            DisplaySlot::MotorSpeed => "Motor Speed",
            DisplaySlot::MotorIq => "Motor Iq",
            DisplaySlot::MotorTemp => "Motor Temp",
            DisplaySlot::ClawAngle => "Claw Angle",
            DisplaySlot::Finger0Pose => "Pose",
            DisplaySlot::Finger0Force => "Force",
            DisplaySlot::Finger1Pose => "Pose",
            DisplaySlot::Finger1Force => "Force",
            DisplaySlot::MagiclawPose => "MagiClaw Pose",
        }
    }

    /// Unit suffix shown after scalar values.
    pub fn unit(self) -> Option<&'static str> {
        match self {
            DisplaySlot::MotorAngle | DisplaySlot::ClawAngle => Some("°"),
            DisplaySlot::MotorSpeed => Some("rpm"),
            DisplaySlot::MotorIq => Some("A"),
            DisplaySlot::MotorTemp => Some("°C"),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Content of a slot. Scalars are plain text, arrays are markup.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotValue {
    Text(String),
    Markup(String),
}

impl SlotValue {
    pub fn as_str(&self) -> &str {
        match self {
            SlotValue::Text(s) | SlotValue::Markup(s) => s,
        }
    }

    pub fn is_markup(&self) -> bool {
        matches!(self, SlotValue::Markup(_))
    }
}

/// Last rendered value of every slot plus the two finger images.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    slots: [SlotValue; 10],
    pub finger_0_img: String,
    pub finger_1_img: String,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            slots: std::array::from_fn(|_| SlotValue::Text(PLACEHOLDER.to_string())),
            finger_0_img: String::new(),
            finger_1_img: String::new(),
        }
    }
}

impl DisplayState {
    pub fn get(&self, slot: DisplaySlot) -> &SlotValue {
        &self.slots[slot.index()]
    }

    /// Write an accepted frame. Images the frame leaves out keep their
    /// previous source.
    pub fn apply(&mut self, frame: &TelemetryFrame) {
        for (slot, value) in &frame.slots {
            self.slots[slot.index()] = value.clone();
        }
        if let Some(src) = &frame.finger_0_img {
            self.finger_0_img = src.clone();
        }
        if let Some(src) = &frame.finger_1_img {
            self.finger_1_img = src.clone();
        }
    }

    /// Blank every slot and both images.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Line announcing a claw switch.
pub fn switch_announcement(raw_id: &str) -> String {
    format!("[client] Switched to claw ID {}", raw_id)
}

/// Reset the view after the id control changed to `raw_id`.
///
/// Slots and images are blanked, the log is cleared, then the switch is
/// announced. The announcement is untagged and never filtered.
pub fn on_selection_change(display: &mut DisplayState, log: &mut LogView, raw_id: &str) {
    display.reset();
    log.clear();
    log.append(switch_announcement(raw_id));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_indices_follow_all_order() {
        for (i, slot) in DisplaySlot::ALL.iter().enumerate() {
            assert_eq!(slot.index(), i);
        }
    }

    #[test]
    fn test_default_state_is_placeholder() {
        let state = DisplayState::default();
        for slot in DisplaySlot::ALL {
            assert_eq!(state.get(slot).as_str(), PLACEHOLDER);
            assert!(!state.get(slot).is_markup());
        }
        assert!(state.finger_0_img.is_empty());
        assert!(state.finger_1_img.is_empty());
    }

    #[test]
    fn test_apply_keeps_images_missing_from_frame() {
        let mut state = DisplayState::default();
        state.finger_0_img = "old#1".to_string();
        let frame = TelemetryFrame {
            slots: vec![(DisplaySlot::MotorTemp, SlotValue::Text("40.0".to_string()))],
            finger_0_img: None,
            finger_1_img: Some("new#2".to_string()),
        };
        state.apply(&frame);

        assert_eq!(state.get(DisplaySlot::MotorTemp).as_str(), "40.0");
        assert_eq!(state.get(DisplaySlot::MotorAngle).as_str(), PLACEHOLDER);
        assert_eq!(state.finger_0_img, "old#1");
        assert_eq!(state.finger_1_img, "new#2");
    }
}
