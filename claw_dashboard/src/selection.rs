//! Device selection: which claw the dashboard is looking at.

use std::fmt;

/// Identifier of the selected claw, as read from the id control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClawId {
    /// Single-device dashboards: every device id is admitted.
    Any,
    /// A concrete claw.
    Device(i64),
    /// The control holds no leading integer. Matches no device.
    Invalid,
}

impl ClawId {
    /// Parse the text of the id control.
    ///
    /// Leading whitespace, an optional sign and a run of decimal digits are
    /// consumed; anything after the digits is ignored, so `"7abc"` selects
    /// claw 7. Text without leading digits, or digits that overflow `i64`,
    /// yields [`ClawId::Invalid`].
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim_start();
        let (negative, rest) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits_len == 0 {
            return ClawId::Invalid;
        }
        let digits = &rest[..digits_len];
        let parsed = if negative {
            format!("-{}", digits).parse::<i64>()
        } else {
            digits.parse::<i64>()
        };
        parsed.map(ClawId::Device).unwrap_or(ClawId::Invalid)
    }

    /// Whether an event addressed to `device` should be shown.
    pub fn admits(self, device: i64) -> bool {
        match self {
            ClawId::Any => true,
            ClawId::Device(id) => id == device,
            ClawId::Invalid => false,
        }
    }

    pub fn device(self) -> Option<i64> {
        match self {
            ClawId::Device(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for ClawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClawId::Any => write!(f, "any"),
            ClawId::Device(id) => write!(f, "{}", id),
            ClawId::Invalid => write!(f, "NaN"),
        }
    }
}

/// Current selector state: claw id plus operating mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSelection {
    pub id: ClawId,
    /// Verbatim value of the mode control
    pub mode: String,
}

impl DeviceSelection {
    /// Build the selection from the raw values of the id and mode controls.
    pub fn from_controls(id_text: &str, mode: &str) -> Self {
        Self {
            id: ClawId::parse(id_text),
            mode: mode.to_string(),
        }
    }

    /// Selection used by single-device dashboards: nothing is filtered and
    /// commands carry no device addressing.
    pub fn single_device() -> Self {
        Self {
            id: ClawId::Any,
            mode: String::new(),
        }
    }

    /// Whether an event tagged with `device` passes the filter.
    pub fn admits(&self, device: i64) -> bool {
        self.id.admits(device)
    }

    /// Whether every device passes the filter (single-device dashboards).
    pub fn admits_any(&self) -> bool {
        self.id == ClawId::Any
    }

    /// Whether a telemetry sample with this `id` field passes the filter.
    /// Samples without the field always pass; a `null` id names no claw and
    /// only passes an unfiltered selection.
    pub fn admits_sample_id(&self, id: Option<Option<i64>>) -> bool {
        match id {
            None => true,
            Some(Some(device)) => self.admits(device),
            Some(None) => self.admits_any(),
        }
    }
}
