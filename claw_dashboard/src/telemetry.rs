//! Telemetry projection: filter a `status_update` frame by the selected claw
//! and format every field for its display slot.
//!
//! Everything here is pure. Writing the result into the page happens in
//! [`crate::display::DisplayState::apply`].

use claw_common::TelemetrySample;
use crate::display::{DisplaySlot, SlotValue};
use crate::selection::DeviceSelection;

/// CSS class wrapping every number of an array slot.
pub const FIXED_NUM_CLASS: &str = "fixed-num";

/// Decimals used for angles, speed, current and array elements.
const DEFAULT_DECIMALS: usize = 2;

/// Decimals used for temperature.
const TEMPERATURE_DECIMALS: usize = 1;

/// Formatted values for one accepted telemetry frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryFrame {
    pub slots: Vec<(DisplaySlot, SlotValue)>,
    /// New source for finger 0's image, `None` leaves the image untouched
    pub finger_0_img: Option<String>,
    pub finger_1_img: Option<String>,
}

/// Project a sample onto display values.
///
/// Returns `None` when the sample is addressed to a claw the selection does
/// not admit. `now_ms` is appended to image URLs as a fragment so the browser
/// reloads frames that reuse the same URL.
pub fn project(sample: &TelemetrySample, selection: &DeviceSelection, now_ms: u64) -> Option<TelemetryFrame> {
    if !selection.admits_sample_id(sample.id) {
        return None;
    }

    let slots = DisplaySlot::ALL
        .iter()
        .map(|slot| (*slot, slot_value(*slot, sample)))
        .collect();

    Some(TelemetryFrame {
        slots,
        finger_0_img: cache_busted(sample.finger_0_img.as_deref(), now_ms),
        finger_1_img: cache_busted(sample.finger_1_img.as_deref(), now_ms),
    })
}

fn slot_value(slot: DisplaySlot, sample: &TelemetrySample) -> SlotValue {
    match slot {
        DisplaySlot::MotorAngle => SlotValue::Text(format_fixed(sample.motor_angle, DEFAULT_DECIMALS)),
        DisplaySlot::MotorSpeed => SlotValue::Text(format_fixed(sample.motor_speed, DEFAULT_DECIMALS)),
        DisplaySlot::MotorIq => SlotValue::Text(format_fixed(sample.motor_iq, DEFAULT_DECIMALS)),
        DisplaySlot::MotorTemp => SlotValue::Text(format_fixed(sample.motor_temp, TEMPERATURE_DECIMALS)),
        DisplaySlot::ClawAngle => SlotValue::Text(format_fixed(sample.claw_angle, DEFAULT_DECIMALS)),
        DisplaySlot::Finger0Pose => SlotValue::Markup(format_fixed_array(&sample.finger_0_pose)),
        DisplaySlot::Finger0Force => SlotValue::Markup(format_fixed_array(&sample.finger_0_force)),
        DisplaySlot::Finger1Pose => SlotValue::Markup(format_fixed_array(&sample.finger_1_pose)),
        DisplaySlot::Finger1Force => SlotValue::Markup(format_fixed_array(&sample.finger_1_force)),
        DisplaySlot::MagiclawPose => SlotValue::Markup(format_fixed_array(&sample.magiclaw_pose)),
    }
}

fn cache_busted(url: Option<&str>, now_ms: u64) -> Option<String> {
    match url {
        Some(url) if !url.is_empty() => Some(format!("{}#{}", url, now_ms)),
        _ => None,
    }
}

/// Format `value` with exactly `decimals` fractional digits.
///
/// Rounds half away from zero on the shortest decimal representation of the
/// value, so `1.005` becomes `"1.01"` even though the nearest `f64` lies just
/// below it.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format!("{}", value);
    }

    // f64 Display never uses exponent notation
    let repr = format!("{}", value.abs());
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits: Vec<u8> = int_part.bytes().collect();
    digits.extend(frac_part.bytes().chain(std::iter::repeat(b'0')).take(decimals));

    let round_up = frac_part.as_bytes().get(decimals).is_some_and(|d| *d >= b'5');
    if round_up {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - decimals;
    let mut out = String::with_capacity(digits.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.extend(digits[..split].iter().map(|d| *d as char));
    if decimals > 0 {
        out.push('.');
        out.extend(digits[split..].iter().map(|d| *d as char));
    }
    out
}

/// Format an array slot: each element at two decimals, wrapped in a
/// `fixed-num` span, joined by a bare comma.
pub fn format_fixed_array(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("<span class=\"{}\">{}</span>", FIXED_NUM_CLASS, format_fixed(*v, DEFAULT_DECIMALS)))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fixed_rounding() {
        assert_eq!(format_fixed(3.14159, 2), "3.14");
        assert_eq!(format_fixed(72.6, 1), "72.6");
        assert_eq!(format_fixed(1.005, 2), "1.01");
        assert_eq!(format_fixed(2.675, 2), "2.68");
        assert_eq!(format_fixed(0.994, 2), "0.99");
    }

    #[test]
    fn test_format_fixed_pads_and_carries() {
        assert_eq!(format_fixed(-2.0, 2), "-2.00");
        assert_eq!(format_fixed(0.0, 1), "0.0");
        assert_eq!(format_fixed(9.999, 2), "10.00");
        assert_eq!(format_fixed(99.95, 1), "100.0");
        assert_eq!(format_fixed(12.0, 0), "12");
    }

    #[test]
    fn test_format_fixed_sign_of_small_values() {
        assert_eq!(format_fixed(-0.001, 2), "-0.00");
        assert_eq!(format_fixed(-0.0, 2), "0.00");
        assert_eq!(format_fixed(-1.005, 2), "-1.01");
    }

    #[test]
    fn test_format_fixed_array_markup() {
        assert_eq!(
            format_fixed_array(&[1.005, -2.0]),
            "<span class=\"fixed-num\">1.01</span>,<span class=\"fixed-num\">-2.00</span>"
        );
        assert_eq!(format_fixed_array(&[]), "");
    }

    #[test]
    fn test_cache_busted_skips_empty_urls() {
        assert_eq!(cache_busted(None, 5), None);
        assert_eq!(cache_busted(Some(""), 5), None);
        assert_eq!(cache_busted(Some("data:x"), 5), Some("data:x#5".to_string()));
    }
}
