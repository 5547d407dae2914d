//! Telemetry frames published by the claw controller.

use serde::{Deserialize, Deserializer, Serialize};

/// One telemetry frame, delivered as the payload of a `status_update` event.
///
/// `id` is present only on multi-device streams, where several claws share
/// one channel. Every numeric field is required; a frame missing one fails to
/// deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    /// `None` when the field is absent, `Some(None)` for an explicit `null`
    /// (present, but naming no claw).
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub id: Option<Option<i64>>,
    /// Motor shaft angle in degrees
    pub motor_angle: f64,
    /// Motor speed in rpm
    pub motor_speed: f64,
    /// Motor q-axis current
    pub motor_iq: f64,
    /// Motor temperature in Celsius
    pub motor_temp: f64,
    /// Claw opening angle in degrees
    pub claw_angle: f64,
    pub finger_0_pose: Vec<f64>,
    pub finger_0_force: Vec<f64>,
    pub finger_1_pose: Vec<f64>,
    pub finger_1_force: Vec<f64>,
    /// Overall claw pose
    pub magiclaw_pose: Vec<f64>,
    /// Finger camera frame as a URL (usually a `data:image/jpeg;base64,` URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finger_0_img: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finger_1_img: Option<String>,
}

/// Any value of a field that is present, `null` included, is `Some`.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Option<i64>>, D::Error> {
    Option::<i64>::deserialize(deserializer).map(Some)
}
