//! Telemetry relay from the running claw program to the event hub.
//!
//! The claw program publishes protobuf `MagiClaw` messages on a ZeroMQ PUB
//! socket. The relay subscribes to everything, turns each message into a
//! `status_update` sample and keeps reconnecting while the program starts up
//! or restarts.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use claw_common::TelemetrySample;
use prost::Message;
use tracing::{debug, info, warn};
use zeromq::{Socket, SocketRecv, SubSocket};
use crate::hub::EventHub;
use crate::magiclaw_msg::{Finger, MagiClaw};

/// Delay between connection attempts.
pub const RETRY_DELAY: Duration = Duration::from_millis(500);

const JPEG_DATA_URL: &str = "data:image/jpeg;base64,";

/// Decode one published message. `device` is the claw the current run was
/// started for and tags the sample for filtering dashboards.
pub fn decode_frame(bytes: &[u8], device: Option<i64>) -> Result<TelemetrySample, prost::DecodeError> {
    let msg = MagiClaw::decode(bytes)?;
    let claw = msg.claw.unwrap_or_default();
    let motor = claw.motor.unwrap_or_default();
    let finger_0 = msg.finger_0.unwrap_or_default();
    let finger_1 = msg.finger_1.unwrap_or_default();

    Ok(TelemetrySample {
        id: device.map(Some),
        motor_angle: motor.angle.into(),
        motor_speed: motor.speed.into(),
        motor_iq: motor.iq.into(),
        motor_temp: motor.temperature.into(),
        claw_angle: claw.angle.into(),
        finger_0_pose: widen(&finger_0.pose),
        finger_0_force: widen(&finger_0.force),
        finger_1_pose: widen(&finger_1.pose),
        finger_1_force: widen(&finger_1.force),
        magiclaw_pose: widen(&msg.pose),
        finger_0_img: image_url(&finger_0),
        finger_1_img: image_url(&finger_1),
    })
}

fn widen(values: &[f32]) -> Vec<f64> {
    values.iter().map(|v| f64::from(*v)).collect()
}

/// A finger without a frame leaves the dashboard image untouched.
fn image_url(finger: &Finger) -> Option<String> {
    if finger.img.is_empty() {
        return None;
    }
    Some(format!("{}{}", JPEG_DATA_URL, BASE64_STANDARD.encode(&finger.img)))
}

/// Relay messages from `endpoint` to `hub` until the task is aborted.
pub async fn relay(endpoint: String, device: Option<i64>, hub: EventHub) {
    loop {
        let mut socket = SubSocket::new();
        match socket.connect(&endpoint).await {
            Ok(()) => match socket.subscribe("").await {
                Ok(()) => {
                    info!("Subscribed to telemetry at {}", endpoint);
                    relay_socket(&mut socket, device, &hub).await;
                }
                Err(e) => warn!("Telemetry subscribe failed: {}", e),
            },
            Err(e) => debug!("Telemetry publisher at {} not reachable: {}", endpoint, e),
        }
        tokio::time::sleep(RETRY_DELAY).await;
    }
}

async fn relay_socket(socket: &mut SubSocket, device: Option<i64>, hub: &EventHub) {
    loop {
        let message = match socket.recv().await {
            Ok(message) => message,
            Err(e) => {
                warn!("Telemetry receive failed: {}", e);
                return;
            }
        };
        let Some(frame) = message.get(0) else {
            continue;
        };
        match decode_frame(frame, device) {
            Ok(sample) => hub.publish_telemetry(sample),
            Err(e) => warn!("Dropping malformed telemetry frame: {}", e),
        }
    }
}
