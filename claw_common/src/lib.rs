//! Shared wire types for the MagiClaw dashboard.
//!
//! This crate provides the types exchanged between `claw_server` and
//! `claw_dashboard`. All types are WASM-compatible.
//!
//! # Architecture
//!
//! - `telemetry` - `TelemetrySample`, one frame of claw state
//! - `events` - the realtime event envelope (`ServerEvent`) and log payloads
//! - `requests` - `CommandRequest`, the body of `POST /exec`
//! - `responses` - `ExecReply`, what the server answers to `POST /exec`
//!
//! # Usage
//!
//! ```rust
//! use claw_common::{CommandRequest, ServerEvent, TelemetrySample};
//! ```

mod events;
mod requests;
mod responses;
mod telemetry;

pub use events::*;
pub use requests::*;
pub use responses::*;
pub use telemetry::*;

/// Path of the command endpoint.
pub const EXEC_PATH: &str = "/exec";

/// Static bearer credential shared by the dashboard and the controller.
pub const DEFAULT_AUTH_TOKEN: &str = "magiclaw";

/// Default port of the realtime event WebSocket.
pub const DEFAULT_WEBSOCKET_PORT: u16 = 9000;
