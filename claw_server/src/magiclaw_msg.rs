//! Protobuf messages published by the claw program (`magiclaw_msg.proto`).
//!
//! Field tags must stay in step with the program's schema.

#[derive(Clone, PartialEq, prost::Message)]
pub struct Motor {
    #[prost(float, tag = "1")]
    pub angle: f32,
    #[prost(float, tag = "2")]
    pub speed: f32,
    #[prost(float, tag = "3")]
    pub iq: f32,
    #[prost(float, tag = "4")]
    pub temperature: f32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Claw {
    #[prost(float, tag = "1")]
    pub angle: f32,
    #[prost(message, optional, tag = "2")]
    pub motor: Option<Motor>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Finger {
    /// JPEG frame of the finger camera
    #[prost(bytes = "vec", tag = "1")]
    pub img: Vec<u8>,
    #[prost(float, repeated, tag = "2")]
    pub pose: Vec<f32>,
    #[prost(float, repeated, tag = "3")]
    pub force: Vec<f32>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct MagiClaw {
    #[prost(message, optional, tag = "1")]
    pub claw: Option<Claw>,
    #[prost(message, optional, tag = "2")]
    pub finger_0: Option<Finger>,
    #[prost(message, optional, tag = "3")]
    pub finger_1: Option<Finger>,
    #[prost(float, repeated, tag = "4")]
    pub pose: Vec<f32>,
}
