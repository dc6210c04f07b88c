//! Known command ids and payload builders.
//!
//! Command ids are scoped per device; only the ones the driver itself
//! sends are defined here. Application layers are free to use any byte.

/// LIGHTS: set LED mode and color (mode byte + RGB).
pub const LIGHTS_SET: u8 = 2;

/// MOTORS: set left/right wheel speed (two big-endian i32 values, mm/s).
pub const MOTORS_SET_SPEED: u8 = 4;

/// Build the MOTORS set-speed payload from wheel speeds in mm/s.
pub fn motor_speed_payload(left: i32, right: i32) -> [u8; 8] {
    let mut payload = [0u8; 8];
    payload[..4].copy_from_slice(&left.to_be_bytes());
    payload[4..].copy_from_slice(&right.to_be_bytes());
    payload
}

/// Build the LIGHTS set payload from an LED mode byte and an RGB color.
pub fn light_payload(mode: u8, red: u8, green: u8, blue: u8) -> [u8; 4] {
    [mode, red, green, blue]
}
