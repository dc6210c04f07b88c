//! Robot subsystem identifiers.
//!
//! Device ids occupy the full 0-255 range on the wire. Only the values
//! below are defined by the robot, but unknown ids are legal in inbound
//! frames and must survive decoding unchanged.

/// A robot subsystem a frame targets or originates from.
///
/// Wire values are stable; the discriminants are the protocol bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Device {
    General = 0,
    Motors = 1,
    Marker = 2,
    Lights = 3,
    ColorSensor = 4,
    Sound = 5,
    Bumpers = 12,
    LightSensor = 13,
    Battery = 14,
    Accelerometer = 16,
    TouchSensor = 17,
    CliffSensor = 20,
}

impl Device {
    /// All defined devices, in wire-value order.
    pub const ALL: [Device; 12] = [
        Device::General,
        Device::Motors,
        Device::Marker,
        Device::Lights,
        Device::ColorSensor,
        Device::Sound,
        Device::Bumpers,
        Device::LightSensor,
        Device::Battery,
        Device::Accelerometer,
        Device::TouchSensor,
        Device::CliffSensor,
    ];

    /// Interpret a wire byte as a known device, if it is one.
    pub fn from_raw(raw: u8) -> Option<Device> {
        Device::ALL.into_iter().find(|d| *d as u8 == raw)
    }
}

impl From<Device> for u8 {
    fn from(device: Device) -> u8 {
        device as u8
    }
}

/// Returns a human-readable name for a device id byte.
pub fn device_name(raw: u8) -> &'static str {
    match Device::from_raw(raw) {
        Some(Device::General) => "GENERAL",
        Some(Device::Motors) => "MOTORS",
        Some(Device::Marker) => "MARKER",
        Some(Device::Lights) => "LIGHTS",
        Some(Device::ColorSensor) => "COLOR_SENSOR",
        Some(Device::Sound) => "SOUND",
        Some(Device::Bumpers) => "BUMPERS",
        Some(Device::LightSensor) => "LIGHT_SENSOR",
        Some(Device::Battery) => "BATTERY",
        Some(Device::Accelerometer) => "ACCELEROMETER",
        Some(Device::TouchSensor) => "TOUCH_SENSOR",
        Some(Device::CliffSensor) => "CLIFF_SENSOR",
        None => "UNKNOWN",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_are_stable() {
        assert_eq!(u8::from(Device::General), 0);
        assert_eq!(u8::from(Device::Motors), 1);
        assert_eq!(u8::from(Device::Marker), 2);
        assert_eq!(u8::from(Device::Lights), 3);
        assert_eq!(u8::from(Device::ColorSensor), 4);
        assert_eq!(u8::from(Device::Sound), 5);
        assert_eq!(u8::from(Device::Bumpers), 12);
        assert_eq!(u8::from(Device::LightSensor), 13);
        assert_eq!(u8::from(Device::Battery), 14);
        assert_eq!(u8::from(Device::Accelerometer), 16);
        assert_eq!(u8::from(Device::TouchSensor), 17);
        assert_eq!(u8::from(Device::CliffSensor), 20);
    }

    #[test]
    fn from_raw_roundtrip() {
        for device in Device::ALL {
            assert_eq!(Device::from_raw(device as u8), Some(device));
        }
        assert_eq!(Device::from_raw(99), None);
    }

    #[test]
    fn unknown_ids_have_a_name() {
        assert_eq!(device_name(14), "BATTERY");
        assert_eq!(device_name(99), "UNKNOWN");
    }
}
