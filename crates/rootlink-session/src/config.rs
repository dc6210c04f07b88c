use std::time::Duration;

/// Name the Root robot advertises.
pub const ROOT_DEVICE_NAME: &str = "ROOT";

/// Identity service UUID used to filter advertisement scans.
pub const ROOT_SERVICE_UUID: &str = "48c5d828-ac2a-442d-97a3-0c9822b04979";

/// UART characteristic the driver writes commands to.
pub const ROOT_WRITE_UUID: &str = "6e400002-b5a3-f393-e0a9-e50e24dcca9e";

/// UART characteristic the robot notifies telemetry on.
pub const ROOT_NOTIFY_UUID: &str = "6e400003-b5a3-f393-e0a9-e50e24dcca9e";

/// Inbound frame validation policy.
///
/// The receive path either re-validates every notification through the
/// frame codec before dispatch, or trusts the transport and dispatches
/// raw bytes requiring only a non-empty buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPolicy {
    /// Checksum-validate every inbound frame; invalid frames are logged,
    /// counted and dropped.
    #[default]
    Strict,
    /// Dispatch notification bytes as delivered.
    Permissive,
}

/// Configuration for session establishment and the receive path.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Advertised name of the target device.
    pub device_name: String,
    /// Service identity used as the scan filter.
    pub service_uuid: String,
    /// UUID of the outbound (write) characteristic.
    pub write_uuid: String,
    /// UUID of the inbound (notify) characteristic.
    pub notify_uuid: String,
    /// Device-registry polls before giving up the scan.
    pub scan_attempts: u32,
    /// Delay between device-registry polls.
    pub scan_interval: Duration,
    /// Characteristic-registry polls before giving up resolution.
    pub resolve_attempts: u32,
    /// Delay between characteristic-registry polls.
    pub resolve_interval: Duration,
    /// Inbound frame validation policy.
    pub validation: ValidationPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            device_name: ROOT_DEVICE_NAME.to_string(),
            service_uuid: ROOT_SERVICE_UUID.to_string(),
            write_uuid: ROOT_WRITE_UUID.to_string(),
            notify_uuid: ROOT_NOTIFY_UUID.to_string(),
            scan_attempts: 9,
            scan_interval: Duration::from_secs(1),
            resolve_attempts: 30,
            resolve_interval: Duration::from_secs(1),
            validation: ValidationPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_robot() {
        let config = SessionConfig::default();
        assert_eq!(config.device_name, "ROOT");
        assert_eq!(config.scan_attempts, 9);
        assert_eq!(config.scan_interval, Duration::from_secs(1));
        assert_eq!(config.validation, ValidationPolicy::Strict);
        assert!(config.write_uuid.starts_with("6e400002"));
        assert!(config.notify_uuid.starts_with("6e400003"));
    }
}
