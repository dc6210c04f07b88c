use crate::error::Result;

/// Identifier of a local radio adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterId(pub String);

impl AdapterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// A device visible in the transport's object registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Transport object path, opaque to the protocol layer.
    pub path: String,
    /// Advertised human-readable name.
    pub name: String,
}

/// A resolved characteristic in the object registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacteristicInfo {
    /// Transport object path, opaque to the protocol layer.
    pub path: String,
    /// Declared characteristic UUID.
    pub uuid: String,
}

/// Handle to a communication endpoint — a characteristic object path
/// resolved during connection setup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint(pub String);

impl From<&CharacteristicInfo> for Endpoint {
    fn from(info: &CharacteristicInfo) -> Self {
        Endpoint(info.path.clone())
    }
}

/// Delivery-type hint for characteristic value writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    /// Write without response.
    Command,
    /// Write with response.
    Request,
}

/// Callback invoked with raw notification bytes.
///
/// Runs on a transport-owned delivery context; notifications arrive in
/// delivery order, one buffer per call.
pub type NotifyCallback = Box<dyn FnMut(&[u8]) + Send>;

/// The external wireless stack the protocol layer drives.
///
/// Methods take `&self`: implementations use interior mutability and must
/// serialize writes so outbound frames keep call order on one connection.
pub trait Transport: Send + Sync {
    /// Enumerate available local radios.
    fn adapters(&self) -> Result<Vec<AdapterId>>;

    /// Start a filtered advertisement scan for the given service identity.
    fn start_scan(&self, adapter: &AdapterId, service_uuid: &str) -> Result<()>;

    /// Stop a previously started scan.
    fn stop_scan(&self, adapter: &AdapterId) -> Result<()>;

    /// Query the object registry for currently visible devices.
    fn devices(&self) -> Result<Vec<DeviceInfo>>;

    /// Connect to a discovered device.
    fn connect(&self, device: &DeviceInfo) -> Result<()>;

    /// Query the object registry for resolved characteristics.
    ///
    /// Characteristic resolution happens asynchronously after connect;
    /// callers poll until the endpoints they need appear.
    fn characteristics(&self) -> Result<Vec<CharacteristicInfo>>;

    /// Write a value to a characteristic with a delivery-type hint.
    fn write(&self, endpoint: &Endpoint, data: &[u8], kind: WriteKind) -> Result<()>;

    /// Subscribe to value-change notifications on a characteristic.
    fn subscribe(&self, endpoint: &Endpoint, callback: NotifyCallback) -> Result<()>;

    /// Cancel a notification subscription.
    fn unsubscribe(&self, endpoint: &Endpoint) -> Result<()>;
}
