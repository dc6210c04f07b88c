/// Errors that can occur in transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to start or stop an advertisement scan.
    #[error("scan failed on adapter {adapter}: {reason}")]
    Scan { adapter: String, reason: String },

    /// Failed to connect to a discovered device.
    #[error("failed to connect to {device}: {reason}")]
    Connect { device: String, reason: String },

    /// A characteristic value write was rejected or lost.
    #[error("write to {endpoint} failed: {reason}")]
    Write { endpoint: String, reason: String },

    /// Subscribing to value-change notifications failed.
    #[error("subscribe on {endpoint} failed: {reason}")]
    Subscribe { endpoint: String, reason: String },

    /// Operation requires an established connection.
    #[error("not connected")]
    NotConnected,

    /// The transport has been shut down.
    #[error("transport shut down")]
    Shutdown,
}

pub type Result<T> = std::result::Result<T, TransportError>;
