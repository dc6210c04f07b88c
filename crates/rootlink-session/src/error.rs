/// Errors that can occur during session establishment and use.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No local radio adapter was found.
    #[error("no wireless adapter found")]
    NoAdapter,

    /// The target device never appeared within the scan retry budget.
    #[error("device not found after {attempts} scan attempts")]
    DeviceNotFound { attempts: u32 },

    /// The connect request was rejected by the transport.
    #[error("connecting to {device} failed")]
    ConnectFailed {
        device: String,
        #[source]
        source: rootlink_transport::TransportError,
    },

    /// The communication endpoints never resolved within the retry budget.
    #[error("endpoints did not resolve after {attempts} attempts")]
    EndpointResolutionTimeout { attempts: u32 },

    /// Discovery was cancelled via the session's cancellation token.
    #[error("discovery cancelled")]
    Cancelled,

    /// Frame-level error.
    #[error("frame error: {0}")]
    Frame(#[from] rootlink_frame::FrameError),

    /// Transport-level error.
    #[error("transport error: {0}")]
    Transport(#[from] rootlink_transport::TransportError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
