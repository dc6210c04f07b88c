//! High-level session management for the Root robot.
//!
//! This is the "just works" layer. Locate the robot among visible
//! peripherals, establish a connection with bounded retries, then send
//! commands and route inbound telemetry to per-device handlers.

pub mod clock;
pub mod config;
pub mod discovery;
pub mod dispatch;
pub mod error;
pub mod session;

pub use clock::{CancelToken, Clock, SystemClock};
pub use config::{
    SessionConfig, ValidationPolicy, ROOT_DEVICE_NAME, ROOT_NOTIFY_UUID, ROOT_SERVICE_UUID,
    ROOT_WRITE_UUID,
};
pub use discovery::{Connection, Discovery, DiscoveryState};
pub use dispatch::Dispatcher;
pub use error::{Result, SessionError};
pub use session::Session;
