//! Wireless transport abstraction for the Root robot driver.
//!
//! The robot is reachable only over an asynchronous, notification-based
//! wireless link. The actual stack (advertisement scanning, connection
//! establishment, characteristic read/write/notify) lives outside this
//! workspace; the [`Transport`] trait here is the boundary the protocol
//! layer drives.
//!
//! This is the lowest layer of rootlink. Everything else builds on top of
//! the trait and types provided here. [`sim::SimTransport`] is the
//! in-memory implementation used by tests and the CLI.

pub mod error;
pub mod sim;
pub mod traits;

pub use error::{Result, TransportError};
pub use sim::{SimTransport, WriteRecord};
pub use traits::{
    AdapterId, CharacteristicInfo, DeviceInfo, Endpoint, NotifyCallback, Transport, WriteKind,
};
