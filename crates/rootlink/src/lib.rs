//! Command and telemetry link for the iRobot Root educational robot.
//!
//! rootlink speaks the robot's 20-byte checksummed UART protocol over an
//! abstract wireless transport: frame encoding, device discovery with
//! bounded retries, and per-device telemetry routing.
//!
//! # Crate Structure
//!
//! - [`frame`] — CRC-8 checksum engine and fixed-size frame codec
//! - [`transport`] — Wireless stack abstraction plus a simulated transport
//! - [`session`] — Discovery state machine, dispatcher, session façade

/// Re-export frame types.
pub mod frame {
    pub use rootlink_frame::*;
}

/// Re-export transport types.
pub mod transport {
    pub use rootlink_transport::*;
}

/// Re-export session types.
pub mod session {
    pub use rootlink_session::*;
}
