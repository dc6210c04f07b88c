//! Fixed-length message framing for the Root robot wire protocol.
//!
//! Every message is a 20-byte frame:
//! - A 1-byte device id (which robot subsystem the message targets)
//! - A 1-byte command id
//! - A 1-byte reserved field (always zero on send)
//! - A 16-byte payload, left-aligned and zero-padded
//! - A 1-byte CRC-8 checksum over the 19 preceding bytes
//!
//! Frames are fixed-size; the true payload length is not self-describing,
//! so decoding never strips padding.

pub mod codec;
pub mod command;
pub mod crc;
pub mod device;
pub mod error;

pub use codec::{decode_frame, encode_frame, Frame, FRAME_LEN, MAX_PAYLOAD, MIN_FRAME_LEN};
pub use crc::crc8;
pub use device::{device_name, Device};
pub use error::{FrameError, Result};
