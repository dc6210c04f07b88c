/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The payload exceeds the fixed payload width.
    #[error("payload too long ({size} bytes, max {max})")]
    PayloadTooLong { size: usize, max: usize },

    /// The buffer is too short to hold even a minimal frame.
    #[error("frame too short ({size} bytes, min {min})")]
    FrameTooShort { size: usize, min: usize },

    /// The trailing checksum byte does not match a recomputation.
    #[error("checksum mismatch (expected {expected:#04x}, got {actual:#04x})")]
    ChecksumMismatch { expected: u8, actual: u8 },
}

pub type Result<T> = std::result::Result<T, FrameError>;
