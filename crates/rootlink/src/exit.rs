use std::fmt;

use rootlink_frame::FrameError;
use rootlink_session::SessionError;
use rootlink_transport::TransportError;

// Exit code constants aligned with BSD sysexits where they apply.
pub const SUCCESS: i32 = 0;
#[allow(dead_code)]
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const TIMEOUT: i32 = 124;
pub const INTERNAL: i32 = 125;
pub const INTERRUPTED: i32 = 130;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn frame_error(context: &str, err: FrameError) -> CliError {
    CliError::new(DATA_INVALID, format!("{context}: {err}"))
}

pub fn transport_error(context: &str, err: TransportError) -> CliError {
    CliError::new(TRANSPORT_ERROR, format!("{context}: {err}"))
}

pub fn session_error(context: &str, err: SessionError) -> CliError {
    match err {
        SessionError::DeviceNotFound { .. } | SessionError::EndpointResolutionTimeout { .. } => {
            CliError::new(TIMEOUT, format!("{context}: {err}"))
        }
        SessionError::Cancelled => CliError::new(INTERRUPTED, format!("{context}: {err}")),
        SessionError::Frame(err) => frame_error(context, err),
        SessionError::Transport(err) => transport_error(context, err),
        SessionError::NoAdapter | SessionError::ConnectFailed { .. } => {
            CliError::new(TRANSPORT_ERROR, format!("{context}: {err}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeouts_map_to_the_timeout_code() {
        let err = session_error("connect", SessionError::DeviceNotFound { attempts: 9 });
        assert_eq!(err.code, TIMEOUT);

        let err = session_error(
            "connect",
            SessionError::EndpointResolutionTimeout { attempts: 30 },
        );
        assert_eq!(err.code, TIMEOUT);
    }

    #[test]
    fn cancellation_maps_to_sigint_convention() {
        let err = session_error("connect", SessionError::Cancelled);
        assert_eq!(err.code, INTERRUPTED);
    }

    #[test]
    fn frame_errors_are_data_invalid() {
        let err = session_error(
            "send",
            SessionError::Frame(FrameError::PayloadTooLong { size: 17, max: 16 }),
        );
        assert_eq!(err.code, DATA_INVALID);
    }
}
