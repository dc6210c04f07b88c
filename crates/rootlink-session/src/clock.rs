//! Time and cancellation plumbing for retry loops.
//!
//! Discovery polls the transport registry with sleeps between attempts.
//! The sleeps go through the [`Clock`] trait so the same logic is testable
//! without real delay.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Source of delay for polling retry loops.
pub trait Clock {
    fn sleep(&self, duration: Duration);
}

/// Wall-clock implementation backed by a sleeping thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Cooperative cancellation flag shared between the caller and the
/// discovery retry loops. Cloning yields a handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
