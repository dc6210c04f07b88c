//! Inbound message routing.
//!
//! Telemetry frames carry their source device id in the first byte; the
//! dispatcher owns a registry mapping device ids to handler callbacks and
//! routes each message synchronously on the delivery thread.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

/// Callback invoked with the full raw message, header bytes included.
pub type Handler = Box<dyn FnMut(&[u8]) + Send>;

/// Owned handler registry keyed by device id.
///
/// At most one handler per device id; registering again replaces the
/// previous handler. Messages for unregistered ids are logged and
/// discarded, never an error.
#[derive(Default)]
pub struct Dispatcher {
    handlers: Mutex<HashMap<u8, Handler>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `handler` for `device`, replacing any previous one.
    pub fn register(&self, device: u8, handler: Handler) {
        self.handlers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(device, handler);
    }

    /// Remove the handler for `device`, returning whether one existed.
    pub fn unregister(&self, device: u8) -> bool {
        self.handlers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&device)
            .is_some()
    }

    /// Route `message` to the handler registered for `device`.
    ///
    /// Runs the handler while holding the registry lock; handlers must not
    /// call back into `register` or `dispatch`.
    pub fn dispatch(&self, device: u8, message: &[u8]) {
        let mut handlers = self
            .handlers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match handlers.get_mut(&device) {
            Some(handler) => handler(message),
            None => {
                debug!(device, len = message.len(), "no handler registered, dropping");
            }
        }
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    fn counting_handler(count: Arc<AtomicUsize>) -> Handler {
        Box::new(move |_| {
            count.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn routes_to_the_matching_handler() {
        let dispatcher = Dispatcher::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let other = Arc::new(AtomicUsize::new(0));
        dispatcher.register(14, counting_handler(hits.clone()));
        dispatcher.register(1, counting_handler(other.clone()));

        dispatcher.dispatch(14, &[14, 0, 0]);
        dispatcher.dispatch(14, &[14, 0, 0]);

        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(other.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn handler_sees_the_full_message() {
        let dispatcher = Dispatcher::new();
        let seen: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        dispatcher.register(
            4,
            Box::new(move |message| {
                *sink.lock().unwrap() = message.to_vec();
            }),
        );

        dispatcher.dispatch(4, &[4, 2, 0, 0xAA, 0xBB]);

        assert_eq!(*seen.lock().unwrap(), vec![4, 2, 0, 0xAA, 0xBB]);
    }

    #[test]
    fn unregistered_device_is_silently_dropped() {
        let dispatcher = Dispatcher::new();
        // Must not panic or block.
        dispatcher.dispatch(99, &[99, 0, 0]);
    }

    #[test]
    fn reregistering_replaces_the_previous_handler() {
        let dispatcher = Dispatcher::new();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        dispatcher.register(12, counting_handler(first.clone()));
        dispatcher.register(12, counting_handler(second.clone()));

        dispatcher.dispatch(12, &[12]);

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
        assert_eq!(dispatcher.len(), 1);
    }

    #[test]
    fn unregister_removes_the_handler() {
        let dispatcher = Dispatcher::new();
        let hits = Arc::new(AtomicUsize::new(0));
        dispatcher.register(17, counting_handler(hits.clone()));

        assert!(dispatcher.unregister(17));
        assert!(!dispatcher.unregister(17));
        dispatcher.dispatch(17, &[17]);

        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert!(dispatcher.is_empty());
    }
}
