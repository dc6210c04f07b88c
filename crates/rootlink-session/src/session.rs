//! The session façade: one connected robot, send and receive.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use bytes::BytesMut;
use tracing::{debug, warn};

use rootlink_frame::command::{
    light_payload, motor_speed_payload, LIGHTS_SET, MOTORS_SET_SPEED,
};
use rootlink_frame::{decode_frame, encode_frame, Device, FRAME_LEN};
use rootlink_transport::{NotifyCallback, Transport, WriteKind};

use crate::clock::{CancelToken, Clock, SystemClock};
use crate::config::{SessionConfig, ValidationPolicy};
use crate::discovery::{Connection, Discovery};
use crate::dispatch::Dispatcher;
use crate::error::Result;

/// A live, ready-to-use link to one robot.
///
/// Construction runs the full discovery state machine and subscribes to
/// inbound telemetry; afterwards the session encodes and writes outbound
/// frames in call order and routes notifications to per-device handlers.
pub struct Session<T: Transport> {
    transport: Arc<T>,
    connection: Connection,
    config: SessionConfig,
    dispatcher: Arc<Dispatcher>,
    dropped: Arc<AtomicU64>,
    cancel: CancelToken,
}

impl<T: Transport> Session<T> {
    /// Connect with the default Root configuration and the system clock.
    pub fn connect(transport: Arc<T>) -> Result<Self> {
        Self::connect_with(
            transport,
            SessionConfig::default(),
            &SystemClock,
            CancelToken::new(),
        )
    }

    /// Connect with a custom configuration and the system clock.
    pub fn connect_with_config(transport: Arc<T>, config: SessionConfig) -> Result<Self> {
        Self::connect_with(transport, config, &SystemClock, CancelToken::new())
    }

    /// Connect with full control over timing and cancellation.
    pub fn connect_with(
        transport: Arc<T>,
        config: SessionConfig,
        clock: &impl Clock,
        cancel: CancelToken,
    ) -> Result<Self> {
        let connection =
            Discovery::new(transport.as_ref(), clock, &config, cancel.clone()).run()?;

        let dispatcher = Arc::new(Dispatcher::new());
        let dropped = Arc::new(AtomicU64::new(0));
        let callback = inbound_callback(
            config.validation,
            Arc::clone(&dispatcher),
            Arc::clone(&dropped),
        );
        transport.subscribe(&connection.notify, callback)?;

        Ok(Self {
            transport,
            connection,
            config,
            dispatcher,
            dropped,
            cancel,
        })
    }

    /// Encode a command frame and write it to the robot.
    ///
    /// The frame is fully encoded and validated before the transport sees
    /// any bytes, so an oversized payload never produces a partial write.
    pub fn send(&self, device: impl Into<u8>, command: u8, payload: &[u8]) -> Result<()> {
        let device = device.into();
        let mut buf = BytesMut::with_capacity(FRAME_LEN);
        encode_frame(device, command, payload, &mut buf)?;
        debug!(device, command, payload_len = payload.len(), "sending frame");
        self.transport
            .write(&self.connection.write, &buf, WriteKind::Command)?;
        Ok(())
    }

    /// Set both wheel speeds, in millimeters per second.
    pub fn drive(&self, left: i32, right: i32) -> Result<()> {
        self.send(
            Device::Motors,
            MOTORS_SET_SPEED,
            &motor_speed_payload(left, right),
        )
    }

    /// Set the LED ring animation and color.
    pub fn set_lights(&self, mode: u8, red: u8, green: u8, blue: u8) -> Result<()> {
        self.send(Device::Lights, LIGHTS_SET, &light_payload(mode, red, green, blue))
    }

    /// Install `handler` for telemetry from `device`, replacing any
    /// previous one. The handler receives the full raw message, header
    /// included, on the transport's delivery thread; it must not block
    /// and must not register handlers from within.
    pub fn register_handler(
        &self,
        device: impl Into<u8>,
        handler: impl FnMut(&[u8]) + Send + 'static,
    ) {
        self.dispatcher.register(device.into(), Box::new(handler));
    }

    /// Remove the handler for `device`, returning whether one existed.
    pub fn unregister_handler(&self, device: impl Into<u8>) -> bool {
        self.dispatcher.unregister(device.into())
    }

    /// Inbound frames discarded by validation so far.
    pub fn dropped_frames(&self) -> u64 {
        self.dropped.load(Ordering::SeqCst)
    }

    /// The resolved connection.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// The configuration this session was established with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// A handle that cancels this session's blocking loops.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Tear the session down: stop telemetry delivery and release the
    /// notification subscription.
    pub fn close(self) -> Result<()> {
        self.cancel.cancel();
        self.transport.unsubscribe(&self.connection.notify)?;
        Ok(())
    }
}

fn inbound_callback(
    policy: ValidationPolicy,
    dispatcher: Arc<Dispatcher>,
    dropped: Arc<AtomicU64>,
) -> NotifyCallback {
    Box::new(move |raw| match policy {
        ValidationPolicy::Strict => match decode_frame(raw) {
            Ok(frame) => dispatcher.dispatch(frame.device, raw),
            Err(err) => {
                dropped.fetch_add(1, Ordering::SeqCst);
                warn!(%err, len = raw.len(), "dropping invalid inbound frame");
            }
        },
        ValidationPolicy::Permissive => {
            if raw.is_empty() {
                dropped.fetch_add(1, Ordering::SeqCst);
                warn!("dropping empty notification");
            } else {
                dispatcher.dispatch(raw[0], raw);
            }
        }
    })
}
