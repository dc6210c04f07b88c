//! Device discovery and connection establishment.
//!
//! A linear state machine with bounded polling at the flaky stages:
//!
//! ```text
//! Idle → ScanningAdapter → ScanningDevice → Connecting
//!      → ResolvingEndpoints → Ready
//! ```
//!
//! `Failed` is terminal and reachable from any non-terminal state. The
//! manager never auto-retries from `Idle`; callers construct a new one to
//! retry end-to-end.

use tracing::{debug, info};

use rootlink_transport::{AdapterId, DeviceInfo, Endpoint, Transport};

use crate::clock::{CancelToken, Clock};
use crate::config::SessionConfig;
use crate::error::{Result, SessionError};

/// Discovery progress, observable for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryState {
    Idle,
    ScanningAdapter,
    ScanningDevice,
    Connecting,
    ResolvingEndpoints,
    Ready,
    Failed,
}

/// The live link to one physical robot: the device plus its resolved
/// outbound-write and inbound-notify endpoints. Endpoints are immutable
/// once resolved.
#[derive(Debug, Clone)]
pub struct Connection {
    pub device: DeviceInfo,
    pub write: Endpoint,
    pub notify: Endpoint,
}

/// Runs the discovery state machine against a transport.
pub struct Discovery<'a, T: Transport + ?Sized, C: Clock> {
    transport: &'a T,
    clock: &'a C,
    config: &'a SessionConfig,
    cancel: CancelToken,
    state: DiscoveryState,
}

impl<'a, T: Transport + ?Sized, C: Clock> Discovery<'a, T, C> {
    pub fn new(
        transport: &'a T,
        clock: &'a C,
        config: &'a SessionConfig,
        cancel: CancelToken,
    ) -> Self {
        Self {
            transport,
            clock,
            config,
            cancel,
            state: DiscoveryState::Idle,
        }
    }

    /// Current state of the machine.
    pub fn state(&self) -> DiscoveryState {
        self.state
    }

    /// Drive the machine to `Ready` or `Failed`.
    ///
    /// Blocks the calling thread for up to the configured retry budgets;
    /// the cancellation token aborts at any poll boundary.
    pub fn run(&mut self) -> Result<Connection> {
        let result = self.establish();
        self.state = match result {
            Ok(_) => DiscoveryState::Ready,
            Err(_) => DiscoveryState::Failed,
        };
        result
    }

    fn establish(&mut self) -> Result<Connection> {
        let adapter = self.find_adapter()?;
        let device = self.find_device(&adapter)?;
        self.connect(&device)?;
        let (write, notify) = self.resolve_endpoints()?;
        info!(device = %device.name, "connection established");
        Ok(Connection {
            device,
            write,
            notify,
        })
    }

    fn find_adapter(&mut self) -> Result<AdapterId> {
        self.state = DiscoveryState::ScanningAdapter;
        let mut adapters = self.transport.adapters()?;
        if adapters.is_empty() {
            return Err(SessionError::NoAdapter);
        }
        let adapter = adapters.remove(0);
        debug!(adapter = %adapter.0, "using adapter");
        Ok(adapter)
    }

    fn find_device(&mut self, adapter: &AdapterId) -> Result<DeviceInfo> {
        self.state = DiscoveryState::ScanningDevice;
        self.transport
            .start_scan(adapter, &self.config.service_uuid)?;

        let result = self.poll_for_device();
        // Scanning stops on every exit path, found or not.
        let stopped = self.transport.stop_scan(adapter);
        let device = result?;
        stopped?;
        debug!(device = %device.name, path = %device.path, "device discovered");
        Ok(device)
    }

    fn poll_for_device(&mut self) -> Result<DeviceInfo> {
        for attempt in 1..=self.config.scan_attempts {
            if self.cancel.is_cancelled() {
                return Err(SessionError::Cancelled);
            }

            let found = self
                .transport
                .devices()?
                .into_iter()
                .find(|device| device.name == self.config.device_name);
            if let Some(device) = found {
                return Ok(device);
            }

            debug!(attempt, "device not visible yet");
            if attempt < self.config.scan_attempts {
                self.clock.sleep(self.config.scan_interval);
            }
        }
        Err(SessionError::DeviceNotFound {
            attempts: self.config.scan_attempts,
        })
    }

    fn connect(&mut self, device: &DeviceInfo) -> Result<()> {
        self.state = DiscoveryState::Connecting;
        // Single-shot: connect failures are not retried at this stage.
        self.transport
            .connect(device)
            .map_err(|source| SessionError::ConnectFailed {
                device: device.name.clone(),
                source,
            })
    }

    fn resolve_endpoints(&mut self) -> Result<(Endpoint, Endpoint)> {
        self.state = DiscoveryState::ResolvingEndpoints;
        for attempt in 1..=self.config.resolve_attempts {
            if self.cancel.is_cancelled() {
                return Err(SessionError::Cancelled);
            }

            let characteristics = self.transport.characteristics()?;
            let write = characteristics
                .iter()
                .find(|c| c.uuid == self.config.write_uuid);
            let notify = characteristics
                .iter()
                .find(|c| c.uuid == self.config.notify_uuid);
            if let (Some(write), Some(notify)) = (write, notify) {
                debug!(write = %write.path, notify = %notify.path, "endpoints resolved");
                return Ok((write.into(), notify.into()));
            }

            debug!(attempt, "endpoints not resolved yet");
            if attempt < self.config.resolve_attempts {
                self.clock.sleep(self.config.resolve_interval);
            }
        }
        Err(SessionError::EndpointResolutionTimeout {
            attempts: self.config.resolve_attempts,
        })
    }
}
