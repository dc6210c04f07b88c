//! Deterministic in-memory transport for tests and offline demos.
//!
//! `SimTransport` scripts the flaky parts of a real wireless stack: how
//! many registry polls pass before the target device is advertised, how
//! many before its characteristics resolve, and whether connect or write
//! calls fail. Writes are captured for inspection and notifications are
//! injected inline with [`SimTransport::notify`].

use std::sync::Mutex;

use tracing::debug;

use crate::error::{Result, TransportError};
use crate::traits::{
    AdapterId, CharacteristicInfo, DeviceInfo, Endpoint, NotifyCallback, Transport, WriteKind,
};

/// One captured characteristic write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRecord {
    pub endpoint: Endpoint,
    pub data: Vec<u8>,
    pub kind: WriteKind,
}

struct SimState {
    scan_active: bool,
    scans_started: u32,
    scans_stopped: u32,
    scan_filter: Option<String>,
    device_polls: u32,
    char_polls: u32,
    connected: bool,
    writes: Vec<WriteRecord>,
    subscription: Option<(Endpoint, NotifyCallback)>,
}

/// Scriptable in-memory [`Transport`] with one simulated robot.
pub struct SimTransport {
    adapters: Vec<AdapterId>,
    device: DeviceInfo,
    write_char: CharacteristicInfo,
    notify_char: CharacteristicInfo,
    /// Registry polls before the device is advertised; `None` = never.
    advertise_after: Option<u32>,
    /// Registry polls (after connect) before characteristics resolve;
    /// `None` = never.
    resolve_after: Option<u32>,
    fail_connect: bool,
    fail_writes: bool,
    state: Mutex<SimState>,
}

impl SimTransport {
    /// A simulated robot advertising `name`, with its write/notify
    /// characteristics declared under the given UUIDs. Everything is
    /// visible immediately; use the builder methods to add flakiness.
    pub fn new(name: &str, write_uuid: &str, notify_uuid: &str) -> Self {
        Self {
            adapters: vec![AdapterId::new("adapter0")],
            device: DeviceInfo {
                path: "/sim/dev0".to_string(),
                name: name.to_string(),
            },
            write_char: CharacteristicInfo {
                path: "/sim/dev0/char-write".to_string(),
                uuid: write_uuid.to_string(),
            },
            notify_char: CharacteristicInfo {
                path: "/sim/dev0/char-notify".to_string(),
                uuid: notify_uuid.to_string(),
            },
            advertise_after: Some(0),
            resolve_after: Some(0),
            fail_connect: false,
            fail_writes: false,
            state: Mutex::new(SimState {
                scan_active: false,
                scans_started: 0,
                scans_stopped: 0,
                scan_filter: None,
                device_polls: 0,
                char_polls: 0,
                connected: false,
                writes: Vec::new(),
                subscription: None,
            }),
        }
    }

    /// Remove all local radios.
    pub fn without_adapters(mut self) -> Self {
        self.adapters.clear();
        self
    }

    /// The device only appears after `polls` failed registry polls.
    pub fn advertise_after(mut self, polls: u32) -> Self {
        self.advertise_after = Some(polls);
        self
    }

    /// The device is never advertised.
    pub fn never_advertise(mut self) -> Self {
        self.advertise_after = None;
        self
    }

    /// Characteristics only resolve after `polls` failed registry polls.
    pub fn resolve_endpoints_after(mut self, polls: u32) -> Self {
        self.resolve_after = Some(polls);
        self
    }

    /// Characteristics never resolve.
    pub fn never_resolve_endpoints(mut self) -> Self {
        self.resolve_after = None;
        self
    }

    /// Every connect attempt fails.
    pub fn fail_connect(mut self) -> Self {
        self.fail_connect = true;
        self
    }

    /// Every write fails.
    pub fn fail_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Deliver a notification to the registered subscription callback.
    ///
    /// Returns `false` if nothing is subscribed. The callback runs inline
    /// on the caller's thread, outside the state lock, so it may call back
    /// into the transport.
    pub fn notify(&self, data: &[u8]) -> bool {
        let taken = {
            let mut state = self.state.lock().expect("sim state poisoned");
            state.subscription.take()
        };
        let Some((endpoint, mut callback)) = taken else {
            return false;
        };
        callback(data);
        let mut state = self.state.lock().expect("sim state poisoned");
        // Keep the subscription unless the callback unsubscribed meanwhile.
        if state.subscription.is_none() {
            state.subscription = Some((endpoint, callback));
        }
        true
    }

    /// All writes captured so far.
    pub fn writes(&self) -> Vec<WriteRecord> {
        self.state.lock().expect("sim state poisoned").writes.clone()
    }

    /// Whether a scan is currently running.
    pub fn scan_active(&self) -> bool {
        self.state.lock().expect("sim state poisoned").scan_active
    }

    /// Number of scans started.
    pub fn scans_started(&self) -> u32 {
        self.state.lock().expect("sim state poisoned").scans_started
    }

    /// Service filter passed to the most recent scan.
    pub fn scan_filter(&self) -> Option<String> {
        self.state
            .lock()
            .expect("sim state poisoned")
            .scan_filter
            .clone()
    }

    /// Number of device-registry polls observed.
    pub fn device_polls(&self) -> u32 {
        self.state.lock().expect("sim state poisoned").device_polls
    }

    /// Whether a notification subscription is registered.
    pub fn is_subscribed(&self) -> bool {
        self.state
            .lock()
            .expect("sim state poisoned")
            .subscription
            .is_some()
    }
}

impl Transport for SimTransport {
    fn adapters(&self) -> Result<Vec<AdapterId>> {
        Ok(self.adapters.clone())
    }

    fn start_scan(&self, adapter: &AdapterId, service_uuid: &str) -> Result<()> {
        let mut state = self.state.lock().expect("sim state poisoned");
        state.scan_active = true;
        state.scans_started += 1;
        state.scan_filter = Some(service_uuid.to_string());
        debug!(adapter = %adapter.0, %service_uuid, "sim scan started");
        Ok(())
    }

    fn stop_scan(&self, adapter: &AdapterId) -> Result<()> {
        let mut state = self.state.lock().expect("sim state poisoned");
        state.scan_active = false;
        state.scans_stopped += 1;
        debug!(adapter = %adapter.0, "sim scan stopped");
        Ok(())
    }

    fn devices(&self) -> Result<Vec<DeviceInfo>> {
        let mut state = self.state.lock().expect("sim state poisoned");
        state.device_polls += 1;
        match self.advertise_after {
            Some(after) if state.device_polls > after => Ok(vec![self.device.clone()]),
            _ => Ok(Vec::new()),
        }
    }

    fn connect(&self, device: &DeviceInfo) -> Result<()> {
        if self.fail_connect {
            return Err(TransportError::Connect {
                device: device.name.clone(),
                reason: "simulated connect failure".to_string(),
            });
        }
        let mut state = self.state.lock().expect("sim state poisoned");
        state.connected = true;
        debug!(device = %device.name, "sim connected");
        Ok(())
    }

    fn characteristics(&self) -> Result<Vec<CharacteristicInfo>> {
        let mut state = self.state.lock().expect("sim state poisoned");
        if !state.connected {
            return Ok(Vec::new());
        }
        state.char_polls += 1;
        match self.resolve_after {
            Some(after) if state.char_polls > after => {
                Ok(vec![self.write_char.clone(), self.notify_char.clone()])
            }
            _ => Ok(Vec::new()),
        }
    }

    fn write(&self, endpoint: &Endpoint, data: &[u8], kind: WriteKind) -> Result<()> {
        let mut state = self.state.lock().expect("sim state poisoned");
        if !state.connected {
            return Err(TransportError::NotConnected);
        }
        if self.fail_writes {
            return Err(TransportError::Write {
                endpoint: endpoint.0.clone(),
                reason: "simulated write failure".to_string(),
            });
        }
        state.writes.push(WriteRecord {
            endpoint: endpoint.clone(),
            data: data.to_vec(),
            kind,
        });
        Ok(())
    }

    fn subscribe(&self, endpoint: &Endpoint, callback: NotifyCallback) -> Result<()> {
        let mut state = self.state.lock().expect("sim state poisoned");
        if !state.connected {
            return Err(TransportError::Subscribe {
                endpoint: endpoint.0.clone(),
                reason: "not connected".to_string(),
            });
        }
        state.subscription = Some((endpoint.clone(), callback));
        debug!(endpoint = %endpoint.0, "sim notifications enabled");
        Ok(())
    }

    fn unsubscribe(&self, endpoint: &Endpoint) -> Result<()> {
        let mut state = self.state.lock().expect("sim state poisoned");
        if let Some((subscribed, _)) = &state.subscription {
            if subscribed == endpoint {
                state.subscription = None;
                debug!(endpoint = %endpoint.0, "sim notifications disabled");
            }
        }
        Ok(())
    }
}
