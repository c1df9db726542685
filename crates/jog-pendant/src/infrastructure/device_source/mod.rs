//! Input device sources.
//!
//! A pendant is polled, not pushed: the session calls [`InputDevice::poll`]
//! to refresh the driver's queue, then [`InputDevice::drain_events`] to take
//! everything that arrived since the last sweep.  Enumeration of attached
//! devices goes through [`DeviceEnvironment`].
//!
//! # Testability
//!
//! Both traits are object-safe so tests can inject [`mock::MockDevice`]s and
//! the binary can feed a [`replay::ReplayDevice`] from stdin, without any HID
//! driver present.

use std::sync::Mutex;

use jog_core::RawEvent;
use thiserror::Error;

pub mod mock;
pub mod replay;

/// Error type for device polling.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("device {0} disconnected")]
    Disconnected(String),
    #[error("device I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single attached input device.
pub trait InputDevice: Send {
    /// Name the driver reports for this device.
    fn name(&self) -> &str;

    /// Refreshes the device's event queue.
    fn poll(&mut self) -> Result<(), DeviceError>;

    /// Takes every queued event in arrival order.  Never blocks; returns an
    /// empty vector when nothing is queued.
    fn drain_events(&mut self) -> Vec<RawEvent>;
}

/// Enumerates attached input devices.
pub trait DeviceEnvironment {
    fn list_devices(&self) -> Vec<Box<dyn InputDevice>>;
}

/// Environment over a fixed set of devices.
///
/// Devices are moved out on the first `list_devices` call; later calls see
/// an empty list, as if the devices had been claimed by a session.
#[derive(Default)]
pub struct StaticDeviceEnvironment {
    devices: Mutex<Vec<Box<dyn InputDevice>>>,
}

impl StaticDeviceEnvironment {
    pub fn new(devices: Vec<Box<dyn InputDevice>>) -> Self {
        Self {
            devices: Mutex::new(devices),
        }
    }
}

impl DeviceEnvironment for StaticDeviceEnvironment {
    fn list_devices(&self) -> Vec<Box<dyn InputDevice>> {
        match self.devices.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}
