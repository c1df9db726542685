//! Mock input device for unit testing.
//!
//! Allows tests to inject synthetic [`RawEvent`]s without a HID driver.
//! Injected events sit in a pending queue until the next `poll()`, mirroring
//! a driver that only surfaces events when polled.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use jog_core::RawEvent;

use super::{DeviceError, InputDevice};

#[derive(Default)]
struct MockState {
    pending: VecDeque<RawEvent>,
    queued: VecDeque<RawEvent>,
    polls: u32,
    failing_polls: u32,
}

/// Test-side handle to a [`MockDevice`], usable after the device has been
/// moved into a session.
#[derive(Clone, Default)]
pub struct MockDeviceHandle {
    state: Arc<Mutex<MockState>>,
}

impl MockDeviceHandle {
    /// Injects a synthetic event, as if produced by the hardware.
    pub fn inject(&self, event: RawEvent) {
        self.state
            .lock()
            .expect("lock poisoned")
            .pending
            .push_back(event);
    }

    pub fn inject_all<I: IntoIterator<Item = RawEvent>>(&self, events: I) {
        let mut state = self.state.lock().expect("lock poisoned");
        state.pending.extend(events);
    }

    /// Makes the next `count` polls fail with [`DeviceError::Disconnected`].
    pub fn fail_next_polls(&self, count: u32) {
        self.state.lock().expect("lock poisoned").failing_polls = count;
    }

    pub fn poll_count(&self) -> u32 {
        self.state.lock().expect("lock poisoned").polls
    }

    /// Events injected but not yet drained.
    pub fn outstanding(&self) -> usize {
        let state = self.state.lock().expect("lock poisoned");
        state.pending.len() + state.queued.len()
    }
}

/// A mock implementation of [`InputDevice`].
pub struct MockDevice {
    name: String,
    handle: MockDeviceHandle,
}

impl MockDevice {
    /// Creates a device and the handle used to drive it.
    pub fn new(name: &str) -> (Self, MockDeviceHandle) {
        let handle = MockDeviceHandle::default();
        let device = Self {
            name: name.to_string(),
            handle: handle.clone(),
        };
        (device, handle)
    }
}

impl InputDevice for MockDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn poll(&mut self) -> Result<(), DeviceError> {
        let mut state = self.handle.state.lock().expect("lock poisoned");
        state.polls += 1;
        if state.failing_polls > 0 {
            state.failing_polls -= 1;
            return Err(DeviceError::Disconnected(self.name.clone()));
        }
        let pending = std::mem::take(&mut state.pending);
        state.queued.extend(pending);
        Ok(())
    }

    fn drain_events(&mut self) -> Vec<RawEvent> {
        let mut state = self.handle.state.lock().expect("lock poisoned");
        state.queued.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jog_core::AxisId;

    #[test]
    fn test_events_surface_only_after_poll() {
        // Arrange
        let (mut device, handle) = MockDevice::new("MUHI");
        handle.inject(RawEvent::Button { id: 7, value: 1.0 });

        // Act / Assert – nothing before poll
        assert!(device.drain_events().is_empty());
        device.poll().unwrap();
        assert_eq!(
            device.drain_events(),
            vec![RawEvent::Button { id: 7, value: 1.0 }]
        );
    }

    #[test]
    fn test_drain_preserves_arrival_order_and_empties_queue() {
        // Arrange
        let (mut device, handle) = MockDevice::new("MUHI");
        handle.inject_all([
            RawEvent::Button { id: 2, value: 1.0 },
            RawEvent::Axis { id: AxisId::X, value: -2.6 },
            RawEvent::Button { id: 2, value: 0.0 },
        ]);

        // Act
        device.poll().unwrap();
        let events = device.drain_events();

        // Assert
        assert_eq!(events.len(), 3);
        assert!(matches!(events[1], RawEvent::Axis { id: AxisId::X, .. }));
        assert!(device.drain_events().is_empty());
        assert_eq!(handle.outstanding(), 0);
    }

    #[test]
    fn test_failing_polls_report_disconnected() {
        // Arrange
        let (mut device, handle) = MockDevice::new("MUHI");
        handle.fail_next_polls(1);

        // Act / Assert
        assert!(matches!(device.poll(), Err(DeviceError::Disconnected(_))));
        assert!(device.poll().is_ok());
        assert_eq!(handle.poll_count(), 2);
    }
}
