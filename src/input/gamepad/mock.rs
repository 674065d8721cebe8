//! Scripted backend for tests

use super::backend::{
    Capabilities, DeviceHandle, DeviceInfo, DisconnectError, InputBackend, InputEvent,
};
use super::snapshot::Hat;

#[derive(Debug, Clone)]
pub struct MockDevice {
    pub handle: DeviceHandle,
    pub name: String,
    pub axes: Vec<f32>,
    pub buttons: Vec<bool>,
    pub hats: Vec<Hat>,
}

impl MockDevice {
    pub fn new(handle: DeviceHandle, name: &str, axes: usize, buttons: usize, hats: usize) -> Self {
        Self {
            handle,
            name: name.to_string(),
            axes: vec![0.0; axes],
            buttons: vec![false; buttons],
            hats: vec![Hat::CENTERED; hats],
        }
    }

    /// A DS3 at rest: triggers at -1.0, sticks centered
    pub fn dualshock(handle: DeviceHandle) -> Self {
        let mut device = Self::new(handle, "Sony PLAYSTATION(R)3 Controller", 6, 13, 1);
        device.axes[2] = -1.0;
        device.axes[5] = -1.0;
        device
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities::new(self.axes.len(), self.buttons.len(), self.hats.len())
    }
}

#[derive(Debug, Default)]
pub struct MockBackend {
    pub device: Option<MockDevice>,
    /// Handed out on the next drain
    pub pending: Vec<InputEvent>,
    /// Every read reports a disconnect
    pub fail_reads: bool,
    /// Number of `first_device` calls
    pub enumerations: usize,
}

impl MockBackend {
    pub fn with_device(device: MockDevice) -> Self {
        Self {
            device: Some(device),
            ..Self::default()
        }
    }

    fn read<T: Copy>(
        &self,
        device: DeviceHandle,
        pick: impl FnOnce(&MockDevice) -> Option<T>,
    ) -> Result<T, DisconnectError> {
        if self.fail_reads {
            return Err(DisconnectError(device));
        }
        self.device
            .as_ref()
            .filter(|d| d.handle == device)
            .and_then(pick)
            .ok_or(DisconnectError(device))
    }
}

impl InputBackend for MockBackend {
    fn drain_events(&mut self, events: &mut Vec<InputEvent>) {
        events.append(&mut self.pending);
    }

    fn first_device(&mut self) -> Option<DeviceInfo> {
        self.enumerations += 1;
        self.device.as_ref().map(|d| DeviceInfo {
            handle: d.handle,
            name: d.name.clone(),
            capabilities: d.capabilities(),
        })
    }

    fn axis(&self, device: DeviceHandle, index: usize) -> Result<f32, DisconnectError> {
        self.read(device, |d| d.axes.get(index).copied())
    }

    fn button(&self, device: DeviceHandle, index: usize) -> Result<bool, DisconnectError> {
        self.read(device, |d| d.buttons.get(index).copied())
    }

    fn hat(&self, device: DeviceHandle, index: usize) -> Result<Hat, DisconnectError> {
        self.read(device, |d| d.hats.get(index).copied())
    }
}
