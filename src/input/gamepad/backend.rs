//! Capability interface over the host's joystick subsystem
//!
//! The frame loop only sees devices through [`InputBackend`]: enumeration,
//! per-index reads, and a queue of discrete events. The production
//! implementation is [`GilrsBackend`](super::provider::GilrsBackend); tests
//! drive the loop with a scripted backend.

use super::snapshot::Hat;
use thiserror::Error;

/// Backend-assigned device identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceHandle(pub usize);

/// Capability counts reported by a device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub axes: usize,
    pub buttons: usize,
    pub hats: usize,
}

impl Capabilities {
    pub fn new(axes: usize, buttons: usize, hats: usize) -> Self {
        Self { axes, buttons, hats }
    }
}

/// An enumerated device as reported by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub handle: DeviceHandle,
    /// Name as reported by the OS
    pub name: String,
    pub capabilities: Capabilities,
}

/// Discrete events handled at the top of each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window close or other quit request
    Quit,
    /// Escape key on an attached keyboard
    Escape,
    DeviceAdded(DeviceHandle),
    DeviceRemoved(DeviceHandle),
    /// Button press, `button` is a layout index
    ButtonDown { device: DeviceHandle, button: usize },
}

/// A read hit a device that is no longer there
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("device {0:?} disconnected during read")]
pub struct DisconnectError(pub DeviceHandle);

/// Host input subsystem as seen by the registry and the snapshot
pub trait InputBackend {
    /// Move pending device events into `events`.
    fn drain_events(&mut self, events: &mut Vec<InputEvent>);

    /// Enumerate devices and describe the first one, if any.
    fn first_device(&mut self) -> Option<DeviceInfo>;

    fn axis(&self, device: DeviceHandle, index: usize) -> Result<f32, DisconnectError>;

    fn button(&self, device: DeviceHandle, index: usize) -> Result<bool, DisconnectError>;

    fn hat(&self, device: DeviceHandle, index: usize) -> Result<Hat, DisconnectError>;
}
