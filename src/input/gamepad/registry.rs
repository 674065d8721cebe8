//! Controller binding
//!
//! At most one device is bound at a time. [`DeviceRegistry::refresh`] binds
//! the first enumerated device (whatever its name) and flags whether the name
//! looks like the expected model. [`DeviceRegistry::invalidate`] drops the
//! binding after a removal or a failed read.

use super::backend::{Capabilities, DeviceHandle, InputBackend};
use super::snapshot::InputSnapshot;
use tracing::{debug, info, warn};

/// Appended to the display name of devices that fail the model check
pub const UNKNOWN_TYPE_SUFFIX: &str = " (Unknown Type!)";

/// Case-insensitive substring check of a device name against the model name
pub fn matches_model(name: &str, expected: &str) -> bool {
    name.to_uppercase().contains(&expected.to_uppercase())
}

/// The currently bound controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceBinding {
    pub handle: DeviceHandle,
    /// Name as reported by the OS
    pub name: String,
    /// Name passed the model check
    pub verified: bool,
    pub capabilities: Capabilities,
}

impl DeviceBinding {
    /// Name shown in the UI, marked when the model check failed
    pub fn display_name(&self) -> String {
        if self.verified {
            self.name.clone()
        } else {
            format!("{}{}", self.name, UNKNOWN_TYPE_SUFFIX)
        }
    }
}

/// Owns the backend and the current binding
pub struct DeviceRegistry<B> {
    backend: B,
    expected_name: String,
    binding: Option<DeviceBinding>,
}

impl<B: InputBackend> DeviceRegistry<B> {
    pub fn new(backend: B, expected_name: impl Into<String>) -> Self {
        Self {
            backend,
            expected_name: expected_name.into(),
            binding: None,
        }
    }

    pub fn binding(&self) -> Option<&DeviceBinding> {
        self.binding.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Re-enumerate and bind the first device.
    ///
    /// The snapshot is reset to neutral whenever the new binding has a
    /// different shape (or nothing was bound before), and cleared when no
    /// device is present.
    pub fn refresh(&mut self, snapshot: &mut InputSnapshot) -> Option<&DeviceBinding> {
        let Some(info) = self.backend.first_device() else {
            if let Some(previous) = self.binding.take() {
                info!("Controller {} no longer present", previous.name);
            } else {
                debug!("No controller found");
            }
            snapshot.clear();
            return None;
        };

        let verified = matches_model(&info.name, &self.expected_name);
        let binding = DeviceBinding {
            handle: info.handle,
            name: info.name,
            verified,
            capabilities: info.capabilities,
        };

        let shape_changed = self
            .binding
            .as_ref()
            .map_or(true, |previous| previous.capabilities != binding.capabilities);
        if shape_changed || snapshot.capabilities() != binding.capabilities {
            snapshot.reset(binding.capabilities);
        }

        if self.binding.as_ref() != Some(&binding) {
            info!(
                "Connected: {} | Axes: {}, Buttons: {}, Hats: {}",
                binding.name,
                binding.capabilities.axes,
                binding.capabilities.buttons,
                binding.capabilities.hats
            );
            if !verified {
                warn!(
                    "Controller name does not contain \"{}\", showing it anyway",
                    self.expected_name
                );
            }
        }

        self.binding = Some(binding);
        self.binding.as_ref()
    }

    /// Drop the binding and clear the snapshot, returning the old binding
    pub fn invalidate(&mut self, snapshot: &mut InputSnapshot) -> Option<DeviceBinding> {
        snapshot.clear();
        let previous = self.binding.take();
        if let Some(binding) = &previous {
            info!("Controller disconnected: {}", binding.name);
        }
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::gamepad::mock::{MockBackend, MockDevice};

    const DS3: &str = "PLAYSTATION(R)3";

    #[test]
    fn test_model_check_is_case_insensitive() {
        assert!(matches_model("Sony PLAYSTATION(R)3 Controller", DS3));
        assert!(matches_model("sony playstation(r)3 controller", DS3));
        assert!(!matches_model("Xbox Wireless Controller", DS3));
    }

    #[test]
    fn test_display_name_marks_unknown_devices() {
        let mut binding = DeviceBinding {
            handle: DeviceHandle(0),
            name: "Generic Pad".into(),
            verified: false,
            capabilities: Capabilities::new(2, 4, 0),
        };
        assert_eq!(binding.display_name(), "Generic Pad (Unknown Type!)");

        binding.verified = true;
        assert_eq!(binding.display_name(), "Generic Pad");
    }

    #[test]
    fn test_refresh_without_device() {
        let mut registry = DeviceRegistry::new(MockBackend::default(), DS3);
        let mut snapshot = InputSnapshot::default();

        assert!(registry.refresh(&mut snapshot).is_none());
        assert!(!registry.is_bound());
        assert!(snapshot.is_empty());
        assert_eq!(registry.backend().enumerations, 1);
    }

    #[test]
    fn test_refresh_binds_and_sizes_snapshot() {
        let device = MockDevice::dualshock(DeviceHandle(2));
        let mut registry = DeviceRegistry::new(MockBackend::with_device(device), DS3);
        let mut snapshot = InputSnapshot::default();

        let binding = registry.refresh(&mut snapshot).cloned().unwrap();
        assert_eq!(binding.handle, DeviceHandle(2));
        assert!(binding.verified);
        assert_eq!(binding.capabilities, Capabilities::new(6, 13, 1));
        assert_eq!(snapshot.capabilities(), binding.capabilities);
    }

    #[test]
    fn test_unknown_device_is_still_bound() {
        let device = MockDevice::new(DeviceHandle(0), "Generic USB Joystick", 2, 4, 0);
        let mut registry = DeviceRegistry::new(MockBackend::with_device(device), DS3);
        let mut snapshot = InputSnapshot::default();

        let binding = registry.refresh(&mut snapshot).unwrap();
        assert!(!binding.verified);
        assert_eq!(binding.display_name(), "Generic USB Joystick (Unknown Type!)");
        assert_eq!(snapshot.capabilities(), Capabilities::new(2, 4, 0));
    }

    #[test]
    fn test_shape_change_resets_snapshot() {
        let device = MockDevice::dualshock(DeviceHandle(0));
        let mut registry = DeviceRegistry::new(MockBackend::with_device(device), DS3);
        let mut snapshot = InputSnapshot::default();
        registry.refresh(&mut snapshot);

        registry.backend_mut().device = Some(MockDevice::new(DeviceHandle(1), "Other", 2, 4, 0));
        registry.refresh(&mut snapshot);

        assert_eq!(snapshot.capabilities(), Capabilities::new(2, 4, 0));
        assert_eq!(registry.binding().unwrap().handle, DeviceHandle(1));
    }

    #[test]
    fn test_invalidate_clears_everything() {
        let device = MockDevice::dualshock(DeviceHandle(0));
        let mut registry = DeviceRegistry::new(MockBackend::with_device(device), DS3);
        let mut snapshot = InputSnapshot::default();
        registry.refresh(&mut snapshot);

        let previous = registry.invalidate(&mut snapshot);
        assert_eq!(previous.map(|b| b.handle), Some(DeviceHandle(0)));
        assert!(!registry.is_bound());
        assert!(snapshot.is_empty());

        // Nothing left to drop
        assert!(registry.invalidate(&mut snapshot).is_none());
    }

    #[test]
    fn test_device_gone_on_refresh_unbinds() {
        let device = MockDevice::dualshock(DeviceHandle(0));
        let mut registry = DeviceRegistry::new(MockBackend::with_device(device), DS3);
        let mut snapshot = InputSnapshot::default();
        registry.refresh(&mut snapshot);

        registry.backend_mut().device = None;
        assert!(registry.refresh(&mut snapshot).is_none());
        assert!(!registry.is_bound());
        assert!(snapshot.is_empty());
    }
}
