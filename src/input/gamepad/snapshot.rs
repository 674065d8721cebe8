//! Per-frame input snapshot of the bound controller
//!
//! Holds one value per axis, button and hat, sized to the binding's
//! capability counts. [`InputSnapshot::refresh`] overwrites every value in
//! place; a failed read leaves the snapshot partially written, so callers
//! must not draw it for that tick.

use super::backend::{Capabilities, DisconnectError, InputBackend};
use super::registry::DeviceBinding;

/// Digital direction pad state, each component in {-1, 0, 1}
///
/// `x` is -1 for left, `y` is 1 for up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hat {
    pub x: i8,
    pub y: i8,
}

impl Hat {
    pub const CENTERED: Hat = Hat { x: 0, y: 0 };

    /// Build a hat value, clamping each component to its sign
    pub fn new(x: i8, y: i8) -> Self {
        Self {
            x: x.signum(),
            y: y.signum(),
        }
    }

    /// Build from four pressed/released directions
    pub fn from_directions(up: bool, down: bool, left: bool, right: bool) -> Self {
        Self::new(
            i8::from(right) - i8::from(left),
            i8::from(up) - i8::from(down),
        )
    }
}

/// Snapshot of all inputs of the bound device
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    axes: Vec<f32>,
    buttons: Vec<bool>,
    hats: Vec<Hat>,
}

impl InputSnapshot {
    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        let mut snapshot = Self::default();
        snapshot.reset(capabilities);
        snapshot
    }

    /// Replace every value with neutral state sized to `capabilities`
    pub fn reset(&mut self, capabilities: Capabilities) {
        self.axes.clear();
        self.axes.resize(capabilities.axes, 0.0);
        self.buttons.clear();
        self.buttons.resize(capabilities.buttons, false);
        self.hats.clear();
        self.hats.resize(capabilities.hats, Hat::CENTERED);
    }

    /// Drop all values (no device bound)
    pub fn clear(&mut self) {
        self.reset(Capabilities::default());
    }

    /// Shape of the snapshot
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::new(self.axes.len(), self.buttons.len(), self.hats.len())
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty() && self.buttons.is_empty() && self.hats.is_empty()
    }

    /// Read every axis, button and hat of `binding` into the snapshot.
    pub fn refresh<B>(&mut self, backend: &B, binding: &DeviceBinding) -> Result<(), DisconnectError>
    where
        B: InputBackend + ?Sized,
    {
        if self.capabilities() != binding.capabilities {
            self.reset(binding.capabilities);
        }

        let device = binding.handle;
        for (index, value) in self.axes.iter_mut().enumerate() {
            *value = backend.axis(device, index)?;
        }
        for (index, pressed) in self.buttons.iter_mut().enumerate() {
            *pressed = backend.button(device, index)?;
        }
        for (index, hat) in self.hats.iter_mut().enumerate() {
            *hat = backend.hat(device, index)?;
        }

        Ok(())
    }

    pub fn axes(&self) -> &[f32] {
        &self.axes
    }

    pub fn buttons(&self) -> &[bool] {
        &self.buttons
    }

    pub fn axis(&self, index: usize) -> Option<f32> {
        self.axes.get(index).copied()
    }

    /// Button state; missing buttons read as released
    pub fn button(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or(false)
    }

    pub fn hat(&self, index: usize) -> Option<Hat> {
        self.hats.get(index).copied()
    }

    /// Trigger pressure in 0..=1 from an axis resting at -1.0
    pub fn trigger(&self, index: usize) -> Option<f32> {
        self.axis(index)
            .map(|value| ((value + 1.0) / 2.0).clamp(0.0, 1.0))
    }

    /// True when every listed button is held
    pub fn all_pressed(&self, indices: &[usize]) -> bool {
        indices.iter().all(|&index| self.button(index))
    }

    /// Indices of held buttons
    pub fn pressed_buttons(&self) -> Vec<usize> {
        self.buttons
            .iter()
            .enumerate()
            .filter_map(|(index, pressed)| pressed.then_some(index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::gamepad::backend::DeviceHandle;
    use crate::input::gamepad::mock::{MockBackend, MockDevice};

    fn binding_for(device: &MockDevice) -> DeviceBinding {
        DeviceBinding {
            handle: device.handle,
            name: device.name.clone(),
            verified: true,
            capabilities: device.capabilities(),
        }
    }

    #[test]
    fn test_hat_components_are_clamped() {
        assert_eq!(Hat::new(5, -3), Hat { x: 1, y: -1 });
        assert_eq!(Hat::from_directions(true, false, true, false), Hat { x: -1, y: 1 });
        assert_eq!(Hat::from_directions(true, true, true, true), Hat::CENTERED);
    }

    #[test]
    fn test_reset_sizes_to_capabilities() {
        let mut snapshot = InputSnapshot::default();
        snapshot.reset(Capabilities::new(6, 13, 1));

        assert_eq!(snapshot.capabilities(), Capabilities::new(6, 13, 1));
        assert!(snapshot.axes().iter().all(|v| *v == 0.0));
        assert!(snapshot.buttons().iter().all(|b| !b));
        assert_eq!(snapshot.hat(0), Some(Hat::CENTERED));

        snapshot.clear();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_refresh_reads_every_input() {
        let mut device = MockDevice::dualshock(DeviceHandle(0));
        device.axes[0] = -0.5;
        device.buttons[10] = true;
        device.hats[0] = Hat::new(1, 0);
        let binding = binding_for(&device);
        let backend = MockBackend::with_device(device);

        let mut snapshot = InputSnapshot::default();
        snapshot.refresh(&backend, &binding).unwrap();

        assert_eq!(snapshot.capabilities(), binding.capabilities);
        assert_eq!(snapshot.axis(0), Some(-0.5));
        assert!(snapshot.button(10));
        assert_eq!(snapshot.pressed_buttons(), vec![10]);
        assert_eq!(snapshot.hat(0), Some(Hat { x: 1, y: 0 }));
    }

    #[test]
    fn test_refresh_fails_when_device_vanishes() {
        let device = MockDevice::dualshock(DeviceHandle(3));
        let binding = binding_for(&device);
        let mut backend = MockBackend::with_device(device);
        backend.fail_reads = true;

        let mut snapshot = InputSnapshot::default();
        let err = snapshot.refresh(&backend, &binding).unwrap_err();
        assert_eq!(err, DisconnectError(DeviceHandle(3)));
    }

    #[test]
    fn test_trigger_and_combo_helpers() {
        let mut snapshot = InputSnapshot::with_capabilities(Capabilities::new(6, 13, 1));
        snapshot.axes[2] = -1.0;
        snapshot.axes[5] = 1.0;
        snapshot.buttons[4] = true;
        snapshot.buttons[5] = true;

        assert_eq!(snapshot.trigger(2), Some(0.0));
        assert_eq!(snapshot.trigger(5), Some(1.0));
        assert_eq!(snapshot.trigger(9), None);
        assert!(!snapshot.all_pressed(&[4, 5, 9]));

        snapshot.buttons[9] = true;
        assert!(snapshot.all_pressed(&[4, 5, 9]));
        // Out-of-range indices never count as held
        assert!(!snapshot.all_pressed(&[4, 40]));
    }
}
