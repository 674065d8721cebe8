//! GilRs input backend
//!
//! Wraps a single [`Gilrs`] context owned by the frame loop. Pumping
//! `next_event` keeps gilrs' cached gamepad state current, so
//! [`InputBackend::drain_events`] has to run once per tick before any reads.

use super::backend::{
    Capabilities, DeviceHandle, DeviceInfo, DisconnectError, InputBackend, InputEvent,
};
use super::buttons::{
    button_index, mapped_prefix, trigger_to_axis, AxisSource, DPAD_BUTTONS, LAYOUT_AXES,
    LAYOUT_BUTTONS,
};
use super::snapshot::Hat;
use gilrs::{Event, EventType, Gamepad, GamepadId, Gilrs};
use thiserror::Error;
use tracing::{debug, info, trace};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to initialize gilrs: {0}")]
    Init(String),
}

/// Production backend over gilrs
pub struct GilrsBackend {
    gilrs: Gilrs,
}

impl GilrsBackend {
    pub fn new() -> Result<Self, BackendError> {
        let gilrs = Gilrs::new().map_err(|e| BackendError::Init(e.to_string()))?;
        info!("GilRs initialized");
        Ok(Self { gilrs })
    }

    fn gamepad(&self, device: DeviceHandle) -> Result<Gamepad<'_>, DisconnectError> {
        self.gilrs
            .gamepads()
            .find(|(id, gamepad)| usize::from(*id) == device.0 && gamepad.is_connected())
            .map(|(_, gamepad)| gamepad)
            .ok_or(DisconnectError(device))
    }
}

impl InputBackend for GilrsBackend {
    fn drain_events(&mut self, events: &mut Vec<InputEvent>) {
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            let device = DeviceHandle(usize::from(id));
            match event {
                EventType::Connected => {
                    debug!("Gamepad connected: {:?}", id);
                    events.push(InputEvent::DeviceAdded(device));
                },
                EventType::Disconnected => {
                    debug!("Gamepad disconnected: {:?}", id);
                    events.push(InputEvent::DeviceRemoved(device));
                },
                EventType::ButtonPressed(button, _) => {
                    if let Some(index) = button_index(button) {
                        trace!("Button down: {:?} -> {}", button, index);
                        events.push(InputEvent::ButtonDown { device, button: index });
                    }
                },
                _ => {},
            }
        }
    }

    fn first_device(&mut self) -> Option<DeviceInfo> {
        self.gilrs
            .gamepads()
            .filter(|(_, gamepad)| gamepad.is_connected())
            .min_by_key(|(id, _)| usize::from(*id))
            .map(|(id, gamepad)| describe_gamepad(id, &gamepad))
    }

    fn axis(&self, device: DeviceHandle, index: usize) -> Result<f32, DisconnectError> {
        let gamepad = self.gamepad(device)?;
        Ok(read_axis(&gamepad, index))
    }

    fn button(&self, device: DeviceHandle, index: usize) -> Result<bool, DisconnectError> {
        let gamepad = self.gamepad(device)?;
        Ok(LAYOUT_BUTTONS
            .get(index)
            .is_some_and(|button| gamepad.is_pressed(*button)))
    }

    fn hat(&self, device: DeviceHandle, index: usize) -> Result<Hat, DisconnectError> {
        let gamepad = self.gamepad(device)?;
        Ok(if index == 0 { read_hat(&gamepad) } else { Hat::CENTERED })
    }
}

/// Describe a connected gamepad in layout terms
pub fn describe_gamepad(id: GamepadId, gamepad: &Gamepad<'_>) -> DeviceInfo {
    DeviceInfo {
        handle: DeviceHandle(usize::from(id)),
        name: gamepad.os_name().to_string(),
        capabilities: capabilities_of(gamepad),
    }
}

/// Capability counts derived from which layout inputs the gamepad maps
pub fn capabilities_of(gamepad: &Gamepad<'_>) -> Capabilities {
    let axes = mapped_prefix(&LAYOUT_AXES, |source| match *source {
        AxisSource::Stick(axis, _) => gamepad.axis_code(axis).is_some(),
        AxisSource::Trigger(button) => gamepad.button_code(button).is_some(),
    });
    let buttons = mapped_prefix(&LAYOUT_BUTTONS, |button| gamepad.button_code(*button).is_some());
    let hats = usize::from(
        DPAD_BUTTONS
            .iter()
            .any(|button| gamepad.button_code(*button).is_some()),
    );

    Capabilities::new(axes, buttons, hats)
}

/// Value of layout axis `index`, 0.0 for indices outside the layout
pub fn read_axis(gamepad: &Gamepad<'_>, index: usize) -> f32 {
    match LAYOUT_AXES.get(index) {
        Some(AxisSource::Stick(axis, invert)) => {
            let value = gamepad.value(*axis);
            if *invert {
                -value
            } else {
                value
            }
        },
        Some(AxisSource::Trigger(button)) => {
            let pressure = gamepad
                .button_data(*button)
                .map_or(0.0, |data| data.value());
            trigger_to_axis(pressure)
        },
        None => 0.0,
    }
}

/// D-pad state as a hat
pub fn read_hat(gamepad: &Gamepad<'_>) -> Hat {
    let [up, down, left, right] = DPAD_BUTTONS.map(|button| gamepad.is_pressed(button));
    Hat::from_directions(up, down, left, right)
}
