//! Headless surface: runs the frame loop without a window and reports
//! what the window would show through the log.

use crate::input::gamepad::buttons::button_name;
use crate::input::gamepad::{DeviceBinding, Hat, InputBackend, InputSnapshot};
use crate::pairing::GuideStep;
use crate::tester::{Tester, TickOutcome};
use std::thread;
use std::time::Instant;
use tracing::{debug, info};

/// Remembers what was last reported so only changes are logged
#[derive(Debug, Default)]
pub struct LogSurface {
    step: Option<GuideStep>,
    controller: Option<String>,
    pressed: Vec<usize>,
    hat: Option<Hat>,
}

impl LogSurface {
    /// Lines describing what changed since the last call
    pub fn describe(
        &mut self,
        outcome: TickOutcome,
        binding: Option<&DeviceBinding>,
        snapshot: &InputSnapshot,
    ) -> Vec<String> {
        let mut lines = Vec::new();

        match (outcome, binding) {
            (TickOutcome::Guide(step), _) => {
                self.controller = None;
                if self.step != Some(step) {
                    self.step = Some(step);
                    lines.extend(step.instructions().iter().map(|line| line.text.to_string()));
                }
            },
            (TickOutcome::Controller, Some(binding)) => {
                self.step = None;
                let name = binding.display_name();
                if self.controller.as_deref() != Some(name.as_str()) {
                    lines.push(format!("Connected: {}", name));
                    self.controller = Some(name);
                    self.pressed.clear();
                    self.hat = None;
                }

                let pressed = snapshot.pressed_buttons();
                if pressed != self.pressed {
                    let names: Vec<&str> =
                        pressed.iter().filter_map(|&index| button_name(index)).collect();
                    lines.push(if names.is_empty() {
                        "Buttons: none".to_string()
                    } else {
                        format!("Buttons: {}", names.join(" "))
                    });
                    self.pressed = pressed;
                }

                if let Some(hat) = snapshot.hat(0).filter(|hat| Some(*hat) != self.hat) {
                    lines.push(format!("D-pad: ({}, {})", hat.x, hat.y));
                    self.hat = Some(hat);
                }
            },
            _ => {},
        }

        lines
    }
}

/// Run the tester until it exits, logging instead of drawing
pub fn run_headless<B: InputBackend>(tester: &mut Tester<B>) {
    info!("Running headless, press L1+R1+START to quit");
    let mut surface = LogSurface::default();

    loop {
        let outcome = tester.tick(&[], Instant::now());
        match outcome {
            TickOutcome::Exit => break,
            TickOutcome::Skipped => debug!("Frame skipped"),
            _ => {
                for line in surface.describe(outcome, tester.binding(), tester.snapshot()) {
                    info!("{}", line);
                }
            },
        }
        thread::sleep(tester.frame_delay(Instant::now()));
    }

    tester.shutdown();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::gamepad::mock::{MockBackend, MockDevice};
    use crate::input::gamepad::{Capabilities, DeviceHandle};

    fn binding(name: &str) -> DeviceBinding {
        DeviceBinding {
            handle: DeviceHandle(0),
            name: name.to_string(),
            verified: name.contains("PLAYSTATION(R)3"),
            capabilities: Capabilities::new(6, 13, 1),
        }
    }

    #[test]
    fn test_guide_steps_logged_once() {
        let mut surface = LogSurface::default();
        let snapshot = InputSnapshot::default();
        let outcome = TickOutcome::Guide(GuideStep::AwaitUsbConnect);

        let lines = surface.describe(outcome, None, &snapshot);
        assert_eq!(
            lines,
            vec!["Connect PS3 Controller via USB Cable", "Then press the PS Button"]
        );
        assert!(surface.describe(outcome, None, &snapshot).is_empty());

        let lines = surface.describe(TickOutcome::Guide(GuideStep::AwaitPsButtonUsb), None, &snapshot);
        assert_eq!(lines, vec!["Press the PS Button Now"]);
    }

    #[test]
    fn test_controller_changes_logged() {
        let mut surface = LogSurface::default();
        let binding = binding("Generic Pad");
        let snapshot = read_with_buttons(&binding, &[]);

        let lines = surface.describe(TickOutcome::Controller, Some(&binding), &snapshot);
        assert_eq!(lines, vec!["Connected: Generic Pad (Unknown Type!)", "D-pad: (0, 0)"]);

        // Unchanged state is quiet
        assert!(surface
            .describe(TickOutcome::Controller, Some(&binding), &snapshot)
            .is_empty());

        let snapshot = read_with_buttons(&binding, &[0, 10]);
        let lines = surface.describe(TickOutcome::Controller, Some(&binding), &snapshot);
        assert_eq!(lines, vec!["Buttons: cross ps"]);
    }

    fn read_with_buttons(binding: &DeviceBinding, pressed: &[usize]) -> InputSnapshot {
        let mut device = MockDevice::new(binding.handle, &binding.name, 6, 13, 1);
        for &index in pressed {
            device.buttons[index] = true;
        }
        let backend = MockBackend::with_device(device);

        let mut snapshot = InputSnapshot::default();
        snapshot.refresh(&backend, binding).unwrap();
        snapshot
    }
}
