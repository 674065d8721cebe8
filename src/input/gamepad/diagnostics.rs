//! Controller diagnostics for troubleshooting detection issues

use super::buttons::{button_name, LAYOUT_AXES, LAYOUT_BUTTONS};
use super::provider::{capabilities_of, read_axis, read_hat};
use super::registry::matches_model;
use crate::config::DeviceConfig;
use gilrs::{Event, EventType, Gilrs};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Bluetooth pads can take a moment to show up after gilrs starts
const SCAN_DURATION: Duration = Duration::from_secs(3);

/// Log every detected controller with its layout-level state
///
/// Returns the number of connected controllers found.
pub fn print_device_diagnostics(config: &DeviceConfig) -> usize {
    info!("=== Controller Diagnostics ===");
    info!("Platform: {}", std::env::consts::OS);

    let mut gilrs = match Gilrs::new() {
        Ok(g) => g,
        Err(e) => {
            warn!("Failed to initialize GilRs: {}", e);
            warn!("This may indicate missing system libraries or permissions issues.");
            return 0;
        },
    };

    info!("Waiting for controllers ({} seconds)...", SCAN_DURATION.as_secs());
    let start = Instant::now();
    while start.elapsed() < SCAN_DURATION {
        while let Some(Event { id, event, .. }) = gilrs.next_event() {
            match event {
                EventType::Connected => info!("  connection detected: {:?}", id),
                EventType::Disconnected => info!("  disconnection detected: {:?}", id),
                _ => {},
            }
        }
        thread::sleep(Duration::from_millis(100));
    }

    let gamepads: Vec<_> = gilrs
        .gamepads()
        .filter(|(_, gamepad)| gamepad.is_connected())
        .collect();

    if gamepads.is_empty() {
        info!("No controllers detected");
        info!("  - USB: check the cable, then press the PS button");
        info!("  - Bluetooth: the pad must have been paired (see --pair)");
        return 0;
    }

    let count = gamepads.len();
    info!("Found {} controller(s):", count);
    for (id, gamepad) in gamepads {
        let name = gamepad.os_name();
        let capabilities = capabilities_of(&gamepad);

        info!("Controller {:?}", id);
        info!("  Name: \"{}\"", name);
        info!(
            "  Model check (\"{}\"): {}",
            config.expected_name,
            if matches_model(name, &config.expected_name) { "ok" } else { "unknown type" }
        );
        info!(
            "  Axes: {}, Buttons: {}, Hats: {}",
            capabilities.axes, capabilities.buttons, capabilities.hats
        );
        info!("  Power: {:?}", gamepad.power_info());

        let pressed: Vec<&str> = LAYOUT_BUTTONS
            .iter()
            .enumerate()
            .filter(|(_, button)| gamepad.is_pressed(**button))
            .filter_map(|(index, _)| button_name(index))
            .collect();
        if pressed.is_empty() {
            info!("  Buttons held: none");
        } else {
            info!("  Buttons held: {}", pressed.join(", "));
        }

        for index in 0..LAYOUT_AXES.len() {
            let value = read_axis(&gamepad, index);
            if value.abs() > 0.01 {
                info!("  Axis {}: {:.3}", index, value);
            }
        }

        let hat = read_hat(&gamepad);
        if hat != Default::default() {
            info!("  D-pad: ({}, {})", hat.x, hat.y);
        }
    }

    info!("=== End Diagnostics ===");
    count
}
