//! DualShock 3 layout over gilrs buttons and axes
//!
//! gilrs reports inputs by physical position. The tester works with the
//! joystick-index layout the DS3 exposes on Linux, so this module maps each
//! index to the gilrs input at that position:
//!
//! ```text
//!   buttons  0 Cross   1 Circle  2 Square  3 Triangle
//!            4 L1      5 R1      6 L2      7 R2
//!            8 Select  9 Start  10 PS     11 L3  12 R3
//!   axes     0 LX  1 LY  2 L2  3 RX  4 RY  5 R2
//!   hat 0    D-pad
//! ```
//!
//! Stick Y axes are inverted so that down is positive. Trigger axes rest at
//! -1.0 and reach 1.0 at full pressure.

use gilrs::{Axis, Button};
use tracing::trace;

/// Buttons in layout index order
pub const LAYOUT_BUTTONS: [Button; 13] = [
    Button::South,
    Button::East,
    Button::West,
    Button::North,
    Button::LeftTrigger,
    Button::RightTrigger,
    Button::LeftTrigger2,
    Button::RightTrigger2,
    Button::Select,
    Button::Start,
    Button::Mode,
    Button::LeftThumb,
    Button::RightThumb,
];

/// Where a layout axis reads its value from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSource {
    /// Stick axis, optionally inverted
    Stick(Axis, bool),
    /// Pressure of an analog trigger button
    Trigger(Button),
}

/// Axes in layout index order
pub const LAYOUT_AXES: [AxisSource; 6] = [
    AxisSource::Stick(Axis::LeftStickX, false),
    AxisSource::Stick(Axis::LeftStickY, true),
    AxisSource::Trigger(Button::LeftTrigger2),
    AxisSource::Stick(Axis::RightStickX, false),
    AxisSource::Stick(Axis::RightStickY, true),
    AxisSource::Trigger(Button::RightTrigger2),
];

/// D-pad buttons folded into hat 0 (up, down, left, right)
pub const DPAD_BUTTONS: [Button; 4] = [
    Button::DPadUp,
    Button::DPadDown,
    Button::DPadLeft,
    Button::DPadRight,
];

pub const AXIS_LEFT_X: usize = 0;
pub const AXIS_LEFT_Y: usize = 1;
pub const AXIS_L2: usize = 2;
pub const AXIS_RIGHT_X: usize = 3;
pub const AXIS_RIGHT_Y: usize = 4;
pub const AXIS_R2: usize = 5;

pub const BUTTON_L1: usize = 4;
pub const BUTTON_R1: usize = 5;
pub const BUTTON_START: usize = 9;

/// The PS button
pub const CENTER_BUTTON: usize = 10;

/// Held together while bound, these end the program
pub const QUIT_COMBO: [usize; 3] = [BUTTON_L1, BUTTON_R1, BUTTON_START];

/// Layout index of a gilrs button, `None` for D-pad and unmapped buttons
pub fn button_index(button: Button) -> Option<usize> {
    let index = LAYOUT_BUTTONS.iter().position(|b| *b == button);
    if index.is_none() {
        trace!("Button {:?} has no layout index", button);
    }
    index
}

/// Short label of a layout button, as printed on the pad
pub fn button_name(index: usize) -> Option<&'static str> {
    const NAMES: [&str; 13] = [
        "cross", "circle", "square", "triangle", "l1", "r1", "l2", "r2", "select", "start", "ps",
        "l3", "r3",
    ];
    NAMES.get(index).copied()
}

/// Map trigger pressure in 0..=1 to the -1..=1 axis range
pub fn trigger_to_axis(pressure: f32) -> f32 {
    pressure.clamp(0.0, 1.0) * 2.0 - 1.0
}

/// Number of leading layout entries up to and including the last mapped one
///
/// A pad that maps indices 0..=4 and 9 reports 10, so every index the pad
/// can produce stays addressable.
pub fn mapped_prefix<T>(items: &[T], mut is_mapped: impl FnMut(&T) -> bool) -> usize {
    items
        .iter()
        .rposition(|item| is_mapped(item))
        .map_or(0, |last| last + 1)
}
