//! Pairing guide state machine
//!
//! While no controller is bound, the guide walks the user through pairing:
//! plug in over USB, press PS (the pairing helper writes the host address),
//! unplug, then press PS again to connect wirelessly. All state changes go
//! through [`transition`]; [`PairingGuide`] adds the clock for the timed
//! unplug step.

use std::time::{Duration, Instant};
use tracing::debug;

/// One stage of the on-screen pairing instructions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GuideStep {
    /// A controller is bound, nothing to show
    #[default]
    Idle,
    AwaitUsbConnect,
    AwaitPsButtonUsb,
    AwaitUnplug,
    AwaitPsButtonWireless,
}

/// How an instruction line is styled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// Main instruction text
    Prompt,
    /// Secondary status line
    Status,
}

/// One line of guide text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub text: &'static str,
    pub emphasis: Emphasis,
}

const fn prompt(text: &'static str) -> Instruction {
    Instruction { text, emphasis: Emphasis::Prompt }
}

const fn status(text: &'static str) -> Instruction {
    Instruction { text, emphasis: Emphasis::Status }
}

const USB_CONNECT: &[Instruction] = &[
    prompt("Connect PS3 Controller via USB Cable"),
    prompt("Then press the PS Button"),
];

const PS_BUTTON_USB: &[Instruction] = &[prompt("Press the PS Button Now")];

const UNPLUG: &[Instruction] = &[
    status("Pairing info sent (hopefully!)."),
    prompt("Now UNPLUG the USB cable."),
    prompt("Then press the PS Button again"),
    prompt("to connect wirelessly."),
];

const PS_BUTTON_WIRELESS: &[Instruction] = &[
    prompt("Press PS Button to Connect Wirelessly"),
    status("Searching..."),
];

impl GuideStep {
    /// Instruction lines shown for this step, empty for `Idle`
    pub fn instructions(self) -> &'static [Instruction] {
        match self {
            GuideStep::Idle => &[],
            GuideStep::AwaitUsbConnect => USB_CONNECT,
            GuideStep::AwaitPsButtonUsb => PS_BUTTON_USB,
            GuideStep::AwaitUnplug => UNPLUG,
            GuideStep::AwaitPsButtonWireless => PS_BUTTON_WIRELESS,
        }
    }

    /// True while the guide is shown
    pub fn is_active(self) -> bool {
        self != GuideStep::Idle
    }
}

/// Inputs that can move the guide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideInput {
    /// A valid binding exists
    Bound,
    /// No binding exists
    Unbound,
    /// The PS button was pressed
    CenterButton,
    /// The bound controller went away
    Disconnected,
    /// The unplug step has been shown long enough
    DwellElapsed,
}

/// The guide's transition table
pub fn transition(step: GuideStep, input: GuideInput) -> GuideStep {
    use GuideInput::*;
    use GuideStep::*;

    match (step, input) {
        (_, Bound) => Idle,
        (Idle, Unbound) => AwaitUsbConnect,
        (Idle, Disconnected) => AwaitPsButtonWireless,
        (AwaitUsbConnect, CenterButton) => AwaitPsButtonUsb,
        (AwaitPsButtonUsb, CenterButton) => AwaitUnplug,
        (AwaitUnplug, DwellElapsed) => AwaitPsButtonWireless,
        (step, _) => step,
    }
}

/// A step change produced by [`PairingGuide::apply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: GuideStep,
    pub to: GuideStep,
}

/// Guide state plus the time the current step was entered
#[derive(Debug, Clone)]
pub struct PairingGuide {
    step: GuideStep,
    entered_at: Option<Instant>,
    unplug_dwell: Duration,
}

impl PairingGuide {
    pub fn new(unplug_dwell: Duration) -> Self {
        Self {
            step: GuideStep::Idle,
            entered_at: None,
            unplug_dwell,
        }
    }

    pub fn step(&self) -> GuideStep {
        self.step
    }

    /// Feed one input, returning the step change if there was one
    pub fn apply(&mut self, input: GuideInput, now: Instant) -> Option<Transition> {
        let from = self.step;
        let to = transition(from, input);
        if to == from {
            return None;
        }

        debug!("Guide: {:?} -> {:?} ({:?})", from, to, input);
        self.step = to;
        self.entered_at = Some(now);
        Some(Transition { from, to })
    }

    /// Level-sensed update run once per tick
    pub fn evaluate(&mut self, bound: bool, now: Instant) -> Option<Transition> {
        if bound {
            return self.apply(GuideInput::Bound, now);
        }

        if self.step == GuideStep::Idle {
            return self.apply(GuideInput::Unbound, now);
        }

        let dwell_elapsed = self.step == GuideStep::AwaitUnplug
            && self
                .entered_at
                .is_some_and(|entered| now.saturating_duration_since(entered) >= self.unplug_dwell);
        if dwell_elapsed {
            return self.apply(GuideInput::DwellElapsed, now);
        }

        None
    }
}

impl Default for PairingGuide {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STEPS: [GuideStep; 5] = [
        GuideStep::Idle,
        GuideStep::AwaitUsbConnect,
        GuideStep::AwaitPsButtonUsb,
        GuideStep::AwaitUnplug,
        GuideStep::AwaitPsButtonWireless,
    ];

    fn guide_at(step: GuideStep, now: Instant) -> PairingGuide {
        let mut guide = PairingGuide::default();
        guide.step = step;
        guide.entered_at = Some(now);
        guide
    }

    #[test]
    fn test_binding_always_returns_to_idle() {
        for step in ALL_STEPS {
            assert_eq!(transition(step, GuideInput::Bound), GuideStep::Idle);
        }
    }

    #[test]
    fn test_usb_pairing_sequence() {
        let now = Instant::now();
        let mut guide = PairingGuide::default();

        guide.evaluate(false, now);
        assert_eq!(guide.step(), GuideStep::AwaitUsbConnect);

        guide.apply(GuideInput::CenterButton, now);
        assert_eq!(guide.step(), GuideStep::AwaitPsButtonUsb);

        let change = guide.apply(GuideInput::CenterButton, now);
        assert_eq!(
            change,
            Some(Transition {
                from: GuideStep::AwaitPsButtonUsb,
                to: GuideStep::AwaitUnplug,
            })
        );
    }

    #[test]
    fn test_center_button_ignored_when_idle_or_wireless() {
        assert_eq!(transition(GuideStep::Idle, GuideInput::CenterButton), GuideStep::Idle);
        assert_eq!(
            transition(GuideStep::AwaitPsButtonWireless, GuideInput::CenterButton),
            GuideStep::AwaitPsButtonWireless
        );
        assert_eq!(
            transition(GuideStep::AwaitUnplug, GuideInput::CenterButton),
            GuideStep::AwaitUnplug
        );
    }

    #[test]
    fn test_disconnect_while_idle_goes_wireless() {
        assert_eq!(
            transition(GuideStep::Idle, GuideInput::Disconnected),
            GuideStep::AwaitPsButtonWireless
        );
        // Only Idle reacts to a disconnect
        assert_eq!(
            transition(GuideStep::AwaitUsbConnect, GuideInput::Disconnected),
            GuideStep::AwaitUsbConnect
        );
    }

    #[test]
    fn test_unplug_dwell_boundary() {
        let start = Instant::now();
        let mut guide = guide_at(GuideStep::AwaitUnplug, start);

        assert_eq!(guide.evaluate(false, start + Duration::from_millis(4999)), None);
        assert_eq!(guide.step(), GuideStep::AwaitUnplug);

        guide.evaluate(false, start + Duration::from_secs(5));
        assert_eq!(guide.step(), GuideStep::AwaitPsButtonWireless);
    }

    #[test]
    fn test_dwell_is_measured_from_entering_unplug() {
        let start = Instant::now();
        let mut guide = guide_at(GuideStep::AwaitPsButtonUsb, start);

        // Long wait before the press does not count towards the dwell
        let pressed = start + Duration::from_secs(30);
        guide.apply(GuideInput::CenterButton, pressed);
        guide.evaluate(false, pressed + Duration::from_secs(1));
        assert_eq!(guide.step(), GuideStep::AwaitUnplug);

        guide.evaluate(false, pressed + Duration::from_secs(5));
        assert_eq!(guide.step(), GuideStep::AwaitPsButtonWireless);
    }

    #[test]
    fn test_unbound_steps_are_stable() {
        let start = Instant::now();
        for step in [GuideStep::AwaitUsbConnect, GuideStep::AwaitPsButtonWireless] {
            let mut guide = guide_at(step, start);
            assert_eq!(guide.evaluate(false, start + Duration::from_secs(60)), None);
            assert_eq!(guide.step(), step);
        }
    }

    #[test]
    fn test_bound_evaluation_resets() {
        let now = Instant::now();
        let mut guide = guide_at(GuideStep::AwaitPsButtonWireless, now);
        guide.evaluate(true, now);
        assert_eq!(guide.step(), GuideStep::Idle);
        assert_eq!(guide.evaluate(true, now), None);
    }

    #[test]
    fn test_instructions() {
        assert!(GuideStep::Idle.instructions().is_empty());
        assert!(!GuideStep::Idle.is_active());
        for step in &ALL_STEPS[1..] {
            assert!(step.is_active());
            assert!(!step.instructions().is_empty());
        }
        assert_eq!(
            GuideStep::AwaitPsButtonUsb.instructions()[0].text,
            "Press the PS Button Now"
        );
        assert_eq!(GuideStep::AwaitUnplug.instructions()[0].emphasis, Emphasis::Status);
    }
}
