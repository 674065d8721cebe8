//! Frame loop
//!
//! [`Tester`] owns everything that changes from frame to frame: the device
//! registry, the input snapshot, the pairing guide and the timers. A render
//! surface calls [`Tester::tick`] once per frame and draws whatever the
//! returned [`TickOutcome`] says.
//!
//! Per tick:
//! 1. poll the pairing helper, if one is running
//! 2. handle events (quit, escape, hot-plug, PS button presses)
//! 3. while unbound, re-enumerate once per poll interval
//! 4. while bound, read the snapshot; a failed read drops the binding,
//!    re-binds at once and skips the frame
//! 5. evaluate the guide
//! 6. check the L1+R1+START quit combo

mod timing;


pub use timing::{FramePacer, PollTimer};

use crate::config::AppConfig;
use crate::input::gamepad::buttons::{CENTER_BUTTON, QUIT_COMBO};
use crate::input::gamepad::{
    DeviceBinding, DeviceRegistry, InputBackend, InputEvent, InputSnapshot,
};
use crate::pairing::{GuideInput, GuideStep, PairingGuide, PairingHelper, Transition};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// What a render surface should draw after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No controller: draw this guide step
    Guide(GuideStep),
    /// Draw the controller snapshot
    Controller,
    /// The binding was lost mid-read, draw nothing this frame
    Skipped,
    /// The loop should end
    Exit,
}

/// Timing and detection settings of the frame loop
#[derive(Debug, Clone)]
pub struct TesterSettings {
    pub poll_interval: Duration,
    pub unplug_dwell: Duration,
    pub frame_rate: u32,
    pub expected_name: String,
}

impl TesterSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            poll_interval: config.device.poll_interval(),
            unplug_dwell: config.guide.unplug_dwell(),
            frame_rate: config.display.frame_rate,
            expected_name: config.device.expected_name.clone(),
        }
    }
}

impl Default for TesterSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// The tester's per-frame state
pub struct Tester<B> {
    registry: DeviceRegistry<B>,
    snapshot: InputSnapshot,
    guide: PairingGuide,
    poll_timer: PollTimer,
    pacer: FramePacer,
    helper: Option<Box<dyn PairingHelper>>,
    running: bool,
    events: Vec<InputEvent>,
}

impl<B: InputBackend> Tester<B> {
    pub fn new(backend: B, settings: TesterSettings) -> Self {
        Self {
            registry: DeviceRegistry::new(backend, settings.expected_name),
            snapshot: InputSnapshot::default(),
            guide: PairingGuide::new(settings.unplug_dwell),
            poll_timer: PollTimer::new(settings.poll_interval),
            pacer: FramePacer::from_rate(settings.frame_rate),
            helper: None,
            running: true,
            events: Vec::new(),
        }
    }

    /// Run `helper` when the user presses PS during USB pairing
    pub fn with_helper(mut self, helper: Box<dyn PairingHelper>) -> Self {
        self.helper = Some(helper);
        self
    }

    /// Advance one frame. `surface_events` carries quit requests from the
    /// render surface; device events are drained from the backend.
    pub fn tick(&mut self, surface_events: &[InputEvent], now: Instant) -> TickOutcome {
        self.pacer.begin(now);
        self.poll_helper();

        let mut events = std::mem::take(&mut self.events);
        events.clear();
        events.extend_from_slice(surface_events);
        self.registry.backend_mut().drain_events(&mut events);
        for event in &events {
            self.handle_event(*event, now);
        }
        self.events = events;

        if !self.running {
            return TickOutcome::Exit;
        }

        if !self.registry.is_bound() && self.poll_timer.is_due(now) {
            self.registry.refresh(&mut self.snapshot);
            self.poll_timer.mark(now);
        }

        if let Some(binding) = self.registry.binding() {
            if let Err(e) = self.snapshot.refresh(self.registry.backend(), binding) {
                warn!("Read failed, treating as disconnect: {}", e);
                self.lose_binding(now);
                self.registry.refresh(&mut self.snapshot);
                self.poll_timer.force();
                return TickOutcome::Skipped;
            }
        }

        let bound = self.registry.is_bound();
        if let Some(change) = self.guide.evaluate(bound, now) {
            log_transition(change);
        }

        if bound && self.snapshot.all_pressed(&QUIT_COMBO) {
            info!("Quit combo pressed");
            self.running = false;
            return TickOutcome::Exit;
        }

        if bound {
            TickOutcome::Controller
        } else {
            TickOutcome::Guide(self.guide.step())
        }
    }

    fn handle_event(&mut self, event: InputEvent, now: Instant) {
        match event {
            InputEvent::Quit => {
                info!("Quit requested");
                self.running = false;
            },
            InputEvent::Escape => {
                info!("Escape pressed");
                self.running = false;
            },
            InputEvent::DeviceAdded(handle) => {
                debug!("Device added: {:?}", handle);
                self.registry.refresh(&mut self.snapshot);
                self.poll_timer.mark(now);
            },
            InputEvent::DeviceRemoved(handle) => {
                let is_bound_device = self
                    .registry
                    .binding()
                    .is_some_and(|binding| binding.handle == handle);
                if is_bound_device {
                    self.lose_binding(now);
                } else {
                    debug!("Ignoring removal of unbound device {:?}", handle);
                }
            },
            InputEvent::ButtonDown { button, .. } if button == CENTER_BUTTON => {
                if let Some(change) = self.guide.apply(GuideInput::CenterButton, now) {
                    log_transition(change);
                    if change.to == GuideStep::AwaitUnplug {
                        self.start_helper();
                    }
                }
            },
            InputEvent::ButtonDown { .. } => {},
        }
    }

    fn lose_binding(&mut self, now: Instant) {
        self.registry.invalidate(&mut self.snapshot);
        if let Some(change) = self.guide.apply(GuideInput::Disconnected, now) {
            log_transition(change);
        }
    }

    fn start_helper(&mut self) {
        let Some(helper) = self.helper.as_mut() else {
            return;
        };
        if helper.is_running() {
            debug!("Pairing helper already running");
            return;
        }
        if let Err(e) = helper.start() {
            warn!("Could not start pairing helper: {}", e);
        }
    }

    fn poll_helper(&mut self) {
        let Some(result) = self.helper.as_mut().and_then(|helper| helper.poll()) else {
            return;
        };
        match result {
            Ok(()) => info!("Pairing helper succeeded, controller now knows this host"),
            Err(e) => warn!("Pairing helper: {}", e),
        }
    }

    pub fn binding(&self) -> Option<&DeviceBinding> {
        self.registry.binding()
    }

    pub fn snapshot(&self) -> &InputSnapshot {
        &self.snapshot
    }

    pub fn guide_step(&self) -> GuideStep {
        self.guide.step()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Time to wait before the next tick
    pub fn frame_delay(&self, now: Instant) -> Duration {
        self.pacer.remaining(now)
    }

    pub fn backend_mut(&mut self) -> &mut B {
        self.registry.backend_mut()
    }

    /// Stop any pairing run and release the binding
    pub fn shutdown(&mut self) {
        if let Some(helper) = self.helper.as_mut() {
            helper.cancel();
        }
        self.registry.invalidate(&mut self.snapshot);
        self.running = false;
        info!("Input released");
    }
}

fn log_transition(change: Transition) {
    match change.to {
        GuideStep::Idle => info!("Controller bound, pairing guide hidden"),
        step => info!("Pairing guide: {:?}", step),
    }
    debug!("Guide left {:?}", change.from);
}
