//! eframe application driving the frame loop
//!
//! Each egui frame runs one [`Tester::tick`], then paints either the
//! controller view or the pairing guide. Repaints are scheduled with the
//! tester's frame delay, so the loop runs at the configured frame rate even
//! when no input arrives.

use super::drawing::Canvas;
use super::layout::BACKGROUND;
use super::rendering::{render_controller, render_guide};
use crate::input::gamepad::{InputBackend, InputEvent};
use crate::tester::{Tester, TickOutcome};
use std::time::Instant;
use tracing::debug;

pub struct TesterApp<B: InputBackend> {
    tester: Tester<B>,
    surface_events: Vec<InputEvent>,
}

impl<B: InputBackend> TesterApp<B> {
    pub fn new(tester: Tester<B>) -> Self {
        Self {
            tester,
            surface_events: Vec::new(),
        }
    }

    /// Turn window input into tester events
    fn collect_surface_events(&mut self, ctx: &egui::Context) {
        self.surface_events.clear();
        ctx.input(|i| {
            if i.key_pressed(egui::Key::Escape) {
                self.surface_events.push(InputEvent::Escape);
            }
            if i.viewport().close_requested() {
                self.surface_events.push(InputEvent::Quit);
            }
        });
    }
}

impl<B: InputBackend> eframe::App for TesterApp<B> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.collect_surface_events(ctx);
        let outcome = self.tester.tick(&self.surface_events, Instant::now());

        if outcome == TickOutcome::Exit {
            debug!("Closing window");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        ctx.set_cursor_icon(egui::CursorIcon::None);

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(BACKGROUND))
            .show(ctx, |ui| {
                let screen = ui.max_rect();
                let canvas = Canvas::fit(ui.painter_at(screen), screen);

                match outcome {
                    TickOutcome::Guide(step) => render_guide(&canvas, step),
                    TickOutcome::Controller => {
                        if let Some(binding) = self.tester.binding() {
                            render_controller(&canvas, binding, self.tester.snapshot());
                        }
                    },
                    TickOutcome::Skipped | TickOutcome::Exit => {},
                }
            });

        ctx.request_repaint_after(self.tester.frame_delay(Instant::now()));
    }
}

impl<B: InputBackend> Drop for TesterApp<B> {
    fn drop(&mut self) {
        self.tester.shutdown();
    }
}
