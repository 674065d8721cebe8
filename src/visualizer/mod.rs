//! Controller tester window
//!
//! Native egui window showing the live controller state, or the pairing
//! guide while no controller is bound.

mod app;
mod drawing;
pub mod layout;
mod rendering;

pub use app::TesterApp;

use crate::config::DisplayConfig;
use crate::input::gamepad::InputBackend;
use crate::tester::Tester;
use tracing::info;

const WINDOW_TITLE: &str = "PS3 Controller Tester";

/// Open the window and run the tester until it exits.
///
/// Blocks until the window is closed.
pub fn run_visualizer<B>(tester: Tester<B>, display: &DisplayConfig) -> anyhow::Result<()>
where
    B: InputBackend + 'static,
{
    let mut viewport = egui::ViewportBuilder::default()
        .with_title(WINDOW_TITLE)
        .with_inner_size([display.width as f32, display.height as f32]);
    if display.fullscreen {
        viewport = viewport.with_fullscreen(true);
    }

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let (width, height, fullscreen) = (display.width, display.height, display.fullscreen);
    info!(
        "Opening {}x{} window{}",
        width,
        height,
        if fullscreen { " (fullscreen)" } else { "" }
    );

    eframe::run_native(
        WINDOW_TITLE,
        native_options,
        Box::new(move |_cc| Ok(Box::new(TesterApp::new(tester)))),
    )
    .map_err(|e| anyhow::anyhow!("Window error: {}", e))
}
