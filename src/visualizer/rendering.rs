//! Rendering of the controller view and the pairing guide

use super::drawing::Canvas;
use super::layout::{
    guide_line_offsets, BUTTONS, DARK_OUTLINE, DESIGN_HEIGHT, DESIGN_WIDTH, DPAD, FONT_MEDIUM,
    FONT_SMALL, FOREGROUND, HIGHLIGHT, INFO, L2_BAR, LEFT_STICK, NAME_POSITION, OUTLINE,
    QUIT_HINT, QUIT_HINT_POSITION, R2_BAR, RIGHT_STICK, STICK_AREA, STICK_DOT, TEXT,
};
use crate::input::gamepad::{DeviceBinding, InputSnapshot};
use crate::pairing::{Emphasis, GuideStep};
use egui::{pos2, Align2};

/// Draw the bound controller's live state
pub fn render_controller(canvas: &Canvas, binding: &DeviceBinding, snapshot: &InputSnapshot) {
    canvas.text(
        NAME_POSITION,
        Align2::LEFT_TOP,
        &format!("Connected: {}", binding.display_name()),
        FONT_SMALL,
        FOREGROUND,
    );

    // Stick areas go under the L3/R3 buttons, the dots on top of them
    for stick in [&LEFT_STICK, &RIGHT_STICK] {
        canvas.circle(stick.center(), stick.area_radius, STICK_AREA, DARK_OUTLINE);
    }

    for (index, spot) in BUTTONS.iter().enumerate().take(snapshot.buttons().len()) {
        let fill = if snapshot.button(index) { HIGHLIGHT } else { FOREGROUND };
        canvas.circle(spot.center(), spot.radius, fill, OUTLINE);
        canvas.text(spot.label_anchor(), Align2::CENTER_TOP, spot.label, FONT_SMALL, TEXT);
    }

    for stick in [&LEFT_STICK, &RIGHT_STICK] {
        let x = snapshot.axis(stick.x_axis).unwrap_or(0.0);
        let y = snapshot.axis(stick.y_axis).unwrap_or(0.0);
        canvas.circle(stick.dot_position(x, y), stick.dot_radius, STICK_DOT, STICK_DOT);
    }

    render_triggers(canvas, snapshot);

    if let Some(hat) = snapshot.hat(0) {
        for segment in DPAD.segments(hat) {
            if segment.active {
                canvas.rect_filled(segment.rect, 3.0, HIGHLIGHT);
            }
            canvas.rect_outline(segment.rect, 3.0, OUTLINE);
        }
        canvas.text(DPAD.label_anchor(), Align2::CENTER_CENTER, "D-PAD", FONT_SMALL, TEXT);
    }

    canvas.text(
        QUIT_HINT_POSITION,
        Align2::CENTER_CENTER,
        QUIT_HINT,
        FONT_SMALL,
        INFO,
    );
}

fn render_triggers(canvas: &Canvas, snapshot: &InputSnapshot) {
    // Only pads that report both trigger axes get bars
    let (Some(l2), Some(r2)) = (snapshot.trigger(L2_BAR.axis), snapshot.trigger(R2_BAR.axis))
    else {
        return;
    };

    for (bar, pressure) in [(&L2_BAR, l2), (&R2_BAR, r2)] {
        canvas.rect_filled(bar.rect(), 0.0, STICK_AREA);
        canvas.rect_filled(bar.fill_rect(pressure), 0.0, HIGHLIGHT);
        canvas.rect_outline(bar.rect(), 0.0, DARK_OUTLINE);
        canvas.text(
            bar.label_anchor(),
            Align2::LEFT_TOP,
            &bar.label(pressure),
            FONT_SMALL,
            TEXT,
        );
    }
}

/// Draw the instructions of a pairing step, centered on screen
pub fn render_guide(canvas: &Canvas, step: GuideStep) {
    let instructions = step.instructions();
    let center_y = DESIGN_HEIGHT / 2.0;

    for (line, offset) in instructions.iter().zip(guide_line_offsets(instructions.len())) {
        let (size, color) = match line.emphasis {
            Emphasis::Prompt => (FONT_MEDIUM, INFO),
            Emphasis::Status => (FONT_SMALL, TEXT),
        };
        canvas.text(
            pos2(DESIGN_WIDTH / 2.0, center_y + offset),
            Align2::CENTER_CENTER,
            line.text,
            size,
            color,
        );
    }
}
