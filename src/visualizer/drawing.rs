//! Low-level drawing primitives on a scaled design canvas
//!
//! Layout coordinates live in a fixed 480x320 space. [`Canvas`] fits that
//! space into the window (keeping the aspect ratio, centered) and offers the
//! few shapes the tester needs in design units.

use super::layout::{DESIGN_HEIGHT, DESIGN_WIDTH};
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke};

pub struct Canvas {
    painter: Painter,
    origin: Pos2,
    scale: f32,
}

impl Canvas {
    /// Fit the design canvas into `screen`
    pub fn fit(painter: Painter, screen: Rect) -> Self {
        let scale = fit_scale(screen.width(), screen.height());
        let used = egui::vec2(DESIGN_WIDTH * scale, DESIGN_HEIGHT * scale);
        let origin = screen.center() - used / 2.0;
        Self {
            painter,
            origin,
            scale,
        }
    }

    pub fn to_screen(&self, point: Pos2) -> Pos2 {
        self.origin + point.to_vec2() * self.scale
    }

    fn rect_to_screen(&self, rect: Rect) -> Rect {
        Rect::from_min_max(self.to_screen(rect.min), self.to_screen(rect.max))
    }

    fn stroke(&self, color: Color32) -> Stroke {
        Stroke::new(self.scale.max(1.0), color)
    }

    pub fn circle(&self, center: Pos2, radius: f32, fill: Color32, outline: Color32) {
        let center = self.to_screen(center);
        let radius = radius * self.scale;
        self.painter.circle_filled(center, radius, fill);
        self.painter.circle_stroke(center, radius, self.stroke(outline));
    }

    pub fn rect_filled(&self, rect: Rect, rounding: f32, fill: Color32) {
        self.painter
            .rect_filled(self.rect_to_screen(rect), rounding * self.scale, fill);
    }

    pub fn rect_outline(&self, rect: Rect, rounding: f32, color: Color32) {
        self.painter.rect_stroke(
            self.rect_to_screen(rect),
            rounding * self.scale,
            self.stroke(color),
        );
    }

    /// Text with `anchor` deciding which corner/edge sits at `pos`
    pub fn text(&self, pos: Pos2, anchor: Align2, text: &str, size: f32, color: Color32) {
        self.painter.text(
            self.to_screen(pos),
            anchor,
            text,
            FontId::proportional(size * self.scale),
            color,
        );
    }
}

/// Largest uniform scale that fits the design canvas into `width` x `height`
pub fn fit_scale(width: f32, height: f32) -> f32 {
    (width / DESIGN_WIDTH).min(height / DESIGN_HEIGHT).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_scale() {
        assert_eq!(fit_scale(480.0, 320.0), 1.0);
        assert_eq!(fit_scale(960.0, 640.0), 2.0);
        // Limited by the narrower side
        assert_eq!(fit_scale(480.0, 640.0), 1.0);
        assert_eq!(fit_scale(1920.0, 320.0), 1.0);
        assert_eq!(fit_scale(0.0, 320.0), 0.0);
    }
}
