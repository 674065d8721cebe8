//! Static screen layout in design coordinates
//!
//! Everything is placed on a 480x320 design canvas (the size of the small
//! TFT panels the tester was built for) and scaled to the window at draw time.

use crate::input::gamepad::buttons::{AXIS_L2, AXIS_LEFT_X, AXIS_LEFT_Y, AXIS_R2, AXIS_RIGHT_X, AXIS_RIGHT_Y};
use crate::input::gamepad::Hat;
use egui::{pos2, vec2, Color32, Pos2, Rect, Vec2};

pub const DESIGN_WIDTH: f32 = 480.0;
pub const DESIGN_HEIGHT: f32 = 320.0;

pub const BACKGROUND: Color32 = Color32::from_rgb(30, 30, 30);
pub const FOREGROUND: Color32 = Color32::from_rgb(200, 200, 200);
pub const HIGHLIGHT: Color32 = Color32::from_rgb(0, 255, 0);
pub const STICK_AREA: Color32 = Color32::from_rgb(50, 50, 50);
pub const STICK_DOT: Color32 = Color32::from_rgb(255, 0, 0);
pub const TEXT: Color32 = Color32::from_rgb(220, 220, 220);
pub const INFO: Color32 = Color32::from_rgb(255, 255, 0);
pub const OUTLINE: Color32 = Color32::from_rgb(50, 50, 50);
pub const DARK_OUTLINE: Color32 = Color32::from_rgb(20, 20, 20);

pub const FONT_MEDIUM: f32 = 19.0;
pub const FONT_SMALL: f32 = 14.0;

/// A round button: center x, center y, radius, label
pub struct ButtonSpot {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub label: &'static str,
}

impl ButtonSpot {
    pub fn center(&self) -> Pos2 {
        pos2(self.x, self.y)
    }

    /// Where the label's top edge is centered
    pub fn label_anchor(&self) -> Pos2 {
        pos2(self.x, self.y + self.radius + 2.0)
    }
}

const fn button(x: f32, y: f32, radius: f32, label: &'static str) -> ButtonSpot {
    ButtonSpot { x, y, radius, label }
}

/// Button spots indexed by layout button index
pub const BUTTONS: [ButtonSpot; 13] = [
    button(380.0, 150.0, 12.0, "X"),
    button(415.0, 120.0, 12.0, "O"),
    button(345.0, 120.0, 12.0, "S"),
    button(380.0, 90.0, 12.0, "T"),
    button(80.0, 60.0, 10.0, "L1"),
    button(400.0, 60.0, 10.0, "R1"),
    button(80.0, 35.0, 8.0, "L2"),
    button(400.0, 35.0, 8.0, "R2"),
    button(170.0, 180.0, 8.0, "Sel"),
    button(230.0, 180.0, 8.0, "Sta"),
    button(200.0, 150.0, 10.0, "PS"),
    button(100.0, 220.0, 8.0, "L3"),
    button(300.0, 220.0, 8.0, "R3"),
];

/// An analog stick: a round area with a dot at the stick position
pub struct StickSpot {
    pub x: f32,
    pub y: f32,
    pub area_radius: f32,
    pub dot_radius: f32,
    pub x_axis: usize,
    pub y_axis: usize,
}

impl StickSpot {
    pub fn center(&self) -> Pos2 {
        pos2(self.x, self.y)
    }

    /// Dot center for axis values in -1..=1, kept inside the area
    pub fn dot_position(&self, x: f32, y: f32) -> Pos2 {
        let travel = self.area_radius - self.dot_radius;
        pos2(
            self.x + x.clamp(-1.0, 1.0) * travel,
            self.y + y.clamp(-1.0, 1.0) * travel,
        )
    }
}

pub const LEFT_STICK: StickSpot = StickSpot {
    x: 100.0,
    y: 220.0,
    area_radius: 40.0,
    dot_radius: 5.0,
    x_axis: AXIS_LEFT_X,
    y_axis: AXIS_LEFT_Y,
};

pub const RIGHT_STICK: StickSpot = StickSpot {
    x: 300.0,
    y: 220.0,
    area_radius: 40.0,
    dot_radius: 5.0,
    x_axis: AXIS_RIGHT_X,
    y_axis: AXIS_RIGHT_Y,
};

/// A horizontal pressure bar for an analog trigger
pub struct TriggerBar {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub axis: usize,
    pub name: &'static str,
    /// Label position relative to the bar's top-left corner
    pub label_offset: Vec2,
}

impl TriggerBar {
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(pos2(self.x, self.y), vec2(self.width, self.height))
    }

    /// Filled part of the bar for a pressure in 0..=1
    pub fn fill_rect(&self, pressure: f32) -> Rect {
        Rect::from_min_size(
            pos2(self.x, self.y),
            vec2(self.width * pressure.clamp(0.0, 1.0), self.height),
        )
    }

    pub fn label_anchor(&self) -> Pos2 {
        pos2(self.x, self.y) + self.label_offset
    }

    pub fn label(&self, pressure: f32) -> String {
        format!("{}: {:.2}", self.name, pressure)
    }
}

pub const L2_BAR: TriggerBar = TriggerBar {
    x: 120.0,
    y: 35.0,
    width: 80.0,
    height: 15.0,
    axis: AXIS_L2,
    name: "L2",
    label_offset: vec2(85.0, -1.0),
};

// R2's label sits left of its bar so it does not run off the screen
pub const R2_BAR: TriggerBar = TriggerBar {
    x: 280.0,
    y: 35.0,
    width: 80.0,
    height: 15.0,
    axis: AXIS_R2,
    name: "R2",
    label_offset: vec2(-50.0, -1.0),
};

/// The D-pad cross: center and the size of one arm segment
pub struct DpadSpot {
    pub x: f32,
    pub y: f32,
    pub segment_width: f32,
    pub segment_height: f32,
}

/// One D-pad arm and whether the hat points that way
pub struct DpadSegment {
    pub rect: Rect,
    pub active: bool,
}

impl DpadSpot {
    /// Up, down, left, right arms for the given hat state
    pub fn segments(&self, hat: Hat) -> [DpadSegment; 4] {
        let (w, h) = (self.segment_width, self.segment_height);
        let at = |x: f32, y: f32| Rect::from_min_size(pos2(x, y), vec2(w, h));

        [
            DpadSegment {
                rect: at(self.x - w / 2.0, self.y - h * 1.5),
                active: hat.y == 1,
            },
            DpadSegment {
                rect: at(self.x - w / 2.0, self.y + h * 0.5),
                active: hat.y == -1,
            },
            DpadSegment {
                rect: at(self.x - w * 1.5, self.y - h / 2.0),
                active: hat.x == -1,
            },
            DpadSegment {
                rect: at(self.x + w * 0.5, self.y - h / 2.0),
                active: hat.x == 1,
            },
        ]
    }

    pub fn label_anchor(&self) -> Pos2 {
        pos2(self.x, self.y + self.segment_height * 1.8)
    }
}

pub const DPAD: DpadSpot = DpadSpot {
    x: 100.0,
    y: 120.0,
    segment_width: 15.0,
    segment_height: 20.0,
};

pub const NAME_POSITION: Pos2 = pos2(10.0, 10.0);
pub const QUIT_HINT: &str = "Press L1+R1+START to Quit";
pub const QUIT_HINT_POSITION: Pos2 = pos2(DESIGN_WIDTH / 2.0, DESIGN_HEIGHT - 15.0);

/// Vertical offsets of guide lines from the screen center
pub fn guide_line_offsets(lines: usize) -> Vec<f32> {
    const SPACING: f32 = 30.0;
    let first = -(lines.saturating_sub(1) as f32) * SPACING / 2.0;
    (0..lines).map(|i| first + i as f32 * SPACING).collect()
}
