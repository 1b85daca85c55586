//! The visible window over the box set.

use flamegrid_protocol::SharedStr;

use crate::graph::{BoxColor, BoxId, Geometry, box_color};

/// Current view: a horizontal window over the timeline, a vertical scroll
/// offset and the zoom depth above which ancestors are drawn faded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    /// Vertical scroll offset in content pixels.
    pub y: f64,
    pub level: usize,
}

impl Bounds {
    /// The whole timeline, scrolled to the top, nothing faded.
    pub const FULL: Bounds = Bounds {
        min_x: 0.0,
        max_x: 1.0,
        y: 0.0,
        level: 0,
    };

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Map a surface x fraction (`0..1` across the canvas) to the timeline.
    pub fn timeline_x(&self, fraction: f64) -> f64 {
        self.min_x + fraction * self.width()
    }

    /// Grow a window narrower than `min_window` around its center, shifted
    /// back inside `[0, 1]` if it would stick out.
    pub fn widened(self, min_window: f64) -> Bounds {
        if self.width() >= min_window {
            return self;
        }
        let center = (self.min_x + self.max_x) / 2.0;
        let min_x = clamp(center - min_window / 2.0, 0.0, 1.0 - min_window);
        Bounds {
            min_x,
            max_x: min_x + min_window,
            ..self
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::FULL
    }
}

/// Clamp `v` into `[lo, hi]`; if the range is empty the lower bound wins.
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.min(hi).max(lo)
}

/// Clamp a vertical scroll offset so the content bottom never scrolls above
/// the surface bottom, and never below zero.
pub fn clamp_scroll(y: f64, max_y: f64, viewport_height: f64) -> f64 {
    clamp(y, 0.0, max_y - viewport_height)
}

/// A box inside the current window, in window coordinates: `x1`/`x2` are
/// fractions of the surface width, `y1`/`y2` are still content pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleBox {
    pub id: BoxId,
    /// Index of the box in `Geometry::boxes`.
    pub source: usize,
    pub x1: f64,
    pub x2: f64,
    pub y1: f64,
    pub y2: f64,
    pub level: usize,
    pub color: BoxColor,
    pub text: SharedStr,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibleBoxes {
    /// Still sorted by `(level, x1)`.
    pub boxes: Vec<VisibleBox>,
    /// Content height over all boxes, visible or not.
    pub max_y: f64,
}

impl VisibleBoxes {
    pub fn position(&self, id: BoxId) -> Option<usize> {
        self.boxes.iter().position(|b| b.id == id)
    }

    pub fn get(&self, id: BoxId) -> Option<&VisibleBox> {
        self.boxes.iter().find(|b| b.id == id)
    }
}

/// Select the boxes intersecting `[min_x, max_x)` and rescale them to the
/// window. Boxes shallower than `bounds.level` get the faded color.
pub fn visible_boxes(geometry: &Geometry, bounds: &Bounds) -> VisibleBoxes {
    let range = bounds.width();
    let mut boxes = Vec::new();
    let mut max_y: f64 = 0.0;

    for (source, b) in geometry.boxes.iter().enumerate() {
        max_y = max_y.max(b.y2);
        if b.x2 <= bounds.min_x || b.x1 >= bounds.max_x || range <= 0.0 {
            continue;
        }
        let color = if b.level < bounds.level {
            box_color(b.frame.graph_id, b.frame.category(), true)
        } else {
            b.color
        };
        boxes.push(VisibleBox {
            id: b.id,
            source,
            x1: ((b.x1 - bounds.min_x) / range).max(0.0),
            x2: ((b.x2 - bounds.min_x) / range).min(1.0),
            y1: b.y1,
            y2: b.y2,
            level: b.level,
            color,
            text: b.text.clone(),
        });
    }

    VisibleBoxes { boxes, max_y }
}
