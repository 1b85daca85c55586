use flamegrid_protocol::{Point, PointerEvent};

use crate::viewport::{Bounds, clamp, clamp_scroll};

bitflags::bitflags! {
    /// Which parts of the bounds stay pinned while dragging.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct LockBound: u8 {
        /// Vertical scroll.
        const Y = 1 << 0;
        /// Left edge of the window.
        const MIN_X = 1 << 1;
        /// Right edge of the window.
        const MAX_X = 1 << 2;
    }
}

/// What a press grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// The graph body: pans both axes, content follows the pointer.
    Pan,
    /// The window selection in the header: slides it along the timeline.
    Window,
    /// The left handle of the window selection.
    LeftEdge,
    /// The right handle of the window selection.
    RightEdge,
}

impl DragKind {
    fn lock(self) -> LockBound {
        match self {
            DragKind::Pan => LockBound::empty(),
            DragKind::Window => LockBound::Y,
            DragKind::LeftEdge => LockBound::Y | LockBound::MAX_X,
            DragKind::RightEdge => LockBound::Y | LockBound::MIN_X,
        }
    }
}

/// Limits a drag is clamped against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragLimits {
    pub min_window: f64,
    pub max_y: f64,
    pub viewport_height: f64,
}

/// An in-progress pointer drag. Lives from press to release.
#[derive(Debug, Clone, PartialEq)]
pub struct Drag {
    pub kind: DragKind,
    pub origin: Point,
    pub started_ms: f64,
    /// Bounds when the press happened.
    pub original: Bounds,
    /// Timeline fraction moved per pixel of pointer travel.
    pub x_per_pixel: f64,
    pub lock: LockBound,
}

impl Drag {
    pub fn start(kind: DragKind, press: &PointerEvent, bounds: Bounds, surface_width: f64) -> Self {
        let per_pixel = if surface_width > 0.0 {
            1.0 / surface_width
        } else {
            0.0
        };
        // Panning the body drags content, so the window moves against the
        // pointer; header drags move the window with it.
        let x_per_pixel = match kind {
            DragKind::Pan => -bounds.width() * per_pixel,
            _ => per_pixel,
        };
        Self {
            kind,
            origin: Point::new(press.x, press.y),
            started_ms: press.time_ms,
            original: bounds,
            x_per_pixel,
            lock: kind.lock(),
        }
    }

    /// Bounds for the pointer at `(x, y)`, always derived from the snapshot
    /// taken at press time.
    pub fn bounds_at(&self, x: f64, y: f64, limits: &DragLimits) -> Bounds {
        let o = self.original;
        let width = o.width();
        let dx = (x - self.origin.x) * self.x_per_pixel;

        let mut min_x = o.min_x;
        let mut max_x = o.max_x;
        if !self.lock.contains(LockBound::MIN_X) {
            let upper = if self.lock.contains(LockBound::MAX_X) {
                o.max_x - limits.min_window
            } else {
                1.0 - width
            };
            min_x = clamp(o.min_x + dx, 0.0, upper);
        }
        if !self.lock.contains(LockBound::MAX_X) {
            max_x = if self.lock.contains(LockBound::MIN_X) {
                clamp(o.max_x + dx, o.min_x + limits.min_window, 1.0)
            } else {
                min_x + width
            };
        }

        let scroll_y = if self.lock.contains(LockBound::Y) {
            o.y
        } else {
            clamp_scroll(o.y - (y - self.origin.y), limits.max_y, limits.viewport_height)
        };

        Bounds {
            min_x,
            max_x,
            y: scroll_y,
            level: o.level,
        }
    }

    /// A short, quick press/release pair is a click rather than a drag.
    pub fn is_click(&self, release: &PointerEvent, max_distance: f64, max_duration_ms: f64) -> bool {
        let distance = (release.x - self.origin.x).hypot(release.y - self.origin.y);
        distance < max_distance && release.time_ms - self.started_ms < max_duration_ms
    }
}
