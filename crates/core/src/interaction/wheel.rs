use crate::viewport::{Bounds, clamp, clamp_scroll};

/// Zoom around the timeline point under the cursor.
///
/// `cursor_fraction` is the cursor's position across the surface (`0..1`).
/// Negative `delta_y` zooms in. Returns `None` when the result would be
/// narrower than `min_window` (or inverted), leaving the caller's bounds
/// untouched.
pub fn zoom(
    bounds: &Bounds,
    cursor_fraction: f64,
    delta_y: f64,
    divisor: f64,
    min_window: f64,
) -> Option<Bounds> {
    let pivot = bounds.timeline_x(cursor_fraction.clamp(0.0, 1.0));
    let scale = -delta_y / divisor;
    let min_x = (bounds.min_x + scale * (pivot - bounds.min_x)).max(0.0);
    let max_x = (bounds.max_x - scale * (bounds.max_x - pivot)).min(1.0);
    let width = max_x - min_x;
    if width.is_nan() || width < min_window {
        return None;
    }
    Some(Bounds {
        min_x,
        max_x,
        ..*bounds
    })
}

/// Slide the window sideways by `delta` pixels of a `surface_width` canvas,
/// without resizing it.
pub fn pan_x(bounds: &Bounds, delta: f64, surface_width: f64) -> Bounds {
    if surface_width <= 0.0 {
        return *bounds;
    }
    let shift = clamp(
        delta / surface_width * bounds.width(),
        -bounds.min_x,
        1.0 - bounds.max_x,
    );
    Bounds {
        min_x: bounds.min_x + shift,
        max_x: bounds.max_x + shift,
        ..*bounds
    }
}

/// Scroll vertically by `delta` pixels.
pub fn scroll_y(bounds: &Bounds, delta: f64, max_y: f64, viewport_height: f64) -> Bounds {
    Bounds {
        y: clamp_scroll(bounds.y + delta, max_y, viewport_height),
        ..*bounds
    }
}
