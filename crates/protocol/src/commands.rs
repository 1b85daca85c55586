use serde::{Deserialize, Serialize};

use crate::shared_str::SharedStr;
use crate::theme::ThemeToken;
use crate::types::{Color, Point, Rect};

/// A single, stateless render instruction.
///
/// The core emits a `Vec<RenderCommand>` per repaint. Renderers consume
/// this list sequentially and each command carries all the data it needs.
/// Coordinates are logical pixels relative to the surface origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a filled rectangle, optionally with a text label and the
    /// identity of the flame-graph box it represents.
    DrawRect {
        rect: Rect,
        fill: Fill,
        border_color: Option<ThemeToken>,
        label: Option<SharedStr>,
        frame_id: Option<u64>,
    },

    /// Draw a line segment.
    DrawLine {
        from: Point,
        to: Point,
        color: ThemeToken,
        width: f64,
    },

    /// Restrict subsequent drawing to a rectangular region.
    SetClip { rect: Rect },

    /// Remove the active clip region.
    ClearClip,

    /// Begin a logical group. Renderers may use this for batching or layer
    /// separation.
    BeginGroup {
        id: SharedStr,
        label: Option<SharedStr>,
    },

    /// End the current group.
    EndGroup,
}

/// How a rectangle is filled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Fill {
    /// Resolved by the renderer's theme.
    Theme(ThemeToken),
    /// A concrete color computed by the core (box colors).
    Solid(Color),
}
