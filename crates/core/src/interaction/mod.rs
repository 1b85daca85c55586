//! Input state machines that move the bounds.

pub mod drag;
pub mod wheel;

pub use drag::{Drag, DragKind, DragLimits, LockBound};
