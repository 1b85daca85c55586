use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
///
/// Box fills are computed colors (see `Fill::Solid`); tokens cover the
/// chrome around them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,
    /// Label text drawn on top of a box fill.
    BoxText,

    /// Keyboard focus ring.
    FocusOutline,

    // Header strip with the visible-window selector
    HeaderBackground,
    WindowSelection,
    WindowHandle,
}
