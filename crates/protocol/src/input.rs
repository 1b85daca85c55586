use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Keyboard modifiers held during an input event.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Modifiers: u8 {
        const CTRL = 1 << 0;
        /// Cmd on macOS.
        const META = 1 << 1;
        const ALT = 1 << 2;
        const SHIFT = 1 << 3;
    }
}

impl Modifiers {
    /// Ctrl on Linux/Windows, Cmd on macOS. Either counts.
    pub fn command(self) -> bool {
        self.intersects(Self::CTRL | Self::META)
    }
}

/// A pointer press, move or release, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    /// Monotonic timestamp in milliseconds, used for click detection.
    pub time_ms: f64,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64, time_ms: f64) -> Self {
        Self {
            x,
            y,
            time_ms,
            modifiers: Modifiers::empty(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// A wheel or trackpad scroll. Positive `delta_y` scrolls down / zooms out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelEvent {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub delta_x: f64,
    pub delta_y: f64,
    #[serde(default)]
    pub modifiers: Modifiers,
}

/// Keys the flame graph reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Escape,
    Enter,
    Space,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Option<Self> {
        Some(match key {
            "Escape" => Self::Escape,
            "Enter" => Self::Enter,
            " " | "Space" | "Spacebar" => Self::Space,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
