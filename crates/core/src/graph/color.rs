use flamegrid_protocol::{Category, Hsl};

/// Fill colors for one box: `light` for normal drawing, `dark` for the
/// hovered or highlighted state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxColor {
    pub light: Hsl,
    pub dark: Hsl,
}

const SYSTEM_COLOR: BoxColor = BoxColor {
    light: Hsl {
        h: 0.0,
        s: 0.0,
        l: 62.0,
    },
    dark: Hsl {
        h: 0.0,
        s: 0.0,
        l: 55.0,
    },
};

const HUE_MIN: f64 = -20.0;
const HUE_SPAN: f64 = 60.0;
const SATURATION_MIN: f64 = 80.0;
const SATURATION_SPAN: f64 = 20.0;
const FADE_DESATURATION: f64 = 50.0;
const LUMINANCE_MIN: f64 = 30.0;
const LUMINANCE_SPAN: f64 = 20.0;
const HOVER_DARKEN: f64 = 5.0;

/// Color for a frame identity. Depends on nothing but its arguments, so
/// refading the same box always lands on the same color.
pub fn box_color(graph_id: u64, category: Category, fade: bool) -> BoxColor {
    if category == Category::System {
        return SYSTEM_COLOR;
    }

    // Fibonacci hashing; the high bytes are the well-mixed ones.
    let hash = graph_id
        .wrapping_add(1)
        .wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let byte = |shift: u32| ((hash >> shift) & 0xff) as f64 / 255.0;

    let mut hue = HUE_MIN + HUE_SPAN * byte(56);
    if hue < 0.0 {
        hue += 360.0;
    }
    let mut saturation = SATURATION_MIN + SATURATION_SPAN * byte(48);
    if fade {
        saturation -= FADE_DESATURATION;
    }
    let luminance = LUMINANCE_MIN + LUMINANCE_SPAN * byte(40);

    BoxColor {
        light: Hsl::new(hue, saturation, luminance),
        dark: Hsl::new(hue, saturation, luminance - HOVER_DARKEN),
    }
}
