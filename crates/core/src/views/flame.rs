use flamegrid_protocol::{Fill, Point, Rect, RenderCommand, ThemeToken, Viewport};

use crate::config::FlameConfig;
use crate::graph::BoxId;
use crate::viewport::{Bounds, VisibleBoxes};

const HANDLE_WIDTH: f64 = 2.0;

/// Everything one repaint of the flame graph depends on.
#[derive(Debug, Clone, Copy)]
pub struct FlameScene<'a> {
    pub visible: &'a VisibleBoxes,
    pub bounds: Bounds,
    pub viewport: Viewport,
    pub config: &'a FlameConfig,
    pub focus: Option<BoxId>,
    pub highlight: Option<BoxId>,
}

/// Render the visible boxes plus the header strip with the window selector.
///
/// Box rects are in surface pixels: `x` scaled by the surface width, `y`
/// shifted by the vertical scroll. The header is drawn last so it stays on
/// top of scrolled rows.
pub fn render_flame_graph(scene: &FlameScene<'_>) -> Vec<RenderCommand> {
    let FlameScene {
        visible,
        bounds,
        viewport,
        config,
        focus,
        highlight,
    } = *scene;
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return Vec::new();
    }

    let surface = Rect::new(0.0, 0.0, viewport.width, viewport.height);
    let mut commands = Vec::with_capacity(visible.boxes.len() + 10);
    commands.push(RenderCommand::BeginGroup {
        id: "flame-graph".into(),
        label: Some("Flame Graph".into()),
    });
    commands.push(RenderCommand::SetClip { rect: surface });

    commands.push(RenderCommand::DrawRect {
        rect: surface,
        fill: Fill::Theme(ThemeToken::Background),
        border_color: None,
        label: None,
        frame_id: None,
    });

    for b in &visible.boxes {
        let x = b.x1 * viewport.width;
        let w = (b.x2 - b.x1) * viewport.width;
        if w < config.min_box_width {
            continue;
        }
        let top = b.y1 - bounds.y;
        let bottom = b.y2 - bounds.y;
        if bottom <= 0.0 || top >= viewport.height {
            continue;
        }

        let color = if highlight == Some(b.id) {
            b.color.dark
        } else {
            b.color.light
        };
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(x, top, w, bottom - top),
            fill: Fill::Solid(color.to_color()),
            border_color: (focus == Some(b.id)).then_some(ThemeToken::FocusOutline),
            label: Some(b.text.clone()),
            frame_id: Some(b.id.0),
        });
    }

    if config.header_height > 0.0 {
        render_header(&mut commands, &bounds, &viewport, config.header_height);
    }

    commands.push(RenderCommand::ClearClip);
    commands.push(RenderCommand::EndGroup);
    commands
}

fn render_header(
    commands: &mut Vec<RenderCommand>,
    bounds: &Bounds,
    viewport: &Viewport,
    height: f64,
) {
    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(0.0, 0.0, viewport.width, height),
        fill: Fill::Theme(ThemeToken::HeaderBackground),
        border_color: None,
        label: None,
        frame_id: None,
    });

    let left = bounds.min_x * viewport.width;
    let right = bounds.max_x * viewport.width;
    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(left, 0.0, right - left, height),
        fill: Fill::Theme(ThemeToken::WindowSelection),
        border_color: None,
        label: None,
        frame_id: None,
    });

    for x in [left, right] {
        commands.push(RenderCommand::DrawLine {
            from: Point::new(x, 0.0),
            to: Point::new(x, height),
            color: ThemeToken::WindowHandle,
            width: HANDLE_WIDTH,
        });
    }
}
