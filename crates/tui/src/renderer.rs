use std::io::{Stdout, stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use flamegrid_core::{FlameGraph, Outcome, Tooltip};
use flamegrid_protocol::{
    Fill, Key, KeyEvent, Modifiers, PointerEvent, RenderCommand, ThemeToken, Viewport, WheelEvent,
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Paragraph,
};
use tracing::info;

const HELP: &str = " drag pan | wheel zoom | shift+wheel pan | ←↑→↓ focus | enter zoom | esc reset | q quit";

/// Wheel delta per notch for zooming, in the same unit as browser deltas.
const ZOOM_STEP: f64 = 100.0;
/// Cells per notch for horizontal panning.
const PAN_STEP: f64 = 4.0;
/// Rows per notch for vertical scrolling.
const SCROLL_STEP: f64 = 3.0;

fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::Background => Color::Black,
        ThemeToken::BoxText => Color::Black,
        ThemeToken::FocusOutline => Color::White,
        ThemeToken::HeaderBackground => Color::DarkGray,
        ThemeToken::WindowSelection => Color::Gray,
        ThemeToken::WindowHandle => Color::LightBlue,
    }
}

fn fill_color(fill: Fill) -> Color {
    match fill {
        Fill::Theme(token) => theme_to_color(token),
        Fill::Solid(color) => {
            let [r, g, b] = color.to_rgb8();
            Color::Rgb(r, g, b)
        }
    }
}

/// Cells covered by a surface rect, clipped to `area`.
fn cell_span(area: Rect, x: f64, y: f64, w: f64, h: f64) -> Option<Rect> {
    let x0 = x.round().max(0.0) as u16;
    let y0 = y.round().max(0.0) as u16;
    let x1 = ((x + w).round() as u16).max(x0.saturating_add(1));
    let y1 = ((y + h).round() as u16).max(y0.saturating_add(1));
    let cells = Rect::new(area.x.saturating_add(x0), area.y.saturating_add(y0), x1 - x0, y1 - y0)
        .intersection(area);
    (!cells.is_empty()).then_some(cells)
}

/// Paint render commands into a terminal buffer, one surface unit per cell.
pub fn rasterize(commands: &[RenderCommand], buf: &mut Buffer, area: Rect) {
    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                fill,
                border_color,
                label,
                ..
            } => {
                let Some(cells) = cell_span(area, rect.x, rect.y, rect.w, rect.h) else {
                    continue;
                };
                let mut style = Style::default()
                    .bg(fill_color(*fill))
                    .fg(theme_to_color(ThemeToken::BoxText));
                if border_color.is_some() {
                    style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                }
                let text = label.as_deref().unwrap_or("");
                let mut chars = text.chars();
                let padded = cells.width > 2;
                for y in cells.top()..cells.bottom() {
                    for x in cells.left()..cells.right() {
                        let ch = if y == cells.top() && !(padded && x == cells.left()) {
                            chars.next().unwrap_or(' ')
                        } else {
                            ' '
                        };
                        buf[(x, y)].set_char(ch).set_style(style);
                    }
                }
            }
            RenderCommand::DrawLine {
                from, to, color, ..
            } => {
                let top = from.y.min(to.y);
                let height = (from.y - to.y).abs();
                // The right handle sits exactly on the surface edge.
                let x = from.x.min(f64::from(area.width) - 1.0);
                let Some(cells) = cell_span(area, x, top, 0.0, height) else {
                    continue;
                };
                for y in cells.top()..cells.bottom() {
                    buf[(cells.left(), y)]
                        .set_char('│')
                        .set_fg(theme_to_color(*color));
                }
            }
            RenderCommand::SetClip { .. }
            | RenderCommand::ClearClip
            | RenderCommand::BeginGroup { .. }
            | RenderCommand::EndGroup => {}
        }
    }
}

fn modifiers(mods: KeyModifiers) -> Modifiers {
    let mut out = Modifiers::empty();
    out.set(Modifiers::CTRL, mods.contains(KeyModifiers::CONTROL));
    out.set(Modifiers::META, mods.contains(KeyModifiers::SUPER));
    out.set(Modifiers::ALT, mods.contains(KeyModifiers::ALT));
    out.set(Modifiers::SHIFT, mods.contains(KeyModifiers::SHIFT));
    out
}

fn map_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::Esc => Key::Escape,
        KeyCode::Enter => Key::Enter,
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Left => Key::ArrowLeft,
        KeyCode::Right => Key::ArrowRight,
        KeyCode::Up => Key::ArrowUp,
        KeyCode::Down => Key::ArrowDown,
        _ => return None,
    })
}

/// Terminal wheels only report notches; turn them into wheel deltas.
fn wheel_event(mouse: &MouseEvent, x: f64, y: f64) -> Option<WheelEvent> {
    let mut mods = modifiers(mouse.modifiers);
    let (delta_x, delta_y) = match mouse.kind {
        MouseEventKind::ScrollLeft => {
            mods |= Modifiers::SHIFT;
            (-PAN_STEP, 0.0)
        }
        MouseEventKind::ScrollRight => {
            mods |= Modifiers::SHIFT;
            (PAN_STEP, 0.0)
        }
        MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
            let sign = if mouse.kind == MouseEventKind::ScrollUp {
                -1.0
            } else {
                1.0
            };
            let step = if mods.contains(Modifiers::ALT) {
                SCROLL_STEP
            } else if mods.contains(Modifiers::SHIFT) {
                PAN_STEP
            } else {
                ZOOM_STEP
            };
            (0.0, sign * step)
        }
        _ => return None,
    };
    Some(WheelEvent {
        x,
        y,
        delta_x,
        delta_y,
        modifiers: mods,
    })
}

fn handle_mouse(graph: &mut FlameGraph, mouse: &MouseEvent, now_ms: f64) -> Outcome {
    // Aim at cell centers so half-open box edges resolve like a pointer would.
    let x = f64::from(mouse.column) + 0.5;
    let y = f64::from(mouse.row) + 0.5;
    let pointer = PointerEvent::new(x, y, now_ms).with_modifiers(modifiers(mouse.modifiers));
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => graph.pointer_down(&pointer),
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
            graph.pointer_move(&pointer)
        }
        MouseEventKind::Up(MouseButton::Left) => graph.pointer_up(&pointer),
        _ => match wheel_event(mouse, x, y) {
            Some(wheel) => graph.wheel(&wheel),
            None => Outcome::Unchanged,
        },
    }
}

fn describe(tooltip: &Tooltip) -> String {
    let mut line = format!(
        " {}  self {}  total {}  {:.1}%",
        tooltip.name, tooltip.self_time, tooltip.total_time, tooltip.share
    );
    if let Some(source) = &tooltip.source {
        line.push_str("  ");
        line.push_str(source);
    }
    line
}

/// Run the interactive loop until the user quits. The bottom row is the
/// status line; everything above is the flame graph surface.
pub fn run(graph: &mut FlameGraph) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, graph);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    graph: &mut FlameGraph,
) -> Result<()> {
    let started = Instant::now();
    let mut status: Option<String> = None;
    let mut dirty = true;
    graph.focus_gained();

    loop {
        let size = terminal.size()?;
        let surface = Viewport::new(
            f64::from(size.width),
            f64::from(size.height.saturating_sub(1)),
        );
        dirty |= graph.set_viewport(surface).needs_repaint();

        if dirty {
            let commands = graph.render();
            let footer = status
                .clone()
                .or_else(|| graph.tooltip().as_ref().map(describe))
                .unwrap_or_else(|| HELP.to_string());
            terminal.draw(|frame| {
                let area = frame.area();
                let graph_area =
                    Rect::new(area.x, area.y, area.width, area.height.saturating_sub(1));
                rasterize(&commands, frame.buffer_mut(), graph_area);
                let footer_area = Rect::new(
                    area.x,
                    area.y + graph_area.height,
                    area.width,
                    area.height.min(1),
                );
                frame.render_widget(
                    Paragraph::new(footer.as_str())
                        .style(Style::default().fg(Color::White).bg(Color::DarkGray)),
                    footer_area,
                );
            })?;
            dirty = false;
        }

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let now_ms = started.elapsed().as_secs_f64() * 1000.0;
        let outcome = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let ctrl_c = key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL);
                if key.code == KeyCode::Char('q') || ctrl_c {
                    break;
                }
                match map_key(key.code) {
                    Some(k) => {
                        let event = KeyEvent::new(k).with_modifiers(modifiers(key.modifiers));
                        graph.key_down(&event)
                    }
                    None => Outcome::Unchanged,
                }
            }
            Event::Mouse(mouse) => handle_mouse(graph, &mouse, now_ms),
            Event::Resize(..) => Outcome::Repaint,
            _ => Outcome::Unchanged,
        };
        if outcome.needs_repaint() {
            status = None;
            dirty = true;
        }

        for request in graph.take_open_requests() {
            info!(%request, to_side = request.to_side, "open document requested");
            status = Some(format!(" open {request}"));
            dirty = true;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flamegrid_protocol::{Color as RgbaColor, Point};

    #[test]
    fn rect_paints_label_and_fill() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);
        let commands = [RenderCommand::DrawRect {
            rect: flamegrid_protocol::Rect::new(0.0, 1.0, 6.0, 1.0),
            fill: Fill::Solid(RgbaColor::rgba(1.0, 0.0, 0.0, 1.0)),
            border_color: None,
            label: Some("main".into()),
            frame_id: Some(0),
        }];
        rasterize(&commands, &mut buf, area);
        let row: String = (0..6).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert_eq!(row, " main ");
        assert_eq!(buf[(0, 1)].bg, Color::Rgb(255, 0, 0));
        assert_eq!(buf[(0, 0)].symbol(), " ");
        assert_eq!(buf[(6, 1)].bg, Color::Reset);
    }

    #[test]
    fn rects_outside_area_are_clipped() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        let commands = [RenderCommand::DrawRect {
            rect: flamegrid_protocol::Rect::new(2.0, 5.0, 10.0, 1.0),
            fill: Fill::Theme(ThemeToken::Background),
            border_color: None,
            label: None,
            frame_id: None,
        }];
        rasterize(&commands, &mut buf, area);
        assert_eq!(buf, Buffer::empty(area));
    }

    #[test]
    fn handle_line_is_drawn() {
        let area = Rect::new(0, 0, 8, 3);
        let mut buf = Buffer::empty(area);
        let commands = [RenderCommand::DrawLine {
            from: Point::new(8.0, 0.0),
            to: Point::new(8.0, 1.0),
            color: ThemeToken::WindowHandle,
            width: 2.0,
        }];
        rasterize(&commands, &mut buf, area);
        assert_eq!(buf[(7, 0)].symbol(), "│");
        assert_eq!(buf[(7, 1)].symbol(), " ");
    }

    #[test]
    fn keys_and_modifiers_map() {
        assert_eq!(map_key(KeyCode::Char(' ')), Some(Key::Space));
        assert_eq!(map_key(KeyCode::Char('x')), None);
        let mods = modifiers(KeyModifiers::CONTROL | KeyModifiers::ALT);
        assert!(mods.command());
        assert!(mods.contains(Modifiers::ALT));
        assert!(!mods.contains(Modifiers::SHIFT));
    }

    #[test]
    fn horizontal_scroll_pans() {
        let mouse = MouseEvent {
            kind: MouseEventKind::ScrollRight,
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        };
        let wheel = wheel_event(&mouse, 3.5, 4.5).unwrap();
        assert!(wheel.modifiers.contains(Modifiers::SHIFT));
        assert_eq!(wheel.delta_x, PAN_STEP);
    }
}
