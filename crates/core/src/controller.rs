//! The interactive flame graph: one model, one viewport, and the input
//! handlers that move between them.

use std::sync::Arc;

use flamegrid_protocol::{
    CallTreeModel, Key, KeyEvent, Modifiers, OpenDocument, PointerEvent, RenderCommand,
    SharedStr, Viewport, WheelEvent,
};
use serde::Serialize;
use tracing::trace;

use crate::config::FlameConfig;
use crate::graph::{BoxId, Geometry, RowLayout, build_geometry};
use crate::interaction::{Drag, DragKind, DragLimits, wheel};
use crate::memo::{ByAddress, Memo};
use crate::query::{Direction, box_at, neighbor};
use crate::viewport::{Bounds, VisibleBoxes, clamp_scroll, visible_boxes};
use crate::views::flame::{FlameScene, render_flame_graph};

/// Whether the host needs to repaint after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Unchanged,
    Repaint,
}

impl Outcome {
    pub fn needs_repaint(self) -> bool {
        self == Outcome::Repaint
    }

    fn or(self, other: Outcome) -> Outcome {
        if self.needs_repaint() { self } else { other }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightSource {
    Pointer,
    Keyboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub id: BoxId,
    pub source: HighlightSource,
}

/// What the host shows next to the highlighted box.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    pub name: SharedStr,
    pub self_time: String,
    pub aggregate_time: String,
    pub total_time: String,
    /// Percentage of the whole timeline covered by the box.
    pub share: f64,
    pub source: Option<String>,
    pub origin: HighlightSource,
}

type GeometryKey = (ByAddress<CallTreeModel>, RowLayout);
type VisibleKey = (ByAddress<Geometry>, Bounds);

/// Controller for one flame graph surface.
#[derive(Debug)]
pub struct FlameGraph {
    config: FlameConfig,
    model: Option<Arc<CallTreeModel>>,
    geometry_memo: Memo<GeometryKey, Geometry>,
    visible_memo: Memo<VisibleKey, VisibleBoxes>,
    geometry: Arc<Geometry>,
    visible: Arc<VisibleBoxes>,
    viewport: Viewport,
    bounds: Bounds,
    drag: Option<Drag>,
    focus: Option<BoxId>,
    highlight: Option<Highlight>,
    open_requests: Vec<OpenDocument>,
}

impl FlameGraph {
    pub fn new(config: FlameConfig) -> Self {
        Self {
            config,
            model: None,
            geometry_memo: Memo::default(),
            visible_memo: Memo::default(),
            geometry: Arc::default(),
            visible: Arc::default(),
            viewport: Viewport::new(0.0, 0.0),
            bounds: Bounds::FULL,
            drag: None,
            focus: None,
            highlight: None,
            open_requests: Vec::new(),
        }
    }

    pub fn config(&self) -> &FlameConfig {
        &self.config
    }

    pub fn model(&self) -> Option<&Arc<CallTreeModel>> {
        self.model.as_ref()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn visible(&self) -> &VisibleBoxes {
        &self.visible
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn focus(&self) -> Option<BoxId> {
        self.focus
    }

    pub fn highlight(&self) -> Option<Highlight> {
        self.highlight
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Swap in a model. The same `Arc` again is a no-op; a different one
    /// rebuilds the geometry and resets the view.
    pub fn set_model(&mut self, model: Arc<CallTreeModel>) -> Outcome {
        if let Some(current) = &self.model
            && Arc::ptr_eq(current, &model)
        {
            return Outcome::Unchanged;
        }
        self.model = Some(model);
        self.bounds = Bounds::FULL;
        self.drag = None;
        self.focus = None;
        self.highlight = None;
        self.sync();
        Outcome::Repaint
    }

    /// Replace the configuration. Row metrics feed the geometry key, so a
    /// layout change rebuilds the boxes.
    pub fn set_config(&mut self, config: FlameConfig) -> Outcome {
        if config == self.config {
            return Outcome::Unchanged;
        }
        self.config = config;
        self.sync();
        self.set_bounds(
            Bounds {
                y: self.clamped_scroll(self.bounds.y),
                ..self.bounds
            }
            .widened(self.config.min_window),
        );
        Outcome::Repaint
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> Outcome {
        if viewport == self.viewport {
            return Outcome::Unchanged;
        }
        self.viewport = viewport;
        self.set_bounds(Bounds {
            y: self.clamped_scroll(self.bounds.y),
            ..self.bounds
        });
        Outcome::Repaint
    }

    pub fn pointer_down(&mut self, event: &PointerEvent) -> Outcome {
        if self.viewport.width <= 0.0 {
            return Outcome::Unchanged;
        }
        let kind = self.drag_kind_at(event.x, event.y);
        self.drag = Some(Drag::start(kind, event, self.bounds, self.viewport.width));
        Outcome::Unchanged
    }

    pub fn pointer_move(&mut self, event: &PointerEvent) -> Outcome {
        if let Some(drag) = &self.drag {
            let next = drag.bounds_at(event.x, event.y, &self.drag_limits());
            return self.set_bounds(next);
        }
        match self.hit(event.x, event.y) {
            Some(id) => self.set_highlight(Some(Highlight {
                id,
                source: HighlightSource::Pointer,
            })),
            None => self.clear_pointer_highlight(),
        }
    }

    /// Finish a drag. A short quick press counts as a click on the box
    /// under the pointer instead.
    pub fn pointer_up(&mut self, event: &PointerEvent) -> Outcome {
        let Some(drag) = self.drag.take() else {
            return Outcome::Unchanged;
        };
        let is_click = drag.kind == DragKind::Pan
            && drag.is_click(
                event,
                self.config.click_max_distance,
                self.config.click_max_duration_ms,
            );
        if !is_click {
            let next = drag.bounds_at(event.x, event.y, &self.drag_limits());
            return self.set_bounds(next);
        }

        let restored = self.set_bounds(drag.original);
        let Some(id) = self.hit(event.x, event.y) else {
            return restored;
        };
        if event.modifiers.command() {
            self.request_open(id, event.modifiers.contains(Modifiers::ALT));
            return restored;
        }
        self.focus = Some(id);
        self.zoom_to_box(id);
        Outcome::Repaint
    }

    /// The pointer left the surface: drop any drag and pointer hover.
    pub fn pointer_leave(&mut self) -> Outcome {
        self.drag = None;
        self.clear_pointer_highlight()
    }

    pub fn wheel(&mut self, event: &WheelEvent) -> Outcome {
        if self.viewport.width <= 0.0 || self.drag.is_some() {
            return Outcome::Unchanged;
        }
        let next = if event.modifiers.contains(Modifiers::ALT) {
            wheel::scroll_y(
                &self.bounds,
                event.delta_y,
                self.visible.max_y,
                self.viewport.height,
            )
        } else if event.modifiers.contains(Modifiers::SHIFT) {
            // Browsers report shift+wheel on the x axis, terminals on y.
            let delta = if event.delta_x != 0.0 {
                event.delta_x
            } else {
                event.delta_y
            };
            wheel::pan_x(&self.bounds, delta, self.viewport.width)
        } else {
            let Some(zoomed) = wheel::zoom(
                &self.bounds,
                event.x / self.viewport.width,
                event.delta_y,
                self.config.wheel_divisor,
                self.config.min_window,
            ) else {
                return Outcome::Unchanged;
            };
            zoomed
        };
        self.set_bounds(next)
    }

    pub fn key_down(&mut self, event: &KeyEvent) -> Outcome {
        match event.key {
            Key::Escape => {
                if let Some(h) = self.highlight
                    && h.source == HighlightSource::Keyboard
                {
                    return self.set_highlight(None);
                }
                self.reset()
            }
            Key::Enter if event.modifiers.command() => {
                if let Some(h) = self.highlight {
                    self.request_open(h.id, event.modifiers.contains(Modifiers::ALT));
                }
                Outcome::Unchanged
            }
            Key::Enter | Key::Space => match self.focus {
                Some(id) => self.zoom_to_box(id),
                None => Outcome::Unchanged,
            },
            Key::ArrowLeft => self.move_focus(Direction::Left),
            Key::ArrowRight => self.move_focus(Direction::Right),
            Key::ArrowUp => self.move_focus(Direction::Up),
            Key::ArrowDown => self.move_focus(Direction::Down),
        }
    }

    /// The surface gained keyboard focus.
    pub fn focus_gained(&mut self) -> Outcome {
        if self.focus.is_some() {
            return Outcome::Unchanged;
        }
        self.focus_first_visible()
    }

    /// Fit the window to a box and fade everything above it.
    pub fn zoom_to_box(&mut self, id: BoxId) -> Outcome {
        let Some(b) = self.geometry.get(id) else {
            return Outcome::Unchanged;
        };
        let mut y = self.bounds.y;
        // With no surface height yet every row counts as off-screen.
        if self.viewport.height > 0.0 && b.y1 >= y + self.viewport.height {
            y = b.y1 - self.config.header_height;
        }
        let next = Bounds {
            min_x: b.x1,
            max_x: b.x2,
            y: self.clamped_scroll(y),
            level: b.level,
        };
        self.set_bounds(next.widened(self.config.min_window))
    }

    /// Back to the whole timeline, scrolled to the top.
    pub fn reset(&mut self) -> Outcome {
        self.set_bounds(Bounds::FULL)
    }

    pub fn take_open_requests(&mut self) -> Vec<OpenDocument> {
        std::mem::take(&mut self.open_requests)
    }

    pub fn tooltip(&self) -> Option<Tooltip> {
        let highlight = self.highlight?;
        let b = self.geometry.get(highlight.id)?;
        let unit = self
            .model
            .as_ref()
            .map(|m| m.value_unit)
            .unwrap_or_default();
        let frame = &b.frame;
        let source = frame
            .location
            .src
            .as_ref()
            .map(|src| format!("{}:{}:{}", src.path, src.line_number, src.column_number));
        Some(Tooltip {
            name: b.text.clone(),
            self_time: unit.format_value(frame.self_time),
            aggregate_time: unit.format_value(frame.aggregate_time),
            total_time: unit.format_value(frame.total_time()),
            share: (b.x2 - b.x1) * 100.0,
            source,
            origin: highlight.source,
        })
    }

    pub fn render(&self) -> Vec<RenderCommand> {
        render_flame_graph(&FlameScene {
            visible: &self.visible,
            bounds: self.bounds,
            viewport: self.viewport,
            config: &self.config,
            focus: self.focus,
            highlight: self.highlight.map(|h| h.id),
        })
    }

    fn row_layout(&self) -> RowLayout {
        RowLayout {
            row_height: self.config.row_height,
            header_height: self.config.header_height,
        }
    }

    fn drag_limits(&self) -> DragLimits {
        DragLimits {
            min_window: self.config.min_window,
            max_y: self.visible.max_y,
            viewport_height: self.viewport.height,
        }
    }

    fn clamped_scroll(&self, y: f64) -> f64 {
        clamp_scroll(y, self.visible.max_y, self.viewport.height)
    }

    /// Bring the memoized stages up to date with the model and bounds.
    fn sync(&mut self) {
        let Some(model) = &self.model else {
            self.geometry_memo.clear();
            self.visible_memo.clear();
            self.geometry = Arc::default();
            self.visible = Arc::default();
            return;
        };
        let layout = self.row_layout();
        self.geometry = self
            .geometry_memo
            .get_or_compute((ByAddress(Arc::clone(model)), layout), |(model, layout)| {
                build_geometry(&model.0, *layout)
            });
        self.visible = self.visible_memo.get_or_compute(
            (ByAddress(Arc::clone(&self.geometry)), self.bounds),
            |(geometry, bounds)| visible_boxes(&geometry.0, bounds),
        );
    }

    fn set_bounds(&mut self, bounds: Bounds) -> Outcome {
        if bounds == self.bounds {
            return Outcome::Unchanged;
        }
        trace!(
            min_x = bounds.min_x,
            max_x = bounds.max_x,
            y = bounds.y,
            level = bounds.level,
            "bounds changed"
        );
        self.bounds = bounds;
        self.sync();
        Outcome::Repaint
    }

    fn set_highlight(&mut self, highlight: Option<Highlight>) -> Outcome {
        if highlight == self.highlight {
            return Outcome::Unchanged;
        }
        self.highlight = highlight;
        Outcome::Repaint
    }

    fn clear_pointer_highlight(&mut self) -> Outcome {
        match self.highlight {
            Some(h) if h.source == HighlightSource::Pointer => self.set_highlight(None),
            _ => Outcome::Unchanged,
        }
    }

    /// Which drag a press at surface `(x, y)` starts.
    fn drag_kind_at(&self, x: f64, y: f64) -> DragKind {
        if y >= self.config.header_height {
            return DragKind::Pan;
        }
        let left = self.bounds.min_x * self.viewport.width;
        let right = self.bounds.max_x * self.viewport.width;
        let grab = self.config.handle_grab;
        let (to_left, to_right) = ((x - left).abs(), (x - right).abs());
        if to_left <= grab && to_left <= to_right {
            DragKind::LeftEdge
        } else if to_right <= grab {
            DragKind::RightEdge
        } else {
            DragKind::Window
        }
    }

    /// Box under a surface point, ignoring the header strip.
    fn hit(&self, x: f64, y: f64) -> Option<BoxId> {
        if self.viewport.width <= 0.0 || y < self.config.header_height {
            return None;
        }
        let boxes = &self.visible.boxes;
        box_at(boxes, x / self.viewport.width, y + self.bounds.y).map(|i| boxes[i].id)
    }

    fn request_open(&mut self, id: BoxId, to_side: bool) {
        if let Some(src) = self
            .geometry
            .get(id)
            .and_then(|b| b.frame.location.src.as_ref())
        {
            self.open_requests.push(OpenDocument::at(src, to_side));
        }
    }

    fn move_focus(&mut self, direction: Direction) -> Outcome {
        let Some(current) = self.focus.and_then(|id| self.visible.position(id)) else {
            return self.focus_first_visible();
        };
        let boxes = &self.visible.boxes;
        let Some(next) = neighbor(boxes, current, direction) else {
            return Outcome::Unchanged;
        };
        let id = boxes[next].id;
        self.focus = Some(id);
        self.set_highlight(Some(Highlight {
            id,
            source: HighlightSource::Keyboard,
        }))
        .or(Outcome::Repaint)
    }

    fn focus_first_visible(&mut self) -> Outcome {
        let Some(first) = self.visible.boxes.first() else {
            return Outcome::Unchanged;
        };
        let id = first.id;
        self.focus = Some(id);
        self.highlight = Some(Highlight {
            id,
            source: HighlightSource::Keyboard,
        });
        Outcome::Repaint
    }
}

impl Default for FlameGraph {
    fn default() -> Self {
        Self::new(FlameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::testing::{Stack, model_from_stacks};
    use flamegrid_protocol::Category;

    // Root row spans the surface at y 22..42, depth 1 at 42..62, depth 2 at 62..82.
    fn graph() -> FlameGraph {
        let mut graph = FlameGraph::default();
        graph.set_viewport(Viewport::new(1000.0, 400.0));
        graph.set_model(Arc::new(model_from_stacks(&[
            Stack::new(&["a", "b", "c"], 1.0),
            Stack::new(&["a", "b", "c"], 1.0),
            Stack::new(&["a", "b"], 1.0),
            Stack::new(&["a"], 1.0),
        ])));
        graph
    }

    fn id_of(graph: &FlameGraph, name: &str) -> BoxId {
        graph
            .geometry()
            .boxes
            .iter()
            .find(|b| b.text == name)
            .map(|b| b.id)
            .unwrap()
    }

    fn click(graph: &mut FlameGraph, x: f64, y: f64, modifiers: Modifiers) -> Outcome {
        graph.pointer_down(&PointerEvent::new(x, y, 0.0).with_modifiers(modifiers));
        graph.pointer_up(&PointerEvent::new(x + 2.0, y, 100.0).with_modifiers(modifiers))
    }

    #[test]
    fn same_model_is_not_rebuilt() {
        let mut graph = graph();
        let model = Arc::clone(graph.model().unwrap());
        let before = graph.geometry().boxes.len();
        assert_eq!(graph.set_model(model), Outcome::Unchanged);
        assert_eq!(graph.geometry().boxes.len(), before);
    }

    #[test]
    fn new_model_resets_view() {
        let mut graph = graph();
        let c = id_of(&graph, "c");
        graph.zoom_to_box(c);
        graph.focus = Some(c);
        graph.set_model(Arc::new(model_from_stacks(&[Stack::new(&["x"], 1.0)])));
        assert_eq!(graph.bounds(), Bounds::FULL);
        assert_eq!(graph.focus(), None);
        assert_eq!(graph.geometry().boxes.len(), 1);
    }

    #[test]
    fn click_zooms_and_focuses() {
        let mut graph = graph();
        // "c" covers the first half of depth 2.
        assert_eq!(click(&mut graph, 100.0, 70.0, Modifiers::empty()), Outcome::Repaint);
        let c = id_of(&graph, "c");
        assert_eq!(graph.focus(), Some(c));
        let bounds = graph.bounds();
        assert_eq!((bounds.min_x, bounds.max_x, bounds.level), (0.0, 0.5, 2));
    }

    #[test]
    fn click_on_empty_space_does_nothing() {
        let mut graph = graph();
        assert_eq!(click(&mut graph, 900.0, 70.0, Modifiers::empty()), Outcome::Unchanged);
        assert_eq!(graph.bounds(), Bounds::FULL);
        assert_eq!(graph.focus(), None);
    }

    #[test]
    fn command_click_requests_open() {
        let mut graph = graph();
        click(&mut graph, 100.0, 70.0, Modifiers::CTRL);
        click(&mut graph, 100.0, 50.0, Modifiers::META | Modifiers::ALT);
        let requests = graph.take_open_requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].path, "/src/c.ts");
        assert!(!requests[0].to_side);
        assert_eq!(requests[1].path, "/src/b.ts");
        assert!(requests[1].to_side);
        assert!(graph.take_open_requests().is_empty());
        assert_eq!(graph.bounds(), Bounds::FULL);
    }

    #[test]
    fn open_without_source_is_suppressed() {
        let mut graph = FlameGraph::default();
        graph.set_viewport(Viewport::new(1000.0, 400.0));
        let mut model = model_from_stacks(&[Stack::new(&["a"], 1.0)]);
        for location in &mut model.locations {
            location.src = None;
        }
        graph.set_model(Arc::new(model));
        click(&mut graph, 100.0, 30.0, Modifiers::CTRL);
        assert!(graph.take_open_requests().is_empty());
    }

    #[test]
    fn long_drag_pans_instead_of_clicking() {
        let mut graph = graph();
        graph.wheel(&WheelEvent {
            x: 500.0,
            y: 100.0,
            delta_x: 0.0,
            delta_y: -200.0,
            modifiers: Modifiers::empty(),
        });
        let zoomed = graph.bounds();
        graph.pointer_down(&PointerEvent::new(500.0, 70.0, 0.0));
        graph.pointer_move(&PointerEvent::new(350.0, 70.0, 50.0));
        assert!(graph.is_dragging());
        graph.pointer_up(&PointerEvent::new(350.0, 70.0, 100.0));
        assert!(!graph.is_dragging());
        assert_eq!(graph.focus(), None);
        let panned = graph.bounds();
        assert!(panned.min_x > zoomed.min_x);
        assert!((panned.width() - zoomed.width()).abs() < 1e-9);
    }

    #[test]
    fn header_edge_drag_resizes_window() {
        let mut graph = graph();
        graph.pointer_down(&PointerEvent::new(998.0, 5.0, 0.0));
        graph.pointer_move(&PointerEvent::new(600.0, 300.0, 400.0));
        graph.pointer_up(&PointerEvent::new(600.0, 300.0, 500.0));
        let bounds = graph.bounds();
        assert_eq!(bounds.min_x, 0.0);
        assert!((bounds.max_x - 0.602).abs() < 1e-9);
        assert_eq!(bounds.y, 0.0);
    }

    #[test]
    fn hover_highlight_yields_to_leave_but_keyboard_stays() {
        let mut graph = graph();
        graph.pointer_move(&PointerEvent::new(100.0, 30.0, 0.0));
        let a = id_of(&graph, "a");
        assert_eq!(
            graph.highlight(),
            Some(Highlight {
                id: a,
                source: HighlightSource::Pointer
            })
        );
        assert_eq!(graph.pointer_leave(), Outcome::Repaint);
        assert_eq!(graph.highlight(), None);

        graph.focus_gained();
        assert_eq!(graph.highlight().map(|h| h.source), Some(HighlightSource::Keyboard));
        graph.pointer_move(&PointerEvent::new(100.0, 300.0, 0.0));
        assert!(graph.highlight().is_some());
        assert_eq!(graph.pointer_leave(), Outcome::Unchanged);
    }

    #[test]
    fn arrows_walk_the_tree() {
        let mut graph = graph();
        let (a, b, c) = (id_of(&graph, "a"), id_of(&graph, "b"), id_of(&graph, "c"));
        graph.key_down(&KeyEvent::new(Key::ArrowDown));
        assert_eq!(graph.focus(), Some(a));
        graph.key_down(&KeyEvent::new(Key::ArrowDown));
        assert_eq!(graph.focus(), Some(b));
        graph.key_down(&KeyEvent::new(Key::ArrowDown));
        assert_eq!(graph.focus(), Some(c));
        assert_eq!(graph.key_down(&KeyEvent::new(Key::ArrowDown)), Outcome::Unchanged);
        assert_eq!(graph.focus(), Some(c));
        graph.key_down(&KeyEvent::new(Key::ArrowUp));
        assert_eq!(graph.focus(), Some(b));
        assert_eq!(
            graph.highlight(),
            Some(Highlight {
                id: b,
                source: HighlightSource::Keyboard
            })
        );
    }

    #[test]
    fn enter_zooms_to_focus_and_escape_unwinds() {
        let mut graph = graph();
        graph.focus_gained();
        graph.key_down(&KeyEvent::new(Key::ArrowDown));
        graph.key_down(&KeyEvent::new(Key::Enter));
        assert_eq!(graph.bounds().max_x, 0.75);
        assert_eq!(graph.bounds().level, 1);

        // First escape drops the keyboard highlight, the second resets.
        graph.key_down(&KeyEvent::new(Key::Escape));
        assert_eq!(graph.highlight(), None);
        assert_eq!(graph.bounds().max_x, 0.75);
        graph.key_down(&KeyEvent::new(Key::Escape));
        assert_eq!(graph.bounds(), Bounds::FULL);
    }

    #[test]
    fn command_enter_opens_highlighted_box() {
        let mut graph = graph();
        graph.focus_gained();
        graph.key_down(&KeyEvent::new(Key::Enter).with_modifiers(Modifiers::CTRL));
        let requests = graph.take_open_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/src/a.ts");
        assert_eq!(graph.bounds(), Bounds::FULL);
    }

    #[test]
    fn wheel_modes() {
        let mut graph = graph();
        let zoom = WheelEvent {
            x: 250.0,
            y: 100.0,
            delta_x: 0.0,
            delta_y: -200.0,
            modifiers: Modifiers::empty(),
        };
        graph.wheel(&zoom);
        let b = graph.bounds();
        assert!((b.min_x - 0.125).abs() < 1e-9);
        assert!((b.max_x - 0.625).abs() < 1e-9);

        graph.wheel(&WheelEvent {
            modifiers: Modifiers::SHIFT,
            delta_y: 2000.0,
            ..zoom
        });
        let b = graph.bounds();
        assert!((b.max_x - 1.0).abs() < 1e-9);
        assert!((b.width() - 0.5).abs() < 1e-9);

        // Content (82px) is shorter than the surface: nothing to scroll.
        assert_eq!(
            graph.wheel(&WheelEvent {
                modifiers: Modifiers::ALT,
                delta_y: 50.0,
                ..zoom
            }),
            Outcome::Unchanged
        );
    }

    #[test]
    fn zoom_scrolls_down_to_deep_box() {
        let mut graph = graph();
        graph.set_viewport(Viewport::new(1000.0, 50.0));
        let c = id_of(&graph, "c");
        graph.zoom_to_box(c);
        // c starts at 62; content is 82 tall, so the scroll stops at 32.
        assert_eq!(graph.bounds().y, 32.0);
    }

    #[test]
    fn zoom_before_surface_height_keeps_scroll() {
        let mut graph = FlameGraph::default();
        graph.set_model(Arc::new(model_from_stacks(&[
            Stack::new(&["a", "b", "c"], 1.0),
            Stack::new(&["a"], 1.0),
        ])));
        let c = id_of(&graph, "c");
        graph.zoom_to_box(c);
        assert_eq!(graph.bounds().y, 0.0);
        assert_eq!(graph.bounds().level, 2);
    }

    #[test]
    fn raising_min_window_widens_current_window() {
        let mut graph = graph();
        let zoom_in = WheelEvent {
            x: 500.0,
            y: 100.0,
            delta_x: 0.0,
            delta_y: -360.0,
            modifiers: Modifiers::empty(),
        };
        for _ in 0..3 {
            graph.wheel(&zoom_in);
        }
        assert!((graph.bounds().width() - 0.001).abs() < 1e-9);

        let config = FlameConfig {
            min_window: 0.01,
            ..FlameConfig::default()
        };
        assert_eq!(graph.set_config(config), Outcome::Repaint);
        let widened = graph.bounds();
        assert!(widened.width() >= 0.01 - 1e-12, "{widened:?}");
        assert!((widened.min_x + widened.max_x - 1.0).abs() < 1e-9);

        graph.pointer_down(&PointerEvent::new(500.0, 70.0, 0.0));
        graph.pointer_move(&PointerEvent::new(400.0, 70.0, 50.0));
        graph.pointer_up(&PointerEvent::new(400.0, 70.0, 500.0));
        let panned = graph.bounds();
        assert!(panned.min_x > widened.min_x);
        assert!(panned.width() >= 0.01 - 1e-12, "{panned:?}");
    }

    #[test]
    fn tooltip_describes_highlighted_box() {
        let mut graph = graph();
        assert!(graph.tooltip().is_none());
        graph.pointer_move(&PointerEvent::new(100.0, 50.0, 0.0));
        let tooltip = graph.tooltip().unwrap();
        assert_eq!(tooltip.name, "b");
        assert_eq!(tooltip.share, 75.0);
        assert_eq!(tooltip.source.as_deref(), Some("/src/b.ts:3:1"));
        assert_eq!(tooltip.origin, HighlightSource::Pointer);
    }

    #[test]
    fn system_frames_render_gray() {
        let mut graph = FlameGraph::default();
        graph.set_viewport(Viewport::new(100.0, 100.0));
        let mut model = model_from_stacks(&[Stack::new(&["(gc)"], 1.0)]);
        crate::graph::testing::set_category(&mut model, "(gc)", Category::System);
        graph.set_model(Arc::new(model));
        assert_eq!(graph.visible().boxes[0].color.light.s, 0.0);
    }
}
