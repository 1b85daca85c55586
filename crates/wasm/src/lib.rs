use std::sync::Arc;

use flamegrid_core::{FlameConfig, FlameGraph, load_model};
use flamegrid_protocol::{Key, KeyEvent, Modifiers, PointerEvent, Viewport, WheelEvent};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_json<T: Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&e.to_string()))
}

fn modifiers(ctrl: bool, meta: bool, alt: bool, shift: bool) -> Modifiers {
    let mut out = Modifiers::empty();
    out.set(Modifiers::CTRL, ctrl);
    out.set(Modifiers::META, meta);
    out.set(Modifiers::ALT, alt);
    out.set(Modifiers::SHIFT, shift);
    out
}

/// One flame graph surface owned by the page. Event methods return `true`
/// when the host should call `render` again.
#[wasm_bindgen]
pub struct FlameGraphHandle {
    graph: FlameGraph,
}

#[wasm_bindgen]
impl FlameGraphHandle {
    /// Build from a call-tree model JSON and an optional (partial) config
    /// JSON.
    #[wasm_bindgen(constructor)]
    pub fn new(
        model_json: &[u8],
        config_json: Option<String>,
    ) -> Result<FlameGraphHandle, JsError> {
        let config = match config_json {
            Some(json) => FlameConfig::from_json(json.as_bytes())?,
            None => FlameConfig::default(),
        };
        let model = load_model(model_json)?;
        let mut graph = FlameGraph::new(config);
        graph.set_model(Arc::new(model));
        Ok(Self { graph })
    }

    /// Replace the model, keeping the config and surface size.
    pub fn set_model(&mut self, model_json: &[u8]) -> Result<bool, JsError> {
        let model = load_model(model_json)?;
        Ok(self.graph.set_model(Arc::new(model)).needs_repaint())
    }

    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        self.graph
            .set_viewport(Viewport::new(width, height))
            .needs_repaint()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn pointer_down(
        &mut self,
        x: f64,
        y: f64,
        time_ms: f64,
        ctrl: bool,
        meta: bool,
        alt: bool,
        shift: bool,
    ) -> bool {
        let event = PointerEvent::new(x, y, time_ms)
            .with_modifiers(modifiers(ctrl, meta, alt, shift));
        self.graph.pointer_down(&event).needs_repaint()
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, time_ms: f64) -> bool {
        self.graph
            .pointer_move(&PointerEvent::new(x, y, time_ms))
            .needs_repaint()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn pointer_up(
        &mut self,
        x: f64,
        y: f64,
        time_ms: f64,
        ctrl: bool,
        meta: bool,
        alt: bool,
        shift: bool,
    ) -> bool {
        let event = PointerEvent::new(x, y, time_ms)
            .with_modifiers(modifiers(ctrl, meta, alt, shift));
        self.graph.pointer_up(&event).needs_repaint()
    }

    pub fn pointer_leave(&mut self) -> bool {
        self.graph.pointer_leave().needs_repaint()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn wheel(
        &mut self,
        x: f64,
        y: f64,
        delta_x: f64,
        delta_y: f64,
        ctrl: bool,
        meta: bool,
        alt: bool,
        shift: bool,
    ) -> bool {
        let event = WheelEvent {
            x,
            y,
            delta_x,
            delta_y,
            modifiers: modifiers(ctrl, meta, alt, shift),
        };
        self.graph.wheel(&event).needs_repaint()
    }

    /// `key` is a DOM `KeyboardEvent.key`; keys the graph ignores return
    /// `false`.
    pub fn key_down(&mut self, key: &str, ctrl: bool, meta: bool, alt: bool, shift: bool) -> bool {
        let Some(key) = Key::from_dom(key) else {
            return false;
        };
        let event = KeyEvent::new(key).with_modifiers(modifiers(ctrl, meta, alt, shift));
        self.graph.key_down(&event).needs_repaint()
    }

    pub fn focus(&mut self) -> bool {
        self.graph.focus_gained().needs_repaint()
    }

    /// Render commands for the current state, as JSON.
    pub fn render(&self) -> Result<String, JsError> {
        to_json(&self.graph.render())
    }

    /// Tooltip for the highlighted box as JSON, or `null`.
    pub fn tooltip(&self) -> Result<String, JsError> {
        to_json(&self.graph.tooltip())
    }

    /// Drain queued "open document" requests as a JSON array.
    pub fn take_open_requests(&mut self) -> Result<String, JsError> {
        to_json(&self.graph.take_open_requests())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODEL: &str = r#"{
        "duration": 2,
        "locations": [
            { "id": 0, "callFrame": { "functionName": "(idle)" } },
            { "id": 1, "category": "user", "callFrame": { "functionName": "main" },
              "src": { "path": "/src/main.ts", "lineNumber": 3, "columnNumber": 1 } }
        ],
        "nodes": [{ "locationId": 0 }, { "locationId": 1 }],
        "samples": [0, 1, 1, 0],
        "timeDeltas": [1, 1, 0]
    }"#;

    fn handle(config: Option<String>) -> FlameGraphHandle {
        match FlameGraphHandle::new(MODEL.as_bytes(), config) {
            Ok(handle) => handle,
            Err(_) => panic!("model should load"),
        }
    }

    fn json(result: Result<String, JsError>) -> serde_json::Value {
        let text = result.ok().expect("bridge call should succeed");
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn drives_the_graph_through_the_bridge() {
        let mut handle = handle(None);
        assert!(handle.resize(200.0, 100.0));
        assert!(handle.pointer_move(50.0, 30.0, 0.0));

        let tooltip = json(handle.tooltip());
        assert_eq!(tooltip["name"], "main");
        assert_eq!(tooltip["origin"], "pointer");

        handle.pointer_down(50.0, 30.0, 0.0, true, false, false, false);
        handle.pointer_up(50.0, 30.0, 10.0, true, false, false, false);
        let requests = json(handle.take_open_requests());
        assert_eq!(requests[0]["path"], "/src/main.ts");
        assert_eq!(requests[0]["toSide"], false);

        let commands = json(handle.render());
        assert!(commands.as_array().is_some_and(|c| !c.is_empty()));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut handle = handle(Some("{}".into()));
        handle.resize(200.0, 100.0);
        assert!(!handle.key_down("F5", false, false, false, false));
        assert!(handle.key_down("ArrowDown", false, false, false, false));
    }
}
