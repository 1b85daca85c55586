//! Interactive flame graph core.
//!
//! [`model`] loads the call-tree input, [`graph`] turns it into boxes,
//! [`viewport`] and [`query`] select and hit-test them, and
//! [`controller::FlameGraph`] ties it together with the input handlers and
//! emits `RenderCommand`s through [`views`].

pub mod config;
pub mod controller;
pub mod graph;
pub mod interaction;
pub mod memo;
pub mod model;
pub mod query;
pub mod viewport;
pub mod views;

pub use config::{ConfigError, FlameConfig};
pub use controller::{FlameGraph, Highlight, HighlightSource, Outcome, Tooltip};
pub use graph::{BoxId, FlameBox, Geometry, RowLayout, build_geometry};
pub use model::{ModelError, load_model};
pub use viewport::{Bounds, VisibleBox, VisibleBoxes, visible_boxes};
