//! Sample-to-geometry pipeline.
//!
//! ```text
//!   CallTreeModel ──▶ walker ──▶ merge ──▶ boxes (+ color) ──▶ Geometry
//!                   columns     back-refs   sorted FlameBox set
//! ```

pub mod boxes;
pub mod color;
pub mod column;
pub mod merge;
pub mod walker;

#[cfg(test)]
pub(crate) mod testing;

use std::collections::HashMap;

use flamegrid_protocol::CallTreeModel;
use tracing::debug;

pub use boxes::{BoxId, FlameBox, RowLayout};
pub use color::{BoxColor, box_color};
pub use column::{Column, Frame, Slot};

/// The immutable box set of one model, with an id index.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    /// Sorted by `(level, x1)`.
    pub boxes: Vec<FlameBox>,
    /// Bottom edge of the deepest row, in content pixels.
    pub max_y: f64,
    by_id: HashMap<BoxId, usize>,
}

impl Geometry {
    pub fn from_columns(columns: &[Column], layout: RowLayout) -> Self {
        let set = boxes::build_boxes(columns, layout);
        let by_id = set
            .boxes
            .iter()
            .enumerate()
            .map(|(i, b)| (b.id, i))
            .collect();
        Self {
            boxes: set.boxes,
            max_y: set.max_y,
            by_id,
        }
    }

    /// Index into `boxes` of the box with this identity.
    pub fn index_of(&self, id: BoxId) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    pub fn get(&self, id: BoxId) -> Option<&FlameBox> {
        self.index_of(id).map(|i| &self.boxes[i])
    }
}

/// Run the whole pipeline for a model.
pub fn build_geometry(model: &CallTreeModel, layout: RowLayout) -> Geometry {
    let mut columns = walker::build_columns(model);
    merge::merge_columns(&mut columns);
    let geometry = Geometry::from_columns(&columns, layout);
    debug!(
        samples = model.samples.len(),
        columns = columns.len(),
        boxes = geometry.boxes.len(),
        max_y = geometry.max_y,
        "built flame graph geometry"
    );
    geometry
}

#[cfg(test)]
mod tests {
    use super::*;
    use testing::{Stack, model_from_stacks};

    const LAYOUT: RowLayout = RowLayout {
        row_height: 20.0,
        header_height: 0.0,
    };

    #[test]
    fn every_box_is_indexed_by_id() {
        let geometry = build_geometry(
            &model_from_stacks(&[Stack::new(&["a", "b"], 1.0), Stack::new(&["c"], 1.0)]),
            LAYOUT,
        );
        for (i, b) in geometry.boxes.iter().enumerate() {
            assert_eq!(geometry.index_of(b.id), Some(i));
            assert_eq!(geometry.get(b.id).map(|g| &g.text), Some(&b.text));
        }
        assert!(geometry.get(BoxId(u64::MAX)).is_none());
    }

    #[test]
    fn box_frames_carry_merged_times() {
        let geometry = build_geometry(
            &model_from_stacks(&[
                Stack::new(&["a", "b"], 2.0),
                Stack::new(&["a", "b"], 2.0),
                Stack::new(&["a"], 1.0),
            ]),
            LAYOUT,
        );
        let a = &geometry.boxes[0];
        assert_eq!(a.text, "a");
        assert_eq!(a.frame.self_time, 1.0);
        assert_eq!(a.frame.aggregate_time, 4.0);
        assert_eq!(a.frame.total_time(), 5.0);
    }
}
