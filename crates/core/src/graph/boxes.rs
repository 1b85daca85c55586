use std::collections::HashMap;

use flamegrid_protocol::SharedStr;

use super::color::{BoxColor, box_color};
use super::column::{Column, Frame, Slot};

/// Identity of a box, stable for the lifetime of one geometry build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoxId(pub u64);

/// A finished flame-graph rectangle.
///
/// `x1`/`x2` are fractions of the whole timeline; `y1`/`y2` are content
/// pixels (before vertical scrolling).
#[derive(Debug, Clone, PartialEq)]
pub struct FlameBox {
    pub id: BoxId,
    pub x1: f64,
    pub x2: f64,
    pub y1: f64,
    pub y2: f64,
    pub level: usize,
    pub color: BoxColor,
    pub text: SharedStr,
    pub frame: Frame,
}

/// Vertical layout inputs of the box builder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLayout {
    pub row_height: f64,
    pub header_height: f64,
}

/// Boxes sorted by `(level, x1)` plus the content height.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxSet {
    pub boxes: Vec<FlameBox>,
    pub max_y: f64,
}

/// Flatten merged columns into boxes.
///
/// A frame slot opens a box spanning its column; a reference slot stretches
/// the box opened by the referenced column at the same depth. Horizontal
/// positions are normalized by the summed column widths so the root row
/// always spans `[0, 1]`.
pub fn build_boxes(columns: &[Column], layout: RowLayout) -> BoxSet {
    let total: f64 = columns.iter().map(|c| c.width).sum();
    let normalize = |v: f64| if total > 0.0 { v / total } else { 0.0 };

    let mut boxes: Vec<FlameBox> = Vec::new();
    let mut by_cell: HashMap<(usize, usize), usize> = HashMap::new();
    let mut max_y: f64 = 0.0;
    let mut offset = 0.0;

    for (x, column) in columns.iter().enumerate() {
        let end = offset + column.width;
        for (y, slot) in column.rows.iter().enumerate() {
            match slot {
                Slot::Ref(owner) => {
                    if let Some(&i) = by_cell.get(&(*owner, y)) {
                        boxes[i].x2 = normalize(end);
                    }
                }
                Slot::Frame(frame) => {
                    let y1 = y as f64 * layout.row_height + layout.header_height;
                    let y2 = y1 + layout.row_height;
                    max_y = max_y.max(y2);
                    by_cell.insert((x, y), boxes.len());
                    boxes.push(FlameBox {
                        id: BoxId(frame.graph_id),
                        x1: normalize(offset),
                        x2: normalize(end),
                        y1,
                        y2,
                        level: y,
                        color: box_color(frame.graph_id, frame.category(), false),
                        text: frame.name(),
                        frame: frame.clone(),
                    });
                }
            }
        }
        offset = end;
    }

    boxes.sort_by(|a, b| a.level.cmp(&b.level).then(a.x1.total_cmp(&b.x1)));
    BoxSet { boxes, max_y }
}
