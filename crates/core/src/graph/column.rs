use std::sync::Arc;

use flamegrid_protocol::{Category, Location, SharedStr};

/// One stack frame of one column, or, after merging, the canonical frame for
/// a run of columns sharing the same stack prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Build-unique identity, assigned in walk order.
    pub graph_id: u64,
    pub location_id: usize,
    pub location: Arc<Location>,
    /// Time during which this frame was the leaf.
    pub self_time: f64,
    /// Time attributed through this frame to deeper frames.
    pub aggregate_time: f64,
}

impl Frame {
    /// Fold a later occurrence of the same call into this one.
    pub fn merge_in(&mut self, other: &Frame) {
        self.self_time += other.self_time;
        self.aggregate_time += other.aggregate_time;
    }

    pub fn total_time(&self) -> f64 {
        self.self_time + self.aggregate_time
    }

    pub fn name(&self) -> SharedStr {
        self.location.display_name()
    }

    pub fn category(&self) -> Category {
        self.location.category
    }
}

/// A column slot: either the frame itself or the index of the earlier
/// column that owns the canonical frame at this depth.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    Frame(Frame),
    Ref(usize),
}

impl Slot {
    pub fn as_frame(&self) -> Option<&Frame> {
        match self {
            Slot::Frame(frame) => Some(frame),
            Slot::Ref(_) => None,
        }
    }
}

/// One sample's stack, root first.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Share of the total duration covered by this sample.
    pub width: f64,
    pub rows: Vec<Slot>,
}

impl Column {
    pub fn depth(&self) -> usize {
        self.rows.len()
    }
}
