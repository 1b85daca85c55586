use std::sync::Arc;

use flamegrid_protocol::{CallTreeModel, Location};
use tracing::warn;

use super::column::{Column, Frame, Slot};

/// Hands out frame identities for a single build.
#[derive(Debug, Default)]
struct GraphIds(u64);

impl GraphIds {
    fn next(&mut self) -> u64 {
        let id = self.0;
        self.0 += 1;
        id
    }
}

/// Turn every sample (except the first and last, which only bound the
/// profiling window) into a root-first column of fresh frames.
///
/// The leaf carries the sample's time as self time; every ancestor carries
/// it as aggregate time.
pub fn build_columns(model: &CallTreeModel) -> Vec<Column> {
    let locations: Vec<Arc<Location>> = model.locations.iter().cloned().map(Arc::new).collect();
    let mut ids = GraphIds::default();
    let last = model.samples.len().saturating_sub(1);
    let mut columns = Vec::with_capacity(last.saturating_sub(1));

    for i in 1..last {
        let node_id = model.samples[i];
        let self_time = model.time_deltas.get(i - 1).copied().unwrap_or(0.0);

        let Some(leaf) = model.node(node_id) else {
            warn!(sample = i, node = node_id, "sample references unknown node");
            continue;
        };
        let Some(location) = locations.get(leaf.location_id) else {
            warn!(node = node_id, location = leaf.location_id, "node references unknown location");
            continue;
        };

        // Leaf first, reversed to root-first below.
        let mut rows = vec![Slot::Frame(Frame {
            graph_id: ids.next(),
            location_id: leaf.location_id,
            location: Arc::clone(location),
            self_time,
            aggregate_time: 0.0,
        })];

        let mut parent = leaf.parent;
        while let Some(id) = parent {
            if rows.len() > model.nodes.len() {
                warn!(node = node_id, "parent chain does not terminate");
                break;
            }
            let Some(node) = model.node(id) else {
                warn!(node = id, "parent chain references unknown node");
                break;
            };
            let Some(location) = locations.get(node.location_id) else {
                warn!(node = id, location = node.location_id, "node references unknown location");
                break;
            };
            rows.push(Slot::Frame(Frame {
                graph_id: ids.next(),
                location_id: node.location_id,
                location: Arc::clone(location),
                self_time: 0.0,
                aggregate_time: self_time,
            }));
            parent = node.parent;
        }
        rows.reverse();

        let width = if model.duration > 0.0 {
            self_time / model.duration
        } else {
            0.0
        };
        columns.push(Column { width, rows });
    }

    columns
}
