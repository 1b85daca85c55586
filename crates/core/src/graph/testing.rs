//! Hand-built call-tree fixtures for unit tests.

use std::collections::HashMap;

use flamegrid_protocol::{
    CallFrame, CallTreeModel, CallTreeNode, Category, Location, SourceLocation, ValueUnit,
};

/// One sample: a root-first stack of function names and the time before it.
pub struct Stack<'a> {
    pub frames: &'a [&'a str],
    pub delta: f64,
}

impl<'a> Stack<'a> {
    pub fn new(frames: &'a [&'a str], delta: f64) -> Self {
        Self { frames, delta }
    }
}

/// Build a model whose real samples are `stacks`, wrapped in an `(idle)`
/// boundary sample on each side. Identical stack paths share nodes, equal
/// names share locations, and `duration` is the sum of the deltas.
pub fn model_from_stacks(stacks: &[Stack<'_>]) -> CallTreeModel {
    let mut locations: Vec<Location> = Vec::new();
    let mut location_ids: HashMap<String, usize> = HashMap::new();
    let mut nodes: Vec<CallTreeNode> = Vec::new();
    let mut node_ids: HashMap<(Option<usize>, usize), usize> = HashMap::new();

    let mut location_for = |name: &str, locations: &mut Vec<Location>| -> usize {
        *location_ids.entry(name.to_string()).or_insert_with(|| {
            let id = locations.len();
            locations.push(Location {
                id,
                category: Category::User,
                call_frame: CallFrame {
                    function_name: name.into(),
                    url: format!("file:///{name}.js").into(),
                    script_id: "1".into(),
                    line_number: id as i64,
                    column_number: 0,
                },
                src: Some(SourceLocation {
                    path: format!("/src/{name}.ts").into(),
                    line_number: id as u32 + 1,
                    column_number: 1,
                }),
            });
            id
        })
    };

    let idle = location_for("(idle)", &mut locations);
    nodes.push(CallTreeNode {
        location_id: idle,
        parent: None,
    });

    let mut samples = vec![0];
    let mut time_deltas = Vec::new();
    for stack in stacks {
        let mut parent = None;
        for name in stack.frames {
            let location = location_for(name, &mut locations);
            let id = *node_ids.entry((parent, location)).or_insert_with(|| {
                nodes.push(CallTreeNode {
                    location_id: location,
                    parent,
                });
                nodes.len() - 1
            });
            parent = Some(id);
        }
        samples.push(parent.unwrap_or(0));
        time_deltas.push(stack.delta);
    }
    samples.push(0);
    time_deltas.push(0.0);

    CallTreeModel {
        duration: time_deltas.iter().sum(),
        nodes,
        locations,
        samples,
        time_deltas,
        value_unit: ValueUnit::Microseconds,
    }
}

/// Change the category of every location named `name`.
pub fn set_category(model: &mut CallTreeModel, name: &str, category: Category) {
    for location in &mut model.locations {
        if location.call_frame.function_name == name {
            location.category = category;
        }
    }
}
