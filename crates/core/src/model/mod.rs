//! Loading and validating the call-tree input.
//!
//! The graph pipeline trusts index links once a model passes [`validate`];
//! hand-built models that skip validation still cannot panic the walker,
//! they only lose the unresolvable frames.

use thiserror::Error;

pub use flamegrid_protocol::{CallTreeModel, CallTreeNode, Category, Location, SourceLocation};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("sample {sample} references unknown node {node}")]
    UnknownNode { sample: usize, node: usize },
    #[error("node {node} has unknown parent {parent}")]
    UnknownParent { node: usize, parent: usize },
    #[error("node {node} references unknown location {location}")]
    UnknownLocation { node: usize, location: usize },
    #[error("{samples} samples need at least {} time deltas, found {deltas}", .samples.saturating_sub(1))]
    MissingTimeDeltas { samples: usize, deltas: usize },
    #[error("time delta {index} must be finite and non-negative, got {value}")]
    InvalidTimeDelta { index: usize, value: f64 },
    #[error("duration must be finite and non-negative, got {0}")]
    InvalidDuration(f64),
}

/// Deserialize a call-tree model from its JSON wire form and validate it.
pub fn load_model(data: &[u8]) -> Result<CallTreeModel, ModelError> {
    let model: CallTreeModel = serde_json::from_slice(data)?;
    validate(&model)?;
    Ok(model)
}

/// Check every index link in the model.
pub fn validate(model: &CallTreeModel) -> Result<(), ModelError> {
    if !(model.duration.is_finite() && model.duration >= 0.0) {
        return Err(ModelError::InvalidDuration(model.duration));
    }

    if model.time_deltas.len() + 1 < model.samples.len() {
        return Err(ModelError::MissingTimeDeltas {
            samples: model.samples.len(),
            deltas: model.time_deltas.len(),
        });
    }

    if let Some((index, &value)) = model
        .time_deltas
        .iter()
        .enumerate()
        .find(|(_, d)| !(d.is_finite() && **d >= 0.0))
    {
        return Err(ModelError::InvalidTimeDelta { index, value });
    }

    for (id, node) in model.nodes.iter().enumerate() {
        if node.location_id >= model.locations.len() {
            return Err(ModelError::UnknownLocation {
                node: id,
                location: node.location_id,
            });
        }
        if let Some(parent) = node.parent
            && parent >= model.nodes.len()
        {
            return Err(ModelError::UnknownParent { node: id, parent });
        }
    }

    for (sample, &node) in model.samples.iter().enumerate() {
        if node >= model.nodes.len() {
            return Err(ModelError::UnknownNode { sample, node });
        }
    }

    Ok(())
}
