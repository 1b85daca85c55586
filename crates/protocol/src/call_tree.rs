use serde::{Deserialize, Serialize};

use crate::shared_str::SharedStr;

/// The structured call-tree sample set a flame graph is built from.
///
/// This is the single input IR of the graph pipeline. It is produced by an
/// external profile loader and never mutated afterwards.
///
/// ```text
///   samples[i] ──▶ nodes[n] ──parent──▶ nodes[p] ──parent──▶ … (root)
///                     │                    │
///                     ▼                    ▼
///                locations[l]         locations[m]
/// ```
///
/// Node ids and location ids are indices into `nodes` and `locations`.
/// `time_deltas[i]` is the time elapsed before `samples[i + 1]` was taken.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallTreeModel {
    pub nodes: Vec<CallTreeNode>,
    pub locations: Vec<Location>,
    pub samples: Vec<usize>,
    pub time_deltas: Vec<f64>,
    /// Total profiled duration, in `value_unit`.
    pub duration: f64,
    #[serde(default)]
    pub value_unit: ValueUnit,
}

impl CallTreeModel {
    pub fn node(&self, id: usize) -> Option<&CallTreeNode> {
        self.nodes.get(id)
    }
}

/// One node of the call tree: a location reached through a specific parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallTreeNode {
    pub location_id: usize,
    #[serde(default)]
    pub parent: Option<usize>,
}

/// A distinct source location (function + script + position).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: usize,
    #[serde(default)]
    pub category: Category,
    pub call_frame: CallFrame,
    /// Resolved (possibly source-mapped) location, when the loader knows it.
    #[serde(default)]
    pub src: Option<SourceLocation>,
}

impl Location {
    /// The name drawn on the box. Anonymous functions get a placeholder.
    pub fn display_name(&self) -> SharedStr {
        if self.call_frame.function_name.is_empty() {
            SharedStr::from("(anonymous)")
        } else {
            self.call_frame.function_name.clone()
        }
    }
}

/// V8-style call frame. Line and column are 0-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallFrame {
    pub function_name: SharedStr,
    #[serde(default)]
    pub url: SharedStr,
    #[serde(default)]
    pub script_id: SharedStr,
    #[serde(default)]
    pub line_number: i64,
    #[serde(default)]
    pub column_number: i64,
}

/// A file position that can be opened in an editor. Line and column are
/// 1-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLocation {
    pub path: SharedStr,
    pub line_number: u32,
    pub column_number: u32,
}

/// Coarse origin of a location, used for coloring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    None,
    /// Code from the profiled program.
    User,
    /// Code from dependencies.
    Module,
    /// Runtime internals: `(program)`, `(garbage collector)`, natives.
    System,
    Deemphasized,
}

/// What the numbers in `time_deltas` and `duration` represent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueUnit {
    #[default]
    Microseconds,
    Milliseconds,
    Nanoseconds,
}

impl ValueUnit {
    /// Format a value in this unit for display.
    pub fn format_value(&self, value: f64) -> String {
        match self {
            Self::Microseconds => {
                if value >= 1_000_000.0 {
                    format!("{:.2}s", value / 1_000_000.0)
                } else if value >= 1_000.0 {
                    format!("{:.1}ms", value / 1_000.0)
                } else {
                    format!("{:.0}µs", value)
                }
            }
            Self::Milliseconds => {
                if value >= 1_000.0 {
                    format!("{:.2}s", value / 1_000.0)
                } else {
                    format!("{:.1}ms", value)
                }
            }
            Self::Nanoseconds => {
                if value >= 1_000_000_000.0 {
                    format!("{:.2}s", value / 1_000_000_000.0)
                } else if value >= 1_000_000.0 {
                    format!("{:.1}ms", value / 1_000_000.0)
                } else if value >= 1_000.0 {
                    format!("{:.0}µs", value / 1_000.0)
                } else {
                    format!("{:.0}ns", value)
                }
            }
        }
    }
}
