use serde::{Deserialize, Serialize};

use crate::call_tree::SourceLocation;
use crate::shared_str::SharedStr;

/// Outbound request asking the host to open a source file at a position.
///
/// The core only queues these; delivering them (an editor message, a
/// terminal status line) is up to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenDocument {
    pub path: SharedStr,
    /// 1-based.
    pub line: u32,
    /// 1-based.
    pub column: u32,
    /// Open beside the current editor instead of replacing it.
    pub to_side: bool,
}

impl OpenDocument {
    pub fn at(src: &SourceLocation, to_side: bool) -> Self {
        Self {
            path: src.path.clone(),
            line: src.line_number,
            column: src.column_number,
            to_side,
        }
    }
}

impl std::fmt::Display for OpenDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.path, self.line, self.column)
    }
}
