//! Source location types.
//!
//! Every lowered AST node carries a `Span` derived from its originating CST
//! node, so downstream consumers (diffing, refactoring detection) can map
//! nodes back to source text.

use serde::{Deserialize, Serialize};

/// Span in source code (1-indexed lines, 0-indexed columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl Span {
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }
}
