//! Structured lowering diagnostics.
//!
//! Unhandled or partially-absent grammar sub-structures do not abort
//! lowering; they degrade to placeholder nodes and record a `Diagnostic`.
//! The full list is returned alongside the lowered tree, preserving order,
//! so tests can assert on it deterministically.

use serde::{Deserialize, Serialize};

use crate::shared::models::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Input was understood but approximated (heuristic or known gap).
    Note,
    /// Input was not understood; a placeholder node stands in for it.
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: Option<Span>,
}

impl Diagnostic {
    pub fn warning(message: impl Into<String>, span: Option<Span>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            span,
        }
    }

    pub fn note(message: impl Into<String>, span: Option<Span>) -> Self {
        Self {
            severity: Severity::Note,
            message: message.into(),
            span,
        }
    }
}
