//! Per-file lowering state.

use tree_sitter::Node;

use crate::shared::models::ast::Expression;
use crate::shared::models::{Diagnostic, Span};
use crate::shared::utils::tree_sitter::{node_text, node_to_span};

/// Placeholder identifier for a missing left operand.
pub const UNKNOWN_LEFT: &str = "UNKNOWN_LEFT";
/// Placeholder identifier for a missing right operand.
pub const UNKNOWN_RIGHT: &str = "UNKNOWN_RIGHT";
/// Placeholder identifier for an expression form the model cannot represent.
pub const UNSUPPORTED_EXPR: &str = "UNSUPPORTED_EXPR";

/// Mutable state threaded through one file's lowering: the source text and
/// the diagnostics accumulated along the way. Recoverable defects become
/// diagnostics plus placeholder nodes; they never abort the file.
pub(crate) struct LoweringContext<'a> {
    pub(crate) source: &'a str,
    pub(crate) file_path: &'a str,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> LoweringContext<'a> {
    pub(crate) fn new(source: &'a str, file_path: &'a str) -> Self {
        Self {
            source,
            file_path,
            diagnostics: Vec::new(),
        }
    }

    /// Source text covered by a node.
    pub(crate) fn text(&self, node: &Node) -> &'a str {
        node_text(node, self.source)
    }

    pub(crate) fn warn(&mut self, message: impl Into<String>, span: Span) {
        let message = message.into();
        tracing::debug!(file = self.file_path, %message, line = span.start_line, "lowering warning");
        self.diagnostics.push(Diagnostic::warning(message, Some(span)));
    }

    pub(crate) fn note(&mut self, message: impl Into<String>, span: Span) {
        let message = message.into();
        tracing::debug!(file = self.file_path, %message, line = span.start_line, "lowering note");
        self.diagnostics.push(Diagnostic::note(message, Some(span)));
    }

    /// Record a warning and return a marker name standing in for the node.
    pub(crate) fn placeholder(
        &mut self,
        marker: &str,
        node: &Node,
        reason: impl Into<String>,
    ) -> Expression {
        let span = node_to_span(node);
        self.warn(reason, span);
        Expression::name(marker, span)
    }

    pub(crate) fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
