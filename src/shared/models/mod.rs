//! Shared data models: the unified AST, spans, diagnostics, and errors.

pub mod ast;
pub mod diagnostic;
pub mod error;
pub mod span;

pub use diagnostic::{Diagnostic, Severity};
pub use error::{LoweringError, Result};
pub use span::Span;
