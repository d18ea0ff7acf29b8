//! Unified AST lowering for multi-language program analysis.
//!
//! A frontend parses source with tree-sitter and lowers the concrete
//! syntax tree into one language-neutral AST, so refactoring detection and
//! diffing downstream never touch language-specific trees. Python is the
//! first frontend; the [`AstLowerer`] trait is the seam for more.
//!
//! ```no_run
//! use unified_ast::{AstLowerer, PythonAstBuilder};
//!
//! let mut builder = PythonAstBuilder::new()?;
//! let output = builder.lower("def f():\n    return 1\n", "example.py")?;
//! assert_eq!(output.unit.methods.len(), 1);
//! # Ok::<(), unified_ast::LoweringError>(())
//! ```

pub mod features;
pub mod shared;

pub use features::lowering::{lower_files, AstLowerer, LoweringOutput, PythonAstBuilder};
pub use shared::models::{ast, Diagnostic, LoweringError, Result, Severity, Span};
