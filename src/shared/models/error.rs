//! Error types for the lowering engine.
//!
//! The fatal tier of the two-tier failure model: almost every malformed CST
//! shape degrades to a placeholder node plus a [`Diagnostic`], and only a
//! small set of structural invariant violations surface as `LoweringError`.
//!
//! [`Diagnostic`]: crate::shared::models::Diagnostic

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoweringError {
    /// The tree-sitter grammar could not be loaded into the parser.
    #[error("failed to configure parser: {0}")]
    ParserInit(String),

    /// The parser produced no tree for the input.
    #[error("failed to parse {file_path}")]
    Parse { file_path: String },

    /// A structural invariant the grammar should guarantee was violated,
    /// e.g. a try statement with no body block. Continuing would corrupt
    /// tree shape invariants downstream consumers rely on.
    #[error("malformed syntax tree: {0}")]
    MalformedTree(String),
}

pub type Result<T> = std::result::Result<T, LoweringError>;
