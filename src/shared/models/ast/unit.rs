//! The compilation unit and import statements.

use serde::{Deserialize, Serialize};

use super::{Assignment, Comment, MethodDeclaration, Statement, TypeDeclaration};
use crate::shared::models::Span;

/// One lowered source file. Top-level constructs are classified into the
/// buckets downstream matching consumes; whatever does not fit a bucket
/// lands in `statements`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilationUnit {
    pub file_path: String,
    pub types: Vec<TypeDeclaration>,
    pub methods: Vec<MethodDeclaration>,
    pub imports: Vec<ImportStatement>,
    pub assignments: Vec<Assignment>,
    pub comments: Vec<Comment>,
    pub statements: Vec<Statement>,
    pub span: Span,
}

impl CompilationUnit {
    pub fn new(file_path: impl Into<String>, span: Span) -> Self {
        Self {
            file_path: file_path.into(),
            types: Vec::new(),
            methods: Vec::new(),
            imports: Vec::new(),
            assignments: Vec::new(),
            comments: Vec::new(),
            statements: Vec::new(),
            span,
        }
    }
}

/// An import statement in either plain or `from` form.
///
/// Plain form: one item per imported module, `from_module` empty. From
/// form: `from_module` and `relative_level` describe the source; items
/// name the imported bindings. `is_star` marks `from m import *` and
/// implies an empty item list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportStatement {
    pub items: Vec<ImportItem>,
    pub from_module: Option<String>,
    pub relative_level: u32,
    pub is_from: bool,
    pub is_star: bool,
    pub span: Span,
}

impl ImportStatement {
    pub fn plain(items: Vec<ImportItem>, span: Span) -> Self {
        Self {
            items,
            from_module: None,
            relative_level: 0,
            is_from: false,
            is_star: false,
            span,
        }
    }
}

/// One imported name with its optional `as` alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportItem {
    pub name: String,
    pub alias: Option<String>,
    pub span: Span,
}
