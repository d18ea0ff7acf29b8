//! Declaration nodes: classes, functions, variables, and decorators.

use serde::{Deserialize, Serialize};

use super::{Assignment, Block, Comment, Expression, Statement};
use crate::shared::models::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

/// Maps Python naming conventions onto the unified visibility scale.
/// Dunder names stay public; name-mangled `__x` is private; a single
/// leading underscore is protected.
pub fn visibility_of(name: &str) -> Visibility {
    if name.starts_with("__") && !name.ends_with("__") {
        Visibility::Private
    } else if name.starts_with('_') && !name.starts_with("__") {
        Visibility::Protected
    } else {
        Visibility::Public
    }
}

/// Strips underscore prefixes (and dunder suffixes) so that `__init__`,
/// `_helper`, and `__secret` compare by their bare names across languages.
pub fn clean_name(name: &str) -> String {
    if name.len() > 4 && name.starts_with("__") && name.ends_with("__") {
        name[2..name.len() - 2].to_string()
    } else if name.starts_with("__") {
        name[2..].to_string()
    } else if let Some(stripped) = name.strip_prefix('_') {
        stripped.strip_suffix("__").unwrap_or(stripped).to_string()
    } else {
        name.to_string()
    }
}

/// A class declaration with its members pre-classified into the buckets
/// downstream matching consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub name: String,
    pub superclasses: Vec<String>,
    pub is_abstract: bool,
    pub is_enum: bool,
    pub visibility: Visibility,
    pub methods: Vec<MethodDeclaration>,
    pub assignments: Vec<Assignment>,
    pub comments: Vec<Comment>,
    pub statements: Vec<Statement>,
    pub annotations: Vec<Annotation>,
    pub span: Span,
}

/// A function or method declaration. `clean_name` mirrors [`clean_name`]
/// applied to `name`; `return_type` is the annotation text or an inferred
/// `"object"`/`"None"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDeclaration {
    pub name: String,
    pub clean_name: String,
    pub parameters: Vec<SingleVariableDeclaration>,
    pub body: Block,
    pub visibility: Visibility,
    pub is_constructor: bool,
    pub is_async: bool,
    pub is_abstract: bool,
    pub is_static: bool,
    pub return_type: String,
    pub annotations: Vec<Annotation>,
    pub comment: Option<Comment>,
    pub span: Span,
}

/// A parameter or loop-target variable. Untyped names carry the catch-all
/// annotation `"object"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleVariableDeclaration {
    pub name: String,
    pub default_value: Option<Expression>,
    pub type_annotation: String,
    pub is_parameter: bool,
    pub is_var_args: bool,
    pub is_kw_args: bool,
    pub span: Span,
}

impl SingleVariableDeclaration {
    /// An untyped declaration, the shape shared by bare parameters and
    /// loop targets.
    pub fn untyped(name: impl Into<String>, is_parameter: bool, span: Span) -> Self {
        Self {
            name: name.into(),
            default_value: None,
            type_annotation: "object".to_string(),
            is_parameter,
            is_var_args: false,
            is_kw_args: false,
            span,
        }
    }
}

/// A decorator. Call-form decorators split their arguments into
/// positional `arguments` and `name=value` `members`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub name: String,
    pub arguments: Vec<Expression>,
    pub members: Vec<(String, Expression)>,
    pub span: Span,
}

impl Annotation {
    pub fn marker(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            members: Vec::new(),
            span,
        }
    }
}
