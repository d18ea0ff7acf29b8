//! The unified AST node hierarchy.
//!
//! One node model shared by every language frontend: expressions and
//! statements are tagged unions, declarations and the compilation unit are
//! structs, and every node exposes a [`NodeKind`] tag and a source span.
//! Downstream consumers (diffing, model building) dispatch on the tag and
//! read spans; they never need language-specific knowledge.
//!
//! Nodes are created fully populated during lowering and never mutated by a
//! later pass. Ownership is strictly hierarchical.

mod declaration;
mod expression;
mod statement;
mod unit;

pub use declaration::{
    clean_name, visibility_of, Annotation, MethodDeclaration, SingleVariableDeclaration,
    TypeDeclaration, Visibility,
};
pub use expression::{
    Assignment, AwaitExpression, ComprehensionClause, ComprehensionExpression, ComprehensionKind,
    DictionaryEntry, DictionaryLiteral, Expression, FieldAccess, IndexAccess, InfixExpression,
    LambdaExpression, ListLiteral, Literal, LiteralValue, MethodInvocation,
    ParenthesizedExpression, PrefixExpression, SimpleName, SliceExpression, TernaryExpression,
    TupleLiteral,
};
pub use statement::{
    AssertStatement, AsyncStatement, Block, CaseStatement, CatchClause, DelStatement,
    ExpressionStatement, ForStatement, GlobalStatement, IfStatement, NonlocalStatement,
    ReturnStatement, Statement, SwitchStatement, ThrowStatement, TryStatement, WhileStatement,
    WithContextItem, WithStatement, YieldStatement,
};
pub use unit::{CompilationUnit, ImportItem, ImportStatement};

use serde::{Deserialize, Serialize};

use crate::shared::models::Span;

/// Node-kind tag for downstream dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    CompilationUnit,
    TypeDeclaration,
    MethodDeclaration,
    SingleVariableDeclaration,
    ImportStatement,
    Annotation,
    Comment,
    Block,
    ExpressionStatement,
    IfStatement,
    ForStatement,
    WhileStatement,
    TryStatement,
    CatchClause,
    WithStatement,
    WithContextItem,
    SwitchStatement,
    CaseStatement,
    ReturnStatement,
    YieldStatement,
    AssertStatement,
    DelStatement,
    GlobalStatement,
    NonlocalStatement,
    PassStatement,
    BreakStatement,
    ContinueStatement,
    ThrowStatement,
    AsyncStatement,
    SimpleName,
    NumberLiteral,
    StringLiteral,
    BooleanLiteral,
    NullLiteral,
    EllipsisLiteral,
    TupleLiteral,
    ListLiteral,
    DictionaryLiteral,
    ComprehensionExpression,
    MethodInvocation,
    FieldAccess,
    IndexAccess,
    SliceExpression,
    InfixExpression,
    PrefixExpression,
    TernaryExpression,
    LambdaExpression,
    AwaitExpression,
    Assignment,
    ParenthesizedExpression,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::CompilationUnit => "compilation_unit",
            NodeKind::TypeDeclaration => "type_declaration",
            NodeKind::MethodDeclaration => "method_declaration",
            NodeKind::SingleVariableDeclaration => "single_variable_declaration",
            NodeKind::ImportStatement => "import_statement",
            NodeKind::Annotation => "annotation",
            NodeKind::Comment => "comment",
            NodeKind::Block => "block",
            NodeKind::ExpressionStatement => "expression_statement",
            NodeKind::IfStatement => "if_statement",
            NodeKind::ForStatement => "for_statement",
            NodeKind::WhileStatement => "while_statement",
            NodeKind::TryStatement => "try_statement",
            NodeKind::CatchClause => "catch_clause",
            NodeKind::WithStatement => "with_statement",
            NodeKind::WithContextItem => "with_context_item",
            NodeKind::SwitchStatement => "switch_statement",
            NodeKind::CaseStatement => "case_statement",
            NodeKind::ReturnStatement => "return_statement",
            NodeKind::YieldStatement => "yield_statement",
            NodeKind::AssertStatement => "assert_statement",
            NodeKind::DelStatement => "del_statement",
            NodeKind::GlobalStatement => "global_statement",
            NodeKind::NonlocalStatement => "nonlocal_statement",
            NodeKind::PassStatement => "pass_statement",
            NodeKind::BreakStatement => "break_statement",
            NodeKind::ContinueStatement => "continue_statement",
            NodeKind::ThrowStatement => "throw_statement",
            NodeKind::AsyncStatement => "async_statement",
            NodeKind::SimpleName => "simple_name",
            NodeKind::NumberLiteral => "number_literal",
            NodeKind::StringLiteral => "string_literal",
            NodeKind::BooleanLiteral => "boolean_literal",
            NodeKind::NullLiteral => "null_literal",
            NodeKind::EllipsisLiteral => "ellipsis_literal",
            NodeKind::TupleLiteral => "tuple_literal",
            NodeKind::ListLiteral => "list_literal",
            NodeKind::DictionaryLiteral => "dictionary_literal",
            NodeKind::ComprehensionExpression => "comprehension_expression",
            NodeKind::MethodInvocation => "method_invocation",
            NodeKind::FieldAccess => "field_access",
            NodeKind::IndexAccess => "index_access",
            NodeKind::SliceExpression => "slice_expression",
            NodeKind::InfixExpression => "infix_expression",
            NodeKind::PrefixExpression => "prefix_expression",
            NodeKind::TernaryExpression => "ternary_expression",
            NodeKind::LambdaExpression => "lambda_expression",
            NodeKind::AwaitExpression => "await_expression",
            NodeKind::Assignment => "assignment",
            NodeKind::ParenthesizedExpression => "parenthesized_expression",
        }
    }
}

/// A source comment, including docstrings promoted out of statement
/// position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    pub is_block: bool,
    pub is_doc: bool,
    pub span: Span,
}

impl Comment {
    pub fn new(text: impl Into<String>, is_block: bool, is_doc: bool, span: Span) -> Self {
        Self {
            text: text.into(),
            is_block,
            is_doc,
            span,
        }
    }

    /// A promoted docstring.
    pub fn doc(text: impl Into<String>, span: Span) -> Self {
        Self::new(text, false, true, span)
    }
}
