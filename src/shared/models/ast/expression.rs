//! Expression nodes of the unified AST.
//!
//! Expressions form a tagged union so that consumers classify with a single
//! exhaustive `match` instead of downcasting. Every variant carries its own
//! span; `Expression::span` and `Expression::kind` project the common parts.

use serde::{Deserialize, Serialize};

use super::{NodeKind, SingleVariableDeclaration};
use crate::shared::models::Span;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Name(SimpleName),
    Literal(Literal),
    Tuple(TupleLiteral),
    List(ListLiteral),
    Dictionary(DictionaryLiteral),
    Comprehension(ComprehensionExpression),
    Invocation(MethodInvocation),
    FieldAccess(FieldAccess),
    IndexAccess(IndexAccess),
    Slice(SliceExpression),
    Infix(InfixExpression),
    Prefix(PrefixExpression),
    Ternary(TernaryExpression),
    Lambda(LambdaExpression),
    Await(AwaitExpression),
    Assignment(Assignment),
    Paren(ParenthesizedExpression),
}

impl Expression {
    /// Shorthand for a bare identifier, also used for recovery placeholders.
    pub fn name(id: impl Into<String>, span: Span) -> Self {
        Expression::Name(SimpleName {
            id: id.into(),
            span,
        })
    }

    pub fn span(&self) -> Span {
        match self {
            Expression::Name(n) => n.span,
            Expression::Literal(l) => l.span,
            Expression::Tuple(t) => t.span,
            Expression::List(l) => l.span,
            Expression::Dictionary(d) => d.span,
            Expression::Comprehension(c) => c.span,
            Expression::Invocation(i) => i.span,
            Expression::FieldAccess(f) => f.span,
            Expression::IndexAccess(i) => i.span,
            Expression::Slice(s) => s.span,
            Expression::Infix(i) => i.span,
            Expression::Prefix(p) => p.span,
            Expression::Ternary(t) => t.span,
            Expression::Lambda(l) => l.span,
            Expression::Await(a) => a.span,
            Expression::Assignment(a) => a.span,
            Expression::Paren(p) => p.span,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Expression::Name(_) => NodeKind::SimpleName,
            Expression::Literal(l) => l.kind(),
            Expression::Tuple(_) => NodeKind::TupleLiteral,
            Expression::List(_) => NodeKind::ListLiteral,
            Expression::Dictionary(_) => NodeKind::DictionaryLiteral,
            Expression::Comprehension(_) => NodeKind::ComprehensionExpression,
            Expression::Invocation(_) => NodeKind::MethodInvocation,
            Expression::FieldAccess(_) => NodeKind::FieldAccess,
            Expression::IndexAccess(_) => NodeKind::IndexAccess,
            Expression::Slice(_) => NodeKind::SliceExpression,
            Expression::Infix(_) => NodeKind::InfixExpression,
            Expression::Prefix(_) => NodeKind::PrefixExpression,
            Expression::Ternary(_) => NodeKind::TernaryExpression,
            Expression::Lambda(_) => NodeKind::LambdaExpression,
            Expression::Await(_) => NodeKind::AwaitExpression,
            Expression::Assignment(_) => NodeKind::Assignment,
            Expression::Paren(_) => NodeKind::ParenthesizedExpression,
        }
    }
}

/// A bare identifier reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleName {
    pub id: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    pub value: LiteralValue,
    pub span: Span,
}

impl Literal {
    pub fn kind(&self) -> NodeKind {
        match self.value {
            LiteralValue::Number(_) => NodeKind::NumberLiteral,
            LiteralValue::Str(_) => NodeKind::StringLiteral,
            LiteralValue::Boolean(_) => NodeKind::BooleanLiteral,
            LiteralValue::Null => NodeKind::NullLiteral,
            LiteralValue::Ellipsis => NodeKind::EllipsisLiteral,
        }
    }
}

/// Literal payloads. Numbers keep their source text so that int, float,
/// complex, and radix forms survive without a numeric parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    Number(String),
    Str(String),
    Boolean(bool),
    Null,
    Ellipsis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TupleLiteral {
    pub elements: Vec<Expression>,
    pub span: Span,
}

/// List literals; set displays also lower here since the unified model has
/// no dedicated set node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListLiteral {
    pub elements: Vec<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryLiteral {
    pub entries: Vec<DictionaryEntry>,
    pub span: Span,
}

/// One `key: value` pair. `key` is absent for `**spread` entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub key: Option<Expression>,
    pub value: Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComprehensionKind {
    List,
    Set,
    Dict,
    Generator,
}

/// A comprehension of any flavor. List, set, and generator forms populate
/// `element`; dict comprehensions populate `key` and `value` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensionExpression {
    pub kind: ComprehensionKind,
    pub element: Option<Box<Expression>>,
    pub key: Option<Box<Expression>>,
    pub value: Option<Box<Expression>>,
    pub clauses: Vec<ComprehensionClause>,
    pub span: Span,
}

/// One `for ... in ...` clause with the `if` filters that follow it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensionClause {
    pub targets: Vec<Expression>,
    pub iterable: Expression,
    pub filters: Vec<Expression>,
    pub is_async: bool,
    pub span: Span,
}

/// A call. Keyword arguments appear in `arguments` as `Assignment` nodes
/// with operator `"="`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodInvocation {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldAccess {
    pub base: Box<Expression>,
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexAccess {
    pub target: Box<Expression>,
    pub index: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceExpression {
    pub lower: Option<Box<Expression>>,
    pub upper: Option<Box<Expression>>,
    pub step: Option<Box<Expression>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfixExpression {
    pub operator: String,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrefixExpression {
    pub operator: String,
    pub operand: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TernaryExpression {
    pub condition: Box<Expression>,
    pub then_expr: Box<Expression>,
    pub else_expr: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LambdaExpression {
    pub parameters: Vec<SingleVariableDeclaration>,
    pub body: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwaitExpression {
    pub expression: Box<Expression>,
    pub span: Span,
}

/// Assignment as an expression. The operator string distinguishes plain
/// (`"="`), augmented (`"+="` and friends), walrus (`":="`), and keyword
/// arguments in call position (`"="`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub operator: String,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParenthesizedExpression {
    pub expression: Box<Expression>,
    pub span: Span,
}
