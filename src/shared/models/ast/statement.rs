//! Statement nodes of the unified AST.

use serde::{Deserialize, Serialize};

use super::{
    Comment, Expression, ImportStatement, MethodDeclaration, NodeKind, SingleVariableDeclaration,
    TypeDeclaration,
};
use crate::shared::models::Span;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Block(Block),
    Expression(ExpressionStatement),
    If(IfStatement),
    For(ForStatement),
    While(WhileStatement),
    Try(TryStatement),
    With(WithStatement),
    Switch(SwitchStatement),
    Return(ReturnStatement),
    Yield(YieldStatement),
    Assert(AssertStatement),
    Del(DelStatement),
    Global(GlobalStatement),
    Nonlocal(NonlocalStatement),
    Pass { span: Span },
    Break { span: Span },
    Continue { span: Span },
    Throw(ThrowStatement),
    Async(AsyncStatement),
    Type(TypeDeclaration),
    Method(MethodDeclaration),
    Import(ImportStatement),
    Comment(Comment),
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Block(b) => b.span,
            Statement::Expression(e) => e.span,
            Statement::If(i) => i.span,
            Statement::For(f) => f.span,
            Statement::While(w) => w.span,
            Statement::Try(t) => t.span,
            Statement::With(w) => w.span,
            Statement::Switch(s) => s.span,
            Statement::Return(r) => r.span,
            Statement::Yield(y) => y.span,
            Statement::Assert(a) => a.span,
            Statement::Del(d) => d.span,
            Statement::Global(g) => g.span,
            Statement::Nonlocal(n) => n.span,
            Statement::Pass { span }
            | Statement::Break { span }
            | Statement::Continue { span } => *span,
            Statement::Throw(t) => t.span,
            Statement::Async(a) => a.span,
            Statement::Type(t) => t.span,
            Statement::Method(m) => m.span,
            Statement::Import(i) => i.span,
            Statement::Comment(c) => c.span,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Statement::Block(_) => NodeKind::Block,
            Statement::Expression(_) => NodeKind::ExpressionStatement,
            Statement::If(_) => NodeKind::IfStatement,
            Statement::For(_) => NodeKind::ForStatement,
            Statement::While(_) => NodeKind::WhileStatement,
            Statement::Try(_) => NodeKind::TryStatement,
            Statement::With(_) => NodeKind::WithStatement,
            Statement::Switch(_) => NodeKind::SwitchStatement,
            Statement::Return(_) => NodeKind::ReturnStatement,
            Statement::Yield(_) => NodeKind::YieldStatement,
            Statement::Assert(_) => NodeKind::AssertStatement,
            Statement::Del(_) => NodeKind::DelStatement,
            Statement::Global(_) => NodeKind::GlobalStatement,
            Statement::Nonlocal(_) => NodeKind::NonlocalStatement,
            Statement::Pass { .. } => NodeKind::PassStatement,
            Statement::Break { .. } => NodeKind::BreakStatement,
            Statement::Continue { .. } => NodeKind::ContinueStatement,
            Statement::Throw(_) => NodeKind::ThrowStatement,
            Statement::Async(_) => NodeKind::AsyncStatement,
            Statement::Type(_) => NodeKind::TypeDeclaration,
            Statement::Method(_) => NodeKind::MethodDeclaration,
            Statement::Import(_) => NodeKind::ImportStatement,
            Statement::Comment(_) => NodeKind::Comment,
        }
    }
}

/// An ordered statement list with a span covering the whole suite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub span: Span,
}

impl Block {
    pub fn new(statements: Vec<Statement>, span: Span) -> Self {
        Self { statements, span }
    }

    pub fn empty(span: Span) -> Self {
        Self::new(Vec::new(), span)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub span: Span,
}

/// `if`/`elif`/`else`. An `elif` chain nests as an `If` statement in
/// `else_branch`, so consumers see only two-way conditionals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStatement {
    pub condition: Expression,
    pub body: Block,
    pub else_branch: Option<Box<Statement>>,
    pub span: Span,
}

/// `for target, ... in iterable`. Each loop target is declared as an
/// untyped variable so rename detection can track it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForStatement {
    pub targets: Vec<SingleVariableDeclaration>,
    pub iterable: Expression,
    pub body: Block,
    pub else_body: Option<Block>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Block,
    pub else_body: Option<Block>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TryStatement {
    pub body: Block,
    pub catch_clauses: Vec<CatchClause>,
    pub else_block: Option<Block>,
    pub finally_block: Option<Block>,
    pub span: Span,
}

/// `except` clause. A tuple of exception types is flattened into
/// `exception_types`; a bare `except:` leaves it empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchClause {
    pub exception_types: Vec<Expression>,
    pub name: Option<String>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithStatement {
    pub items: Vec<WithContextItem>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithContextItem {
    pub context: Expression,
    pub alias: Option<Expression>,
    pub span: Span,
}

/// `match` statement mapped onto the language-neutral switch shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchStatement {
    pub subject: Expression,
    pub cases: Vec<CaseStatement>,
    pub span: Span,
}

/// One `case` arm. `pattern` is absent when the pattern has no expression
/// form in the unified model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseStatement {
    pub pattern: Option<Expression>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStatement {
    pub value: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldStatement {
    pub value: Option<Expression>,
    pub is_from: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssertStatement {
    pub condition: Expression,
    pub message: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelStatement {
    pub targets: Vec<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalStatement {
    pub names: Vec<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonlocalStatement {
    pub names: Vec<String>,
    pub span: Span,
}

/// `raise`, with the optional `from` cause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrowStatement {
    pub exception: Option<Expression>,
    pub cause: Option<Expression>,
    pub span: Span,
}

/// Wrapper marking `async for` and `async with`; `async def` is flagged on
/// the method declaration instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsyncStatement {
    pub body: Box<Statement>,
    pub span: Span,
}
