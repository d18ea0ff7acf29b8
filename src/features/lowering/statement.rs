//! Statement lowering.
//!
//! Statement lowering is fallible: a structurally broken suite (a `try`
//! with no body) aborts the file, while an unmappable statement form is
//! skipped with a diagnostic so its siblings still lower.

use tree_sitter::Node;

use crate::features::lowering::context::{LoweringContext, UNKNOWN_LEFT, UNKNOWN_RIGHT};
use crate::shared::models::ast::{
    AssertStatement, AsyncStatement, Block, CaseStatement, CatchClause, Comment, DelStatement,
    Expression, ExpressionStatement, ForStatement, GlobalStatement, IfStatement,
    NonlocalStatement, ReturnStatement, SingleVariableDeclaration, Statement, SwitchStatement,
    ThrowStatement, TryStatement, TupleLiteral, WhileStatement, WithContextItem, WithStatement,
    YieldStatement,
};
use crate::shared::models::{LoweringError, Result, Span};
use crate::shared::utils::tree_sitter::{
    children, find_child_by_kind, find_children_by_kind, named_children, node_to_span,
    strip_string_quotes,
};

impl<'a> LoweringContext<'a> {
    /// Lower one statement node. `Ok(None)` means the statement was skipped
    /// (with a diagnostic); `Err` aborts the whole file.
    pub(crate) fn lower_statement(&mut self, node: &Node) -> Result<Option<Statement>> {
        let span = node_to_span(node);
        let stmt = match node.kind() {
            "comment" => Statement::Comment(Comment::new(self.text(node), false, false, span)),
            "expression_statement" => match node.named_child(0) {
                Some(inner) if inner.kind() == "yield" => self.lower_yield(&inner),
                Some(inner) => Statement::Expression(ExpressionStatement {
                    expression: self.lower_expression(&inner),
                    span,
                }),
                None => {
                    self.warn("empty expression statement", span);
                    return Ok(None);
                }
            },
            "if_statement" => self.lower_if(node)?,
            "for_statement" => self.lower_for(node)?,
            "while_statement" => self.lower_while(node)?,
            "try_statement" => self.lower_try(node)?,
            "with_statement" => self.lower_with(node)?,
            "match_statement" => self.lower_match(node)?,
            "return_statement" => Statement::Return(ReturnStatement {
                value: node.named_child(0).map(|v| self.lower_expression(&v)),
                span,
            }),
            "pass_statement" => Statement::Pass { span },
            "break_statement" => Statement::Break { span },
            "continue_statement" => Statement::Continue { span },
            "assert_statement" => {
                let parts = named_children(node);
                let condition = match parts.first() {
                    Some(cond) => self.lower_expression(cond),
                    None => self.placeholder(UNKNOWN_LEFT, node, "assert without condition"),
                };
                Statement::Assert(AssertStatement {
                    condition,
                    message: parts.get(1).map(|m| self.lower_expression(m)),
                    span,
                })
            }
            "delete_statement" => {
                let targets = match node.named_child(0) {
                    Some(inner) if inner.kind() == "expression_list" => {
                        self.lower_all(&named_children(&inner))
                    }
                    Some(inner) => vec![self.lower_expression(&inner)],
                    None => Vec::new(),
                };
                Statement::Del(DelStatement { targets, span })
            }
            "global_statement" => Statement::Global(GlobalStatement {
                names: self.identifier_names(node),
                span,
            }),
            "nonlocal_statement" => Statement::Nonlocal(NonlocalStatement {
                names: self.identifier_names(node),
                span,
            }),
            "raise_statement" => self.lower_raise(node),
            "import_statement" | "import_from_statement" | "future_import_statement" => {
                Statement::Import(self.lower_import(node))
            }
            "function_definition" => Statement::Method(self.lower_function(node, Vec::new())?),
            "class_definition" => Statement::Type(self.lower_class(node, Vec::new())?),
            "decorated_definition" => self.lower_decorated(node)?,
            "block" => Statement::Block(self.lower_block(node)?),
            kind => {
                self.warn(format!("unsupported statement kind `{kind}`"), span);
                return Ok(None);
            }
        };
        Ok(Some(stmt))
    }

    /// Lower a suite node into a Block, skipping statements that failed
    /// recoverably.
    pub(crate) fn lower_block(&mut self, node: &Node) -> Result<Block> {
        let mut statements = Vec::new();
        for child in named_children(node) {
            if let Some(stmt) = self.lower_statement(&child)? {
                statements.push(stmt);
            }
        }
        Ok(Block::new(statements, node_to_span(node)))
    }

    fn identifier_names(&mut self, node: &Node) -> Vec<String> {
        find_children_by_kind(node, "identifier")
            .iter()
            .map(|id| self.text(id).to_string())
            .collect()
    }

    /// `elif` chains fold right to left into nested two-way conditionals.
    fn lower_if(&mut self, node: &Node) -> Result<Statement> {
        let span = node_to_span(node);
        let condition = match node.child_by_field_name("condition") {
            Some(cond) => self.lower_expression(&cond),
            None => self.placeholder(UNKNOWN_LEFT, node, "if without condition"),
        };
        let body = match node.child_by_field_name("consequence") {
            Some(consequence) => self.lower_block(&consequence)?,
            None => Block::empty(span),
        };

        let mut else_branch: Option<Box<Statement>> = None;
        if let Some(else_clause) = find_child_by_kind(node, "else_clause") {
            if let Some(else_body) = else_clause.child_by_field_name("body") {
                else_branch = Some(Box::new(Statement::Block(self.lower_block(&else_body)?)));
            }
        }
        for elif in find_children_by_kind(node, "elif_clause").into_iter().rev() {
            let elif_span = node_to_span(&elif);
            let elif_condition = match elif.child_by_field_name("condition") {
                Some(cond) => self.lower_expression(&cond),
                None => self.placeholder(UNKNOWN_LEFT, &elif, "elif without condition"),
            };
            let elif_body = match elif.child_by_field_name("consequence") {
                Some(consequence) => self.lower_block(&consequence)?,
                None => Block::empty(elif_span),
            };
            else_branch = Some(Box::new(Statement::If(IfStatement {
                condition: elif_condition,
                body: elif_body,
                else_branch,
                span: elif_span,
            })));
        }

        Ok(Statement::If(IfStatement {
            condition,
            body,
            else_branch,
            span,
        }))
    }

    fn is_async(&self, node: &Node) -> bool {
        children(node)
            .iter()
            .any(|c| !c.is_named() && self.text(c) == "async")
    }

    fn lower_for(&mut self, node: &Node) -> Result<Statement> {
        let span = node_to_span(node);
        let targets = match node.child_by_field_name("left") {
            Some(left) => self.lower_loop_targets(&left),
            None => {
                self.warn("for loop without target", span);
                Vec::new()
            }
        };
        let iterable = match node.child_by_field_name("right") {
            Some(right) => self.lower_expression(&right),
            None => self.placeholder(UNKNOWN_RIGHT, node, "for loop without iterable"),
        };
        let body = match node.child_by_field_name("body") {
            Some(body) => self.lower_block(&body)?,
            None => Block::empty(span),
        };
        let else_body = self.lower_else_clause(node)?;

        let stmt = Statement::For(ForStatement {
            targets,
            iterable,
            body,
            else_body,
            span,
        });
        Ok(self.wrap_async(node, stmt, span))
    }

    /// Loop targets become untyped variable declarations. Non-name targets
    /// (attributes, subscripts) keep their raw text as the name.
    fn lower_loop_targets(&mut self, node: &Node) -> Vec<SingleVariableDeclaration> {
        let target_nodes = match node.kind() {
            "pattern_list" | "tuple_pattern" | "expression_list" => named_children(node),
            _ => vec![*node],
        };
        target_nodes
            .iter()
            .map(|t| SingleVariableDeclaration::untyped(self.text(t), false, node_to_span(t)))
            .collect()
    }

    fn lower_else_clause(&mut self, node: &Node) -> Result<Option<Block>> {
        match find_child_by_kind(node, "else_clause") {
            Some(clause) => match clause.child_by_field_name("body") {
                Some(body) => Ok(Some(self.lower_block(&body)?)),
                None => Ok(None),
            },
            None => Ok(None),
        }
    }

    fn lower_while(&mut self, node: &Node) -> Result<Statement> {
        let span = node_to_span(node);
        let condition = match node.child_by_field_name("condition") {
            Some(cond) => self.lower_expression(&cond),
            None => self.placeholder(UNKNOWN_LEFT, node, "while without condition"),
        };
        let body = match node.child_by_field_name("body") {
            Some(body) => self.lower_block(&body)?,
            None => Block::empty(span),
        };
        Ok(Statement::While(WhileStatement {
            condition,
            body,
            else_body: self.lower_else_clause(node)?,
            span,
        }))
    }

    fn lower_try(&mut self, node: &Node) -> Result<Statement> {
        let span = node_to_span(node);
        let body = match node.child_by_field_name("body") {
            Some(body) => self.lower_block(&body)?,
            None => {
                return Err(LoweringError::MalformedTree(format!(
                    "try statement without body at line {}",
                    span.start_line
                )))
            }
        };

        let mut catch_clauses = Vec::new();
        for clause in children(node) {
            if clause.kind() == "except_clause" || clause.kind() == "except_group_clause" {
                catch_clauses.push(self.lower_except_clause(&clause)?);
            }
        }

        let else_block = self.lower_else_clause(node)?;
        let finally_block = match find_child_by_kind(node, "finally_clause") {
            Some(clause) => match find_child_by_kind(&clause, "block") {
                Some(block) => Some(self.lower_block(&block)?),
                None => None,
            },
            None => None,
        };

        Ok(Statement::Try(TryStatement {
            body,
            catch_clauses,
            else_block,
            finally_block,
            span,
        }))
    }

    /// `except (A, B) as e:` flattens the tuple of types and captures the
    /// alias name. A bare `except:` leaves both empty.
    fn lower_except_clause(&mut self, clause: &Node) -> Result<CatchClause> {
        let span = node_to_span(clause);
        let parts = named_children(clause);
        let (block_node, heads) = match parts.split_last() {
            Some((last, heads)) if last.kind() == "block" => (Some(*last), heads.to_vec()),
            _ => (None, parts),
        };

        let mut exception_types = Vec::new();
        let mut name = None;
        match heads.first() {
            // The aliased form parses as `as_pattern`, grammar versions
            // without it put the alias in a second named child.
            Some(head) if head.kind() == "as_pattern" => {
                if let Some(type_node) = head.named_child(0) {
                    exception_types = self.flatten_exception_types(&type_node);
                }
                if let Some(alias_node) = head.child_by_field_name("alias") {
                    let alias_text = match alias_node.named_child(0) {
                        Some(inner) => self.text(&inner),
                        None => self.text(&alias_node),
                    };
                    name = Some(alias_text.to_string());
                }
            }
            Some(type_node) => {
                exception_types = self.flatten_exception_types(type_node);
                if let Some(alias_node) = heads.get(1) {
                    name = Some(self.text(alias_node).to_string());
                }
            }
            None => {}
        }

        let body = match block_node {
            Some(block) => self.lower_block(&block)?,
            None => Block::empty(span),
        };
        Ok(CatchClause {
            exception_types,
            name,
            body,
            span,
        })
    }

    fn flatten_exception_types(&mut self, node: &Node) -> Vec<Expression> {
        match node.kind() {
            "tuple" => named_children(node)
                .iter()
                .map(|t| self.lower_expression(t))
                .collect(),
            "parenthesized_expression" => match node.named_child(0) {
                Some(inner) => self.flatten_exception_types(&inner),
                None => Vec::new(),
            },
            _ => vec![self.lower_expression(node)],
        }
    }

    fn lower_with(&mut self, node: &Node) -> Result<Statement> {
        let span = node_to_span(node);
        let mut items = Vec::new();
        if let Some(with_clause) = find_child_by_kind(node, "with_clause") {
            for item in find_children_by_kind(&with_clause, "with_item") {
                let item_span = node_to_span(&item);
                let value = match item.child_by_field_name("value") {
                    Some(value) => value,
                    None => continue,
                };
                let (context, alias) = if value.kind() == "as_pattern" {
                    let context = match value.named_child(0) {
                        Some(ctx) => self.lower_expression(&ctx),
                        None => self.placeholder(UNKNOWN_LEFT, &value, "with item without context"),
                    };
                    let alias = value.child_by_field_name("alias").map(|alias_node| {
                        match alias_node.named_child(0) {
                            Some(inner) => self.lower_expression(&inner),
                            None => self.lower_expression(&alias_node),
                        }
                    });
                    (context, alias)
                } else {
                    (self.lower_expression(&value), None)
                };
                items.push(WithContextItem {
                    context,
                    alias,
                    span: item_span,
                });
            }
        }
        let body = match node.child_by_field_name("body") {
            Some(body) => self.lower_block(&body)?,
            None => Block::empty(span),
        };

        let stmt = Statement::With(WithStatement { items, body, span });
        Ok(self.wrap_async(node, stmt, span))
    }

    fn wrap_async(&self, node: &Node, stmt: Statement, span: Span) -> Statement {
        if self.is_async(node) {
            Statement::Async(AsyncStatement {
                body: Box::new(stmt),
                span,
            })
        } else {
            stmt
        }
    }

    /// `match` lowers to the language-neutral switch. Patterns are carried
    /// as expressions where they have one; structural patterns that do not
    /// are recorded as pattern-less cases with a note.
    fn lower_match(&mut self, node: &Node) -> Result<Statement> {
        let span = node_to_span(node);
        let mut subjects = Vec::new();
        for (i, child) in children(node).iter().enumerate() {
            if node.field_name_for_child(i as u32) == Some("subject") {
                subjects.push(*child);
            }
        }
        let subject = match subjects.as_slice() {
            [] => self.placeholder(UNKNOWN_LEFT, node, "match without subject"),
            [single] => self.lower_expression(single),
            many => Expression::Tuple(TupleLiteral {
                elements: self.lower_all(many),
                span,
            }),
        };

        let mut cases = Vec::new();
        if let Some(body) = node.child_by_field_name("body") {
            for clause in find_children_by_kind(&body, "case_clause") {
                cases.push(self.lower_case_clause(&clause)?);
            }
        }

        Ok(Statement::Switch(SwitchStatement {
            subject,
            cases,
            span,
        }))
    }

    fn lower_case_clause(&mut self, clause: &Node) -> Result<CaseStatement> {
        let span = node_to_span(clause);
        let patterns = find_children_by_kind(clause, "case_pattern");
        let pattern = match patterns.as_slice() {
            [single] => self.lower_case_pattern(single),
            _ => {
                self.note("multi-pattern case arm has no expression form", span);
                None
            }
        };
        if find_child_by_kind(clause, "if_clause").is_some() {
            self.note("case guard is not represented", span);
        }
        let body = match clause.child_by_field_name("consequence") {
            Some(consequence) => self.lower_block(&consequence)?,
            None => Block::empty(span),
        };
        Ok(CaseStatement {
            pattern,
            body,
            span,
        })
    }

    fn lower_case_pattern(&mut self, pattern: &Node) -> Option<Expression> {
        let span = node_to_span(pattern);
        if self.text(pattern) == "_" {
            return Some(Expression::name("_", span));
        }
        let inner = pattern.named_child(0)?;
        match inner.kind() {
            "identifier" | "integer" | "float" | "string" | "concatenated_string" | "true"
            | "false" | "none" | "attribute" | "unary_operator" => {
                Some(self.lower_expression(&inner))
            }
            "dotted_name" => Some(Expression::name(self.text(&inner), node_to_span(&inner))),
            _ => {
                self.note(
                    format!("match pattern `{}` has no expression form", inner.kind()),
                    span,
                );
                None
            }
        }
    }

    fn lower_raise(&mut self, node: &Node) -> Statement {
        let span = node_to_span(node);
        let cause_node = node.child_by_field_name("cause");
        let cause_id = cause_node.map(|c| c.id());
        let exception = named_children(node)
            .into_iter()
            .find(|c| Some(c.id()) != cause_id)
            .map(|e| self.lower_expression(&e));
        let cause = cause_node.map(|c| self.lower_expression(&c));
        Statement::Throw(ThrowStatement {
            exception,
            cause,
            span,
        })
    }

    fn lower_yield(&mut self, node: &Node) -> Statement {
        let span = node_to_span(node);
        let is_from = children(node)
            .iter()
            .any(|c| !c.is_named() && self.text(c) == "from");
        Statement::Yield(YieldStatement {
            value: node.named_child(0).map(|v| self.lower_expression(&v)),
            is_from,
            span,
        })
    }

    /// Promote a docstring expression statement into a doc comment.
    pub(crate) fn promote_docstring(&mut self, node: &Node) -> Option<Comment> {
        if node.kind() != "expression_statement" {
            return None;
        }
        let inner = node.named_child(0)?;
        if inner.kind() != "string" {
            return None;
        }
        let text = strip_string_quotes(self.text(&inner)).trim().to_string();
        Some(Comment::doc(text, node_to_span(node)))
    }
}
