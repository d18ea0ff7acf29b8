//! Expression lowering.
//!
//! Maps tree-sitter expression nodes onto the unified expression union.
//! This pass is total: an expression form it cannot map becomes a
//! placeholder name plus a warning diagnostic, never an error, so one
//! exotic expression cannot sink a whole file.

use tree_sitter::Node;

use crate::features::lowering::context::{
    LoweringContext, UNKNOWN_LEFT, UNKNOWN_RIGHT, UNSUPPORTED_EXPR,
};
use crate::shared::models::ast::{
    Assignment, AwaitExpression, ComprehensionClause, ComprehensionExpression, ComprehensionKind,
    DictionaryEntry, DictionaryLiteral, Expression, FieldAccess, IndexAccess, InfixExpression,
    LambdaExpression, ListLiteral, Literal, LiteralValue, MethodInvocation,
    ParenthesizedExpression, PrefixExpression, SliceExpression, TernaryExpression, TupleLiteral,
};
use crate::shared::utils::tree_sitter::{children, named_children, node_to_span, strip_string_quotes};

impl<'a> LoweringContext<'a> {
    pub(crate) fn lower_expression(&mut self, node: &Node) -> Expression {
        let span = node_to_span(node);
        match node.kind() {
            "identifier" => Expression::name(self.text(node), span),
            "integer" | "float" => Expression::Literal(Literal {
                value: LiteralValue::Number(self.text(node).to_string()),
                span,
            }),
            "string" | "concatenated_string" => Expression::Literal(Literal {
                value: LiteralValue::Str(strip_string_quotes(self.text(node)).to_string()),
                span,
            }),
            "true" => Expression::Literal(Literal {
                value: LiteralValue::Boolean(true),
                span,
            }),
            "false" => Expression::Literal(Literal {
                value: LiteralValue::Boolean(false),
                span,
            }),
            "none" => Expression::Literal(Literal {
                value: LiteralValue::Null,
                span,
            }),
            "ellipsis" => Expression::Literal(Literal {
                value: LiteralValue::Ellipsis,
                span,
            }),
            "list" | "set" => Expression::List(ListLiteral {
                elements: self.lower_all(&named_children(node)),
                span,
            }),
            "tuple" => self.lower_tuple(node),
            "dictionary" => self.lower_dictionary(node),
            "list_comprehension" => self.lower_comprehension(node, ComprehensionKind::List),
            "set_comprehension" => self.lower_comprehension(node, ComprehensionKind::Set),
            "dictionary_comprehension" => self.lower_comprehension(node, ComprehensionKind::Dict),
            "generator_expression" => self.lower_comprehension(node, ComprehensionKind::Generator),
            "parenthesized_expression" => match node.named_child(0) {
                Some(inner) => Expression::Paren(ParenthesizedExpression {
                    expression: Box::new(self.lower_expression(&inner)),
                    span,
                }),
                None => self.placeholder(UNSUPPORTED_EXPR, node, "empty parentheses"),
            },
            "call" => self.lower_call(node),
            "attribute" => self.lower_attribute(node),
            "subscript" => self.lower_subscript(node),
            "binary_operator" | "boolean_operator" => self.lower_binary(node),
            "comparison_operator" => self.lower_comparison(node),
            "not_operator" => {
                let operand = match node.child_by_field_name("argument") {
                    Some(arg) => self.lower_expression(&arg),
                    None => self.placeholder(UNKNOWN_RIGHT, node, "not operator without operand"),
                };
                Expression::Prefix(PrefixExpression {
                    operator: "not".to_string(),
                    operand: Box::new(operand),
                    span,
                })
            }
            "unary_operator" => {
                let operator = node
                    .child_by_field_name("operator")
                    .map(|op| self.text(&op).to_string())
                    .unwrap_or_default();
                let operand = match node.child_by_field_name("argument") {
                    Some(arg) => self.lower_expression(&arg),
                    None => self.placeholder(UNKNOWN_RIGHT, node, "unary operator without operand"),
                };
                Expression::Prefix(PrefixExpression {
                    operator,
                    operand: Box::new(operand),
                    span,
                })
            }
            "conditional_expression" => self.lower_conditional(node),
            "lambda" => self.lower_lambda(node),
            "await" => match node.named_child(0) {
                Some(inner) => Expression::Await(AwaitExpression {
                    expression: Box::new(self.lower_expression(&inner)),
                    span,
                }),
                None => self.placeholder(UNSUPPORTED_EXPR, node, "await without operand"),
            },
            "named_expression" => self.lower_assignment_like(node, "name", "value", ":="),
            "assignment" => self.lower_plain_assignment(node),
            "augmented_assignment" => {
                let operator = node
                    .child_by_field_name("operator")
                    .map(|op| self.text(&op).to_string())
                    .unwrap_or_else(|| "=".to_string());
                self.lower_assignment_like(node, "left", "right", &operator)
            }
            "keyword_argument" => self.lower_assignment_like(node, "name", "value", "="),
            "expression_list" | "pattern_list" | "tuple_pattern" => {
                self.lower_expression_sequence(node)
            }
            "list_splat" | "list_splat_pattern" => self.lower_splat(node, "*"),
            "dictionary_splat" | "dictionary_splat_pattern" => self.lower_splat(node, "**"),
            "slice" => self.lower_slice(node),
            "yield" => match node.named_child(0) {
                Some(inner) => self.lower_expression(&inner),
                None => {
                    self.note("bare yield in expression position", span);
                    Expression::name(UNSUPPORTED_EXPR, span)
                }
            },
            kind => {
                self.warn(format!("unsupported expression kind `{kind}`"), span);
                Expression::name(self.text(node), span)
            }
        }
    }

    pub(crate) fn lower_all(&mut self, nodes: &[Node]) -> Vec<Expression> {
        nodes.iter().map(|n| self.lower_expression(n)).collect()
    }

    /// A comma-separated expression sequence: a single element stays bare,
    /// two or more become a tuple.
    pub(crate) fn lower_expression_sequence(&mut self, node: &Node) -> Expression {
        let elements = named_children(node);
        match elements.as_slice() {
            [single] => self.lower_expression(single),
            _ => Expression::Tuple(TupleLiteral {
                elements: self.lower_all(&elements),
                span: node_to_span(node),
            }),
        }
    }

    /// `(x,)` keeps its tuple shape only with two or more elements; the
    /// one-element display collapses to a parenthesized expression.
    fn lower_tuple(&mut self, node: &Node) -> Expression {
        let span = node_to_span(node);
        let elements = named_children(node);
        match elements.as_slice() {
            [single] => Expression::Paren(ParenthesizedExpression {
                expression: Box::new(self.lower_expression(single)),
                span,
            }),
            _ => Expression::Tuple(TupleLiteral {
                elements: self.lower_all(&elements),
                span,
            }),
        }
    }

    fn lower_dictionary(&mut self, node: &Node) -> Expression {
        let span = node_to_span(node);
        let mut entries = Vec::new();
        for child in named_children(node) {
            match child.kind() {
                "pair" => {
                    let key = child
                        .child_by_field_name("key")
                        .map(|k| self.lower_expression(&k));
                    let value = match child.child_by_field_name("value") {
                        Some(v) => self.lower_expression(&v),
                        None => self.placeholder(UNKNOWN_RIGHT, &child, "pair without value"),
                    };
                    entries.push(DictionaryEntry { key, value });
                }
                "dictionary_splat" => {
                    let value = match child.named_child(0) {
                        Some(inner) => self.lower_expression(&inner),
                        None => self.placeholder(UNKNOWN_RIGHT, &child, "splat without operand"),
                    };
                    entries.push(DictionaryEntry { key: None, value });
                }
                "comment" => {}
                _ => {
                    let value = self.lower_expression(&child);
                    entries.push(DictionaryEntry { key: None, value });
                }
            }
        }
        Expression::Dictionary(DictionaryLiteral { entries, span })
    }

    fn lower_comprehension(&mut self, node: &Node, kind: ComprehensionKind) -> Expression {
        let span = node_to_span(node);
        let mut element = None;
        let mut key = None;
        let mut value = None;

        match node.child_by_field_name("body") {
            Some(body) if body.kind() == "pair" => {
                key = body
                    .child_by_field_name("key")
                    .map(|k| Box::new(self.lower_expression(&k)));
                value = body
                    .child_by_field_name("value")
                    .map(|v| Box::new(self.lower_expression(&v)));
            }
            Some(body) => {
                element = Some(Box::new(self.lower_expression(&body)));
            }
            None => {
                self.warn("comprehension without body", span);
            }
        }

        // Each for_in_clause opens a clause; the if_clauses that follow
        // attach to the clause most recently opened.
        let mut clauses: Vec<ComprehensionClause> = Vec::new();
        for child in named_children(node) {
            match child.kind() {
                "for_in_clause" => {
                    let clause_span = node_to_span(&child);
                    let is_async = children(&child)
                        .iter()
                        .any(|c| !c.is_named() && self.text(c) == "async");
                    let targets = match child.child_by_field_name("left") {
                        Some(left) => self.lower_targets_flat(&left),
                        None => vec![self.placeholder(
                            UNKNOWN_LEFT,
                            &child,
                            "comprehension clause without target",
                        )],
                    };
                    let iterable = match child.child_by_field_name("right") {
                        Some(right) => self.lower_expression(&right),
                        None => self.placeholder(
                            UNKNOWN_RIGHT,
                            &child,
                            "comprehension clause without iterable",
                        ),
                    };
                    clauses.push(ComprehensionClause {
                        targets,
                        iterable,
                        filters: Vec::new(),
                        is_async,
                        span: clause_span,
                    });
                }
                "if_clause" => {
                    let filter = match child.named_child(0) {
                        Some(cond) => self.lower_expression(&cond),
                        None => self.placeholder(UNKNOWN_RIGHT, &child, "if clause without condition"),
                    };
                    if let Some(current) = clauses.last_mut() {
                        current.filters.push(filter);
                    } else {
                        self.warn("if clause before any for clause", node_to_span(&child));
                    }
                }
                _ => {}
            }
        }

        Expression::Comprehension(ComprehensionExpression {
            kind,
            element,
            key,
            value,
            clauses,
            span,
        })
    }

    /// Flatten a loop-target node into individual target expressions.
    pub(crate) fn lower_targets_flat(&mut self, node: &Node) -> Vec<Expression> {
        match node.kind() {
            "pattern_list" | "tuple_pattern" | "expression_list" => named_children(node)
                .iter()
                .map(|n| self.lower_expression(n))
                .collect(),
            _ => vec![self.lower_expression(node)],
        }
    }

    fn lower_call(&mut self, node: &Node) -> Expression {
        let span = node_to_span(node);
        let callee = match node.child_by_field_name("function") {
            Some(function) => self.lower_expression(&function),
            None => self.placeholder(UNKNOWN_LEFT, node, "call without callee"),
        };
        let arguments = match node.child_by_field_name("arguments") {
            Some(args) if args.kind() == "argument_list" => {
                self.lower_all(&named_children(&args))
            }
            // f(x for x in xs): the bare generator is the argument node.
            Some(args) => vec![self.lower_expression(&args)],
            None => Vec::new(),
        };
        Expression::Invocation(MethodInvocation {
            callee: Box::new(callee),
            arguments,
            span,
        })
    }

    fn lower_attribute(&mut self, node: &Node) -> Expression {
        let span = node_to_span(node);
        let base = match node.child_by_field_name("object") {
            Some(object) => self.lower_expression(&object),
            None => self.placeholder(UNKNOWN_LEFT, node, "attribute without base"),
        };
        let name = node
            .child_by_field_name("attribute")
            .map(|attr| self.text(&attr).to_string())
            .unwrap_or_default();
        Expression::FieldAccess(FieldAccess {
            base: Box::new(base),
            name,
            span,
        })
    }

    fn lower_subscript(&mut self, node: &Node) -> Expression {
        let span = node_to_span(node);
        let target = match node.child_by_field_name("value") {
            Some(value) => self.lower_expression(&value),
            None => self.placeholder(UNKNOWN_LEFT, node, "subscript without target"),
        };
        let mut subscripts = Vec::new();
        for (i, child) in children(node).iter().enumerate() {
            if node.field_name_for_child(i as u32) == Some("subscript") {
                subscripts.push(*child);
            }
        }
        let index = match subscripts.as_slice() {
            [] => self.placeholder(UNKNOWN_RIGHT, node, "subscript without index"),
            [single] => self.lower_expression(single),
            many => Expression::Tuple(TupleLiteral {
                elements: self.lower_all(many),
                span,
            }),
        };
        Expression::IndexAccess(IndexAccess {
            target: Box::new(target),
            index: Box::new(index),
            span,
        })
    }

    /// `lower : upper : step` with every part optional. Colon positions
    /// decide which slot each expression fills.
    fn lower_slice(&mut self, node: &Node) -> Expression {
        let span = node_to_span(node);
        let mut slots: [Option<Box<Expression>>; 3] = [None, None, None];
        let mut slot = 0usize;
        for child in children(node) {
            if !child.is_named() && self.text(&child) == ":" {
                slot += 1;
            } else if child.is_named() {
                if slot < 3 {
                    slots[slot] = Some(Box::new(self.lower_expression(&child)));
                }
            }
        }
        let [lower, upper, step] = slots;
        Expression::Slice(SliceExpression {
            lower,
            upper,
            step,
            span,
        })
    }

    fn lower_binary(&mut self, node: &Node) -> Expression {
        let span = node_to_span(node);
        let operator = node
            .child_by_field_name("operator")
            .map(|op| self.text(&op).to_string())
            .unwrap_or_default();
        let left = match node.child_by_field_name("left") {
            Some(left) => self.lower_expression(&left),
            None => self.placeholder(UNKNOWN_LEFT, node, "binary operator without left operand"),
        };
        let right = match node.child_by_field_name("right") {
            Some(right) => self.lower_expression(&right),
            None => self.placeholder(UNKNOWN_RIGHT, node, "binary operator without right operand"),
        };
        Expression::Infix(InfixExpression {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            span,
        })
    }

    /// Chained comparisons left-fold: `a < b < c` becomes
    /// `(a < b) < c`. Two-word operators arrive as separate tokens and are
    /// merged back.
    fn lower_comparison(&mut self, node: &Node) -> Expression {
        let span = node_to_span(node);
        let mut operands = Vec::new();
        let mut operators: Vec<String> = Vec::new();
        let mut last_was_operator = false;
        for child in children(node) {
            if child.is_named() {
                operands.push(child);
                last_was_operator = false;
            } else {
                let token = self.text(&child);
                if last_was_operator {
                    if let Some(previous) = operators.last_mut() {
                        previous.push(' ');
                        previous.push_str(token);
                    }
                } else {
                    operators.push(token.to_string());
                }
                last_was_operator = true;
            }
        }

        let Some(first) = operands.first() else {
            return self.placeholder(UNKNOWN_LEFT, node, "comparison without operands");
        };
        let mut expr = self.lower_expression(first);
        for (i, operator) in operators.iter().enumerate() {
            let right = match operands.get(i + 1) {
                Some(operand) => self.lower_expression(operand),
                None => self.placeholder(UNKNOWN_RIGHT, node, "comparison missing right operand"),
            };
            expr = Expression::Infix(InfixExpression {
                operator: operator.clone(),
                left: Box::new(expr),
                right: Box::new(right),
                span,
            });
        }
        expr
    }

    /// `then if cond else otherwise`. The grammar orders the named children
    /// value-first, so positions are used rather than field names.
    fn lower_conditional(&mut self, node: &Node) -> Expression {
        let span = node_to_span(node);
        let parts = named_children(node);
        let then_expr = match parts.first() {
            Some(n) => self.lower_expression(n),
            None => self.placeholder(UNKNOWN_LEFT, node, "conditional without value"),
        };
        let condition = match parts.get(1) {
            Some(n) => self.lower_expression(n),
            None => self.placeholder(UNKNOWN_LEFT, node, "conditional without condition"),
        };
        let else_expr = match parts.get(2) {
            Some(n) => self.lower_expression(n),
            None => self.placeholder(UNKNOWN_RIGHT, node, "conditional without else branch"),
        };
        Expression::Ternary(TernaryExpression {
            condition: Box::new(condition),
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
            span,
        })
    }

    fn lower_lambda(&mut self, node: &Node) -> Expression {
        let span = node_to_span(node);
        let parameters = match node.child_by_field_name("parameters") {
            Some(params) => self.lower_parameters(&params),
            None => Vec::new(),
        };
        let body = match node.child_by_field_name("body") {
            Some(body) => self.lower_expression(&body),
            None => self.placeholder(UNKNOWN_RIGHT, node, "lambda without body"),
        };
        Expression::Lambda(LambdaExpression {
            parameters,
            body: Box::new(body),
            span,
        })
    }

    fn lower_splat(&mut self, node: &Node, operator: &str) -> Expression {
        let span = node_to_span(node);
        let operand = match node.named_child(0) {
            Some(inner) => self.lower_expression(&inner),
            None => self.placeholder(UNKNOWN_RIGHT, node, "splat without operand"),
        };
        Expression::Prefix(PrefixExpression {
            operator: operator.to_string(),
            operand: Box::new(operand),
            span,
        })
    }

    fn lower_assignment_like(
        &mut self,
        node: &Node,
        left_field: &str,
        right_field: &str,
        operator: &str,
    ) -> Expression {
        let span = node_to_span(node);
        let left = match node.child_by_field_name(left_field) {
            Some(left) => self.lower_expression(&left),
            None => self.placeholder(UNKNOWN_LEFT, node, "assignment without target"),
        };
        let right = match node.child_by_field_name(right_field) {
            Some(right) => self.lower_expression(&right),
            None => self.placeholder(UNKNOWN_RIGHT, node, "assignment without value"),
        };
        Expression::Assignment(Assignment {
            operator: operator.to_string(),
            left: Box::new(left),
            right: Box::new(right),
            span,
        })
    }

    /// Plain `=` assignment, including the annotation-only form `x: int`
    /// whose missing value becomes a placeholder.
    pub(crate) fn lower_plain_assignment(&mut self, node: &Node) -> Expression {
        let span = node_to_span(node);
        let left = match node.child_by_field_name("left") {
            Some(left) => self.lower_expression(&left),
            None => self.placeholder(UNKNOWN_LEFT, node, "assignment without target"),
        };
        let right = match node.child_by_field_name("right") {
            Some(right) => self.lower_expression(&right),
            None => {
                self.note("annotation-only assignment has no value", span);
                Expression::name(UNKNOWN_RIGHT, span)
            }
        };
        Expression::Assignment(Assignment {
            operator: "=".to_string(),
            left: Box::new(left),
            right: Box::new(right),
            span,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tree_sitter::Parser;

    use super::*;
    use crate::shared::models::ast::Statement;

    fn lower_expr(code: &str) -> (Expression, Vec<crate::shared::models::Diagnostic>) {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::language())
            .unwrap();
        let tree = parser.parse(code, None).unwrap();
        let stmt = tree.root_node().named_child(0).unwrap();
        assert_eq!(stmt.kind(), "expression_statement");
        let expr_node = stmt.named_child(0).unwrap();
        let mut ctx = LoweringContext::new(code, "test.py");
        let expr = ctx.lower_expression(&expr_node);
        (expr, ctx.finish())
    }

    fn lower_clean(code: &str) -> Expression {
        let (expr, diagnostics) = lower_expr(code);
        assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
        expr
    }

    #[test]
    fn lowers_identifier_and_literals() {
        assert!(matches!(lower_clean("x"), Expression::Name(n) if n.id == "x"));
        assert_eq!(lower_clean("x").kind().as_str(), "simple_name");
        assert_eq!(lower_clean("x").span().start_line, 1);
        assert_eq!(lower_clean("42").kind().as_str(), "number_literal");
        match lower_clean("42") {
            Expression::Literal(l) => assert_eq!(l.value, LiteralValue::Number("42".to_string())),
            other => panic!("expected literal, got {other:?}"),
        }
        match lower_clean("'hello'") {
            Expression::Literal(l) => assert_eq!(l.value, LiteralValue::Str("hello".to_string())),
            other => panic!("expected literal, got {other:?}"),
        }
        assert!(matches!(
            lower_clean("None"),
            Expression::Literal(Literal {
                value: LiteralValue::Null,
                ..
            })
        ));
    }

    #[test]
    fn set_display_lowers_to_list_literal() {
        match lower_clean("{1, 2, 3}") {
            Expression::List(l) => assert_eq!(l.elements.len(), 3),
            other => panic!("expected list literal, got {other:?}"),
        }
    }

    #[test]
    fn single_element_tuple_collapses_to_paren() {
        assert!(matches!(lower_clean("(1,)"), Expression::Paren(_)));
        match lower_clean("(1, 2)") {
            Expression::Tuple(t) => assert_eq!(t.elements.len(), 2),
            other => panic!("expected tuple, got {other:?}"),
        }
    }

    #[test]
    fn keyword_arguments_lower_to_assignments() {
        match lower_clean("f(1, key=2)") {
            Expression::Invocation(call) => {
                assert_eq!(call.arguments.len(), 2);
                match &call.arguments[1] {
                    Expression::Assignment(a) => assert_eq!(a.operator, "="),
                    other => panic!("expected assignment argument, got {other:?}"),
                }
            }
            other => panic!("expected invocation, got {other:?}"),
        }
    }

    #[test]
    fn chained_comparison_folds_left() {
        match lower_clean("a < b < c") {
            Expression::Infix(outer) => {
                assert_eq!(outer.operator, "<");
                match outer.left.as_ref() {
                    Expression::Infix(inner) => assert_eq!(inner.operator, "<"),
                    other => panic!("expected nested infix, got {other:?}"),
                }
            }
            other => panic!("expected infix, got {other:?}"),
        }
    }

    #[test]
    fn two_word_comparison_operators_merge() {
        match lower_clean("a not in b") {
            Expression::Infix(infix) => assert_eq!(infix.operator, "not in"),
            other => panic!("expected infix, got {other:?}"),
        }
        match lower_clean("a is not b") {
            Expression::Infix(infix) => assert_eq!(infix.operator, "is not"),
            other => panic!("expected infix, got {other:?}"),
        }
    }

    #[test]
    fn conditional_orders_by_position_not_field() {
        match lower_clean("1 if ok else 2") {
            Expression::Ternary(t) => {
                assert!(matches!(t.condition.as_ref(), Expression::Name(n) if n.id == "ok"));
                assert!(matches!(
                    t.then_expr.as_ref(),
                    Expression::Literal(Literal {
                        value: LiteralValue::Number(_),
                        ..
                    })
                ));
            }
            other => panic!("expected ternary, got {other:?}"),
        }
    }

    #[test]
    fn slice_fills_slots_by_colon_position() {
        match lower_clean("a[1:2:3]") {
            Expression::IndexAccess(idx) => match idx.index.as_ref() {
                Expression::Slice(s) => {
                    assert!(s.lower.is_some());
                    assert!(s.upper.is_some());
                    assert!(s.step.is_some());
                }
                other => panic!("expected slice, got {other:?}"),
            },
            other => panic!("expected index access, got {other:?}"),
        }
        match lower_clean("a[::2]") {
            Expression::IndexAccess(idx) => match idx.index.as_ref() {
                Expression::Slice(s) => {
                    assert!(s.lower.is_none());
                    assert!(s.upper.is_none());
                    assert!(s.step.is_some());
                }
                other => panic!("expected slice, got {other:?}"),
            },
            other => panic!("expected index access, got {other:?}"),
        }
    }

    #[test]
    fn dict_comprehension_uses_key_value_slots() {
        match lower_clean("{k: v for k, v in items if v}") {
            Expression::Comprehension(c) => {
                assert_eq!(c.kind, ComprehensionKind::Dict);
                assert!(c.element.is_none());
                assert!(c.key.is_some());
                assert!(c.value.is_some());
                assert_eq!(c.clauses.len(), 1);
                assert_eq!(c.clauses[0].targets.len(), 2);
                assert_eq!(c.clauses[0].filters.len(), 1);
            }
            other => panic!("expected comprehension, got {other:?}"),
        }
    }

    #[test]
    fn generator_expression_lowers_with_generator_kind() {
        match lower_clean("(x * 2 for x in xs)") {
            Expression::Comprehension(c) => {
                assert_eq!(c.kind, ComprehensionKind::Generator);
                assert!(c.element.is_some());
            }
            other => panic!("expected comprehension, got {other:?}"),
        }
    }

    #[test]
    fn walrus_lowers_to_assignment_expression() {
        match lower_clean("(n := 10)") {
            Expression::Paren(p) => match p.expression.as_ref() {
                Expression::Assignment(a) => assert_eq!(a.operator, ":="),
                other => panic!("expected assignment, got {other:?}"),
            },
            other => panic!("expected paren, got {other:?}"),
        }
    }

    #[test]
    fn splat_argument_lowers_to_prefix() {
        let code = "print(*xs)";
        let (expr, diagnostics) = lower_expr(code);
        match expr {
            Expression::Invocation(call) => match &call.arguments[0] {
                Expression::Prefix(p) => assert_eq!(p.operator, "*"),
                other => panic!("expected prefix splat, got {other:?}"),
            },
            other => panic!("expected invocation, got {other:?}"),
        }
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn assignment_chain_nests_to_the_right() {
        match lower_clean("a = b = 5") {
            Expression::Assignment(outer) => {
                assert_eq!(outer.operator, "=");
                assert!(matches!(outer.left.as_ref(), Expression::Name(n) if n.id == "a"));
                match outer.right.as_ref() {
                    Expression::Assignment(inner) => {
                        assert!(matches!(inner.left.as_ref(), Expression::Name(n) if n.id == "b"));
                        assert!(matches!(
                            inner.right.as_ref(),
                            Expression::Literal(Literal {
                                value: LiteralValue::Number(_),
                                ..
                            })
                        ));
                    }
                    other => panic!("expected nested assignment, got {other:?}"),
                }
            }
            other => panic!("expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn assignment_statement_wraps_assignment_expression() {
        let code = "x = 1";
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::language())
            .unwrap();
        let tree = parser.parse(code, None).unwrap();
        let stmt = tree.root_node().named_child(0).unwrap();
        let mut ctx = LoweringContext::new(code, "test.py");
        let stmt = ctx.lower_statement(&stmt).unwrap().unwrap();
        match stmt {
            Statement::Expression(es) => {
                assert!(matches!(es.expression, Expression::Assignment(_)));
            }
            other => panic!("expected expression statement, got {other:?}"),
        }
    }
}
