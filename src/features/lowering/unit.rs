//! Module-level lowering: classification into the compilation unit's
//! buckets, and import statements in both plain and `from` form.

use tree_sitter::Node;

use crate::features::lowering::context::LoweringContext;
use crate::shared::models::ast::{
    CompilationUnit, Expression, ExpressionStatement, ImportItem, ImportStatement, Statement,
};
use crate::shared::models::{Result, Span};
use crate::shared::utils::tree_sitter::{named_children, node_to_span};

impl<'a> LoweringContext<'a> {
    /// Lower a parsed module into a compilation unit. Top-level classes,
    /// functions, imports, assignments, and comments land in their own
    /// buckets; everything else is kept in order under `statements`.
    pub(crate) fn lower_module(&mut self, root: &Node) -> Result<CompilationUnit> {
        let mut unit = CompilationUnit::new(self.file_path, node_to_span(root));
        for child in named_children(root) {
            // Bare string expressions are comments wherever they appear.
            if let Some(doc) = self.promote_docstring(&child) {
                unit.comments.push(doc);
                continue;
            }
            match self.lower_statement(&child)? {
                Some(Statement::Type(declaration)) => unit.types.push(declaration),
                Some(Statement::Method(method)) => unit.methods.push(method),
                Some(Statement::Import(import)) => unit.imports.push(import),
                Some(Statement::Comment(comment)) => unit.comments.push(comment),
                Some(Statement::Expression(stmt)) => match stmt.expression {
                    Expression::Assignment(assignment) => unit.assignments.push(assignment),
                    expression => unit.statements.push(Statement::Expression(
                        ExpressionStatement {
                            expression,
                            span: stmt.span,
                        },
                    )),
                },
                Some(statement) => unit.statements.push(statement),
                None => {}
            }
        }
        Ok(unit)
    }

    pub(crate) fn lower_import(&mut self, node: &Node) -> ImportStatement {
        let span = node_to_span(node);
        match node.kind() {
            "import_from_statement" => self.lower_from_import(node, span),
            "future_import_statement" => ImportStatement {
                items: self.lower_import_items(&named_children(node)),
                from_module: Some("__future__".to_string()),
                relative_level: 0,
                is_from: true,
                is_star: false,
                span,
            },
            _ => ImportStatement::plain(self.lower_import_items(&named_children(node)), span),
        }
    }

    fn lower_from_import(&mut self, node: &Node, span: Span) -> ImportStatement {
        let mut from_module = None;
        let mut relative_level = 0u32;
        if let Some(module_name) = node.child_by_field_name("module_name") {
            match module_name.kind() {
                "relative_import" => {
                    // The prefix is dots; `...` may tokenize as an ellipsis,
                    // so dots are counted as characters.
                    for part in named_children(&module_name) {
                        match part.kind() {
                            "import_prefix" => {
                                relative_level +=
                                    self.text(&part).chars().filter(|c| *c == '.').count() as u32;
                            }
                            "dotted_name" => {
                                from_module = Some(self.text(&part).to_string());
                            }
                            _ => {}
                        }
                    }
                    if relative_level == 0 {
                        let prefix_dots =
                            self.text(&module_name).chars().take_while(|c| *c == '.').count();
                        relative_level = prefix_dots as u32;
                    }
                }
                _ => {
                    from_module = Some(self.text(&module_name).to_string());
                }
            }
        }

        let mut is_star = false;
        let mut name_nodes = Vec::new();
        for child in named_children(node) {
            if child.kind() == "wildcard_import" {
                is_star = true;
            }
            if node
                .child_by_field_name("module_name")
                .map(|m| m.id() == child.id())
                .unwrap_or(false)
            {
                continue;
            }
            if matches!(child.kind(), "dotted_name" | "aliased_import" | "identifier") {
                name_nodes.push(child);
            }
        }
        let items = if is_star {
            Vec::new()
        } else {
            self.lower_import_items(&name_nodes)
        };

        ImportStatement {
            items,
            from_module,
            relative_level,
            is_from: true,
            is_star,
            span,
        }
    }

    fn lower_import_items(&mut self, nodes: &[Node]) -> Vec<ImportItem> {
        let mut items = Vec::new();
        for node in nodes {
            let span = node_to_span(node);
            match node.kind() {
                "dotted_name" | "identifier" => items.push(ImportItem {
                    name: self.text(node).to_string(),
                    alias: None,
                    span,
                }),
                "aliased_import" => {
                    let name = node
                        .child_by_field_name("name")
                        .map(|n| self.text(&n).to_string())
                        .unwrap_or_default();
                    let alias = node
                        .child_by_field_name("alias")
                        .map(|a| self.text(&a).to_string());
                    items.push(ImportItem { name, alias, span });
                }
                _ => {}
            }
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tree_sitter::Parser;

    use super::*;

    fn lower_module(code: &str) -> CompilationUnit {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::language())
            .unwrap();
        let tree = parser.parse(code, None).unwrap();
        let mut ctx = LoweringContext::new(code, "test.py");
        ctx.lower_module(&tree.root_node()).unwrap()
    }

    #[test]
    fn top_level_constructs_land_in_their_buckets() {
        let code = concat!(
            "\"\"\"Module doc.\"\"\"\n",
            "import os\n",
            "VERSION = '1.0'\n",
            "class A:\n    pass\n",
            "def main():\n    pass\n",
            "main()\n",
        );
        let unit = lower_module(code);
        assert_eq!(unit.comments.len(), 1);
        assert!(unit.comments[0].is_doc);
        assert_eq!(unit.imports.len(), 1);
        assert_eq!(unit.assignments.len(), 1);
        assert_eq!(unit.types.len(), 1);
        assert_eq!(unit.methods.len(), 1);
        assert_eq!(unit.statements.len(), 1);
    }

    #[test]
    fn bare_strings_are_promoted_at_any_position() {
        let unit = lower_module("x = 1\n\"\"\"Later notes.\"\"\"\ny = 2\n");
        assert_eq!(unit.comments.len(), 1);
        assert_eq!(unit.comments[0].text, "Later notes.");
        assert!(unit.comments[0].is_doc);
        assert_eq!(unit.assignments.len(), 2);
        assert!(unit.statements.is_empty());
    }

    #[test]
    fn plain_import_keeps_one_item_per_module() {
        let unit = lower_module("import os, sys as system\n");
        let import = &unit.imports[0];
        assert!(!import.is_from);
        assert_eq!(import.items.len(), 2);
        assert_eq!(import.items[0].name, "os");
        assert_eq!(import.items[1].name, "sys");
        assert_eq!(import.items[1].alias.as_deref(), Some("system"));
    }

    #[test]
    fn from_import_records_module_and_names() {
        let unit = lower_module("from collections import OrderedDict, defaultdict as dd\n");
        let import = &unit.imports[0];
        assert!(import.is_from);
        assert_eq!(import.from_module.as_deref(), Some("collections"));
        assert_eq!(import.relative_level, 0);
        assert_eq!(import.items.len(), 2);
        assert_eq!(import.items[1].alias.as_deref(), Some("dd"));
    }

    #[test]
    fn relative_import_counts_leading_dots() {
        let unit = lower_module("from ..pkg import thing\n");
        let import = &unit.imports[0];
        assert_eq!(import.relative_level, 2);
        assert_eq!(import.from_module.as_deref(), Some("pkg"));

        let unit = lower_module("from . import sibling\n");
        let import = &unit.imports[0];
        assert_eq!(import.relative_level, 1);
        assert!(import.from_module.is_none());

        let unit = lower_module("from ...deep import thing\n");
        assert_eq!(unit.imports[0].relative_level, 3);
    }

    #[test]
    fn star_import_has_no_items() {
        let unit = lower_module("from os.path import *\n");
        let import = &unit.imports[0];
        assert!(import.is_star);
        assert!(import.items.is_empty());
        assert_eq!(import.from_module.as_deref(), Some("os.path"));
    }

    #[test]
    fn future_import_uses_the_future_module() {
        let unit = lower_module("from __future__ import annotations\n");
        let import = &unit.imports[0];
        assert!(import.is_from);
        assert_eq!(import.from_module.as_deref(), Some("__future__"));
        assert_eq!(import.items[0].name, "annotations");
    }
}
