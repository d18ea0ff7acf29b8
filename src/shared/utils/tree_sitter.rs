//! Tree-sitter node helpers shared by the lowering passes.
//!
//! The concrete syntax tree is an external contract: lowering only reads
//! node kinds, field names, and byte ranges. These helpers centralize that
//! access so the passes stay free of cursor bookkeeping.

use tree_sitter::Node;

use crate::shared::models::Span;

/// Find the first direct child with the given kind.
#[inline]
pub fn find_child_by_kind<'tree>(node: &Node<'tree>, kind: &str) -> Option<Node<'tree>> {
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            if child.kind() == kind {
                return Some(child);
            }
        }
    }
    None
}

/// Find all direct children with the given kind.
#[inline]
pub fn find_children_by_kind<'tree>(node: &Node<'tree>, kind: &str) -> Vec<Node<'tree>> {
    let mut result = Vec::new();
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            if child.kind() == kind {
                result.push(child);
            }
        }
    }
    result
}

/// All direct children, anonymous tokens included. Positional scans (slice
/// colons, try clause order) need the full token stream. The returned
/// nodes borrow from the tree, not from `node`, so they outlive descent
/// loops.
#[inline]
pub fn children<'tree>(node: &Node<'tree>) -> Vec<Node<'tree>> {
    (0..node.child_count()).filter_map(|i| node.child(i)).collect()
}

/// All named direct children.
#[inline]
pub fn named_children<'tree>(node: &Node<'tree>) -> Vec<Node<'tree>> {
    (0..node.named_child_count())
        .filter_map(|i| node.named_child(i))
        .collect()
}

/// Source text covered by a node.
#[inline]
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// Convert a tree-sitter node position to a Span (1-indexed lines).
#[inline]
pub fn node_to_span(node: &Node) -> Span {
    let start_pos = node.start_position();
    let end_pos = node.end_position();

    Span::new(
        start_pos.row as u32 + 1,
        start_pos.column as u32,
        end_pos.row as u32 + 1,
        end_pos.column as u32,
    )
}

/// Strip string prefixes (`r`, `b`, `f`, `u` in any case) and the
/// surrounding quote pair, triple or single. Inner escapes are kept as
/// written.
pub fn strip_string_quotes(raw: &str) -> &str {
    let body = raw.trim_start_matches(|c: char| matches!(c, 'r' | 'R' | 'b' | 'B' | 'f' | 'F' | 'u' | 'U'));
    for quote in ["\"\"\"", "'''", "\"", "'"] {
        if body.starts_with(quote) {
            return body
                .strip_prefix(quote)
                .and_then(|s| s.strip_suffix(quote))
                .unwrap_or(body);
        }
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::Parser;

    fn parse_python(code: &str) -> tree_sitter::Tree {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::language())
            .unwrap();
        parser.parse(code, None).unwrap()
    }

    #[test]
    fn test_find_child_by_kind() {
        let code = "def foo(): pass";
        let tree = parse_python(code);
        let func = tree.root_node().child(0).unwrap();

        let id = find_child_by_kind(&func, "identifier");
        assert!(id.is_some());
        assert_eq!(node_text(&id.unwrap(), code), "foo");
    }

    #[test]
    fn test_find_children_by_kind() {
        let code = "def foo(a, b, c): pass";
        let tree = parse_python(code);
        let func = tree.root_node().child(0).unwrap();
        let params = find_child_by_kind(&func, "parameters").unwrap();

        let identifiers = find_children_by_kind(&params, "identifier");
        assert_eq!(identifiers.len(), 3);
    }

    #[test]
    fn test_node_to_span() {
        let code = "def foo():\n    pass";
        let tree = parse_python(code);
        let func = tree.root_node().child(0).unwrap();

        let span = node_to_span(&func);
        assert_eq!(span.start_line, 1);
        assert_eq!(span.start_col, 0);
        assert_eq!(span.end_line, 2);
    }

    #[test]
    fn test_strip_string_quotes() {
        assert_eq!(strip_string_quotes("\"hello\""), "hello");
        assert_eq!(strip_string_quotes("'hello'"), "hello");
        assert_eq!(strip_string_quotes("\"\"\"doc\"\"\""), "doc");
        assert_eq!(strip_string_quotes("r'raw\\n'"), "raw\\n");
        assert_eq!(strip_string_quotes("f\"x={x}\""), "x={x}");
    }

    #[test]
    fn test_children_outlive_worklist_descent() {
        let code = "def f():\n    if x:\n        return 1\n";
        let tree = parse_python(code);
        let mut stack = vec![tree.root_node()];
        let mut found = false;
        while let Some(current) = stack.pop() {
            if current.kind() == "return_statement" {
                found = true;
            }
            for child in children(&current) {
                stack.push(child);
            }
        }
        assert!(found);
    }

    #[test]
    fn test_named_children_skips_tokens() {
        let code = "x = [1, 2, 3]";
        let tree = parse_python(code);
        let assignment = tree.root_node().child(0).unwrap().child(0).unwrap();
        let list = assignment.child_by_field_name("right").unwrap();

        assert_eq!(named_children(&list).len(), 3);
        assert!(children(&list).len() > 3);
    }
}
