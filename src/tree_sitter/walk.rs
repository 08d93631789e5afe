//! Lazy tree traversal
//!
//! Lookups over the syntax tree are expressed as iterator pipelines over a
//! pre-order walk, so early exit is just `find`/`take` on the sequence.

use tree_sitter::{Node, TreeCursor};

/// Pre-order iterator over a node and all of its descendants
pub struct Descendants<'tree> {
    cursor: TreeCursor<'tree>,
    done: bool,
}

impl<'tree> Iterator for Descendants<'tree> {
    type Item = Node<'tree>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let node = self.cursor.node();
        if self.cursor.goto_first_child() {
            return Some(node);
        }

        loop {
            if self.cursor.goto_next_sibling() {
                return Some(node);
            }
            // The cursor is rooted at the starting node, so this stops there
            if !self.cursor.goto_parent() {
                self.done = true;
                return Some(node);
            }
        }
    }
}

/// Walk `root` and everything below it in source order
///
/// Each call starts a fresh walk.
pub fn descendants(root: Node<'_>) -> Descendants<'_> {
    Descendants {
        cursor: root.walk(),
        done: false,
    }
}

/// Named children of `node`, skipping comments
pub fn significant_children<'tree>(node: Node<'tree>) -> Vec<Node<'tree>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

/// Closest ancestor (or the node itself) of the given kind
pub fn ancestor_of_kind<'tree>(node: Node<'tree>, kind: &str) -> Option<Node<'tree>> {
    let mut current = Some(node);
    while let Some(n) = current {
        if n.kind() == kind {
            return Some(n);
        }
        current = n.parent();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree_sitter::JsParser;

    #[test]
    fn test_descendants_preorder() {
        let mut parser = JsParser::new().unwrap();
        let tree = parser.parse("a(b);").unwrap();

        let kinds: Vec<&str> = descendants(tree.root_node())
            .filter(|n| n.is_named())
            .map(|n| n.kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                "program",
                "expression_statement",
                "call_expression",
                "identifier",
                "arguments",
                "identifier"
            ]
        );
    }

    #[test]
    fn test_descendants_stay_inside_root() {
        let mut parser = JsParser::new().unwrap();
        let tree = parser.parse("f(x); g(y);").unwrap();
        let first = tree.root_node().named_child(0).unwrap();

        let identifiers: Vec<Node> = descendants(first)
            .filter(|n| n.kind() == "identifier")
            .collect();
        assert_eq!(identifiers.len(), 2);
        assert!(identifiers.iter().all(|n| n.end_byte() <= first.end_byte()));
    }

    #[test]
    fn test_significant_children_skip_comments() {
        let mut parser = JsParser::new().unwrap();
        let tree = parser.parse("x = [/* a */ 1, // b\n 2];").unwrap();
        let array = descendants(tree.root_node())
            .find(|n| n.kind() == "array")
            .unwrap();

        assert_eq!(significant_children(array).len(), 2);
    }

    #[test]
    fn test_ancestor_of_kind() {
        let mut parser = JsParser::new().unwrap();
        let tree = parser.parse("foo.bar(1);").unwrap();
        let number = descendants(tree.root_node())
            .find(|n| n.kind() == "number")
            .unwrap();

        let statement = ancestor_of_kind(number, "expression_statement").unwrap();
        assert_eq!(statement.start_byte(), 0);
        assert!(ancestor_of_kind(number, "class_declaration").is_none());
    }
}
