//! Reading literal values out of syntax nodes

use tree_sitter::Node;

/// Source text of a node
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    &source[node.byte_range()]
}

/// Value of a string literal node, with simple escapes decoded
///
/// Returns `None` for anything that is not a plain `string` node.
pub fn string_value(node: &Node, source: &str) -> Option<String> {
    if node.kind() != "string" {
        return None;
    }
    let text = node_text(node, source);
    if text.len() < 2 {
        return None;
    }
    let inner = &text[1..text.len() - 1];

    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => value.push('\n'),
            Some('t') => value.push('\t'),
            Some('r') => value.push('\r'),
            Some('0') => value.push('\0'),
            // Line continuation
            Some('\n') => {}
            Some(other) => value.push(other),
            None => {}
        }
    }
    Some(value)
}

/// Quote character a string literal node was written with
pub fn quote_char(node: &Node, source: &str) -> Option<char> {
    if node.kind() != "string" {
        return None;
    }
    node_text(node, source).chars().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree_sitter::{descendants, JsParser};

    fn first_string(code: &str) -> (Option<String>, Option<char>) {
        let mut parser = JsParser::new().unwrap();
        let tree = parser.parse(code).unwrap();
        let node = descendants(tree.root_node())
            .find(|n| n.kind() == "string")
            .unwrap();
        (string_value(&node, code), quote_char(&node, code))
    }

    #[test]
    fn test_single_and_double_quotes() {
        assert_eq!(first_string("x('jshint');"), (Some("jshint".into()), Some('\'')));
        assert_eq!(first_string("x(\"jscs\");"), (Some("jscs".into()), Some('"')));
    }

    #[test]
    fn test_escapes() {
        let (value, _) = first_string(r"x('it\'s\n');");
        assert_eq!(value.as_deref(), Some("it's\n"));
    }

    #[test]
    fn test_empty_string() {
        let (value, _) = first_string("x('');");
        assert_eq!(value.as_deref(), Some(""));
    }

    #[test]
    fn test_non_string_node() {
        let mut parser = JsParser::new().unwrap();
        let code = "x(1);";
        let tree = parser.parse(code).unwrap();
        let number = descendants(tree.root_node())
            .find(|n| n.kind() == "number")
            .unwrap();
        assert_eq!(string_value(&number, code), None);
        assert_eq!(node_text(&number, code), "1");
    }
}
