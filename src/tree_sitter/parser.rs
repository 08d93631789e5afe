//! Tree-sitter parser management
//!
//! Wraps the JavaScript grammar and turns tree-sitter's error recovery into
//! hard failures: a gruntfile that does not parse cleanly is never edited.

use tree_sitter::{Node, Parser, Tree};

use super::position::Position;
use super::walk::descendants;

/// Error type for tree-sitter operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("failed to initialize language: {0}")]
    LanguageInit(String),

    #[error("failed to parse code")]
    ParseFailed,

    #[error("syntax error at {line}:{column}: {message}")]
    SyntaxError {
        line: usize,
        column: usize,
        message: String,
    },
}

impl ParseError {
    /// Build a syntax error pointing at `node`
    fn at_node(node: &Node, source: &str) -> Self {
        let position = Position::from_point(node.start_position());
        let message = if node.is_missing() {
            format!("missing `{}`", node.kind())
        } else {
            let text = node.utf8_text(source.as_bytes()).unwrap_or("");
            let snippet: String = text.chars().take(24).collect();
            format!("unexpected `{}`", snippet)
        };
        ParseError::SyntaxError {
            // Reported 1-based, the way editors show it
            line: position.line as usize + 1,
            column: position.character as usize + 1,
            message,
        }
    }
}

/// JavaScript parser
///
/// One instance per session; tree-sitter parsers are not shareable across
/// threads while parsing.
pub struct JsParser {
    parser: Parser,
}

impl JsParser {
    /// Create a parser with the JavaScript grammar loaded
    pub fn new() -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .map_err(|e| ParseError::LanguageInit(e.to_string()))?;

        Ok(Self { parser })
    }

    /// Parse source code into a syntax tree
    ///
    /// Fails on the first ERROR or MISSING node instead of returning a
    /// partially recovered tree.
    pub fn parse(&mut self, code: &str) -> Result<Tree, ParseError> {
        let tree = self
            .parser
            .parse(code, None)
            .ok_or(ParseError::ParseFailed)?;

        let root = tree.root_node();
        if root.has_error() {
            let culprit = descendants(root)
                .find(|n| n.is_error() || n.is_missing())
                .unwrap_or(root);
            return Err(ParseError::at_node(&culprit, code));
        }
        if let Some(comma) = descendants(root).find_map(elided_comma) {
            return Err(ParseError::at_node(&comma, code));
        }

        tracing::debug!("Parsed {} bytes", code.len());
        Ok(tree)
    }
}

/// A `,` that opens a list or follows another `,`, comments skipped
///
/// The grammar lets object literals and argument lists elide entries the
/// way array literals may, and recovers without an ERROR node.
fn elided_comma(node: Node<'_>) -> Option<Node<'_>> {
    if !matches!(node.kind(), "object" | "arguments") {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node
        .children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect();
    children
        .windows(2)
        .find(|pair| pair[1].kind() == "," && matches!(pair[0].kind(), "{" | "(" | ","))
        .map(|pair| pair[1])
}
