//! Source locations for nodes of a parsed gruntfile

use serde::{Deserialize, Serialize};
use tree_sitter::{Node, Point};

/// Position in source code (0-based line, byte column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }

    pub fn from_point(point: Point) -> Self {
        Self::new(point.row as u32, point.column as u32)
    }
}

/// Range in source code, with both line/column and byte offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
    pub start_byte: usize,
    pub end_byte: usize,
}

impl Range {
    pub fn from_node(node: &Node) -> Self {
        Self {
            start: Position::from_point(node.start_position()),
            end: Position::from_point(node.end_position()),
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
        }
    }

    /// Byte length of the range
    pub fn len(&self) -> usize {
        self.end_byte - self.start_byte
    }

    pub fn is_empty(&self) -> bool {
        self.start_byte == self.end_byte
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree_sitter::JsParser;

    #[test]
    fn test_range_from_node() {
        let mut parser = JsParser::new().unwrap();
        let code = "var a = 1;\nvar config = {};\n";
        let tree = parser.parse(code).unwrap();
        let second = tree.root_node().named_child(1).unwrap();

        let range = Range::from_node(&second);
        assert_eq!(range.start, Position::new(1, 0));
        assert_eq!(range.start_byte, 11);
        assert_eq!(range.len(), "var config = {};".len());
        assert!(!range.is_empty());
    }
}
