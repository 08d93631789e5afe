//! Tree-sitter integration
//!
//! Parsing of gruntfiles into syntax trees, lazy traversal helpers and
//! source locations. Everything above this module works on `tree_sitter`
//! nodes and byte offsets, never on its own AST copy.

mod literal;
mod parser;
mod position;
mod walk;

pub use literal::{node_text, quote_char, string_value};
pub use parser::{JsParser, ParseError};
pub use position::{Position, Range};
pub use walk::{ancestor_of_kind, descendants, significant_children, Descendants};
