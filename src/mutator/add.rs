//! Adding a task to the config object

use serde_json::Value;

use crate::document::Document;
use crate::error::{GruntfileError, Result};
use crate::indent::{indent_depth, reindent, with_line_ending};
use crate::render::{property_key, render, QuoteStyle, RenderOptions};
use crate::tokens::{TokenKind, TokenStream};
use crate::tree_sitter::{significant_children, JsParser};

/// Configuration for a new task
#[derive(Debug, Clone, PartialEq)]
pub enum TaskConfig {
    /// JavaScript source of the value, inserted as written
    Source(String),
    /// Value rendered with the file's indentation and single quotes
    Value(Value),
}

impl Default for TaskConfig {
    fn default() -> Self {
        TaskConfig::Value(Value::Object(serde_json::Map::new()))
    }
}

impl From<Value> for TaskConfig {
    fn from(value: Value) -> Self {
        TaskConfig::Value(value)
    }
}

impl From<&str> for TaskConfig {
    fn from(source: &str) -> Self {
        TaskConfig::Source(source.to_string())
    }
}

impl From<String> for TaskConfig {
    fn from(source: String) -> Self {
        TaskConfig::Source(source)
    }
}

/// Append `name: config` after the last property of the config object
///
/// Returns `None` when the name is empty or already taken. The new property
/// goes after the last one, separated by a comma and a blank line; nothing
/// else in the stream changes. An empty object gets the property on its own
/// line with no leading comma. Line breaks follow the document's own.
pub fn add_task(
    doc: &Document,
    parser: &mut JsParser,
    name: &str,
    config: &TaskConfig,
    indent: &str,
) -> Result<Option<TokenStream>> {
    if name.is_empty() || doc.tasks().contains(name) {
        tracing::debug!("Task '{}' already exists, nothing to add", name);
        return Ok(None);
    }

    let rendered = match config {
        TaskConfig::Source(text) => text.trim().to_string(),
        TaskConfig::Value(value) => render(
            value,
            &RenderOptions {
                indent: indent.to_string(),
                quote: QuoteStyle::Single,
            },
        ),
    };
    let key = property_key(name, QuoteStyle::Single);
    let tokens = doc.tokens();
    let nl = tokens.line_ending();
    let rendered = with_line_ending(&rendered, nl);
    let mut edited = tokens.clone();

    match doc.tasks().last() {
        Some(last) => {
            let level = indent_depth(&tokens.line_indent(last.end_token), indent);
            let block_indent = indent.repeat(level);
            let value = property_value_tokens(parser, &key, &reindent(&rendered, &block_indent))?;

            let separator = format!(",{nl}{nl}{}{}: ", block_indent, key);
            let at = edited.insert_after(last.end_token, TokenKind::Synthetic, &separator);
            edited.splice_after(at, value.iter().map(|(kind, text)| (*kind, text.as_str())));
        }
        None => {
            let config = doc.config();
            let outer_indent = tokens.line_indent(config.open_token);
            let block_indent = indent.repeat(indent_depth(&outer_indent, indent) + 1);
            let value = property_value_tokens(parser, &key, &reindent(&rendered, &block_indent))?;

            // Insert after the last comment inside the braces, dropping blank
            // filler so the closing brace lands on its own line
            let mut anchor = config.open_token;
            let mut blanks = None;
            let mut cursor = tokens.next(config.open_token);
            while let Some(id) = cursor.filter(|id| *id != config.close_token) {
                if tokens.get(id).is_blank() {
                    blanks.get_or_insert((id, id)).1 = id;
                } else {
                    anchor = id;
                    blanks = None;
                }
                cursor = tokens.next(id);
            }
            if let Some((first, last)) = blanks {
                edited.remove_range(first, last);
            }

            let at = edited.insert_after(
                anchor,
                TokenKind::Synthetic,
                &format!("{nl}{}{}: ", block_indent, key),
            );
            let at = edited.splice_after(at, value.iter().map(|(kind, text)| (*kind, text.as_str())));
            edited.insert_after(at, TokenKind::Synthetic, &format!("{nl}{}", outer_indent));
        }
    }

    tracing::debug!("Prepared insertion of task '{}'", name);
    Ok(Some(edited))
}

/// Tokens of the value in a standalone `({ key: value })` expression
///
/// Parsing the property on its own checks that `value` is one well-formed
/// expression before anything is spliced into the document.
fn property_value_tokens(
    parser: &mut JsParser,
    key: &str,
    value: &str,
) -> Result<Vec<(TokenKind, String)>> {
    let expression = format!("({{{}: {}}})", key, value);
    let tree = parser
        .parse(&expression)
        .map_err(|e| GruntfileError::InvalidTaskConfig(e.to_string()))?;

    let root = tree.root_node();
    let object = significant_children(root)
        .first()
        .filter(|statement| statement.kind() == "expression_statement")
        .and_then(|statement| statement.named_child(0))
        .filter(|paren| paren.kind() == "parenthesized_expression")
        .and_then(|paren| paren.named_child(0))
        .filter(|object| object.kind() == "object")
        .filter(|_| significant_children(root).len() == 1)
        .ok_or_else(|| GruntfileError::InvalidTaskConfig(value.to_string()))?;

    let properties = significant_children(object);
    let property = match properties.as_slice() {
        [property] if property.kind() == "pair" => *property,
        _ => {
            return Err(GruntfileError::InvalidTaskConfig(format!(
                "`{}` is not a single value",
                value
            )))
        }
    };
    let value_node = property
        .child_by_field_name("value")
        .ok_or_else(|| GruntfileError::InvalidTaskConfig(value.to_string()))?;

    let tokens = TokenStream::from_tree(&expression, &tree);
    let (first, last) = tokens
        .node_bounds(&value_node)
        .ok_or(GruntfileError::TokenNotFound {
            offset: value_node.start_byte(),
        })?;

    Ok(tokens
        .range(first, last)
        .map(|token| (token.kind, token.text.clone()))
        .collect())
}
