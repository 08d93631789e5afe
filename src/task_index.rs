//! Task index
//!
//! Maps each task name to the property that configures it. The index is
//! derived from one parse of the document and thrown away after every edit.

use indexmap::IndexMap;
use serde::Serialize;
use tree_sitter::Node;

use crate::error::{GruntfileError, Result};
use crate::tokens::{TokenId, TokenStream};
use crate::tree_sitter::{node_text, significant_children, string_value, Range};

/// A top-level property of the config object
#[derive(Debug, Clone, Serialize)]
pub struct TaskEntry {
    /// Task name, quotes stripped
    pub name: String,
    /// Location of the whole property (`name: value`)
    pub range: Range,
    /// First token of the property
    #[serde(skip)]
    pub start_token: TokenId,
    /// Last token of the property
    #[serde(skip)]
    pub end_token: TokenId,
    /// Reserved for task targets, currently never filled
    pub subtasks: Vec<String>,
}

/// Tasks of one config object, in source order
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct TaskIndex {
    entries: IndexMap<String, TaskEntry>,
}

impl TaskIndex {
    pub fn get(&self, name: &str) -> Option<&TaskEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Property that appears last in the source
    pub fn last(&self) -> Option<&TaskEntry> {
        self.entries
            .values()
            .max_by_key(|entry| entry.range.start_byte)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskEntry> {
        self.entries.values()
    }
}

/// Index the direct properties of a config object literal
///
/// Keys must be identifiers or string literals; computed keys, spreads and
/// methods are rejected. A repeated name keeps the later property, matching
/// what JavaScript does at runtime.
pub fn build_index(object: Node<'_>, source: &str, tokens: &TokenStream) -> Result<TaskIndex> {
    let mut entries = IndexMap::new();

    for property in significant_children(object) {
        let name = match property.kind() {
            "pair" => {
                let key = property
                    .child_by_field_name("key")
                    .ok_or_else(|| GruntfileError::unsupported_key(&property))?;
                property_name(&key, source).ok_or_else(|| GruntfileError::unsupported_key(&key))?
            }
            "shorthand_property_identifier" => node_text(&property, source).to_string(),
            _ => return Err(GruntfileError::unsupported_key(&property)),
        };

        let (start_token, end_token) =
            tokens
                .node_bounds(&property)
                .ok_or(GruntfileError::TokenNotFound {
                    offset: property.start_byte(),
                })?;

        entries.insert(
            name.clone(),
            TaskEntry {
                name,
                range: Range::from_node(&property),
                start_token,
                end_token,
                subtasks: Vec::new(),
            },
        );
    }

    tracing::debug!("Indexed {} tasks", entries.len());
    Ok(TaskIndex { entries })
}

fn property_name(key: &Node, source: &str) -> Option<String> {
    match key.kind() {
        "property_identifier" | "identifier" => Some(node_text(key, source).to_string()),
        "string" => string_value(key, source),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::locate_config;
    use crate::tree_sitter::JsParser;

    fn index(code: &str) -> Result<TaskIndex> {
        let mut parser = JsParser::new().unwrap();
        let tree = parser.parse(code).unwrap();
        let tokens = TokenStream::from_tree(code, &tree);
        let location = locate_config(&tree, code)?;
        build_index(location.object, code, &tokens)
    }

    #[test]
    fn test_index_in_source_order() {
        let code = "grunt.initConfig({\n  // lint\n  jshint: {},\n  'jscs': { a: 1 },\n  \"watch\": []\n});";
        let tasks = index(code).unwrap();

        assert_eq!(tasks.names().collect::<Vec<_>>(), vec!["jshint", "jscs", "watch"]);
        assert_eq!(tasks.last().unwrap().name, "watch");
        assert!(tasks.iter().all(|t| t.subtasks.is_empty()));
    }

    #[test]
    fn test_entry_tokens_span_property() {
        let code = "grunt.initConfig({ jshint: { files: [] }, jscs: {} });";
        let mut parser = JsParser::new().unwrap();
        let tree = parser.parse(code).unwrap();
        let tokens = TokenStream::from_tree(code, &tree);
        let location = locate_config(&tree, code).unwrap();
        let tasks = build_index(location.object, code, &tokens).unwrap();

        let jshint = tasks.get("jshint").unwrap();
        let text: String = tokens
            .range(jshint.start_token, jshint.end_token)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(text, "jshint: { files: [] }");
    }

    #[test]
    fn test_shorthand_property() {
        let code = "var jshint = {};\ngrunt.initConfig({ jshint });";
        let tasks = index(code).unwrap();
        assert!(tasks.contains("jshint"));
    }

    #[test]
    fn test_empty_config() {
        let tasks = index("grunt.initConfig({});").unwrap();
        assert!(tasks.is_empty());
        assert!(tasks.last().is_none());
    }

    #[test]
    fn test_computed_key_rejected() {
        let err = index("grunt.initConfig({ [name]: {} });").unwrap_err();
        assert!(matches!(
            err,
            GruntfileError::UnsupportedTaskKey { ref kind, line: 1, .. } if kind == "computed_property_name"
        ));
    }

    #[test]
    fn test_spread_rejected() {
        let err = index("grunt.initConfig({ ...base, a: {} });").unwrap_err();
        assert!(matches!(
            err,
            GruntfileError::UnsupportedTaskKey { ref kind, .. } if kind == "spread_element"
        ));
    }

    #[test]
    fn test_serializes_as_map() {
        let tasks = index("grunt.initConfig({ a: {} });").unwrap();
        let json = serde_json::to_value(&tasks).unwrap();
        assert_eq!(json["a"]["name"], "a");
        assert!(json["a"].get("start_token").is_none());
    }
}
