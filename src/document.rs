//! One parsed generation of a gruntfile
//!
//! A `Document` bundles the text with everything derived from it: tree,
//! token stream, resolved config object and task index. All of it is
//! consistent with `source` and none of it survives an edit; edits produce
//! new text, which is parsed into a new `Document`.

use tree_sitter::{Node, Tree};

use crate::error::{GruntfileError, Result};
use crate::locator::locate_config;
use crate::task_index::{build_index, TaskIndex};
use crate::tokens::{TokenId, TokenStream};
use crate::tree_sitter::{node_text, JsParser, Range};

/// Where the config object lives
#[derive(Debug, Clone)]
pub struct ConfigObject {
    /// The object literal
    pub range: Range,
    /// The `grunt.initConfig(...)` call
    pub call_range: Range,
    /// Variable the object was passed through, if not inline
    pub binding: Option<String>,
    /// `{` of the object literal
    pub open_token: TokenId,
    /// `}` of the object literal
    pub close_token: TokenId,
}

pub struct Document {
    source: String,
    tree: Tree,
    tokens: TokenStream,
    config: ConfigObject,
    tasks: TaskIndex,
}

impl Document {
    /// Parse `source` and resolve its config object and tasks
    pub fn parse(parser: &mut JsParser, source: String) -> Result<Self> {
        let tree = parser.parse(&source)?;
        let tokens = TokenStream::from_tree(&source, &tree);

        let (config, tasks) = {
            let location = locate_config(&tree, &source)?;
            let tasks = build_index(location.object, &source, &tokens)?;
            let (open_token, close_token) = tokens.node_bounds(&location.object).ok_or(
                GruntfileError::TokenNotFound {
                    offset: location.object.start_byte(),
                },
            )?;
            let binding = location
                .binding
                .and_then(|declarator| declarator.child_by_field_name("name"))
                .map(|name| node_text(&name, &source).to_string());

            let config = ConfigObject {
                range: location.object_range(),
                call_range: location.call_range(),
                binding,
                open_token,
                close_token,
            };
            (config, tasks)
        };

        Ok(Self {
            source,
            tree,
            tokens,
            config,
            tasks,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn tokens(&self) -> &TokenStream {
        &self.tokens
    }

    pub fn config(&self) -> &ConfigObject {
        &self.config
    }

    pub fn tasks(&self) -> &TaskIndex {
        &self.tasks
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("len", &self.source.len())
            .field("config", &self.config)
            .field("tasks", &self.tasks.names().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(code: &str) -> Result<Document> {
        let mut parser = JsParser::new().unwrap();
        Document::parse(&mut parser, code.to_string())
    }

    #[test]
    fn test_parse_document() {
        let doc = parse("grunt.initConfig({\n\tjshint: {}\n});\n").unwrap();

        assert_eq!(doc.root().kind(), "program");
        assert_eq!(doc.tokens().to_text(), doc.source());
        assert_eq!(doc.tasks().len(), 1);
        assert!(doc.config().binding.is_none());
        assert_eq!(doc.tokens().get(doc.config().open_token).text, "{");
        assert_eq!(doc.tokens().get(doc.config().close_token).text, "}");
    }

    #[test]
    fn test_binding_name() {
        let doc = parse("var config = {};\ngrunt.initConfig(config);\n").unwrap();
        assert_eq!(doc.config().binding.as_deref(), Some("config"));
        assert_eq!(doc.config().call_range.start.line, 1);
    }

    #[test]
    fn test_reparse_is_fixed_point() {
        let code = "/* keep */\ngrunt.initConfig({ a: { b: [1,2] } }) ;\n";
        let doc = parse(code).unwrap();
        let again = parse(&doc.tokens().to_text()).unwrap();
        assert_eq!(again.source(), code);
    }

    #[test]
    fn test_syntax_error_surfaces() {
        let err = parse("grunt.initConfig({").unwrap_err();
        assert!(matches!(err, GruntfileError::Parse(_)));
    }
}
