//! Locator
//!
//! Finds the `grunt.initConfig(...)` call in a parsed gruntfile and resolves
//! its argument to the object literal holding the task configuration, either
//! inline or through one variable binding:
//!
//! ```text
//! grunt.initConfig({ jshint: {...} });          // inline
//! var config = { jshint: {...} };               // by reference
//! grunt.initConfig(config);
//! ```

use tree_sitter::{Node, Tree};

use crate::error::{GruntfileError, Result};
use crate::tree_sitter::{descendants, node_text, significant_children, Range};

/// `<namespace>.<method>(...)` call shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSignature {
    pub namespace: &'static str,
    pub method: &'static str,
}

/// `grunt.initConfig(...)`
pub const INIT_CONFIG: CallSignature = CallSignature::new("grunt", "initConfig");

/// `grunt.registerTask(...)`
pub const REGISTER_TASK: CallSignature = CallSignature::new("grunt", "registerTask");

impl CallSignature {
    pub const fn new(namespace: &'static str, method: &'static str) -> Self {
        Self { namespace, method }
    }

    /// Whether `node` is a call of this shape
    pub fn matches(&self, node: &Node, source: &str) -> bool {
        if node.kind() != "call_expression" {
            return false;
        }
        let Some(callee) = node.child_by_field_name("function") else {
            return false;
        };
        if callee.kind() != "member_expression" {
            return false;
        }

        let object = callee.child_by_field_name("object");
        let property = callee.child_by_field_name("property");
        match (object, property) {
            (Some(object), Some(property)) => {
                object.kind() == "identifier"
                    && node_text(&object, source) == self.namespace
                    && node_text(&property, source) == self.method
            }
            _ => false,
        }
    }
}

/// Every call matching `signature` under `root`, in source order
pub fn find_calls<'tree>(
    root: Node<'tree>,
    source: &'tree str,
    signature: CallSignature,
) -> impl Iterator<Item = Node<'tree>> + 'tree {
    descendants(root).filter(move |node| signature.matches(node, source))
}

/// Arguments of a call expression, comments skipped
pub fn call_arguments<'tree>(call: Node<'tree>) -> Vec<Node<'tree>> {
    call.child_by_field_name("arguments")
        .filter(|args| args.kind() == "arguments")
        .map(significant_children)
        .unwrap_or_default()
}

/// The resolved configuration object of a gruntfile
#[derive(Debug, Clone, Copy)]
pub struct ConfigLocation<'tree> {
    /// The `grunt.initConfig(...)` call
    pub call: Node<'tree>,
    /// The object literal holding the tasks
    pub object: Node<'tree>,
    /// Variable declarator the object was bound through, if any
    pub binding: Option<Node<'tree>>,
}

impl ConfigLocation<'_> {
    pub fn call_range(&self) -> Range {
        Range::from_node(&self.call)
    }

    pub fn object_range(&self) -> Range {
        Range::from_node(&self.object)
    }
}

/// Locate the single init call and its configuration object
pub fn locate_config<'tree>(tree: &'tree Tree, source: &'tree str) -> Result<ConfigLocation<'tree>> {
    let root = tree.root_node();
    let calls: Vec<Node> = find_calls(root, source, INIT_CONFIG).collect();

    let call = match calls.as_slice() {
        [] => return Err(GruntfileError::InitCallNotFound(INIT_CONFIG.method.to_string())),
        [call] => *call,
        _ => {
            return Err(GruntfileError::AmbiguousInitCall {
                method: INIT_CONFIG.method.to_string(),
                count: calls.len(),
            })
        }
    };

    let argument = call_arguments(call)
        .into_iter()
        .next()
        .ok_or_else(|| GruntfileError::MissingConfigArgument(INIT_CONFIG.method.to_string()))?;

    let location = match argument.kind() {
        "object" => ConfigLocation {
            call,
            object: argument,
            binding: None,
        },
        "identifier" => {
            let name = node_text(&argument, source);
            let declarator = find_binding(root, source, name).ok_or_else(|| {
                GruntfileError::UnresolvedConfigReference {
                    name: name.to_string(),
                }
            })?;
            let object = declarator
                .child_by_field_name("value")
                .filter(|value| value.kind() == "object")
                .ok_or_else(|| GruntfileError::UnresolvedConfigReference {
                    name: name.to_string(),
                })?;
            ConfigLocation {
                call,
                object,
                binding: Some(declarator),
            }
        }
        other => {
            return Err(GruntfileError::UnsupportedConfigShape {
                kind: other.to_string(),
            })
        }
    };

    tracing::debug!(
        "Located config object at line {} (call at line {})",
        location.object.start_position().row + 1,
        call.start_position().row + 1
    );
    Ok(location)
}

/// First variable declarator binding `name`, in pre-order
///
/// Scoping is ignored: with several declarations of the same name, the
/// first one in the file wins.
fn find_binding<'tree>(root: Node<'tree>, source: &str, name: &str) -> Option<Node<'tree>> {
    descendants(root).find(|node| {
        node.kind() == "variable_declarator"
            && node
                .child_by_field_name("name")
                .is_some_and(|id| id.kind() == "identifier" && node_text(&id, source) == name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree_sitter::JsParser;

    fn locate(code: &str) -> Result<Range> {
        let mut parser = JsParser::new().unwrap();
        let tree = parser.parse(code).unwrap();
        locate_config(&tree, code).map(|location| location.object_range())
    }

    #[test]
    fn test_inline_config() {
        let code = "module.exports = function(grunt) {\n  grunt.initConfig({ a: {} });\n};\n";
        let range = locate(code).unwrap();
        assert_eq!(range.start.line, 1);
        assert_eq!(&code[range.start_byte..range.end_byte], "{ a: {} }");
    }

    #[test]
    fn test_config_by_reference() {
        let code = "var config = { a: {} };\ngrunt.initConfig(config);\n";
        let range = locate(code).unwrap();
        assert_eq!(range.start.line, 0);
        assert_eq!(&code[range.start_byte..range.end_byte], "{ a: {} }");
    }

    #[test]
    fn test_reference_declared_with_const() {
        let code = "const cfg = {};\ngrunt.initConfig(cfg);\n";
        assert!(locate(code).is_ok());
    }

    #[test]
    fn test_first_binding_wins() {
        let code = "var c = { first: 1 };\nfunction f() { var c = { second: 2 }; }\ngrunt.initConfig(c);\n";
        let range = locate(code).unwrap();
        assert_eq!(&code[range.start_byte..range.end_byte], "{ first: 1 }");
    }

    #[test]
    fn test_missing_init_call() {
        let err = locate("grunt.registerTask('default', []);").unwrap_err();
        assert!(matches!(err, GruntfileError::InitCallNotFound(_)));
    }

    #[test]
    fn test_several_init_calls() {
        let err = locate("grunt.initConfig({});\ngrunt.initConfig({});\n").unwrap_err();
        assert!(matches!(
            err,
            GruntfileError::AmbiguousInitCall { count: 2, .. }
        ));
    }

    #[test]
    fn test_other_namespace_is_ignored() {
        let err = locate("foo.initConfig({});").unwrap_err();
        assert!(matches!(err, GruntfileError::InitCallNotFound(_)));
    }

    #[test]
    fn test_unresolved_reference() {
        let err = locate("grunt.initConfig(config);").unwrap_err();
        assert!(matches!(
            err,
            GruntfileError::UnresolvedConfigReference { ref name } if name == "config"
        ));
    }

    #[test]
    fn test_reference_to_non_object() {
        let err = locate("var config = load();\ngrunt.initConfig(config);").unwrap_err();
        assert!(matches!(err, GruntfileError::UnresolvedConfigReference { .. }));
    }

    #[test]
    fn test_unsupported_shape() {
        let err = locate("grunt.initConfig([1, 2]);").unwrap_err();
        assert!(matches!(
            err,
            GruntfileError::UnsupportedConfigShape { ref kind } if kind == "array"
        ));
    }

    #[test]
    fn test_missing_argument() {
        let err = locate("grunt.initConfig();").unwrap_err();
        assert!(matches!(err, GruntfileError::MissingConfigArgument(_)));
    }

    #[test]
    fn test_call_signature_matches() {
        let mut parser = JsParser::new().unwrap();
        let code = "grunt.registerTask('a', []); grunt.loadNpmTasks('b');";
        let tree = parser.parse(code).unwrap();

        let calls: Vec<Node> = find_calls(tree.root_node(), code, REGISTER_TASK).collect();
        assert_eq!(calls.len(), 1);
        assert_eq!(call_arguments(calls[0]).len(), 2);
    }
}
