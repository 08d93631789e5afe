//! Registering tasks under an alias
//!
//! ```text
//! grunt.registerTask('default', ['jshint', 'jscs']);
//! grunt.registerTask('build', 'Build everything', ['concat']);
//! ```

use tree_sitter::Node;

use crate::document::Document;
use crate::error::{GruntfileError, Result};
use crate::locator::{call_arguments, find_calls, INIT_CONFIG, REGISTER_TASK};
use crate::render::QuoteStyle;
use crate::tokens::{TokenKind, TokenStream};
use crate::tree_sitter::{ancestor_of_kind, quote_char, significant_children, string_value};

/// Task names to register, in request order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList(Vec<String>);

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names in order, each one once, blanks dropped
    pub fn unique(&self) -> Vec<&str> {
        let mut seen = Vec::with_capacity(self.0.len());
        for name in self.0.iter().map(String::as_str) {
            if !name.is_empty() && !seen.contains(&name) {
                seen.push(name);
            }
        }
        seen
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for TaskList {
    fn from(name: &str) -> Self {
        TaskList(vec![name.to_string()])
    }
}

impl From<String> for TaskList {
    fn from(name: String) -> Self {
        TaskList(vec![name])
    }
}

impl From<Vec<String>> for TaskList {
    fn from(names: Vec<String>) -> Self {
        TaskList(names)
    }
}

impl From<Vec<&str>> for TaskList {
    fn from(names: Vec<&str>) -> Self {
        names.into_iter().collect()
    }
}

impl From<&[&str]> for TaskList {
    fn from(names: &[&str]) -> Self {
        names.iter().copied().collect()
    }
}

impl<const N: usize> From<[&str; N]> for TaskList {
    fn from(names: [&str; N]) -> Self {
        names.into_iter().collect()
    }
}

impl<'a> FromIterator<&'a str> for TaskList {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        TaskList(iter.into_iter().map(str::to_string).collect())
    }
}

impl FromIterator<String> for TaskList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        TaskList(iter.into_iter().collect())
    }
}

/// Append `tasks` to the list registered under `alias`
///
/// Names already in the list are skipped and existing elements are left
/// exactly as written. When no `registerTask` call carries the alias, a new
/// call is added after the last registration (or after the init call).
/// Returns `None` when every name is already registered.
pub fn register_task(doc: &Document, alias: &str, tasks: &TaskList) -> Result<Option<TokenStream>> {
    let requested = tasks.unique();
    if requested.is_empty() {
        return Ok(None);
    }

    let source = doc.source();
    let registration = find_calls(doc.root(), source, REGISTER_TASK).find(|call| {
        call_arguments(*call)
            .first()
            .and_then(|first| string_value(first, source))
            .is_some_and(|name| name == alias)
    });

    match registration {
        Some(call) => append_to_call(doc, call, alias, &requested),
        None => synthesize_call(doc, alias, &requested).map(Some),
    }
}

fn append_to_call(
    doc: &Document,
    call: Node<'_>,
    alias: &str,
    requested: &[&str],
) -> Result<Option<TokenStream>> {
    let source = doc.source();
    let tokens = doc.tokens();

    let list = match call_arguments(call).as_slice() {
        [_, description, list, ..] if description.kind() == "string" => *list,
        [_, list, ..] => *list,
        _ => {
            return Err(GruntfileError::RegisterTaskMissingList {
                alias: alias.to_string(),
            })
        }
    };
    if list.kind() != "array" {
        return Err(GruntfileError::RegisterTaskInvalidList {
            alias: alias.to_string(),
            kind: list.kind().to_string(),
        });
    }

    let elements = significant_children(list);
    let registered: Vec<String> = elements
        .iter()
        .filter_map(|element| string_value(element, source))
        .collect();
    let missing: Vec<&str> = requested
        .iter()
        .copied()
        .filter(|name| !registered.iter().any(|r| r == *name))
        .collect();
    if missing.is_empty() {
        tracing::debug!("Tasks already registered under '{}'", alias);
        return Ok(None);
    }

    let quote = elements
        .first()
        .and_then(|first| quote_char(first, source))
        .and_then(QuoteStyle::from_char)
        .unwrap_or_default();
    let joined = join_names(&missing, quote);

    let mut edited = tokens.clone();
    match elements.last() {
        Some(last) => {
            let anchor = tokens
                .ending_at(last.end_byte())
                .ok_or(GruntfileError::TokenNotFound {
                    offset: last.end_byte(),
                })?;
            edited.insert_after(anchor, TokenKind::Synthetic, &format!(", {}", joined));
        }
        None => {
            let anchor = tokens
                .ending_at(list.end_byte())
                .and_then(|close| tokens.prev(close))
                .ok_or(GruntfileError::TokenNotFound {
                    offset: list.end_byte(),
                })?;
            edited.insert_after(anchor, TokenKind::Synthetic, &joined);
        }
    }

    tracing::debug!("Prepared registration of {:?} under '{}'", missing, alias);
    Ok(Some(edited))
}

/// Add `ns.registerTask('alias', [...]);` as a new statement
fn synthesize_call(doc: &Document, alias: &str, requested: &[&str]) -> Result<TokenStream> {
    let source = doc.source();
    let tokens = doc.tokens();
    let not_found = || GruntfileError::RegistrationTargetNotFound {
        alias: alias.to_string(),
    };

    let anchor_call = find_calls(doc.root(), source, REGISTER_TASK)
        .last()
        .or_else(|| find_calls(doc.root(), source, INIT_CONFIG).next())
        .ok_or_else(not_found)?;
    let statement = ancestor_of_kind(anchor_call, "expression_statement").ok_or_else(not_found)?;

    let (first, last) = tokens
        .node_bounds(&statement)
        .ok_or(GruntfileError::TokenNotFound {
            offset: statement.start_byte(),
        })?;
    let indent = tokens.line_indent(first);
    let nl = tokens.line_ending();
    let quote = QuoteStyle::Single;
    let text = format!(
        "{nl}{nl}{}{}.{}({}, [{}]);",
        indent,
        INIT_CONFIG.namespace,
        REGISTER_TASK.method,
        quote.quote(alias),
        join_names(requested, quote)
    );

    let mut edited = tokens.clone();
    edited.insert_after(last, TokenKind::Synthetic, &text);
    tracing::debug!("Prepared new registration call for '{}'", alias);
    Ok(edited)
}

fn join_names(names: &[&str], quote: QuoteStyle) -> String {
    names
        .iter()
        .map(|name| quote.quote(name))
        .collect::<Vec<_>>()
        .join(", ")
}
