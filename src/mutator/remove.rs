//! Removing a task from the config object

use crate::document::Document;
use crate::tokens::{TokenId, TokenKind, TokenStream};

/// Unlink the property configuring `name`
///
/// The property goes together with its comma and the whitespace after it,
/// so the next property moves up into its place. Comments between the value
/// and the comma go too, as do comment lines directly above the property;
/// anything separated by a blank line stays. When no property follows, the
/// line break before the property goes instead of the blanks after it, so
/// the closing brace keeps its column. Returns `None` when there is no such
/// task.
pub fn remove_task(doc: &Document, name: &str) -> Option<TokenStream> {
    let entry = doc.tasks().get(name)?;
    let tokens = doc.tokens();
    let close = doc.config().close_token;
    let skippable = |id: &TokenId| {
        let token = tokens.get(*id);
        token.is_blank() || token.kind == TokenKind::Comment
    };

    let mut last = entry.end_token;
    let mut cursor = tokens.next(last);
    while let Some(id) = cursor.filter(|id| *id != close && skippable(id)) {
        cursor = tokens.next(id);
    }
    if let Some(comma) = cursor.filter(|id| *id != close && tokens.get(*id).text == ",") {
        last = comma;
    }

    let mut blanks_end = last;
    let mut cursor = tokens.next(last);
    while let Some(id) = cursor.filter(|id| *id != close && tokens.get(*id).is_blank()) {
        blanks_end = id;
        cursor = tokens.next(id);
    }

    let mut first = attached_comment_start(tokens, entry.start_token);
    if cursor == Some(close) {
        first = line_start(tokens, first);
    } else {
        last = blanks_end;
    }

    let mut edited = tokens.clone();
    edited.remove_range(first, last);
    tracing::debug!("Prepared removal of task '{}'", name);
    Some(edited)
}

/// Extend `first` back over its indent and the line break before it
fn line_start(tokens: &TokenStream, first: TokenId) -> TokenId {
    let kind_of = |id: &TokenId| tokens.get(*id).kind;
    let mut start = first;
    if let Some(indent) = tokens.prev(start).filter(|id| kind_of(id) == TokenKind::Whitespace) {
        start = indent;
    }
    if let Some(line_break) = tokens.prev(start).filter(|id| kind_of(id) == TokenKind::LineBreak) {
        start = line_break;
    }
    start
}

/// First token of the comment lines sitting right above `start`
///
/// Each comment must be alone on its line, and `start` must begin its own
/// line; otherwise `start` is returned unchanged.
fn attached_comment_start(tokens: &TokenStream, start: TokenId) -> TokenId {
    let kind_of = |id: &TokenId| tokens.get(*id).kind;
    let skip_indent = |id: Option<TokenId>| match id {
        Some(ws) if kind_of(&ws) == TokenKind::Whitespace => tokens.prev(ws),
        other => other,
    };

    let mut first = start;
    loop {
        let Some(line_break) = skip_indent(tokens.prev(first))
            .filter(|id| kind_of(id) == TokenKind::LineBreak)
        else {
            break;
        };
        let Some(comment) = tokens
            .prev(line_break)
            .filter(|id| kind_of(id) == TokenKind::Comment)
        else {
            break;
        };
        if skip_indent(tokens.prev(comment)).is_some_and(|id| kind_of(&id) != TokenKind::LineBreak) {
            break;
        }
        first = comment;
    }
    first
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree_sitter::JsParser;
    use pretty_assertions::assert_eq;

    fn remove(code: &str, name: &str) -> Option<String> {
        let mut parser = JsParser::new().unwrap();
        let doc = Document::parse(&mut parser, code.to_string()).unwrap();
        remove_task(&doc, name).map(|tokens| tokens.to_text())
    }

    #[test]
    fn test_remove_first_property() {
        let code = "grunt.initConfig({\n\tjshint: {\n\t\tfiles: []\n\t},\n\n\tjscs: {}\n});\n";
        assert_eq!(
            remove(code, "jshint").unwrap(),
            "grunt.initConfig({\n\tjscs: {}\n});\n"
        );
    }

    #[test]
    fn test_remove_middle_property() {
        let code = "grunt.initConfig({ a: 1, b: 2, c: 3 });";
        assert_eq!(remove(code, "b").unwrap(), "grunt.initConfig({ a: 1, c: 3 });");
    }

    #[test]
    fn test_remove_last_property_keeps_previous_comma() {
        let code = "grunt.initConfig({\n\ta: 1,\n\tb: 2\n});";
        assert_eq!(remove(code, "b").unwrap(), "grunt.initConfig({\n\ta: 1,\n});");
    }

    #[test]
    fn test_remove_last_property_with_trailing_comma() {
        let code = "grunt.initConfig({\n\ta: 1,\n\t// bee\n\tb: 2,\n});";
        assert_eq!(remove(code, "b").unwrap(), "grunt.initConfig({\n\ta: 1,\n});");
    }

    #[test]
    fn test_remove_only_property_on_own_line() {
        let code = "grunt.initConfig({\n\ta: {}\n});";
        assert_eq!(remove(code, "a").unwrap(), "grunt.initConfig({\n});");
    }

    #[test]
    fn test_remove_only_property() {
        let code = "grunt.initConfig({ a: {} });";
        assert_eq!(remove(code, "a").unwrap(), "grunt.initConfig({ });");
    }

    #[test]
    fn test_attached_comment_goes() {
        let code = "grunt.initConfig({\n\t// lint\n\t/* js */\n\ta: 1,\n\tb: 2\n});";
        assert_eq!(remove(code, "a").unwrap(), "grunt.initConfig({\n\tb: 2\n});");
    }

    #[test]
    fn test_detached_comment_stays() {
        let code = "grunt.initConfig({\n\t// tasks\n\n\ta: 1,\n\tb: 2\n});";
        assert_eq!(
            remove(code, "a").unwrap(),
            "grunt.initConfig({\n\t// tasks\n\n\tb: 2\n});"
        );
    }

    #[test]
    fn test_comment_after_brace_stays() {
        let code = "grunt.initConfig({ // tasks\n\ta: 1,\n\tb: 2\n});";
        assert_eq!(
            remove(code, "a").unwrap(),
            "grunt.initConfig({ // tasks\n\tb: 2\n});"
        );
    }

    #[test]
    fn test_trailing_comment_stops_scan() {
        let code = "grunt.initConfig({\n\ta: 1, // one\n\tb: 2\n});";
        assert_eq!(
            remove(code, "a").unwrap(),
            "grunt.initConfig({\n\t// one\n\tb: 2\n});"
        );
    }

    #[test]
    fn test_comment_before_comma_goes_with_property() {
        let code = "grunt.initConfig({\n\ta: 1 /* one */,\n\tb: 2\n});";
        assert_eq!(remove(code, "a").unwrap(), "grunt.initConfig({\n\tb: 2\n});");

        let code = "grunt.initConfig({ a: 1 // one\n\t, b: 2 });";
        assert_eq!(remove(code, "a").unwrap(), "grunt.initConfig({ b: 2 });");
    }

    #[test]
    fn test_quoted_name() {
        let code = "grunt.initConfig({ 'my-task': {}, b: 2 });";
        assert_eq!(remove(code, "my-task").unwrap(), "grunt.initConfig({ b: 2 });");
    }

    #[test]
    fn test_missing_task_is_noop() {
        assert!(remove("grunt.initConfig({ a: 1 });", "b").is_none());
    }
}
