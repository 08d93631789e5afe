//! Renders JSON-like values as JavaScript source
//!
//! Produces the layout `stringify-object` gives, which is what gruntfiles in
//! the wild are usually written in:
//!
//! ```text
//! {
//! 	nonull: true,
//! 	src: [
//! 		'vendor/jquery.js'
//! 	]
//! }
//! ```

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap();
}

/// Quote character for string literals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteStyle {
    #[default]
    Single,
    Double,
}

impl QuoteStyle {
    pub fn as_char(self) -> char {
        match self {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
        }
    }

    /// Style matching a quote character, if it is one
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '\'' => Some(QuoteStyle::Single),
            '"' => Some(QuoteStyle::Double),
            _ => None,
        }
    }

    /// Quote `text` as a string literal
    pub fn quote(self, text: &str) -> String {
        let q = self.as_char();
        let mut out = String::with_capacity(text.len() + 2);
        out.push(q);
        for c in text.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if c == q => {
                    out.push('\\');
                    out.push(c);
                }
                c => out.push(c),
            }
        }
        out.push(q);
        out
    }
}

/// Renderer settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// One level of indentation
    pub indent: String,
    pub quote: QuoteStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: "\t".to_string(),
            quote: QuoteStyle::Single,
        }
    }
}

/// Whether `name` can be written as a bare property key
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Property key for `name`, quoted only when it has to be
pub fn property_key(name: &str, quote: QuoteStyle) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        quote.quote(name)
    }
}

/// Render `value` as a JavaScript expression
pub fn render(value: &Value, opts: &RenderOptions) -> String {
    let mut out = String::new();
    write_value(&mut out, value, opts, 0);
    out
}

fn write_value(out: &mut String, value: &Value, opts: &RenderOptions, depth: usize) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => out.push_str(&opts.quote.quote(s)),
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Array(items) => {
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(",\n");
                }
                out.push_str(&opts.indent.repeat(depth + 1));
                write_value(out, item, opts, depth + 1);
            }
            out.push('\n');
            out.push_str(&opts.indent.repeat(depth));
            out.push(']');
        }
        Value::Object(map) => {
            out.push_str("{\n");
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(",\n");
                }
                out.push_str(&opts.indent.repeat(depth + 1));
                out.push_str(&property_key(key, opts.quote));
                out.push_str(": ");
                write_value(out, item, opts, depth + 1);
            }
            out.push('\n');
            out.push_str(&opts.indent.repeat(depth));
            out.push('}');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_render_nested_object() {
        let config = json!({
            "nonull": true,
            "src": ["vendor/jquery.js", "js/main.js"],
            "dest": "build/scripts.js"
        });

        let rendered = render(&config, &RenderOptions::default());
        assert_eq!(
            rendered,
            "{\n\tnonull: true,\n\tsrc: [\n\t\t'vendor/jquery.js',\n\t\t'js/main.js'\n\t],\n\tdest: 'build/scripts.js'\n}"
        );
    }

    #[test]
    fn test_render_empty_containers() {
        let opts = RenderOptions::default();
        assert_eq!(render(&json!({}), &opts), "{}");
        assert_eq!(render(&json!([]), &opts), "[]");
        assert_eq!(render(&json!({ "a": {} }), &opts), "{\n\ta: {}\n}");
    }

    #[test]
    fn test_render_scalars() {
        let opts = RenderOptions::default();
        assert_eq!(render(&json!(null), &opts), "null");
        assert_eq!(render(&json!(false), &opts), "false");
        assert_eq!(render(&json!(42), &opts), "42");
        assert_eq!(render(&json!(1.5), &opts), "1.5");
    }

    #[test]
    fn test_render_with_spaces_and_double_quotes() {
        let opts = RenderOptions {
            indent: "  ".to_string(),
            quote: QuoteStyle::Double,
        };
        assert_eq!(
            render(&json!({ "files": ["a.js"] }), &opts),
            "{\n  files: [\n    \"a.js\"\n  ]\n}"
        );
    }

    #[test]
    fn test_keys_quoted_when_needed() {
        let rendered = render(&json!({ "my-task": 1, "$ok": 2 }), &RenderOptions::default());
        assert_eq!(rendered, "{\n\t'my-task': 1,\n\t$ok: 2\n}");
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(QuoteStyle::Single.quote("it's"), "'it\\'s'");
        assert_eq!(QuoteStyle::Double.quote("say \"hi\"\n"), "\"say \\\"hi\\\"\\n\"");
        assert_eq!(QuoteStyle::Single.quote("a\\b"), "'a\\\\b'");
    }

    #[test]
    fn test_quote_style_from_char() {
        assert_eq!(QuoteStyle::from_char('"'), Some(QuoteStyle::Double));
        assert_eq!(QuoteStyle::from_char('\''), Some(QuoteStyle::Single));
        assert_eq!(QuoteStyle::from_char('`'), None);
    }
}
