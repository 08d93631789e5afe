//! Indentation helpers
//!
//! Detects the indentation unit a gruntfile is written with, so inserted
//! code looks like the code around it.

use std::collections::HashMap;

/// Unit used when a file has no indented lines
pub const DEFAULT_INDENT: &str = "\t";

/// Detect the indentation unit of `text`
///
/// Tabs win when more lines are tab-indented than space-indented. For
/// spaces, the unit is the most common step between consecutive indented
/// lines.
pub fn detect_indent(text: &str) -> String {
    let mut tab_lines = 0usize;
    let mut space_lines = 0usize;
    let mut steps: HashMap<usize, usize> = HashMap::new();
    let mut previous = 0usize;

    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        let leading: &str = &line[..line.len() - line.trim_start_matches([' ', '\t']).len()];
        if leading.starts_with('\t') {
            tab_lines += 1;
            continue;
        }

        let width = leading.len();
        if width > 0 {
            space_lines += 1;
        }
        if width > previous {
            *steps.entry(width - previous).or_default() += 1;
        }
        previous = width;
    }

    if tab_lines == 0 && space_lines == 0 {
        return DEFAULT_INDENT.to_string();
    }
    if tab_lines > space_lines {
        return "\t".to_string();
    }

    // Ties go to the smaller step so detection is deterministic
    steps
        .into_iter()
        .max_by(|(a_step, a_count), (b_step, b_count)| {
            a_count.cmp(b_count).then(b_step.cmp(a_step))
        })
        .map(|(step, _)| " ".repeat(step))
        .unwrap_or_else(|| DEFAULT_INDENT.to_string())
}

/// Number of `unit`s in a line's leading whitespace
pub fn indent_depth(leading: &str, unit: &str) -> usize {
    if unit == "\t" {
        let tabs = leading.chars().filter(|c| *c == '\t').count();
        let spaces = leading.chars().filter(|c| *c == ' ').count();
        // Stray alignment spaces count as one more level once they add up
        return tabs + spaces / 4;
    }

    let width: usize = leading
        .chars()
        .map(|c| if c == '\t' { unit.len() } else { 1 })
        .sum();
    width / unit.len().max(1)
}

/// Prefix every line after the first with `prefix`
pub fn reindent(text: &str, prefix: &str) -> String {
    text.replace('\n', &format!("\n{}", prefix))
}

/// Rewrite every line break in `text` as `line_ending`
pub fn with_line_ending(text: &str, line_ending: &str) -> String {
    let unix = text.replace("\r\n", "\n");
    if line_ending == "\n" {
        unix
    } else {
        unix.replace('\n', line_ending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_tabs() {
        let code = "module.exports = function(grunt) {\n\tgrunt.initConfig({\n\t\ta: {}\n\t});\n};\n";
        assert_eq!(detect_indent(code), "\t");
    }

    #[test]
    fn test_detect_two_spaces() {
        let code = "a({\n  b: {\n    c: 1\n  }\n});\n";
        assert_eq!(detect_indent(code), "  ");
    }

    #[test]
    fn test_detect_four_spaces() {
        let code = "a({\n    b: {\n        c: 1,\n        d: 2\n    }\n});\n";
        assert_eq!(detect_indent(code), "    ");
    }

    #[test]
    fn test_detect_defaults_to_tab() {
        assert_eq!(detect_indent("grunt.initConfig({});\n"), DEFAULT_INDENT);
        assert_eq!(detect_indent(""), DEFAULT_INDENT);
    }

    #[test]
    fn test_indent_depth() {
        assert_eq!(indent_depth("\t\t", "\t"), 2);
        assert_eq!(indent_depth("", "\t"), 0);
        assert_eq!(indent_depth("    ", "  "), 2);
        assert_eq!(indent_depth("        ", "    "), 2);
        assert_eq!(indent_depth("\t", "  "), 1);
    }

    #[test]
    fn test_reindent() {
        assert_eq!(reindent("{\n\ta: 1\n}", "\t\t"), "{\n\t\t\ta: 1\n\t\t}");
        assert_eq!(reindent("{}", "\t\t"), "{}");
        assert_eq!(reindent("{\r\n}", "\t"), "{\r\n\t}");
    }

    #[test]
    fn test_with_line_ending() {
        assert_eq!(with_line_ending("{\n\ta: 1\r\n}", "\r\n"), "{\r\n\ta: 1\r\n}");
        assert_eq!(with_line_ending("{\r\n}", "\n"), "{\n}");
        assert_eq!(with_line_ending("{}", "\r\n"), "{}");
    }
}
