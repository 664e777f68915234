//! Directive line grammar.
//!
//! A header line is a directive only if, after optional whitespace, it opens
//! with a `*`, `//`, or `#` marker followed by `=` and a token stream. Other
//! header lines are comment prose and are skipped, so directives and
//! documentation coexist in one header.

use std::sync::LazyLock;

use regex::Regex;

static DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*(?:\*|//|#)\s*=\s*(\w[\w\s./'"-]*)$"#).unwrap());

/// One parsed directive line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Directive {
    line: usize,
    name: String,
    args: Vec<String>,
}

impl Directive {
    /// 0-based line number within the header, for diagnostics.
    pub(crate) fn line(&self) -> usize {
        self.line
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn args(&self) -> &[String] {
        &self.args
    }
}

/// Parse every directive line of a header, in order.
pub(crate) fn parse_header(header: &str) -> Vec<Directive> {
    header
        .lines()
        .enumerate()
        .filter_map(|(line, text)| {
            let captures = DIRECTIVE_RE.captures(text)?;
            let mut words = split_words(&captures[1]).into_iter();
            let name = words.next()?;
            Some(Directive {
                line,
                name,
                args: words.collect(),
            })
        })
        .collect()
}

/// Split a token stream with shell-style quoting.
///
/// Single or double quotes group words (`'a b.js'` is one token); quote
/// characters themselves are dropped. An unterminated quote runs to the end
/// of the line.
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in input.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '\'' || c == '"' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn args(header: &str) -> Vec<Vec<String>> {
        parse_header(header)
            .into_iter()
            .map(|d| {
                let mut words = vec![d.name().to_owned()];
                words.extend(d.args().iter().cloned());
                words
            })
            .collect()
    }

    #[test]
    fn test_slash_marker() {
        assert_eq!(args("//= require lib/util"), [["require", "lib/util"]]);
    }

    #[test]
    fn test_star_marker() {
        assert_eq!(args(" *= require a"), [["require", "a"]]);
    }

    #[test]
    fn test_hash_marker() {
        assert_eq!(args("#= require a"), [["require", "a"]]);
    }

    #[test]
    fn test_spacing_around_equals_is_flexible() {
        assert_eq!(args("//=require a"), [["require", "a"]]);
        assert_eq!(args("// = require a"), [["require", "a"]]);
    }

    #[test]
    fn test_prose_lines_are_skipped() {
        let header = "// Copyright someone\n//= require a\n// more prose\n";
        assert_eq!(args(header), [["require", "a"]]);
    }

    #[test]
    fn test_line_numbers_are_header_relative() {
        let header = "// prose\n//= require a\n//= require b\n";
        let directives = parse_header(header);
        assert_eq!(directives[0].line(), 1);
        assert_eq!(directives[1].line(), 2);
    }

    #[test]
    fn test_characters_outside_the_grammar_reject_the_line() {
        assert!(parse_header("//= require a;").is_empty());
        assert!(parse_header("//= require(a)").is_empty());
    }

    #[test]
    fn test_no_args() {
        let directives = parse_header("//= require_self");
        assert_eq!(directives[0].name(), "require_self");
        assert!(directives[0].args().is_empty());
    }

    #[test]
    fn test_split_words_plain() {
        assert_eq!(split_words("require a b"), ["require", "a", "b"]);
    }

    #[test]
    fn test_split_words_single_quotes() {
        assert_eq!(
            split_words("require 'path with space.js'"),
            ["require", "path with space.js"]
        );
    }

    #[test]
    fn test_split_words_double_quotes() {
        assert_eq!(split_words(r#"require "a b""#), ["require", "a b"]);
    }

    #[test]
    fn test_split_words_adjacent_quoted_and_bare() {
        assert_eq!(split_words("a'b c'd"), ["ab cd"]);
    }

    #[test]
    fn test_split_words_unterminated_quote_runs_out() {
        assert_eq!(split_words("require 'a b"), ["require", "a b"]);
    }

    #[test]
    fn test_quoted_path_parses_as_one_argument() {
        let directives = parse_header("//= require 'path with space'");
        assert_eq!(directives[0].args(), ["path with space"]);
    }
}
