//! Header/body splitting.
//!
//! The header is the maximal leading run of comment syntax: `/* ... */`
//! blocks or consecutive `//` line comments, each optionally preceded by
//! whitespace. The split is structural only; no directive is evaluated here.

use std::sync::LazyLock;

use regex::Regex;

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A(\s*((/\*.*?\*/)|(//[^\n]*\n?)+))+").unwrap());

/// Split a source into `(header, body)`.
///
/// The split is total: concatenating the two halves reproduces the input
/// byte for byte. Sources that do not open with comment syntax get an empty
/// header and keep the whole text as body.
pub(crate) fn split(source: &str) -> (&str, &str) {
    HEADER_RE
        .find(source)
        .map_or(("", source), |m| source.split_at(m.end()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_no_comment_means_empty_header() {
        let (header, body) = split("var app = {};\n");
        assert_eq!(header, "");
        assert_eq!(body, "var app = {};\n");
    }

    #[test]
    fn test_line_comment_run() {
        let source = "// one\n// two\nvar app;\n";
        let (header, body) = split(source);
        assert_eq!(header, "// one\n// two\n");
        assert_eq!(body, "var app;\n");
    }

    #[test]
    fn test_block_comment() {
        let source = "/*\n * hello\n */\nvar app;\n";
        let (header, body) = split(source);
        assert_eq!(header, "/*\n * hello\n */");
        assert_eq!(body, "\nvar app;\n");
    }

    #[test]
    fn test_mixed_runs_extend_the_header() {
        let source = "/* a */\n// b\n// c\n/* d */\nbody\n";
        let (header, body) = split(source);
        // A block comment does not consume its trailing newline; the line
        // comment run does.
        assert_eq!(header, "/* a */\n// b\n// c\n/* d */");
        assert_eq!(body, "\nbody\n");
    }

    #[test]
    fn test_leading_whitespace_is_part_of_the_header() {
        let source = "\n  // hi\nbody\n";
        let (header, body) = split(source);
        assert_eq!(header, "\n  // hi\n");
        assert_eq!(body, "body\n");
    }

    #[test]
    fn test_code_before_comment_means_no_header() {
        let source = "var x; // trailing\n// next\n";
        let (header, body) = split(source);
        assert_eq!(header, "");
        assert_eq!(body, source);
    }

    #[test]
    fn test_comment_after_blank_separated_code_not_included() {
        // The run stops at the first non-comment line; a later comment
        // belongs to the body.
        let source = "// head\nvar x;\n// not header\n";
        let (header, body) = split(source);
        assert_eq!(header, "// head\n");
        assert_eq!(body, "var x;\n// not header\n");
    }

    #[test]
    fn test_split_is_lossless() {
        for source in [
            "",
            "plain",
            "// only a comment",
            "/* block */ var inline;\n",
            "\n\n// a\n/* b */\nrest",
        ] {
            let (header, body) = split(source);
            assert_eq!(format!("{header}{body}"), source);
        }
    }

    #[test]
    fn test_comment_only_source_is_all_header() {
        let (header, body) = split("// a\n// b\n");
        assert_eq!(header, "// a\n// b\n");
        assert_eq!(body, "");
    }
}
