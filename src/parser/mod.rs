//! Rule parsing engine.
//!
//! Walks a Markdown document for directive blocks, resolves each block's
//! directive name (full or shorthand notation), extracts its arguments and
//! hands them to the kind's validator. A document parses into two parallel
//! lists: validated directives and positioned errors. A block contributes
//! either exactly one directive or one-or-more errors, never both, and one
//! block's failure never stops the scan.

pub(crate) mod keyvalue;
pub(crate) mod scanner;
pub(crate) mod shorthand;

mod extract;

pub use extract::{extract, extract_file};

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::directives::{self, Directive};
use crate::error::{Result, RulesError};

/// One parsed argument slot: the raw value text and the 1-based line it was
/// found on. When a key repeats within a block, the later occurrence
/// replaces the earlier one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawArgument {
    pub value: String,
    pub line: usize,
}

/// Arguments collected from a block, keyed by lower-cased argument name.
pub type Arguments = HashMap<String, RawArgument>;

/// A positioned parse or validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseError {
    /// 1-based line number in the source document.
    pub line: usize,
    pub text: String,
}

impl ParseError {
    pub fn new(line: usize, text: impl Into<String>) -> Self {
        Self {
            line,
            text: text.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.line, self.text)
    }
}

/// Result of parsing one document.
///
/// Errors are sorted ascending by line; same-line errors keep their
/// detection order.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ParseOutcome {
    pub directives: Vec<Directive>,
    pub errors: Vec<ParseError>,
}

/// Parse a document's content into directives and errors.
pub fn parse(content: &str) -> ParseOutcome {
    let lines: Vec<&str> = content.split('\n').collect();
    parse_lines(&lines)
}

/// Parse a rules file. Fails only if the file cannot be read.
pub fn parse_file(path: impl AsRef<Path>) -> Result<ParseOutcome> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| RulesError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(parse(&content))
}

/// Parse a slice of document lines. Also the recursion entry point for
/// nested option bodies, which are parsed as fresh documents (line numbers
/// and derived ids restart at 1).
pub(crate) fn parse_lines(lines: &[&str]) -> ParseOutcome {
    let mut parsed = Vec::new();
    let mut errors: Vec<ParseError> = Vec::new();

    let mut last_index = 0;
    while let Some((index, block)) = scanner::next_directive_block(lines, last_index) {
        last_index = index + block.len();

        let header = block[0][2..].trim();
        let start_line = index + 1;

        let mut block_errors = parse_block(header, start_line, block, &mut parsed);
        errors.append(&mut block_errors);
    }

    // stable: same-line errors keep detection order
    errors.sort_by_key(|e| e.line);

    ParseOutcome {
        directives: parsed,
        errors,
    }
}

/// Parse a single block, pushing a directive on success and returning any
/// errors otherwise.
fn parse_block(
    header: &str,
    start_line: usize,
    block: &[&str],
    parsed: &mut Vec<Directive>,
) -> Vec<ParseError> {
    // shorthand notation is tried first; an unrecognized name falls through
    // so the whole header is reported verbatim
    if let Some(m) = shorthand::match_shorthand(header) {
        if let Some(info) = directives::lookup(&m.name) {
            let mut args = Arguments::new();
            args.insert(
                info.shorthand_key.to_string(),
                RawArgument {
                    value: m.key,
                    line: start_line,
                },
            );
            if !m.value.is_empty() {
                args.insert(
                    info.shorthand_value.to_string(),
                    RawArgument {
                        value: m.value,
                        line: start_line,
                    },
                );
            }

            if info.nested {
                return finish(info.validate(start_line, args, &block[1..]), parsed);
            }

            // only comment bullets may follow a shorthand header
            if block[1..].iter().any(|&l| !scanner::is_comment_block(l)) {
                return vec![ParseError::new(
                    start_line,
                    "No arguments when using shorthand notation.",
                )];
            }

            return finish(info.validate(start_line, args, &[]), parsed);
        }
    }

    let Some(info) = directives::lookup(header) else {
        return vec![ParseError::new(
            start_line,
            format!("Unknown directive: {header}"),
        )];
    };

    if info.nested {
        return finish(
            info.validate(start_line, Arguments::new(), &block[1..]),
            parsed,
        );
    }

    let mut args = Arguments::new();
    let mut errors = Vec::new();
    let mut argument_error = false;

    for (offset, line) in block[1..].iter().enumerate() {
        let line_number = start_line + offset + 1;
        match keyvalue::extract_key_value(line) {
            Some((key, value)) => {
                // last occurrence wins
                args.insert(
                    key,
                    RawArgument {
                        value,
                        line: line_number,
                    },
                );
            }
            None => {
                errors.push(ParseError::new(line_number, "Argument has no key."));
                argument_error = true;
            }
        }
    }

    match info.validate(start_line, args, &[]) {
        Ok(directive) if !argument_error => parsed.push(directive),
        Ok(_) => {}
        Err(mut validator_errors) => errors.append(&mut validator_errors),
    }

    errors
}

fn finish(
    result: std::result::Result<Directive, Vec<ParseError>>,
    parsed: &mut Vec<Directive>,
) -> Vec<ParseError> {
    match result {
        Ok(directive) => {
            parsed.push(directive);
            Vec::new()
        }
        Err(errors) => errors,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::directives::Directive;

    fn hit_die(outcome: &ParseOutcome, index: usize) -> &crate::directives::HitDie {
        match &outcome.directives[index] {
            Directive::HitDie(d) => d,
            other => panic!("expected hit die, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_content() {
        let outcome = parse("");

        assert_eq!(outcome.directives, vec![]);
        assert_eq!(outcome.errors, vec![]);
    }

    #[test]
    fn test_no_directives() {
        let outcome = parse("Just some text without directives");

        assert_eq!(outcome.directives, vec![]);
        assert_eq!(outcome.errors, vec![]);
    }

    #[test]
    fn test_basic_directive() {
        let outcome = parse("- Hit Die\n    - *Die* d10\n");

        assert_eq!(outcome.errors, vec![]);
        assert_eq!(outcome.directives.len(), 1);
        let d = hit_die(&outcome, 0);
        assert_eq!(d.id, "hitdie_1");
        assert_eq!(d.die, 10);
        assert_eq!(d.value, 6);
    }

    #[test]
    fn test_directive_after_heading() {
        let outcome = parse("# Fighter\n- Hit Die\n    - *Die* d10\n");

        assert_eq!(outcome.errors, vec![]);
        assert_eq!(hit_die(&outcome, 0).id, "hitdie_2");
    }

    #[test]
    fn test_blank_lines_between_heading_and_directive() {
        let outcome = parse("# Fighter\n\n- Hit Die\n    - *Die* d10\n");

        assert_eq!(outcome.errors, vec![]);
        assert_eq!(hit_die(&outcome, 0).id, "hitdie_3");
    }

    #[test]
    fn test_blank_lines_between_directives() {
        let outcome = parse("# Fighter\n\n- Hit Die\n    - *Die* d10\n\n- Hit Die\n    - *die* d8\n");

        assert_eq!(outcome.errors, vec![]);
        assert_eq!(outcome.directives.len(), 2);
        assert_eq!(hit_die(&outcome, 0).id, "hitdie_3");
        let second = hit_die(&outcome, 1);
        assert_eq!(second.id, "hitdie_6");
        assert_eq!(second.die, 8);
        assert_eq!(second.value, 5);
    }

    #[test]
    fn test_prose_after_heading_disables_directives() {
        let outcome = parse("# Fighter\nFighters get a d10 hit die.\n\n- Hit Die\n    - *Die* d10\n");

        assert_eq!(outcome.directives, vec![]);
        assert_eq!(outcome.errors, vec![]);
    }

    #[test]
    fn test_indented_block_is_ignored() {
        let outcome = parse("# Example directive\n    - Hit Die\n        - *Die* d10\n");

        assert_eq!(outcome.directives, vec![]);
        assert_eq!(outcome.errors, vec![]);
    }

    #[test]
    fn test_argument_emphasis_styles() {
        for marker in ["*", "**", "_", "__"] {
            let content = format!("- Hit Die\n    - {marker}Die{marker} d10\n");

            let outcome = parse(&content);

            assert_eq!(outcome.errors, vec![]);
            assert_eq!(hit_die(&outcome, 0).die, 10);
        }
    }

    #[test]
    fn test_mismatched_argument_markers() {
        let outcome = parse("- Hit Die\n    - **Die__ d10\n");

        assert_eq!(outcome.directives, vec![]);
        assert_eq!(
            outcome.errors,
            vec![
                ParseError::new(1, "Required \"die\" argument is missing."),
                ParseError::new(2, "Argument has no key."),
            ]
        );
    }

    #[test]
    fn test_empty_emphasis_key() {
        let outcome = parse("- Hit Die\n    - **die** d10\n    - **** 4\n");

        assert_eq!(outcome.directives, vec![]);
        assert_eq!(outcome.errors, vec![ParseError::new(3, "Argument has no key.")]);
    }

    #[test]
    fn test_duplicates_last_wins() {
        let outcome = parse("- Hit Die\n    - *Die* d6\n    - *Die* d10\n");

        assert_eq!(outcome.errors, vec![]);
        assert_eq!(hit_die(&outcome, 0).die, 10);
    }

    #[test]
    fn test_duplicates_still_produce_errors() {
        let outcome = parse("- Hit Die\n    - *Die* d6\n    - *Die* invalid\n");

        assert_eq!(outcome.directives, vec![]);
        assert_eq!(
            outcome.errors,
            vec![ParseError::new(3, "Die \"invalid\" is not a die.")]
        );
    }

    #[test]
    fn test_single_space_indentation() {
        let outcome = parse("- Hit Die\n - *Die* d10\n");

        assert_eq!(outcome.errors, vec![]);
        assert_eq!(hit_die(&outcome, 0).die, 10);
    }

    #[test]
    fn test_no_indentation_splits_blocks() {
        let outcome = parse("- Hit Die\n- *Die* d10\n");

        assert_eq!(outcome.directives, vec![]);
        assert_eq!(
            outcome.errors,
            vec![
                ParseError::new(1, "Required \"die\" argument is missing."),
                ParseError::new(2, "Unknown directive: *Die* d10"),
            ]
        );
    }

    #[test]
    fn test_case_insensitive_directive_names() {
        for name in ["Hit Die", "hit die", "HIT DIE", "hit Die"] {
            let content = format!("- {name}\n    - *Die* d10\n");

            let outcome = parse(&content);

            assert_eq!(outcome.errors, vec![]);
            assert_eq!(hit_die(&outcome, 0).id, "hitdie_1");
        }
    }

    #[test]
    fn test_case_insensitive_keys() {
        let outcome = parse("- Hit Die\n    - *DIE* d10\n    - *VALUE* 5\n");

        assert_eq!(outcome.errors, vec![]);
        assert_eq!(hit_die(&outcome, 0).value, 5);
    }

    #[test]
    fn test_unknown_directive() {
        let outcome = parse("- Do Something\n    - *What* No idea\n    - *When* At some point\n");

        assert_eq!(outcome.directives, vec![]);
        assert_eq!(
            outcome.errors,
            vec![ParseError::new(1, "Unknown directive: Do Something")]
        );
    }

    #[test]
    fn test_comment_lines_are_skipped() {
        let content = "\
- Comment This is a comment
- comment another comment
- COMMENT case insensitive
- # hash comment
- comment with *emphasis* on **strong opinions**
- Hit Die
    - *Die* d10
";

        let outcome = parse(content);

        assert_eq!(outcome.errors, vec![]);
        assert_eq!(outcome.directives.len(), 1);
        assert_eq!(hit_die(&outcome, 0).id, "hitdie_6");
    }

    #[test]
    fn test_shorthand_emphasis_formats() {
        let content = "\
- Hit Die *d10* 8
- Hit Die _d8_ 6
- Hit Die **d12** 10
- Hit Die __d6__ 4
";

        let outcome = parse(content);

        assert_eq!(outcome.errors, vec![]);
        let expected = [(10, 8), (8, 6), (12, 10), (6, 4)];
        for (index, (die, value)) in expected.iter().enumerate() {
            let d = hit_die(&outcome, index);
            assert_eq!(d.id, format!("hitdie_{}", index + 1));
            assert_eq!((d.die, d.value), (*die, *value));
        }
    }

    #[test]
    fn test_shorthand_mismatched_markers_are_unknown_directives() {
        let content = "\
- Hit Die **d6_ 2
- Hit Die *d8__ 5
- Hit Die _d10* 7
- Set **Name_ John
- Set *Age__ 25
- Set _Class* Fighter
";

        let outcome = parse(content);

        assert_eq!(outcome.directives, vec![]);
        assert_eq!(
            outcome.errors,
            vec![
                ParseError::new(1, "Unknown directive: Hit Die **d6_ 2"),
                ParseError::new(2, "Unknown directive: Hit Die *d8__ 5"),
                ParseError::new(3, "Unknown directive: Hit Die _d10* 7"),
                ParseError::new(4, "Unknown directive: Set **Name_ John"),
                ParseError::new(5, "Unknown directive: Set *Age__ 25"),
                ParseError::new(6, "Unknown directive: Set _Class* Fighter"),
            ]
        );
    }

    #[test]
    fn test_shorthand_with_extra_arguments() {
        let outcome = parse("- Choice _Test Choice_ test option\n    - *comment* This should fail\n");

        assert_eq!(outcome.directives, vec![]);
        assert_eq!(
            outcome.errors,
            vec![ParseError::new(1, "No arguments when using shorthand notation.")]
        );
    }

    #[test]
    fn test_errors_sorted_by_line() {
        let content = "\
- Hit Die
    - *Die* d3
- Unknown Thing
- Hit Die
    - Die d10
";

        let outcome = parse(content);

        let lines: Vec<usize> = outcome.errors.iter().map(|e| e.line).collect();
        let mut sorted = lines.clone();
        sorted.sort_unstable();
        assert_eq!(lines, sorted);
    }

    #[test]
    fn test_determinism() {
        let content = "# Fighter\n- Hit Die *d10* 8\n\n- Set *Name* John\n";

        assert_eq!(parse(content), parse(content));
    }

    #[test]
    fn test_parse_file_missing() {
        let result = parse_file("/nonexistent/rules.md");

        assert!(result.is_err());
    }

    #[test]
    fn test_parse_file_roundtrip() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "- Hit Die\n    - *Die* d10\n").unwrap();

        let outcome = parse_file(file.path()).unwrap();

        assert_eq!(outcome.errors, vec![]);
        assert_eq!(outcome.directives.len(), 1);
    }
}
