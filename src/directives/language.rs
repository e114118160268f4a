//! The Language directive: a language the character knows.

use std::fmt;

use serde::Serialize;

use crate::parser::{Arguments, ParseError};

use super::{missing, present, shorthand_markdown, universal, MarkdownBuilder};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Language {
    pub id: String,
    pub name: String,
    pub comment: Option<String>,
}

impl Language {
    pub(crate) fn new(line: usize, args: &Arguments) -> Result<Self, Vec<ParseError>> {
        if present(args, "name").is_none() {
            return Err(vec![missing(line, "name")]);
        }

        let fields = universal("language", line, args);
        Ok(Self {
            id: fields.id,
            name: fields.name.unwrap_or_default(),
            comment: fields.comment,
        })
    }

    pub(crate) fn to_markdown(&self) -> String {
        if self.comment.is_none() {
            return shorthand_markdown("Language", &self.name, "");
        }

        MarkdownBuilder::new("Language")
            .field("name", &self.name)
            .optional_field("comment", self.comment.as_deref())
            .finish()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Language: {}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::directives::Directive;
    use crate::parser::{parse, ParseError};

    #[test]
    fn test_basic_language() {
        let outcome = parse("- Language\n    - *name* Sylvan\n- Language\n    - *name* Undercommon\n");

        assert_eq!(outcome.errors, vec![]);
        let ids: Vec<&str> = outcome.directives.iter().map(|d| d.id()).collect();
        assert_eq!(ids, vec!["language_1", "language_3"]);
        assert_eq!(outcome.directives[0].to_string(), "Language: Sylvan");
        assert_eq!(outcome.directives[1].to_string(), "Language: Undercommon");
    }

    #[test]
    fn test_shorthand_without_value() {
        let outcome = parse("- Language _Sylvan_\n");

        assert_eq!(outcome.errors, vec![]);
        let [Directive::Language(d)] = outcome.directives.as_slice() else {
            panic!("expected one language");
        };
        assert_eq!(d.name, "Sylvan");
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let outcome = parse("- Language\n    - *name* Draconic\n    - *region* Ancient\n");

        assert_eq!(outcome.errors, vec![]);
        assert_eq!(outcome.directives.len(), 1);
    }

    #[test]
    fn test_missing_name() {
        let outcome = parse("- Language\n");

        assert_eq!(
            outcome.errors,
            vec![ParseError::new(1, "Required \"name\" argument is missing.")]
        );
    }

    #[test]
    fn test_empty_name_is_missing() {
        let outcome = parse("- Language\n    - *name*\n");

        assert_eq!(
            outcome.errors,
            vec![ParseError::new(1, "Required \"name\" argument is missing.")]
        );
    }

    #[test]
    fn test_to_markdown() {
        let outcome = parse("- Language _Sylvan_\n");

        assert_eq!(outcome.directives[0].to_markdown(), "- Language _Sylvan_\n");
    }

    #[test]
    fn test_to_markdown_with_comment() {
        let outcome = parse("- Language\n    - *name* Thieves' Cant\n    - *comment* rogues only\n");

        assert_eq!(
            outcome.directives[0].to_markdown(),
            "- Language\n  - _name_ Thieves' Cant\n  - _comment_ rogues only\n"
        );
    }
}
