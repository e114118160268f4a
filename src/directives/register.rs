//! The Register directive: declares a named ability score, roll or skill
//! for later reference.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::parser::{Arguments, ParseError};

use super::{missing, present, shorthand_markdown, universal, MarkdownBuilder};

const REGISTER_TYPES: [&str; 3] = ["Ability Score", "Roll", "Skill"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Register {
    pub id: String,
    pub name: String,
    pub comment: Option<String>,
    /// Kept as written; normalized to the canonical capitalization when
    /// serialized.
    #[serde(rename = "type", serialize_with = "normalized")]
    pub type_: String,
}

/// Map a case-insensitive type onto its canonical capitalization.
fn normalize(type_: &str) -> Option<&'static str> {
    REGISTER_TYPES
        .iter()
        .find(|canonical| canonical.eq_ignore_ascii_case(type_))
        .copied()
}

fn normalized<S: Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(normalize(value).unwrap_or(value))
}

impl Register {
    pub(crate) fn new(line: usize, args: &Arguments) -> Result<Self, Vec<ParseError>> {
        let mut errors = Vec::new();
        let type_arg = present(args, "type");
        if type_arg.is_none() {
            errors.push(missing(line, "type"));
        }
        if present(args, "name").is_none() {
            errors.push(missing(line, "name"));
        }
        let Some(type_arg) = type_arg else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        if normalize(&type_arg.value).is_none() {
            return Err(vec![ParseError::new(
                type_arg.line,
                format!(
                    "Type \"{}\" should be either {}.",
                    type_arg.value,
                    REGISTER_TYPES.join(", ")
                ),
            )]);
        }

        let fields = universal("register", line, args);
        Ok(Self {
            id: fields.id,
            name: fields.name.unwrap_or_default(),
            comment: fields.comment,
            type_: type_arg.value.clone(),
        })
    }

    pub(crate) fn to_markdown(&self) -> String {
        if self.comment.is_none() {
            return shorthand_markdown("Register", &self.type_, &self.name);
        }

        MarkdownBuilder::new("Register")
            .field("type", &self.type_)
            .field("name", &self.name)
            .optional_field("comment", self.comment.as_deref())
            .finish()
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Register: {} ({})", self.name, self.type_)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::directives::Directive;
    use crate::parser::{parse, ParseError};

    fn single(content: &str) -> super::Register {
        let outcome = parse(content);
        assert_eq!(outcome.errors, vec![]);
        match outcome.directives.as_slice() {
            [Directive::Register(d)] => d.clone(),
            other => panic!("expected one register, got {other:?}"),
        }
    }

    #[test]
    fn test_basic_register() {
        let d = single("- Register\n    - *type* Ability Score\n    - *name* Dexterity\n");

        assert_eq!(d.id, "register_1");
        assert_eq!(d.type_, "Ability Score");
        assert_eq!(d.name, "Dexterity");
        assert_eq!(d.to_string(), "Register: Dexterity (Ability Score)");
    }

    #[test]
    fn test_shorthand() {
        let d = single("- Register _Skill_ Acrobatics (Dexterity)\n");

        assert_eq!(d.type_, "Skill");
        assert_eq!(d.name, "Acrobatics (Dexterity)");
    }

    #[test]
    fn test_type_is_case_insensitive() {
        let d = single("- Register _ability score_ Strength\n");

        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["type"], "Ability Score");
    }

    #[test]
    fn test_invalid_type() {
        let outcome = parse("- Register\n    - *type* Spell\n    - *name* Fireball\n");

        assert_eq!(
            outcome.errors,
            vec![ParseError::new(
                2,
                "Type \"Spell\" should be either Ability Score, Roll, Skill."
            )]
        );
    }

    #[test]
    fn test_missing_arguments_are_cumulative() {
        let outcome = parse("- Register\n");

        assert_eq!(
            outcome.errors,
            vec![
                ParseError::new(1, "Required \"type\" argument is missing."),
                ParseError::new(1, "Required \"name\" argument is missing."),
            ]
        );
    }

    #[test]
    fn test_to_markdown() {
        let d = single("- Register _Roll_ Initiative\n");

        assert_eq!(d.to_markdown(), "- Register _Roll_ Initiative\n");
    }
}
