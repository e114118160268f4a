//! The Proficiency directive: armor, weapon, skill and related
//! proficiencies.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::parser::{Arguments, ParseError};

use super::{missing, present, shorthand_markdown, universal, MarkdownBuilder};

const PROFICIENCY_TYPES: [&str; 6] = [
    "armor",
    "initiative",
    "saving throw",
    "skill",
    "tool",
    "weapon",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Proficiency {
    pub id: String,
    pub name: Option<String>,
    pub comment: Option<String>,
    /// Kept as written; folded to lower case when serialized.
    #[serde(rename = "type", serialize_with = "lowercase")]
    pub type_: String,
    pub value: String,
}

fn lowercase<S: Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_lowercase())
}

impl Proficiency {
    pub(crate) fn new(line: usize, args: &Arguments) -> Result<Self, Vec<ParseError>> {
        let mut errors = Vec::new();
        let type_arg = present(args, "type");
        let value_arg = present(args, "value");
        if type_arg.is_none() {
            errors.push(missing(line, "type"));
        }
        if value_arg.is_none() {
            errors.push(missing(line, "value"));
        }
        let (Some(type_arg), Some(value_arg)) = (type_arg, value_arg) else {
            return Err(errors);
        };
        if !PROFICIENCY_TYPES.contains(&type_arg.value.to_lowercase().as_str()) {
            return Err(vec![ParseError::new(
                type_arg.line,
                format!(
                    "Type \"{}\" should be either {}.",
                    type_arg.value,
                    PROFICIENCY_TYPES.join(", ")
                ),
            )]);
        }

        let fields = universal("proficiency", line, args);
        Ok(Self {
            id: fields.id,
            name: fields.name,
            comment: fields.comment,
            type_: type_arg.value.clone(),
            value: value_arg.value.clone(),
        })
    }

    pub(crate) fn to_markdown(&self) -> String {
        if self.name.is_none() && self.comment.is_none() {
            return shorthand_markdown("Proficiency", &self.type_, &self.value);
        }

        MarkdownBuilder::new("Proficiency")
            .field("type", &self.type_)
            .field("value", &self.value)
            .optional_field("name", self.name.as_deref())
            .optional_field("comment", self.comment.as_deref())
            .finish()
    }
}

impl fmt::Display for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Proficiency: {} {}", self.type_, self.value)
    }
}
