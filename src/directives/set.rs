//! The Set directive: assigns a value to a character sheet field.

use std::fmt;

use serde::Serialize;

use crate::parser::{Arguments, ParseError};

use super::{missing, optional, present, shorthand_markdown, universal, MarkdownBuilder};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Set {
    pub id: String,
    pub name: Option<String>,
    pub comment: Option<String>,
    pub key: String,
    pub value: String,
}

impl Set {
    pub(crate) fn new(line: usize, args: &Arguments) -> Result<Self, Vec<ParseError>> {
        let mut errors = Vec::new();
        if present(args, "key").is_none() {
            errors.push(missing(line, "key"));
        }
        if present(args, "value").is_none() {
            errors.push(missing(line, "value"));
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let fields = universal("set", line, args);
        Ok(Self {
            id: fields.id,
            name: fields.name,
            comment: fields.comment,
            key: optional(args, "key").unwrap_or_default(),
            value: optional(args, "value").unwrap_or_default(),
        })
    }

    pub(crate) fn to_markdown(&self) -> String {
        if self.name.is_none() && self.comment.is_none() {
            return shorthand_markdown("Set", &self.key, &self.value);
        }

        MarkdownBuilder::new("Set")
            .field("key", &self.key)
            .field("value", &self.value)
            .optional_field("name", self.name.as_deref())
            .optional_field("comment", self.comment.as_deref())
            .finish()
    }
}

impl fmt::Display for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Set: {} = '{}'", self.key, self.value)
    }
}
