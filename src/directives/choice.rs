//! The Choice directive: records a decision already made for the character.

use std::fmt;

use serde::Serialize;

use crate::parser::{Arguments, ParseError};

use super::{missing, optional, present, shorthand_markdown, universal, MarkdownBuilder};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub id: String,
    pub name: String,
    pub comment: Option<String>,
    pub choice: String,
}

impl Choice {
    pub(crate) fn new(line: usize, args: &Arguments) -> Result<Self, Vec<ParseError>> {
        let mut errors = Vec::new();
        if present(args, "name").is_none() {
            errors.push(missing(line, "name"));
        }
        if present(args, "choice").is_none() {
            errors.push(missing(line, "choice"));
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let fields = universal("choice", line, args);
        Ok(Self {
            id: fields.id,
            name: fields.name.unwrap_or_default(),
            comment: fields.comment,
            choice: optional(args, "choice").unwrap_or_default(),
        })
    }

    pub(crate) fn to_markdown(&self) -> String {
        if self.comment.is_none() {
            return shorthand_markdown("Choice", &self.name, &self.choice);
        }

        MarkdownBuilder::new("Choice")
            .field("name", &self.name)
            .field("choice", &self.choice)
            .optional_field("comment", self.comment.as_deref())
            .finish()
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Choice: {} ({})", self.name, self.choice)
    }
}
