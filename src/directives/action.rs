//! Actions, bonus actions and reactions share one schema; the three kinds
//! differ only in their name and id prefix.

use serde::Serialize;

use crate::parser::{Arguments, ParseError};

use super::{missing, optional, present, shorthand_markdown, universal, KindInfo, MarkdownBuilder};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    pub id: String,
    pub name: String,
    pub comment: Option<String>,
    pub description: String,
    pub uses: Option<String>,
    pub effect: Option<String>,
    pub amount: Option<String>,
    pub roll: Option<String>,
}

impl Action {
    pub(crate) fn new(
        info: &KindInfo,
        line: usize,
        args: &Arguments,
    ) -> Result<Self, Vec<ParseError>> {
        let mut errors = Vec::new();
        if present(args, "name").is_none() {
            errors.push(missing(line, "name"));
        }
        if present(args, "description").is_none() {
            errors.push(missing(line, "description"));
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let fields = universal(info.slug, line, args);
        Ok(Self {
            id: fields.id,
            // required above
            name: fields.name.unwrap_or_default(),
            comment: fields.comment,
            description: optional(args, "description").unwrap_or_default(),
            uses: optional(args, "uses"),
            effect: optional(args, "effect"),
            amount: optional(args, "amount"),
            roll: optional(args, "roll"),
        })
    }

    pub(crate) fn to_markdown(&self, kind_name: &str) -> String {
        let extras = self.uses.is_some()
            || self.effect.is_some()
            || self.amount.is_some()
            || self.roll.is_some()
            || self.comment.is_some();
        if !extras {
            return shorthand_markdown(kind_name, &self.name, &self.description);
        }

        MarkdownBuilder::new(kind_name)
            .field("name", &self.name)
            .field("description", &self.description)
            .optional_field("uses", self.uses.as_deref())
            .optional_field("effect", self.effect.as_deref())
            .optional_field("amount", self.amount.as_deref())
            .optional_field("roll", self.roll.as_deref())
            .optional_field("comment", self.comment.as_deref())
            .finish()
    }
}
