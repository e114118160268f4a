//! The Inventory directive: adds or removes items from the character's
//! equipment.

use std::fmt;

use serde::Serialize;

use crate::parser::{Arguments, ParseError};

use super::{missing, present, shorthand_markdown, universal, MarkdownBuilder};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inventory {
    pub id: String,
    pub name: Option<String>,
    pub comment: Option<String>,
    pub action: String,
    pub item: String,
    pub count: Option<i64>,
}

impl Inventory {
    pub(crate) fn new(line: usize, args: &Arguments) -> Result<Self, Vec<ParseError>> {
        let mut errors = Vec::new();
        let action_arg = present(args, "action");
        let item_arg = present(args, "item");
        if action_arg.is_none() {
            errors.push(missing(line, "action"));
        }
        if item_arg.is_none() {
            errors.push(missing(line, "item"));
        }
        let (Some(action_arg), Some(item_arg)) = (action_arg, item_arg) else {
            return Err(errors);
        };

        let action = action_arg.value.to_lowercase();
        if action != "add" && action != "remove" {
            return Err(vec![ParseError::new(
                action_arg.line,
                "Action is either \"add\" or \"remove\".",
            )]);
        }

        let count = match args.get("count") {
            Some(count_arg) => {
                let count = count_arg.value.trim().parse::<i64>().unwrap_or(0);
                if count < 1 {
                    return Err(vec![ParseError::new(
                        count_arg.line,
                        format!(
                            "Count \"{}\" should be a positive integer.",
                            count_arg.value
                        ),
                    )]);
                }
                Some(count)
            }
            None => None,
        };

        let fields = universal("inventory", line, args);
        Ok(Self {
            id: fields.id,
            name: fields.name,
            comment: fields.comment,
            action: action_arg.value.clone(),
            item: item_arg.value.clone(),
            count,
        })
    }

    pub(crate) fn to_markdown(&self) -> String {
        if self.count.is_none() && self.name.is_none() && self.comment.is_none() {
            return shorthand_markdown("Inventory", &self.action, &self.item);
        }

        let builder = MarkdownBuilder::new("Inventory")
            .field("action", &self.action)
            .field("item", &self.item);
        let builder = match self.count {
            Some(count) => builder.field("count", count),
            None => builder,
        };
        builder
            .optional_field("name", self.name.as_deref())
            .optional_field("comment", self.comment.as_deref())
            .finish()
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Inventory: {} {}", self.action, self.item)?;
        if let Some(count) = self.count {
            write!(f, " ({count})")?;
        }
        Ok(())
    }
}
