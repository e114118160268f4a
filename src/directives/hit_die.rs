//! The Hit Die directive: declares a class hit die and its average value.

use std::fmt;

use serde::Serialize;

use crate::parser::{Arguments, ParseError};

use super::{missing, shorthand_markdown, universal, MarkdownBuilder};

/// Dice a character class may use for hit points.
const STANDARD_DICE: [i64; 6] = [4, 6, 8, 10, 12, 20];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HitDie {
    pub id: String,
    pub name: Option<String>,
    pub comment: Option<String>,
    pub die: i64,
    pub value: i64,
}

impl HitDie {
    pub(crate) fn new(line: usize, args: &Arguments) -> Result<Self, Vec<ParseError>> {
        let Some(die_arg) = args.get("die") else {
            return Err(vec![missing(line, "die")]);
        };

        let die_text = &die_arg.value;
        let die = die_text
            .strip_prefix(['d', 'D'])
            .and_then(|digits| digits.trim().parse::<i64>().ok())
            .ok_or_else(|| {
                vec![ParseError::new(
                    die_arg.line,
                    format!("Die \"{die_text}\" is not a die."),
                )]
            })?;

        if !STANDARD_DICE.contains(&die) {
            return Err(vec![ParseError::new(
                die_arg.line,
                format!("Die \"d{die}\" is not a standard die."),
            )]);
        }

        let value = match args.get("value") {
            Some(value_arg) => {
                let value_text = &value_arg.value;
                let value = value_text.trim().parse::<i64>().map_err(|_| {
                    vec![ParseError::new(
                        value_arg.line,
                        format!("Value \"{value_text}\" is not a number."),
                    )]
                })?;
                if value < 1 || value > die {
                    return Err(vec![ParseError::new(
                        value_arg.line,
                        format!("Value \"{value}\" is out of range."),
                    )]);
                }
                value
            }
            // rounded-up average of the die
            None => die / 2 + 1,
        };

        let fields = universal("hitdie", line, args);
        Ok(Self {
            id: fields.id,
            name: fields.name,
            comment: fields.comment,
            die,
            value,
        })
    }

    pub(crate) fn to_markdown(&self) -> String {
        if self.name.is_none() && self.comment.is_none() {
            return shorthand_markdown("Hit Die", &format!("d{}", self.die), &self.value.to_string());
        }

        MarkdownBuilder::new("Hit Die")
            .field("die", format_args!("d{}", self.die))
            .field("value", self.value)
            .optional_field("name", self.name.as_deref())
            .optional_field("comment", self.comment.as_deref())
            .finish()
    }
}

impl fmt::Display for HitDie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hit Die, d{}, value {}", self.die, self.value)
    }
}
