//! The Ability Score directive: rolled values, modifiers and overrides.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::parser::{Arguments, ParseError};

use super::{missing, optional, shorthand_markdown, universal, MarkdownBuilder};

const ABILITIES: [&str; 6] = [
    "strength",
    "dexterity",
    "constitution",
    "intelligence",
    "wisdom",
    "charisma",
];

// strict formatting for values: "15", "+2", "-1"
static VALUE_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<sign>[+-])?(?P<number>\d+)$").unwrap());

// strict formatting for override arguments:
// "16", "+1", "minimum 19", "+2, maximum 20"
static OVERRIDE_FORMAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:(?P<modifier_sign>[+-])?(?P<value>\d+)(?:,\s*)?)?(?:(?P<constraint>minimum|maximum)\s+(?P<constraint_value>\d+))?$",
    )
    .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbilityScore {
    pub id: String,
    pub name: Option<String>,
    pub comment: Option<String>,
    pub ability: String,
    pub value: Option<String>,
    #[serde(rename = "override")]
    pub override_: Option<String>,
    pub minimum: Option<String>,
    /// An implicit maximum of 20 is a presentation default and stays out of
    /// the serialized form.
    #[serde(skip_serializing_if = "is_default_maximum")]
    pub maximum: Option<String>,
}

fn is_default_maximum(maximum: &Option<String>) -> bool {
    matches!(maximum, Some(value) if value == "20")
}

impl AbilityScore {
    pub(crate) fn new(line: usize, args: &Arguments) -> Result<Self, Vec<ParseError>> {
        let Some(ability_arg) = args.get("ability") else {
            return Err(vec![missing(line, "ability")]);
        };

        let ability = ability_arg.value.to_lowercase();
        if !ABILITIES.contains(&ability.as_str()) {
            return Err(vec![ParseError::new(
                ability_arg.line,
                format!("\"{}\" is not an ability.", ability_arg.value),
            )]);
        }

        let value_arg = args.get("value");
        let override_arg = args.get("override");
        match (value_arg, override_arg) {
            (None, None) => {
                return Err(vec![ParseError::new(
                    line,
                    "Either \"value\" or \"override\" must be specified.",
                )]);
            }
            (Some(_), Some(_)) => {
                return Err(vec![ParseError::new(
                    line,
                    "Only one of \"value\" and \"override\" can be specified.",
                )]);
            }
            _ => {}
        }

        // explicit minimum/maximum arguments are kept unless validation
        // derives its own
        let mut minimum = optional(args, "minimum");
        let mut maximum = optional(args, "maximum");
        let mut value = None;
        let mut override_ = None;

        if let Some(value_arg) = value_arg {
            let text = &value_arg.value;
            let caps = VALUE_FORMAT.captures(text).ok_or_else(|| {
                vec![ParseError::new(
                    value_arg.line,
                    format!("Value \"{text}\" is not a valid score or modifier."),
                )]
            })?;

            match caps.name("sign").map(|m| m.as_str()) {
                Some("+") => maximum = Some("20".to_string()),
                Some(_) => minimum = Some("1".to_string()),
                None => {
                    // 3-18 are the only possibilities for rolled abilities
                    let number: i64 = caps["number"].parse().map_err(|_| {
                        vec![ParseError::new(
                            value_arg.line,
                            format!("Value \"{text}\" is not a valid score or modifier."),
                        )]
                    })?;
                    if !(3..=18).contains(&number) {
                        return Err(vec![ParseError::new(
                            value_arg.line,
                            format!("Value \"{number}\" is out of range (3-18)."),
                        )]);
                    }
                }
            }
            value = Some(text.clone());
        }

        if let Some(override_arg) = override_arg {
            let text = &override_arg.value;
            let caps = OVERRIDE_FORMAT.captures(text).ok_or_else(|| {
                vec![ParseError::new(
                    override_arg.line,
                    format!("Override \"{text}\" is not a valid score or modifier."),
                )]
            })?;

            let constraint = caps.name("constraint").map(|m| m.as_str());
            let constraint_value = caps.name("constraint_value").map(|m| m.as_str());
            let number = caps.name("value").map(|m| m.as_str());
            let sign = caps.name("modifier_sign").map(|m| m.as_str());

            let mut resolved = text.clone();

            if let (Some(constraint), Some(constraint_value)) = (constraint, constraint_value) {
                let constraint_int: i64 = constraint_value.parse().map_err(|_| {
                    vec![ParseError::new(
                        override_arg.line,
                        format!("Override \"{text}\" is not a valid score or modifier."),
                    )]
                })?;
                if !(1..=30).contains(&constraint_int) {
                    return Err(vec![ParseError::new(
                        override_arg.line,
                        format!(
                            "Override \"{} {constraint_int}\" is out of range (1-30).",
                            constraint
                        ),
                    )]);
                }

                if constraint.eq_ignore_ascii_case("minimum") {
                    minimum = Some(constraint_value.to_string());
                } else {
                    maximum = Some(constraint_value.to_string());
                }
                if number.is_none() {
                    resolved = constraint_value.to_string();
                }
            }

            if let Some(number) = number {
                if let Some(sign) = sign {
                    resolved = format!("{sign}{number}");
                } else {
                    let number_int: i64 = number.parse().map_err(|_| {
                        vec![ParseError::new(
                            override_arg.line,
                            format!("Override \"{text}\" is not a valid score or modifier."),
                        )]
                    })?;
                    if !(1..=30).contains(&number_int) {
                        return Err(vec![ParseError::new(
                            override_arg.line,
                            format!("Override \"{number_int}\" is out of range (1-30)."),
                        )]);
                    }
                    resolved = number.to_string();
                }

                if constraint.is_none() {
                    if resolved.starts_with('+') {
                        maximum = Some("30".to_string());
                    } else if resolved.starts_with('-') {
                        minimum = Some("1".to_string());
                    }
                }
            }

            override_ = Some(resolved);
        }

        let fields = universal("abilityscore", line, args);
        Ok(Self {
            id: fields.id,
            name: fields.name,
            comment: fields.comment,
            ability,
            value,
            override_,
            minimum,
            maximum,
        })
    }

    /// Rebuild the override argument text from the resolved fields, so that
    /// rendering and re-parsing settle on the same record.
    fn override_description(&self, override_: &str) -> String {
        let constraint = if let Some(minimum) = &self.minimum {
            Some(format!("minimum {minimum}"))
        } else {
            self.maximum.as_ref().map(|maximum| format!("maximum {maximum}"))
        };

        match constraint {
            Some(constraint) => {
                if override_.starts_with(['+', '-']) {
                    format!("{override_}, {constraint}")
                } else if Some(override_) == self.constraint_value() {
                    constraint
                } else {
                    format!("{override_}, {constraint}")
                }
            }
            None => override_.to_string(),
        }
    }

    fn constraint_value(&self) -> Option<&str> {
        self.minimum.as_deref().or(self.maximum.as_deref())
    }

    /// Whether the stored minimum/maximum are exactly the implicit defaults
    /// the value's modifier sign would re-derive on parse.
    fn implicit_bounds(&self) -> bool {
        let (expected_min, expected_max) = match self.value.as_deref() {
            Some(value) if value.starts_with('+') => (None, Some("20")),
            Some(value) if value.starts_with('-') => (Some("1"), None),
            _ => (None, None),
        };
        self.minimum.as_deref() == expected_min && self.maximum.as_deref() == expected_max
    }

    pub(crate) fn to_markdown(&self) -> String {
        if let Some(value) = &self.value {
            if self.name.is_none() && self.comment.is_none() && self.implicit_bounds() {
                return shorthand_markdown("Ability Score", &self.ability, value);
            }
        }

        let builder = MarkdownBuilder::new("Ability Score").field("ability", &self.ability);
        let builder = match (&self.value, &self.override_) {
            (Some(value), _) => {
                let builder = builder.field("value", value);
                if self.implicit_bounds() {
                    builder
                } else {
                    builder
                        .optional_field("minimum", self.minimum.as_deref())
                        .optional_field("maximum", self.maximum.as_deref())
                }
            }
            (None, Some(override_)) => {
                builder.field("override", self.override_description(override_))
            }
            (None, None) => builder,
        };

        builder
            .optional_field("name", self.name.as_deref())
            .optional_field("comment", self.comment.as_deref())
            .finish()
    }
}

impl fmt::Display for AbilityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ability = self.ability.clone();
        if let Some(first) = ability.get_mut(0..1) {
            first.make_ascii_uppercase();
        }

        match &self.override_ {
            Some(override_) => write!(
                f,
                "Ability Score: {ability} {} (override)",
                self.override_description(override_)
            ),
            None => write!(
                f,
                "Ability Score: {ability} {}",
                self.value.as_deref().unwrap_or_default()
            ),
        }
    }
}
