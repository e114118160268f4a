//! The Resource directive: a limited-use pool such as Second Wind or wand
//! charges.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::parser::{Arguments, ParseError};

use super::{missing, optional, present, shorthand_markdown, universal, MarkdownBuilder};

const RENEW_PERIODS: [&str; 3] = ["rest", "long rest", "dawn"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub comment: Option<String>,
    pub uses: String,
    /// Kept as written; folded to lower case when serialized.
    #[serde(serialize_with = "lowercase_opt")]
    pub renew: Option<String>,
    pub regain: Option<String>,
}

fn lowercase_opt<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => serializer.serialize_some(&value.to_lowercase()),
        None => serializer.serialize_none(),
    }
}

impl Resource {
    pub(crate) fn new(line: usize, args: &Arguments) -> Result<Self, Vec<ParseError>> {
        let mut errors = Vec::new();
        if present(args, "name").is_none() {
            errors.push(missing(line, "name"));
        }
        if present(args, "uses").is_none() {
            errors.push(missing(line, "uses"));
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        if let Some(renew_arg) = args.get("renew") {
            if !RENEW_PERIODS.contains(&renew_arg.value.to_lowercase().as_str()) {
                return Err(vec![ParseError::new(
                    renew_arg.line,
                    format!(
                        "Renew \"{}\" should be either {}.",
                        renew_arg.value,
                        RENEW_PERIODS.join(", ")
                    ),
                )]);
            }
        }

        let fields = universal("resource", line, args);
        Ok(Self {
            id: fields.id,
            name: fields.name.unwrap_or_default(),
            comment: fields.comment,
            uses: optional(args, "uses").unwrap_or_default(),
            renew: optional(args, "renew"),
            regain: optional(args, "regain"),
        })
    }

    pub(crate) fn to_markdown(&self) -> String {
        if self.renew.is_none() && self.regain.is_none() && self.comment.is_none() {
            return shorthand_markdown("Resource", &self.name, &self.uses);
        }

        MarkdownBuilder::new("Resource")
            .field("uses", &self.uses)
            .optional_field("renew", self.renew.as_deref())
            .optional_field("regain", self.regain.as_deref())
            .field("name", &self.name)
            .optional_field("comment", self.comment.as_deref())
            .finish()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Resource: {} ({})", self.name, self.uses)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::directives::Directive;
    use crate::parser::{parse, ParseError};

    fn single(content: &str) -> super::Resource {
        let outcome = parse(content);
        assert_eq!(outcome.errors, vec![]);
        match outcome.directives.as_slice() {
            [Directive::Resource(d)] => d.clone(),
            other => panic!("expected one resource, got {other:?}"),
        }
    }

    #[test]
    fn test_basic_resource() {
        let d = single("- Resource\n    - *name* Second Wind\n    - *uses* 1\n    - *renew* rest\n");

        assert_eq!(d.id, "resource_1");
        assert_eq!(d.name, "Second Wind");
        assert_eq!(d.uses, "1");
        assert_eq!(d.renew.as_deref(), Some("rest"));
        assert_eq!(d.to_string(), "Resource: Second Wind (1)");
    }

    #[test]
    fn test_shorthand() {
        let d = single("- Resource _Charm of the Storm_ 3\n");

        assert_eq!(d.name, "Charm of the Storm");
        assert_eq!(d.uses, "3");
        assert_eq!(d.renew, None);
    }

    #[test]
    fn test_regain() {
        let d = single(
            "- Resource\n    - *name* Wand of Magic Missiles\n    - *uses* 7\n    - *renew* dawn\n    - *regain* 1d6 + 1\n",
        );

        assert_eq!(d.regain.as_deref(), Some("1d6 + 1"));
    }

    #[test]
    fn test_renew_periods() {
        for period in ["rest", "long rest", "dawn", "Long Rest"] {
            let content = format!("- Resource\n    - *name* Rage\n    - *uses* 2\n    - *renew* {period}\n");

            let outcome = parse(&content);

            assert_eq!(outcome.errors, vec![]);
        }
    }

    #[test]
    fn test_invalid_renew() {
        let outcome = parse("- Resource\n    - *name* Rage\n    - *uses* 2\n    - *renew* weekly\n");

        assert_eq!(
            outcome.errors,
            vec![ParseError::new(
                4,
                "Renew \"weekly\" should be either rest, long rest, dawn."
            )]
        );
    }

    #[test]
    fn test_missing_arguments_are_cumulative() {
        let outcome = parse("- Resource\n");

        assert_eq!(
            outcome.errors,
            vec![
                ParseError::new(1, "Required \"name\" argument is missing."),
                ParseError::new(1, "Required \"uses\" argument is missing."),
            ]
        );
    }

    #[test]
    fn test_to_markdown_full() {
        let d = single(
            "- Resource\n    - *name* Wand of Magic Missiles\n    - *uses* 7\n    - *renew* dawn\n    - *regain* 1d6 + 1\n",
        );

        assert_eq!(
            d.to_markdown(),
            "- Resource\n  - _uses_ 7\n  - _renew_ dawn\n  - _regain_ 1d6 + 1\n  - _name_ Wand of Magic Missiles\n"
        );
    }

    #[test]
    fn test_to_markdown_shorthand() {
        let d = single("- Resource _Charm of the Storm_ 3\n");

        assert_eq!(d.to_markdown(), "- Resource _Charm of the Storm_ 3\n");
    }
}
