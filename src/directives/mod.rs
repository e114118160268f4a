//! Directive kinds: schemas, validators and Markdown renderers.
//!
//! Every kind owns its required-argument checks, value validation,
//! normalization and a `to_markdown` routine that renders the directive back
//! out, preferring the compact shorthand form when nothing but the shorthand
//! fields is populated. The kind set is closed: new kinds are added to
//! [`REGISTRY`] and the [`Directive`] enum together.

mod ability_score;
mod action;
mod choice;
mod choose;
mod featureless;
mod hit_die;
mod inventory;
mod language;
mod proficiency;
mod register;
mod resource;
mod set;

use std::fmt;

use serde::Serialize;

pub use ability_score::AbilityScore;
pub use action::Action;
pub use choice::Choice;
pub use choose::{Choose, ChooseOption};
pub use featureless::Featureless;
pub use hit_die::HitDie;
pub use inventory::Inventory;
pub use language::Language;
pub use proficiency::Proficiency;
pub use register::Register;
pub use resource::Resource;
pub use set::Set;

use crate::parser::{Arguments, ParseError, RawArgument};

/// One validated rule declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Directive {
    AbilityScore(AbilityScore),
    Action(Action),
    BonusAction(Action),
    Reaction(Action),
    Choice(Choice),
    Choose(Choose),
    Featureless(Featureless),
    HitDie(HitDie),
    Inventory(Inventory),
    Language(Language),
    Proficiency(Proficiency),
    Register(Register),
    Resource(Resource),
    Set(Set),
}

impl Directive {
    /// Render the directive back to canonical Markdown.
    pub fn to_markdown(&self) -> String {
        match self {
            Directive::AbilityScore(d) => d.to_markdown(),
            Directive::Action(d) => d.to_markdown("Action"),
            Directive::BonusAction(d) => d.to_markdown("Bonus Action"),
            Directive::Reaction(d) => d.to_markdown("Reaction"),
            Directive::Choice(d) => d.to_markdown(),
            Directive::Choose(d) => d.to_markdown(),
            Directive::Featureless(d) => d.to_markdown(),
            Directive::HitDie(d) => d.to_markdown(),
            Directive::Inventory(d) => d.to_markdown(),
            Directive::Language(d) => d.to_markdown(),
            Directive::Proficiency(d) => d.to_markdown(),
            Directive::Register(d) => d.to_markdown(),
            Directive::Resource(d) => d.to_markdown(),
            Directive::Set(d) => d.to_markdown(),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Directive::AbilityScore(d) => &d.id,
            Directive::Action(d) | Directive::BonusAction(d) | Directive::Reaction(d) => &d.id,
            Directive::Choice(d) => &d.id,
            Directive::Choose(d) => &d.id,
            Directive::Featureless(d) => &d.id,
            Directive::HitDie(d) => &d.id,
            Directive::Inventory(d) => &d.id,
            Directive::Language(d) => &d.id,
            Directive::Proficiency(d) => &d.id,
            Directive::Register(d) => &d.id,
            Directive::Resource(d) => &d.id,
            Directive::Set(d) => &d.id,
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::AbilityScore(d) => d.fmt(f),
            Directive::Action(d) => write!(f, "Action: {}", d.name),
            Directive::BonusAction(d) => write!(f, "Bonus Action: {}", d.name),
            Directive::Reaction(d) => write!(f, "Reaction: {}", d.name),
            Directive::Choice(d) => d.fmt(f),
            Directive::Choose(d) => d.fmt(f),
            Directive::Featureless(d) => d.fmt(f),
            Directive::HitDie(d) => d.fmt(f),
            Directive::Inventory(d) => d.fmt(f),
            Directive::Language(d) => d.fmt(f),
            Directive::Proficiency(d) => d.fmt(f),
            Directive::Register(d) => d.fmt(f),
            Directive::Resource(d) => d.fmt(f),
            Directive::Set(d) => d.fmt(f),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    AbilityScore,
    Action,
    BonusAction,
    Reaction,
    Choice,
    Choose,
    Featureless,
    HitDie,
    Inventory,
    Language,
    Proficiency,
    Register,
    Resource,
    Set,
}

/// Registration record for one directive kind.
pub(crate) struct KindInfo {
    pub kind: Kind,
    /// Canonical directive name as written in documents.
    pub name: &'static str,
    /// Prefix used for generated ids (`hitdie_12`).
    pub slug: &'static str,
    /// Argument the emphasis-wrapped shorthand token maps onto.
    pub shorthand_key: &'static str,
    /// Argument the shorthand trailing text maps onto.
    pub shorthand_value: &'static str,
    /// Nested kinds receive the raw block lines instead of pre-parsed
    /// arguments.
    pub nested: bool,
}

const REGISTRY: &[KindInfo] = &[
    KindInfo {
        kind: Kind::AbilityScore,
        name: "Ability Score",
        slug: "abilityscore",
        shorthand_key: "ability",
        shorthand_value: "value",
        nested: false,
    },
    KindInfo {
        kind: Kind::Action,
        name: "Action",
        slug: "action",
        shorthand_key: "name",
        shorthand_value: "description",
        nested: false,
    },
    KindInfo {
        kind: Kind::BonusAction,
        name: "Bonus Action",
        slug: "bonusaction",
        shorthand_key: "name",
        shorthand_value: "description",
        nested: false,
    },
    KindInfo {
        kind: Kind::Reaction,
        name: "Reaction",
        slug: "reaction",
        shorthand_key: "name",
        shorthand_value: "description",
        nested: false,
    },
    KindInfo {
        kind: Kind::Choice,
        name: "Choice",
        slug: "choice",
        shorthand_key: "name",
        shorthand_value: "choice",
        nested: false,
    },
    KindInfo {
        kind: Kind::Choose,
        name: "Choose",
        slug: "choose",
        shorthand_key: "count",
        shorthand_value: "name",
        nested: true,
    },
    KindInfo {
        kind: Kind::Featureless,
        name: "Featureless",
        slug: "featureless",
        shorthand_key: "name",
        shorthand_value: "value",
        nested: false,
    },
    KindInfo {
        kind: Kind::HitDie,
        name: "Hit Die",
        slug: "hitdie",
        shorthand_key: "die",
        shorthand_value: "value",
        nested: false,
    },
    KindInfo {
        kind: Kind::Inventory,
        name: "Inventory",
        slug: "inventory",
        shorthand_key: "action",
        shorthand_value: "item",
        nested: false,
    },
    KindInfo {
        kind: Kind::Language,
        name: "Language",
        slug: "language",
        shorthand_key: "name",
        shorthand_value: "value",
        nested: false,
    },
    KindInfo {
        kind: Kind::Proficiency,
        name: "Proficiency",
        slug: "proficiency",
        shorthand_key: "type",
        shorthand_value: "value",
        nested: false,
    },
    KindInfo {
        kind: Kind::Register,
        name: "Register",
        slug: "register",
        shorthand_key: "type",
        shorthand_value: "name",
        nested: false,
    },
    KindInfo {
        kind: Kind::Resource,
        name: "Resource",
        slug: "resource",
        shorthand_key: "name",
        shorthand_value: "uses",
        nested: false,
    },
    KindInfo {
        kind: Kind::Set,
        name: "Set",
        slug: "set",
        shorthand_key: "key",
        shorthand_value: "value",
        nested: false,
    },
];

/// Look up a directive kind by name, case-insensitively.
pub(crate) fn lookup(name: &str) -> Option<&'static KindInfo> {
    REGISTRY.iter().find(|info| info.name.eq_ignore_ascii_case(name))
}

impl KindInfo {
    /// Run the kind's validator. Flat kinds read pre-parsed arguments;
    /// nested kinds also consume the raw sub-lines of their block, with
    /// `args` carrying any shorthand-derived arguments.
    pub(crate) fn validate(
        &self,
        line: usize,
        args: Arguments,
        sub_lines: &[&str],
    ) -> Result<Directive, Vec<ParseError>> {
        match self.kind {
            Kind::AbilityScore => AbilityScore::new(line, &args).map(Directive::AbilityScore),
            Kind::Action => Action::new(self, line, &args).map(Directive::Action),
            Kind::BonusAction => Action::new(self, line, &args).map(Directive::BonusAction),
            Kind::Reaction => Action::new(self, line, &args).map(Directive::Reaction),
            Kind::Choice => Choice::new(line, &args).map(Directive::Choice),
            Kind::Choose => Choose::new(line, args, sub_lines).map(Directive::Choose),
            Kind::Featureless => Ok(Directive::Featureless(Featureless::new(line, &args))),
            Kind::HitDie => HitDie::new(line, &args).map(Directive::HitDie),
            Kind::Inventory => Inventory::new(line, &args).map(Directive::Inventory),
            Kind::Language => Language::new(line, &args).map(Directive::Language),
            Kind::Proficiency => Proficiency::new(line, &args).map(Directive::Proficiency),
            Kind::Register => Register::new(line, &args).map(Directive::Register),
            Kind::Resource => Resource::new(line, &args).map(Directive::Resource),
            Kind::Set => Set::new(line, &args).map(Directive::Set),
        }
    }
}

/// Universal fields shared by every directive kind.
pub(crate) struct Universal {
    pub id: String,
    pub name: Option<String>,
    pub comment: Option<String>,
}

/// Resolve id, name and comment for a block. An explicit `id` argument
/// overrides the generated `{slug}_{line}` form.
pub(crate) fn universal(slug: &str, line: usize, args: &Arguments) -> Universal {
    Universal {
        id: present(args, "id")
            .map(|a| a.value.clone())
            .unwrap_or_else(|| format!("{slug}_{line}")),
        name: optional(args, "name"),
        comment: optional(args, "comment"),
    }
}

/// An argument counts as present only with a non-empty value.
pub(crate) fn present<'a>(args: &'a Arguments, key: &str) -> Option<&'a RawArgument> {
    args.get(key).filter(|a| !a.value.is_empty())
}

pub(crate) fn optional(args: &Arguments, key: &str) -> Option<String> {
    present(args, key).map(|a| a.value.clone())
}

pub(crate) fn missing(line: usize, key: &str) -> ParseError {
    ParseError::new(line, format!("Required \"{key}\" argument is missing."))
}

/// Shorthand one-liner: `- Name _key_ value`. The trailing value is omitted
/// entirely when empty, as for Language.
pub(crate) fn shorthand_markdown(name: &str, key: &str, value: &str) -> String {
    if value.is_empty() {
        format!("- {name} _{key}_\n")
    } else {
        format!("- {name} _{key}_ {value}\n")
    }
}

/// Accumulates the full multi-line bullet rendering of a directive.
pub(crate) struct MarkdownBuilder {
    lines: Vec<String>,
}

impl MarkdownBuilder {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            lines: vec![format!("- {name}")],
        }
    }

    pub(crate) fn field(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.lines.push(format!("  - _{key}_ {value}"));
        self
    }

    pub(crate) fn optional_field(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.field(key, value),
            None => self,
        }
    }

    pub(crate) fn finish(self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}
