//! rulesmd - Markdown rule directive parser
//!
//! A library for parsing rule directives embedded in Markdown documents.
//! Directives are bulleted declarations (`- Hit Die *d10* 6`) placed at the
//! start of a document or directly after a heading; everything else in the
//! document is ordinary prose. Parsing validates each directive against its
//! kind's schema and reports positioned errors without giving up on the
//! rest of the document.

pub mod cli;
pub mod directives;
pub mod error;
pub mod parser;

pub use directives::{
    AbilityScore, Action, Choice, Choose, ChooseOption, Directive, Featureless, HitDie, Inventory,
    Language, Proficiency, Register, Resource, Set,
};
pub use error::{Result, RulesError};
pub use parser::{extract, extract_file, parse, parse_file, ParseError, ParseOutcome};
