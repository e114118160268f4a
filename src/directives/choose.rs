//! The Choose directive: a decision still to be made, with named options
//! carrying their own nested directives.
//!
//! Choose is the one nested kind: its validator receives the raw sub-lines
//! of the block, reads leading key-value arguments until the first
//! `option`, then parses each option body as a fresh document. Nested
//! directive ids are local to their option; nested error lines are re-based
//! to the enclosing document.

use std::fmt;

use serde::Serialize;

use crate::parser::{self, keyvalue, scanner, Arguments, ParseError, RawArgument};

use super::{missing, optional, present, universal, Directive};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChooseOption {
    pub name: String,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choose {
    pub id: String,
    pub name: Option<String>,
    pub comment: Option<String>,
    pub count: i64,
    pub description: Option<String>,
    pub options: Vec<ChooseOption>,
}

impl Choose {
    pub(crate) fn new(
        line: usize,
        mut args: Arguments,
        sub_lines: &[&str],
    ) -> Result<Self, Vec<ParseError>> {
        // arguments run until the first option; sub-line arguments override
        // shorthand-derived ones
        let mut options_start = sub_lines.len();
        for (offset, sub_line) in sub_lines.iter().enumerate() {
            if let Some((key, value)) = keyvalue::extract_key_value(sub_line) {
                if key == "option" {
                    options_start = offset;
                    break;
                }
                args.insert(
                    key,
                    RawArgument {
                        value,
                        line: line + 1 + offset,
                    },
                );
            }
        }

        let Some(count_arg) = present(&args, "count") else {
            return Err(vec![missing(line, "count")]);
        };
        let count = match count_arg.value.trim().parse::<i64>() {
            Ok(count) if count >= 1 => count,
            Ok(count) => {
                return Err(vec![ParseError::new(
                    count_arg.line,
                    format!("Count \"{count}\" should be a positive integer."),
                )]);
            }
            Err(_) => {
                return Err(vec![ParseError::new(
                    count_arg.line,
                    format!(
                        "Count \"{}\" should be a positive integer.",
                        count_arg.value
                    ),
                )]);
            }
        };

        let (options, option_errors) =
            parse_options(&sub_lines[options_start..], line + 1 + options_start);
        if !option_errors.is_empty() {
            return Err(option_errors);
        }
        if (options.len() as i64) < count {
            return Err(vec![ParseError::new(
                line,
                "Not enough options to choose from.",
            )]);
        }

        let fields = universal("choose", line, &args);
        Ok(Self {
            id: fields.id,
            name: fields.name,
            comment: fields.comment,
            count,
            description: optional(&args, "description"),
            options,
        })
    }

    pub(crate) fn to_markdown(&self) -> String {
        let mut lines = Vec::new();

        if self.name.is_some() && self.description.is_none() && self.comment.is_none() {
            lines.push(format!(
                "- Choose _{}_ {}",
                self.count,
                self.name.as_deref().unwrap_or_default()
            ));
        } else if self.name.is_none() {
            lines.push(format!("- Choose _{}_", self.count));
        } else {
            lines.push("- Choose".to_string());
            lines.push(format!("    - _Count_ {}", self.count));
            if let Some(name) = &self.name {
                lines.push(format!("    - _Name_ {name}"));
            }
            if let Some(description) = &self.description {
                lines.push(format!("    - _Description_ {description}"));
            }
        }

        for option in &self.options {
            lines.push(format!("    - _Option_ {}", option.name));
            for directive in &option.directives {
                let markdown = directive.to_markdown();
                for rendered in markdown.trim().split('\n') {
                    lines.push(format!("        {rendered}"));
                }
            }
        }

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}

impl fmt::Display for Choose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name_part = self
            .name
            .as_deref()
            .map(|name| format!("{name} "))
            .unwrap_or_default();
        write!(
            f,
            "Choose: {name_part}({} from {} options)",
            self.count,
            self.options.len()
        )
    }
}

/// Parse the option region of a Choose block. `base` is the absolute
/// 1-based line number of `lines[0]`.
fn parse_options(lines: &[&str], base: usize) -> (Vec<ChooseOption>, Vec<ParseError>) {
    let dedented = dedent(lines);
    let lines: Vec<&str> = dedented.iter().map(String::as_str).collect();

    let mut options = Vec::new();
    let mut errors = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        let actual_line = base + index;
        let kv = keyvalue::extract_key_value(lines[index]);

        if let Some((key, option_name)) = &kv {
            if key.as_str() == "option" {
                if let Some((block_index, block)) = scanner::next_directive_block(&lines, index) {
                    let body = dedent(&block[1..]);
                    let body_lines: Vec<&str> = body.iter().map(String::as_str).collect();
                    let outcome = parser::parse_lines(&body_lines);

                    if !outcome.errors.is_empty() {
                        let header_line = base + block_index;
                        errors.extend(
                            outcome
                                .errors
                                .into_iter()
                                .map(|e| ParseError::new(header_line + e.line, e.text)),
                        );
                    } else if outcome.directives.is_empty() {
                        errors.push(ParseError::new(
                            actual_line,
                            "Option must contain at least one directive.",
                        ));
                    } else {
                        options.push(ChooseOption {
                            name: option_name.clone(),
                            directives: outcome.directives,
                        });
                    }

                    index = block_index + block.len();
                    continue;
                }
            }
        }

        index += 1;
        if !options.is_empty() {
            if kv.is_some() {
                errors.push(ParseError::new(actual_line, "Arguments come before options."));
            } else if lines[index - 1].trim().starts_with("- ") {
                errors.push(ParseError::new(
                    actual_line,
                    "Directives must be inside option.",
                ));
            }
        }
    }

    (options, errors)
}

/// Strip the common leading whitespace from a group of lines.
fn dedent(lines: &[&str]) -> Vec<String> {
    let margin = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|l| l.get(margin..).unwrap_or("").to_string())
        .collect()
}
