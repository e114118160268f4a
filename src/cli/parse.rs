//! The `parse` command: emit parsed directives and errors as JSON.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;

use crate::error::{Result, RulesError};
use crate::parser::{self, ParseOutcome};

/// Parse a rules file and emit its directives as JSON
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Rules file to parse; `-` reads from standard input
    pub file: PathBuf,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub fn run(args: ParseArgs) -> Result<ExitCode> {
    let outcome = if args.file.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        parser::parse(&content)
    } else {
        parser::parse_file(&args.file)?
    };

    println!("{}", to_json(&outcome, args.pretty)?);

    Ok(if outcome.errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn to_json(outcome: &ParseOutcome, pretty: bool) -> Result<String> {
    let result = if pretty {
        serde_json::to_string_pretty(outcome)
    } else {
        serde_json::to_string(outcome)
    };
    result.map_err(|e| RulesError::Serialize {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_json_shape() {
        let outcome = parser::parse("- Hit Die *d10* 6\n- Unknown Thing\n");

        let json: serde_json::Value = serde_json::from_str(&to_json(&outcome, false).unwrap()).unwrap();

        assert_eq!(json["directives"][0]["kind"], "hit_die");
        assert_eq!(json["directives"][0]["id"], "hitdie_1");
        assert_eq!(json["directives"][0]["die"], 10);
        assert_eq!(json["directives"][0]["value"], 6);
        assert_eq!(json["errors"][0]["line"], 2);
        assert_eq!(json["errors"][0]["text"], "Unknown directive: Unknown Thing");
    }

    #[test]
    fn test_json_override_rename() {
        let outcome = parser::parse("- Ability Score\n    - *ability* strength\n    - *override* 16\n");

        let json: serde_json::Value = serde_json::from_str(&to_json(&outcome, false).unwrap()).unwrap();

        assert_eq!(json["directives"][0]["kind"], "ability_score");
        assert_eq!(json["directives"][0]["override"], "16");
        assert_eq!(json["directives"][0]["value"], serde_json::Value::Null);
    }

    #[test]
    fn test_json_nested_choose() {
        let outcome = parser::parse(
            "- Choose _1_ Gear\n    - _Option_ rope\n        - Inventory _add_ Rope\n",
        );

        let json: serde_json::Value = serde_json::from_str(&to_json(&outcome, false).unwrap()).unwrap();

        assert_eq!(json["directives"][0]["kind"], "choose");
        assert_eq!(json["directives"][0]["options"][0]["name"], "rope");
        assert_eq!(
            json["directives"][0]["options"][0]["directives"][0]["kind"],
            "inventory"
        );
    }
}
