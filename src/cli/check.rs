//! The `check` command: report parse errors with source context.

use std::collections::HashSet;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;

use crate::error::Result;
use crate::parser::{self, ParseError};

/// Check rules files for parsing errors
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Rules files to check; `-` reads from standard input
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Also report successful directives
    #[arg(long)]
    pub verbose: bool,
}

/// Source lines shown around each error, and the maximum gap between
/// errors reported as one group.
const CONTEXT_LINES: usize = 2;

pub fn run(args: CheckArgs) -> Result<ExitCode> {
    let failed = check_files(&args)?;
    Ok(if failed { ExitCode::from(1) } else { ExitCode::SUCCESS })
}

/// Returns true when any file failed to read or parse cleanly.
fn check_files(args: &CheckArgs) -> Result<bool> {
    let mut failed = false;

    for file in &args.files {
        let (label, content) = if file.as_os_str() == "-" {
            let mut content = String::new();
            std::io::stdin().read_to_string(&mut content)?;
            println!();
            ("<stdin>".to_string(), content)
        } else {
            match std::fs::read_to_string(file) {
                Ok(content) => (file.display().to_string(), content),
                Err(e) => {
                    println!("Error reading file '{}': {e}", file.display());
                    failed = true;
                    continue;
                }
            }
        };

        let outcome = parser::parse(&content);

        if !outcome.errors.is_empty() || args.verbose {
            println!("{label}: {} errors", outcome.errors.len());
        }
        if args.verbose && !outcome.directives.is_empty() {
            println!("+ {} directives:", outcome.directives.len());
            for directive in &outcome.directives {
                println!("        {directive}");
            }
            if !outcome.errors.is_empty() {
                println!();
            }
        }

        if !outcome.errors.is_empty() {
            failed = true;
            report_errors(&content, &outcome.errors);

            if args.files.len() > 1 {
                println!();
            }
        }
    }

    Ok(failed)
}

/// Print errors in line-adjacent groups, each followed by a source window
/// with the offending lines marked.
fn report_errors(content: &str, errors: &[ParseError]) {
    let content_lines: Vec<&str> = content.split('\n').collect();
    let error_lines: HashSet<usize> = errors.iter().map(|e| e.line).collect();

    let groups = group_errors(errors);

    for (count, group) in groups.iter().enumerate() {
        for error in group {
            println!("- {}: {}", error.line, error.text);
        }

        let first = group[0].line;
        let last = group[group.len() - 1].line;
        let window_start = first.saturating_sub(CONTEXT_LINES).max(1);
        let window_end = (last + CONTEXT_LINES).min(content_lines.len());

        for line in window_start..=window_end {
            let marker = if error_lines.contains(&line) { ">" } else { " " };
            println!("    {marker:2} {line:4}: {}", content_lines[line - 1]);
        }

        if count < groups.len() - 1 {
            println!();
        }
    }
}

/// Split sorted errors into groups whose context windows would touch.
fn group_errors(errors: &[ParseError]) -> Vec<Vec<&ParseError>> {
    let mut groups: Vec<Vec<&ParseError>> = Vec::new();

    for error in errors {
        match groups.last_mut() {
            Some(group) if error.line.saturating_sub(group[group.len() - 1].line) <= CONTEXT_LINES => {
                group.push(error);
            }
            _ => groups.push(vec![error]),
        }
    }

    groups
}
