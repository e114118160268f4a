pub mod check;
pub mod completions;
pub mod extract;
pub mod parse;

use clap::{Parser, Subcommand};

/// rulesmd - Markdown rule directive parser
#[derive(Parser, Debug)]
#[command(name = "rulesmd")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check rules files for parsing errors
    Check(check::CheckArgs),

    /// Split a document into prose and directive text
    Extract(extract::ExtractArgs),

    /// Parse a rules file and emit its directives as JSON
    Parse(parse::ParseArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
