use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use rulesmd::cli::{Cli, Commands};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Check(args) => rulesmd::cli::check::run(args)?,
        Commands::Extract(args) => {
            rulesmd::cli::extract::run(args)?;
            ExitCode::SUCCESS
        }
        Commands::Parse(args) => rulesmd::cli::parse::run(args)?,
        Commands::Completions(args) => {
            rulesmd::cli::completions::run(args)?;
            ExitCode::SUCCESS
        }
    };

    Ok(code)
}
