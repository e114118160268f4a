//! The `extract` command: split a document into prose and directive text.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::parser;

/// Split a document into prose and directive text
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Rules file to extract from
    pub file: PathBuf,

    /// Print the directive text instead of the stripped prose
    #[arg(long)]
    pub directives: bool,
}

pub fn run(args: ExtractArgs) -> Result<()> {
    let (markdown, directives) = parser::extract_file(&args.file)?;

    if args.directives {
        print!("{directives}");
    } else {
        print!("{markdown}");
    }

    Ok(())
}
