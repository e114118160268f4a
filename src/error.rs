use miette::Diagnostic;
use thiserror::Error;

/// Main error type for rulesmd operations.
///
/// Directive-level problems (bad arguments, unknown directives, range
/// violations) are not represented here. Those are collected as positioned
/// [`ParseError`](crate::parser::ParseError) records so one document can
/// report every problem it contains. This type covers operations that fail
/// as a whole, such as reading a file.
#[derive(Error, Diagnostic, Debug)]
pub enum RulesError {
    #[error("IO error: {0}")]
    #[diagnostic(code(rulesmd::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {}: {message}", path.display())]
    #[diagnostic(code(rulesmd::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Serialization error: {message}")]
    #[diagnostic(code(rulesmd::serialize))]
    Serialize { message: String },
}

pub type Result<T> = std::result::Result<T, RulesError>;
