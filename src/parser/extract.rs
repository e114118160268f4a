//! Splitting documents into prose and directive text.
//!
//! Extraction reuses the block scanner, so the same lines are classified as
//! directives here as would be parsed by [`parse`](crate::parser::parse).
//! Comment bullets are not directive blocks and stay with the prose.

use std::path::Path;

use crate::error::{Result, RulesError};
use crate::parser::scanner;

/// Split `content` into `(markdown, directives)` strings.
///
/// Directive blocks are collected verbatim into the second string; every
/// other line stays in the first. Blank lines between a section heading and
/// its directive block are dropped so headings do not trail empty space once
/// their directives are removed. Both outputs end with a newline when
/// non-empty.
pub fn extract(content: &str) -> (String, String) {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut markdown_lines: Vec<&str> = Vec::new();
    let mut directive_lines: Vec<&str> = Vec::new();

    let mut last_index = 0;
    while let Some((index, block)) = scanner::next_directive_block(&lines, last_index) {
        directive_lines.extend_from_slice(block);

        let section_start = (0..=index)
            .rev()
            .find(|&lookback| lines[lookback].trim().starts_with('#'))
            .unwrap_or(0);

        for (copy, &line) in lines.iter().enumerate().take(index).skip(last_index) {
            if copy >= section_start && line.trim().is_empty() {
                continue;
            }
            markdown_lines.push(line);
        }

        last_index = index + block.len();
    }

    markdown_lines.extend_from_slice(&lines[last_index..]);

    (join(&markdown_lines), join(&directive_lines))
}

/// Run [`extract`] on a file's content.
pub fn extract_file(path: impl AsRef<Path>) -> Result<(String, String)> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| RulesError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(extract(&content))
}

fn join(lines: &[&str]) -> String {
    let mut joined = lines.join("\n");
    if !joined.is_empty() && !joined.ends_with('\n') {
        joined.push('\n');
    }
    joined
}
