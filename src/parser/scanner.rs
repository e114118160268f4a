//! Directive block scanning.
//!
//! Directive blocks are only valid at the very start of a document or
//! immediately after a heading line. Blank lines and other bullet lines may
//! sit between the heading and the block; any other text makes the position
//! invalid and the bullets there are treated as ordinary Markdown.

/// Check whether `line` is a valid position for a directive block to start.
///
/// Scans backwards from the line: blank lines and dangling bullets are
/// skipped, a heading (`#...`) validates the position, anything else
/// invalidates it. The start of the document is always valid.
pub(crate) fn directive_position(lines: &[&str], line: usize) -> bool {
    if line == 0 {
        return true;
    }

    // look backwards to check the block starts correctly
    for index in (0..=line).rev() {
        let prev_line = lines[index].trim();
        if !prev_line.is_empty() {
            if prev_line.starts_with('#') {
                return true;
            }
            if prev_line.starts_with("- ") {
                continue;
            }
            return false;
        }
    }

    true
}

/// Whether a block header is a comment pseudo-directive (`- comment ...` or
/// `- # ...`, case-insensitive). Comment blocks are skipped entirely rather
/// than reported as unknown directives.
pub(crate) fn is_comment_block(line: &str) -> bool {
    let Some(rest) = line.trim().strip_prefix("- ") else {
        return false;
    };
    match rest.split_whitespace().next() {
        Some(word) => word.eq_ignore_ascii_case("comment") || word.starts_with('#'),
        None => false,
    }
}

/// Find the next directive block at or after `index`.
///
/// Returns the start index and the contiguous slice of lines making up the
/// block: the `- Directive` header plus every following indented sub-bullet.
/// The block ends at a blank line, a new un-indented bullet, or any
/// non-bullet text. Comment pseudo-directives are skipped silently.
pub(crate) fn next_directive_block<'a>(
    lines: &'a [&'a str],
    mut index: usize,
) -> Option<(usize, &'a [&'a str])> {
    while index < lines.len() {
        let line = lines[index];

        if !line.starts_with("- ") || !directive_position(lines, index) {
            index += 1;
            continue;
        }

        let start_index = index;
        index += 1;

        while index < lines.len() {
            let line = lines[index];
            let stripped = line.trim();

            if
            // block ends on blank lines,
            stripped.is_empty()
                // a new directive,
                || line.starts_with("- ")
                // or any non-argument text
                || !stripped.starts_with("- ")
            {
                break;
            }

            index += 1;
        }

        if is_comment_block(lines[start_index]) {
            continue;
        }

        return Some((start_index, &lines[start_index..index]));
    }

    None
}
