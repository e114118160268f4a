//! Key-value argument line extraction.
//!
//! Argument lines take the form `- *key* value`, where the key may be
//! wrapped in any of the four Markdown emphasis styles. Keys are folded to
//! lower case; values are kept verbatim.

/// Emphasis marker pairs, checked longest first so `**` is not mistaken for
/// two single `*` markers.
const MARKERS: [&str; 4] = ["**", "__", "*", "_"];

/// Extract a `(key, value)` pair from a trimmed argument line.
///
/// The line must start with `- `; the first whitespace-delimited token must
/// be wrapped in matching emphasis markers. Returns `None` when there is no
/// usable key (the caller reports that as an error). The value may be empty.
pub(crate) fn extract_key_value(line: &str) -> Option<(String, String)> {
    let rest = line.trim().strip_prefix("- ")?.trim();

    let (first_word, value) = match rest.find(char::is_whitespace) {
        Some(pos) => (&rest[..pos], rest[pos..].trim_start()),
        None => (rest, ""),
    };

    for marker in MARKERS {
        if first_word.len() >= marker.len() * 2
            && first_word.starts_with(marker)
            && first_word.ends_with(marker)
        {
            let key = &first_word[marker.len()..first_word.len() - marker.len()];
            if key.is_empty() {
                return None;
            }
            return Some((key.to_lowercase(), value.to_string()));
        }
    }

    None
}
