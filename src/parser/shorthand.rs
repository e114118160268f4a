//! Shorthand directive notation matching.
//!
//! The shorthand form packs a directive and its two main arguments into one
//! line: `Hit Die *d10* 8` or `Choice _First Equipment Choice_ chain mail`.
//! The emphasis-wrapped token and the trailing text map onto the directive
//! kind's declared shorthand key and value fields.

use std::sync::LazyLock;

use regex::Regex;

/// A successful shorthand match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ShorthandMatch {
    /// The directive name (the words before the emphasis token).
    pub name: String,
    /// Inner text of the emphasis-wrapped token, case preserved.
    pub key: String,
    /// Trailing text after the token; may be empty.
    pub value: String,
}

/// One pattern per emphasis style, tried in priority order. Opening and
/// closing markers must be identical; a mismatched pair like `**d6_` fails
/// every pattern and the caller treats the whole line as a directive name.
/// The key closes at the first marker followed by whitespace or end of
/// line, so marker characters inside the value never bleed into the key.
static PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(r"^(?P<name>.+?)\s+\*\*(?P<key>.+?)\*\*(?:\s+(?P<value>.*))?$").unwrap(),
        Regex::new(r"^(?P<name>.+?)\s+__(?P<key>.+?)__(?:\s+(?P<value>.*))?$").unwrap(),
        Regex::new(r"^(?P<name>.+?)\s+\*(?P<key>.+?)\*(?:\s+(?P<value>.*))?$").unwrap(),
        Regex::new(r"^(?P<name>.+?)\s+_(?P<key>.+?)_(?:\s+(?P<value>.*))?$").unwrap(),
    ]
});

/// Try to match the shorthand notation against a block header (the text
/// after the leading `- `).
pub(crate) fn match_shorthand(text: &str) -> Option<ShorthandMatch> {
    for pattern in PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            return Some(ShorthandMatch {
                name: caps["name"].trim().to_string(),
                key: caps["key"].to_string(),
                value: caps
                    .name("value")
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default(),
            });
        }
    }

    None
}
