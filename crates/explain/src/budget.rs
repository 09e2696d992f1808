//! Word budget utilities: counting, whitespace normalization, truncation.
//!
//! A "word" is any whitespace-delimited token. Truncation always happens on
//! token boundaries and appends [`ELLIPSIS`] directly to the last kept token,
//! so a truncated text still counts exactly `limit` words.

use oneminute_core::ELLIPSIS;

/// Number of whitespace-delimited tokens in `text`.
pub fn count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Collapse every run of whitespace to a single space and trim the ends.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate `text` to at most `limit` words.
///
/// Returns the (possibly truncated) text and whether truncation happened.
/// Text already within the limit is returned unchanged. Re-applying with the
/// same limit is a no-op.
pub fn enforce(text: &str, limit: usize) -> (String, bool) {
    if count(text) <= limit {
        return (text.to_string(), false);
    }

    let mut truncated = text
        .split_whitespace()
        .take(limit)
        .collect::<Vec<_>>()
        .join(" ");
    truncated.push_str(ELLIPSIS);
    (truncated, true)
}
