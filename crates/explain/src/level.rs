//! Audience-level adaptation for reference text.
//!
//! Lower levels keep fewer leading sentences. Nothing is summarized; the
//! tail is simply dropped.

use oneminute_core::AudienceLevel;

/// Clause appended to the single sentence kept for beginners.
pub const BEGINNER_CLAUSE: &str = "In simple terms, this explains the basic idea.";

/// Split on periods, trimming each piece and discarding empties.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Maximum number of source sentences kept for a level.
pub fn sentence_limit(level: AudienceLevel) -> usize {
    match level {
        AudienceLevel::Beginner => 1,
        AudienceLevel::Intermediate => 3,
        AudienceLevel::Advanced => 5,
    }
}

/// Reshape normalized `text` for `level`. Returns the input unchanged when
/// it contains no sentences.
pub fn adapt(text: &str, level: AudienceLevel) -> String {
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return text.to_string();
    }

    match level {
        AudienceLevel::Beginner => format!("{}. {BEGINNER_CLAUSE}", sentences[0]),
        AudienceLevel::Intermediate | AudienceLevel::Advanced => {
            let keep = sentence_limit(level).min(sentences.len());
            format!("{}.", sentences[..keep].join(". "))
        }
    }
}
