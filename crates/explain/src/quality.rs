//! Quality gate: decides whether a candidate explanation is usable.
//!
//! The gate only ever answers yes or no. A rejected candidate makes the
//! pipeline move on to the next tier.

use oneminute_config::QualityConfig;
use oneminute_core::MIN_WORDS;

use crate::budget;

/// An acceptability policy for candidate explanation text.
pub trait QualityGate: Send + Sync {
    /// True if `text` should not be shown to the user.
    fn is_unacceptable(&self, text: &str) -> bool;
}

/// Rejects text that is too short or contains a known stub phrase.
///
/// The default phrase list catches encyclopedia disambiguation pages
/// ("Mercury may refer to: ...").
#[derive(Debug, Clone)]
pub struct DefaultQualityGate {
    min_words: usize,
    /// Lowercased
    reject_phrases: Vec<String>,
}

impl DefaultQualityGate {
    pub fn new<I, S>(min_words: usize, reject_phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            min_words,
            reject_phrases: reject_phrases
                .into_iter()
                .map(|p| p.as_ref().trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    pub fn from_config(config: &QualityConfig) -> Self {
        Self::new(config.min_words, &config.reject_phrases)
    }

    pub fn min_words(&self) -> usize {
        self.min_words
    }
}

impl Default for DefaultQualityGate {
    fn default() -> Self {
        Self::new(MIN_WORDS, ["may refer to"])
    }
}

impl QualityGate for DefaultQualityGate {
    fn is_unacceptable(&self, text: &str) -> bool {
        if budget::count(text) < self.min_words {
            return true;
        }
        let lowered = text.to_lowercase();
        self.reject_phrases
            .iter()
            .any(|phrase| lowered.contains(phrase.as_str()))
    }
}
