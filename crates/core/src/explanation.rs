//! Explanation domain types: topics, audience levels, results.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Soft length target. Used for the pre-emptive reference trim and for
/// display, never enforced on the final text.
pub const TARGET_WORDS: usize = 140;

/// Hard ceiling on the word count of every returned explanation.
pub const HARD_MAX_WORDS: usize = 150;

/// Quality floor: anything shorter is not a usable explanation.
pub const MIN_WORDS: usize = 25;

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "…";

/// A non-empty, trimmed topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic(String);

impl Topic {
    /// Trim the input and reject it if nothing is left.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyTopic);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of whitespace-delimited words in the topic.
    pub fn word_count(&self) -> usize {
        self.0.split_whitespace().count()
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Topic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The audience an explanation is written for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudienceLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl AudienceLevel {
    pub const ALL: [AudienceLevel; 3] = [
        AudienceLevel::Beginner,
        AudienceLevel::Intermediate,
        AudienceLevel::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AudienceLevel::Beginner => "Beginner",
            AudienceLevel::Intermediate => "Intermediate",
            AudienceLevel::Advanced => "Advanced",
        }
    }

    /// Lowercase form used inside prompts and templates.
    pub fn lowercase(&self) -> &'static str {
        match self {
            AudienceLevel::Beginner => "beginner",
            AudienceLevel::Intermediate => "intermediate",
            AudienceLevel::Advanced => "advanced",
        }
    }
}

impl fmt::Display for AudienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudienceLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(AudienceLevel::Beginner),
            "intermediate" => Ok(AudienceLevel::Intermediate),
            "advanced" => Ok(AudienceLevel::Advanced),
            other => Err(Error::InvalidLevel(other.to_string())),
        }
    }
}

/// Which tier produced an explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceTier {
    /// Generative completion service
    Primary,
    /// Reference/encyclopedia service
    Secondary,
    /// Deterministic template
    Guaranteed,
}

impl SourceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTier::Primary => "primary",
            SourceTier::Secondary => "secondary",
            SourceTier::Guaranteed => "guaranteed",
        }
    }
}

impl fmt::Display for SourceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The final, length-bounded explanation for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    /// Normalized explanation text, at most [`HARD_MAX_WORDS`] words
    pub text: String,

    /// The tier that answered
    pub source: SourceTier,

    /// Whether the hard word limit had to truncate the text
    pub enforced: bool,
}

impl Explanation {
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Takeaways and a real-world example derived from an explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insights {
    pub takeaways: [String; 3],
    pub example: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_is_trimmed() {
        let topic = Topic::parse("  Recursion \n").unwrap();
        assert_eq!(topic.as_str(), "Recursion");
        assert_eq!(topic.word_count(), 1);
    }

    #[test]
    fn blank_topic_rejected() {
        assert!(matches!(Topic::parse("   "), Err(Error::EmptyTopic)));
        assert!(matches!("".parse::<Topic>(), Err(Error::EmptyTopic)));
    }

    #[test]
    fn level_parses_case_insensitively() {
        assert_eq!("beginner".parse::<AudienceLevel>().unwrap(), AudienceLevel::Beginner);
        assert_eq!(
            "INTERMEDIATE".parse::<AudienceLevel>().unwrap(),
            AudienceLevel::Intermediate
        );
        assert_eq!(" Advanced ".parse::<AudienceLevel>().unwrap(), AudienceLevel::Advanced);
        assert!("expert".parse::<AudienceLevel>().is_err());
    }

    #[test]
    fn level_display_and_lowercase() {
        assert_eq!(AudienceLevel::Intermediate.to_string(), "Intermediate");
        assert_eq!(AudienceLevel::Intermediate.lowercase(), "intermediate");
    }

    #[test]
    fn source_tier_serializes_lowercase() {
        let json = serde_json::to_string(&SourceTier::Guaranteed).unwrap();
        assert_eq!(json, "\"guaranteed\"");
        assert_eq!(SourceTier::Secondary.to_string(), "secondary");
    }

    #[test]
    fn explanation_counts_words() {
        let explanation = Explanation {
            text: "one two  three".into(),
            source: SourceTier::Primary,
            enforced: false,
        };
        assert_eq!(explanation.word_count(), 3);
    }
}
