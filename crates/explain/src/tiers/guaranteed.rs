//! Guaranteed tier: deterministic templated explanation.
//!
//! A pure function of topic and level. The text repeats the topic verbatim
//! and is never passed through the quality gate, so a topic that itself
//! contains a reject phrase still yields the template.

use oneminute_core::{AudienceLevel, SourceTier, Topic};

use crate::budget;

#[derive(Debug, Clone, Copy, Default)]
pub struct GuaranteedTier;

impl GuaranteedTier {
    pub fn source(&self) -> SourceTier {
        SourceTier::Guaranteed
    }

    /// Render the template. Never fails, never empty.
    pub fn render(&self, topic: &Topic, level: AudienceLevel) -> String {
        let level = level.lowercase();
        budget::normalize(&format!(
            "{topic} is a concept explained for a {level} learner. \
             It focuses on the main idea, why it matters, and how people commonly use it. \
             The goal is to understand {topic} quickly without unnecessary details. \
             A simple way to recognize {topic} is to look at what problem it solves \
             and how {topic} changes the outcome of a task."
        ))
    }
}
