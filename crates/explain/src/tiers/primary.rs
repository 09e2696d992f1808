//! Primary tier: generative explanation from a completion provider.

use async_trait::async_trait;
use oneminute_core::error::ProviderError;
use oneminute_core::provider::{Provider, ProviderRequest};
use oneminute_core::{AudienceLevel, HARD_MAX_WORDS, SourceTier, TARGET_WORDS, Topic};
use std::sync::Arc;
use tracing::{debug, warn};

use super::{Tier, TierOutcome};
use crate::budget;
use crate::quality::QualityGate;

/// Topics with at most this many words get the definition-style prompt.
const SHORT_TOPIC_WORDS: usize = 2;

pub struct PrimaryTier {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    gate: Arc<dyn QualityGate>,
}

impl PrimaryTier {
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        gate: Arc<dyn QualityGate>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: 0.4,
            gate,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Build the level-aware prompt.
    ///
    /// One- and two-word topics are often ambiguous ("Hello", "Mercury"), so
    /// they get an explicit definition request that forbids stub answers.
    pub fn build_prompt(topic: &Topic, level: AudienceLevel) -> String {
        let level = level.lowercase();
        if topic.word_count() <= SHORT_TOPIC_WORDS {
            format!(
                "Define \"{topic}\" for a {level} learner.\n\n\
                 Rules:\n\
                 - Plain English\n\
                 - Explain what it is, why it matters, and one example\n\
                 - Stay under {TARGET_WORDS} words\n\
                 - Do NOT say \"may refer to\"\n"
            )
        } else {
            format!(
                "Explain \"{topic}\" for a {level} learner.\n\n\
                 Rules:\n\
                 - Plain English\n\
                 - Max {HARD_MAX_WORDS} words\n\
                 - No fluff\n"
            )
        }
    }

    /// Request a completion and normalize it. Provider errors propagate.
    pub async fn generate(
        &self,
        topic: &Topic,
        level: AudienceLevel,
    ) -> Result<String, ProviderError> {
        let request = ProviderRequest::prompt(
            &self.model,
            Self::build_prompt(topic, level),
            self.temperature,
        );

        debug!(provider = %self.provider.name(), model = %self.model, "Primary: requesting explanation");

        let response = self.provider.complete(request).await?;
        Ok(budget::normalize(&response.message.content))
    }
}

#[async_trait]
impl Tier for PrimaryTier {
    fn source(&self) -> SourceTier {
        SourceTier::Primary
    }

    async fn produce(&self, topic: &Topic, level: AudienceLevel) -> TierOutcome {
        match self.generate(topic, level).await {
            Ok(text) if self.gate.is_unacceptable(&text) => TierOutcome::Unacceptable(format!(
                "generated text rejected by quality gate ({} words)",
                budget::count(&text)
            )),
            Ok(text) => TierOutcome::Success(text),
            Err(e) => {
                warn!(provider = %self.provider.name(), error = %e, "Primary: generation failed");
                TierOutcome::Unavailable(e.to_string())
            }
        }
    }
}
