//! Explanation pipeline: ordered tier chain with a guaranteed fallback.
//!
//! # Flow
//!
//! 1. Try each fallible tier in order, each under its own timeout
//! 2. The first [`TierOutcome::Success`] fixes the source tag
//! 3. If every tier declines, render the guaranteed template
//! 4. Enforce the hard word limit on whichever text was chosen
//!
//! [`ExplanationPipeline::explain`] returns an [`Explanation`], not a
//! `Result`: every upstream failure is absorbed by the next tier.

use oneminute_config::AppConfig;
use oneminute_core::provider::Provider;
use oneminute_core::reference::ReferenceSource;
use oneminute_core::{AudienceLevel, Explanation, HARD_MAX_WORDS, SourceTier, Topic};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::budget;
use crate::quality::{DefaultQualityGate, QualityGate};
use crate::tiers::{GuaranteedTier, PrimaryTier, SecondaryTier, Tier, TierOutcome};

/// Default per-tier timeout.
const DEFAULT_TIER_TIMEOUT: Duration = Duration::from_secs(30);

/// A single entry in the tier chain.
struct TierEntry {
    tier: Arc<dyn Tier>,
    timeout: Duration,
}

pub struct ExplanationPipeline {
    chain: Vec<TierEntry>,
    guaranteed: GuaranteedTier,
    max_words: usize,
}

impl ExplanationPipeline {
    /// A pipeline with no fallible tiers: every request is answered by the
    /// guaranteed tier.
    pub fn new() -> Self {
        Self {
            chain: Vec::new(),
            guaranteed: GuaranteedTier,
            max_words: HARD_MAX_WORDS,
        }
    }

    /// Append a tier to the chain with a custom timeout.
    pub fn add(mut self, tier: Arc<dyn Tier>, timeout: Duration) -> Self {
        self.chain.push(TierEntry { tier, timeout });
        self
    }

    /// Append a tier with the default timeout (30s).
    pub fn add_default(self, tier: Arc<dyn Tier>) -> Self {
        self.add(tier, DEFAULT_TIER_TIMEOUT)
    }

    /// Number of fallible tiers in the chain.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Source tags of the chain, in order, ending with the guaranteed tier.
    pub fn order(&self) -> Vec<SourceTier> {
        self.chain
            .iter()
            .map(|entry| entry.tier.source())
            .chain(std::iter::once(self.guaranteed.source()))
            .collect()
    }

    /// Wire the standard chain from injected collaborators.
    ///
    /// A missing provider drops the primary tier; a missing reference source
    /// drops the secondary tier. The secondary tier bounds each lookup by the
    /// reference timeout and gets enough time for every candidate title.
    pub fn with_components(
        config: &AppConfig,
        provider: Option<Arc<dyn Provider>>,
        reference: Option<Arc<dyn ReferenceSource>>,
    ) -> Self {
        let gate: Arc<dyn QualityGate> = Arc::new(DefaultQualityGate::from_config(&config.quality));
        let mut pipeline = Self::new();

        if let Some(provider) = provider {
            let primary = PrimaryTier::new(provider, &config.model, gate.clone())
                .with_temperature(config.generation.explanation_temperature);
            pipeline = pipeline.add(
                Arc::new(primary),
                Duration::from_secs(config.generation.timeout_secs),
            );
        }

        if let Some(reference) = reference {
            let secondary = SecondaryTier::new(reference, gate)
                .with_lookup_timeout(Duration::from_secs(config.reference.timeout_secs));
            let budget = secondary.budget();
            pipeline = pipeline.add(Arc::new(secondary), budget);
        }

        pipeline
    }

    /// Produce a length-bounded explanation. Never fails.
    pub async fn explain(&self, topic: &Topic, level: AudienceLevel) -> Explanation {
        let (text, source) = match self.first_success(topic, level).await {
            Some(found) => found,
            None => {
                info!(topic = %topic, "Pipeline: all tiers declined, using guaranteed template");
                (
                    self.guaranteed.render(topic, level),
                    self.guaranteed.source(),
                )
            }
        };

        let (text, enforced) = budget::enforce(&text, self.max_words);
        if enforced {
            debug!(limit = self.max_words, "Pipeline: hard word limit enforced");
        }

        info!(
            topic = %topic,
            level = %level,
            source = %source,
            words = budget::count(&text),
            enforced,
            "Pipeline: explanation ready"
        );

        Explanation {
            text,
            source,
            enforced,
        }
    }

    async fn first_success(
        &self,
        topic: &Topic,
        level: AudienceLevel,
    ) -> Option<(String, SourceTier)> {
        for (i, entry) in self.chain.iter().enumerate() {
            let source = entry.tier.source();

            debug!(
                tier = %source,
                attempt = i + 1,
                total = self.chain.len(),
                "Pipeline: trying tier"
            );

            match tokio::time::timeout(entry.timeout, entry.tier.produce(topic, level)).await {
                Ok(TierOutcome::Success(text)) => return Some((text, source)),
                Ok(outcome) => {
                    let reason = match &outcome {
                        TierOutcome::Unacceptable(r) | TierOutcome::Unavailable(r) => r.as_str(),
                        TierOutcome::Success(_) => "",
                    };
                    info!(
                        tier = %source,
                        outcome = outcome.kind(),
                        reason,
                        "Pipeline: tier declined, trying next"
                    );
                }
                Err(_) => {
                    warn!(
                        tier = %source,
                        timeout_secs = entry.timeout.as_secs(),
                        "Pipeline: tier timed out, trying next"
                    );
                }
            }
        }

        None
    }
}

impl Default for ExplanationPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::BEGINNER_CLAUSE;
    use crate::test_helpers::{HangingProvider, MockProvider, MockReference, sentences, words};
    use oneminute_core::error::ProviderError;

    fn topic(s: &str) -> Topic {
        Topic::parse(s).unwrap()
    }

    fn down() -> Arc<MockProvider> {
        Arc::new(MockProvider::failing(ProviderError::Network("down".into())))
    }

    fn pipeline(
        provider: Option<Arc<dyn Provider>>,
        reference: Option<Arc<dyn ReferenceSource>>,
    ) -> ExplanationPipeline {
        ExplanationPipeline::with_components(&AppConfig::default(), provider, reference)
    }

    #[test]
    fn standard_chain_order() {
        let p = pipeline(Some(down()), Some(Arc::new(MockReference::empty())));
        assert_eq!(p.len(), 2);
        assert_eq!(
            p.order(),
            vec![SourceTier::Primary, SourceTier::Secondary, SourceTier::Guaranteed]
        );
    }

    #[test]
    fn missing_components_shrink_chain() {
        let p = pipeline(None, Some(Arc::new(MockReference::empty())));
        assert_eq!(p.order(), vec![SourceTier::Secondary, SourceTier::Guaranteed]);
        assert!(pipeline(None, None).is_empty());
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn pipeline_is_shareable() {
        assert_send_sync::<ExplanationPipeline>();
        assert_send_sync::<Arc<ExplanationPipeline>>();
    }

    #[tokio::test]
    async fn primary_success_stops_chain() {
        let provider = Arc::new(MockProvider::replying(&words(60)));
        let reference = Arc::new(MockReference::empty().with_page("APIs", &sentences(5, 10)));
        let p = pipeline(Some(provider.clone()), Some(reference.clone()));

        let result = p.explain(&topic("APIs"), AudienceLevel::Beginner).await;
        assert_eq!(result.source, SourceTier::Primary);
        assert!(!result.enforced);
        assert_eq!(result.text, words(60));
        assert_eq!(provider.calls(), 1);
        assert!(reference.lookups().is_empty());
    }

    #[tokio::test]
    async fn long_primary_output_is_enforced() {
        let provider = Arc::new(MockProvider::replying(&words(200)));
        let p = pipeline(Some(provider), None);

        let result = p.explain(&topic("APIs"), AudienceLevel::Advanced).await;
        assert_eq!(result.source, SourceTier::Primary);
        assert!(result.enforced);
        assert_eq!(result.word_count(), HARD_MAX_WORDS);
        assert!(result.text.ends_with('…'));
    }

    #[tokio::test]
    async fn failing_primary_falls_to_secondary() {
        let reference = Arc::new(MockReference::empty().with_page("Recursion", &sentences(6, 20)));
        let p = pipeline(Some(down()), Some(reference));

        let result = p.explain(&topic("Recursion"), AudienceLevel::Beginner).await;
        assert_eq!(result.source, SourceTier::Secondary);
        assert!(!result.enforced);
        assert!(result.text.ends_with(BEGINNER_CLAUSE));
    }

    #[tokio::test]
    async fn weak_primary_falls_to_secondary() {
        let provider = Arc::new(MockProvider::replying("Short."));
        let reference = Arc::new(MockReference::empty().with_page("Recursion", &sentences(4, 10)));
        let p = pipeline(Some(provider), Some(reference));

        let result = p.explain(&topic("Recursion"), AudienceLevel::Intermediate).await;
        assert_eq!(result.source, SourceTier::Secondary);
    }

    #[tokio::test]
    async fn everything_down_uses_guaranteed() {
        let p = pipeline(Some(down()), Some(Arc::new(MockReference::empty())));

        let result = p.explain(&topic("Xqzplm123"), AudienceLevel::Beginner).await;
        assert_eq!(result.source, SourceTier::Guaranteed);
        assert!(!result.enforced);
        assert_eq!(result.text.matches("Xqzplm123").count(), 4);
    }

    #[tokio::test]
    async fn empty_chain_uses_guaranteed() {
        let result = ExplanationPipeline::new()
            .explain(&topic("Photosynthesis"), AudienceLevel::Advanced)
            .await;
        assert_eq!(result.source, SourceTier::Guaranteed);
    }

    #[tokio::test]
    async fn huge_topic_guaranteed_text_is_still_bounded() {
        let long_topic = topic(&words(300));
        let result = ExplanationPipeline::new()
            .explain(&long_topic, AudienceLevel::Beginner)
            .await;
        assert_eq!(result.source, SourceTier::Guaranteed);
        assert!(result.enforced);
        assert_eq!(result.word_count(), HARD_MAX_WORDS);
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_primary_times_out() {
        let reference = Arc::new(MockReference::empty().with_page("Recursion", &sentences(4, 10)));
        let p = ExplanationPipeline::new()
            .add(
                Arc::new(PrimaryTier::new(
                    Arc::new(HangingProvider),
                    "m",
                    Arc::new(DefaultQualityGate::default()),
                )),
                Duration::from_millis(50),
            )
            .add_default(Arc::new(SecondaryTier::new(
                reference,
                Arc::new(DefaultQualityGate::default()),
            )));

        let result = p.explain(&topic("Recursion"), AudienceLevel::Advanced).await;
        assert_eq!(result.source, SourceTier::Secondary);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_reference_still_finds_later_candidate() {
        let reference = Arc::new(
            MockReference::empty()
                .with_page("Hello (greeting)", &sentences(4, 10))
                .with_delay(Duration::from_secs(4)),
        );
        let p = pipeline(None, Some(reference.clone()));

        let result = p.explain(&topic("Hello"), AudienceLevel::Intermediate).await;
        assert_eq!(result.source, SourceTier::Secondary);
        assert_eq!(reference.lookups().len(), 4);
    }

    #[tokio::test]
    async fn guaranteed_text_is_not_gated() {
        // The template repeats the topic, so a stub phrase as topic would
        // fail the gate; the guaranteed tier is returned regardless.
        let result = ExplanationPipeline::new()
            .explain(&topic("may refer to"), AudienceLevel::Beginner)
            .await;
        assert_eq!(result.source, SourceTier::Guaranteed);
        assert!(result.text.starts_with("may refer to is a concept"));
    }

    #[tokio::test]
    async fn word_bound_holds_for_every_level() {
        let provider = Arc::new(MockProvider::replying(&words(500)));
        let p = pipeline(Some(provider), None);
        for level in AudienceLevel::ALL {
            let result = p.explain(&topic("Bounds"), level).await;
            assert!(result.word_count() <= HARD_MAX_WORDS);
        }
    }
}
