//! Secondary tier: encyclopedia summary adapted to the audience level.
//!
//! Candidate titles are tried in a fixed order; the first existing page
//! whose summary passes the quality gate wins. The winning summary is
//! level-adapted and then trimmed to the soft target, ahead of the hard
//! limit the pipeline applies to every tier.
//!
//! Each lookup runs under its own timeout, so one slow title cannot use up
//! the time needed for the later candidates.

use async_trait::async_trait;
use oneminute_core::reference::ReferenceSource;
use oneminute_core::{AudienceLevel, SourceTier, TARGET_WORDS, Topic};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{Tier, TierOutcome};
use crate::budget;
use crate::level;
use crate::quality::QualityGate;

/// Suffixes appended to the topic, in lookup order.
pub const CANDIDATE_SUFFIXES: [&str; 4] = ["", " (technology)", " (concept)", " (greeting)"];

/// Default bound on a single page lookup.
const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(15);

pub struct SecondaryTier {
    source: Arc<dyn ReferenceSource>,
    gate: Arc<dyn QualityGate>,
    lookup_timeout: Duration,
}

impl SecondaryTier {
    pub fn new(source: Arc<dyn ReferenceSource>, gate: Arc<dyn QualityGate>) -> Self {
        Self {
            source,
            gate,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Worst-case time for a full walk of the candidate titles.
    pub fn budget(&self) -> Duration {
        self.lookup_timeout * CANDIDATE_SUFFIXES.len() as u32
    }

    /// Lookup titles for `topic`, in order.
    pub fn candidates(topic: &Topic) -> Vec<String> {
        CANDIDATE_SUFFIXES
            .iter()
            .map(|suffix| format!("{topic}{suffix}"))
            .collect()
    }

    /// Find, adapt, and trim a summary. `None` means nothing usable exists.
    pub async fn summarize(&self, topic: &Topic, level: AudienceLevel) -> Option<String> {
        for title in Self::candidates(topic) {
            let page = match tokio::time::timeout(self.lookup_timeout, self.source.lookup(&title))
                .await
            {
                Ok(page) => page,
                Err(_) => {
                    warn!(
                        source = %self.source.name(),
                        title = %title,
                        timeout_secs = self.lookup_timeout.as_secs(),
                        "Secondary: lookup timed out"
                    );
                    continue;
                }
            };
            if !page.exists {
                debug!(source = %self.source.name(), title = %title, "Secondary: page missing");
                continue;
            }

            let summary = budget::normalize(&page.summary);
            if self.gate.is_unacceptable(&summary) {
                debug!(source = %self.source.name(), title = %title, "Secondary: summary rejected");
                continue;
            }

            info!(source = %self.source.name(), title = %title, "Secondary: using page");
            let adapted = level::adapt(&summary, level);
            let (trimmed, _) = budget::enforce(&adapted, TARGET_WORDS);
            return Some(trimmed);
        }

        None
    }
}

#[async_trait]
impl Tier for SecondaryTier {
    fn source(&self) -> SourceTier {
        SourceTier::Secondary
    }

    async fn produce(&self, topic: &Topic, level: AudienceLevel) -> TierOutcome {
        match self.summarize(topic, level).await {
            Some(text) => TierOutcome::Success(text),
            None => TierOutcome::Unavailable(format!(
                "no usable {} page for '{topic}'",
                self.source.name()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::BEGINNER_CLAUSE;
    use crate::quality::DefaultQualityGate;
    use crate::test_helpers::{MockReference, sentences, words};

    fn tier(reference: Arc<MockReference>) -> SecondaryTier {
        SecondaryTier::new(reference, Arc::new(DefaultQualityGate::default()))
    }

    fn topic(s: &str) -> Topic {
        Topic::parse(s).unwrap()
    }

    #[test]
    fn candidate_order() {
        assert_eq!(
            SecondaryTier::candidates(&topic("Hello")),
            vec![
                "Hello",
                "Hello (technology)",
                "Hello (concept)",
                "Hello (greeting)",
            ]
        );
    }

    #[tokio::test]
    async fn tries_every_candidate_when_nothing_exists() {
        let reference = Arc::new(MockReference::empty());
        let outcome = tier(reference.clone())
            .produce(&topic("Xqzplm123"), AudienceLevel::Beginner)
            .await;

        assert!(matches!(outcome, TierOutcome::Unavailable(_)));
        assert_eq!(
            reference.lookups(),
            vec![
                "Xqzplm123",
                "Xqzplm123 (technology)",
                "Xqzplm123 (concept)",
                "Xqzplm123 (greeting)",
            ]
        );
    }

    #[tokio::test]
    async fn skips_disambiguation_page() {
        let reference = Arc::new(
            MockReference::empty()
                .with_page("Hello", &format!("Hello may refer to: {}", words(40)))
                .with_page("Hello (greeting)", &sentences(6, 8)),
        );
        let text = tier(reference.clone())
            .summarize(&topic("Hello"), AudienceLevel::Intermediate)
            .await
            .unwrap();

        assert!(text.starts_with("Sentence one"));
        assert_eq!(reference.lookups().len(), 4);
    }

    #[tokio::test]
    async fn skips_short_summary() {
        let reference = Arc::new(
            MockReference::empty()
                .with_page("Rust", "Rust is a thing.")
                .with_page("Rust (technology)", &sentences(4, 10)),
        );
        let text = tier(reference.clone())
            .summarize(&topic("Rust"), AudienceLevel::Advanced)
            .await;
        assert!(text.is_some());
        assert_eq!(reference.lookups(), vec!["Rust", "Rust (technology)"]);
    }

    #[tokio::test]
    async fn first_passing_page_wins() {
        let reference = Arc::new(
            MockReference::empty()
                .with_page("APIs", &sentences(5, 8))
                .with_page("APIs (technology)", &sentences(5, 9)),
        );
        tier(reference.clone())
            .summarize(&topic("APIs"), AudienceLevel::Beginner)
            .await
            .unwrap();
        assert_eq!(reference.lookups(), vec!["APIs"]);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_lookups_still_reach_later_candidates() {
        let reference = Arc::new(
            MockReference::empty()
                .with_page("Hello (greeting)", &sentences(4, 10))
                .with_delay(Duration::from_secs(4)),
        );
        let text = tier(reference.clone())
            .with_lookup_timeout(Duration::from_secs(5))
            .summarize(&topic("Hello"), AudienceLevel::Intermediate)
            .await;
        assert!(text.is_some());
        assert_eq!(reference.lookups().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn hung_lookup_is_skipped() {
        let reference = Arc::new(
            MockReference::empty()
                .with_page("Rust", &sentences(4, 10))
                .with_delay(Duration::from_secs(60)),
        );
        let text = tier(reference.clone())
            .with_lookup_timeout(Duration::from_secs(1))
            .summarize(&topic("Rust"), AudienceLevel::Advanced)
            .await;
        assert!(text.is_none());
        assert_eq!(reference.lookups().len(), 4);
    }

    #[test]
    fn budget_covers_every_candidate() {
        let t = tier(Arc::new(MockReference::empty())).with_lookup_timeout(Duration::from_secs(15));
        assert_eq!(t.budget(), Duration::from_secs(60));
    }

    #[tokio::test]
    async fn beginner_gets_one_sentence_and_clause() {
        let reference = Arc::new(MockReference::empty().with_page("Recursion", &sentences(6, 20)));
        let text = tier(reference)
            .summarize(&topic("Recursion"), AudienceLevel::Beginner)
            .await
            .unwrap();
        assert!(text.ends_with(BEGINNER_CLAUSE));
        assert_eq!(level::split_sentences(&text).len(), 2);
    }

    #[tokio::test]
    async fn long_adapted_text_trimmed_to_target() {
        // Five 40-word sentences: the advanced adaptation keeps all 200 words.
        let reference = Arc::new(MockReference::empty().with_page("Compilers", &sentences(5, 40)));
        let text = tier(reference)
            .summarize(&topic("Compilers"), AudienceLevel::Advanced)
            .await
            .unwrap();
        assert_eq!(budget::count(&text), TARGET_WORDS);
        assert!(text.ends_with('…'));
    }

    #[tokio::test]
    async fn summary_whitespace_is_normalized() {
        let raw = format!("First   part\n\nof {}. Second sentence here.", words(30));
        let reference = Arc::new(MockReference::empty().with_page("Spacing", &raw));
        let text = tier(reference)
            .summarize(&topic("Spacing"), AudienceLevel::Intermediate)
            .await
            .unwrap();
        assert!(text.starts_with("First part of word"));
        assert!(!text.contains("  "));
    }
}
