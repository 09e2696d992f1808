//! Tiered explanation pipeline for OneMinute.
//!
//! A topic and an audience level go in; a length-bounded [`Explanation`]
//! tagged with the tier that produced it comes out, followed by
//! [`Insights`] derived from it.
//!
//! [`Explanation`]: oneminute_core::Explanation
//! [`Insights`]: oneminute_core::Insights

pub mod budget;
pub mod insight;
pub mod level;
pub mod pipeline;
pub mod quality;
pub mod tiers;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use insight::InsightBuilder;
pub use pipeline::ExplanationPipeline;
pub use quality::{DefaultQualityGate, QualityGate};
pub use tiers::{GuaranteedTier, PrimaryTier, SecondaryTier, Tier, TierOutcome};
