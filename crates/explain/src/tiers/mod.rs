//! Explanation tiers: the ordered content sources.
//!
//! 1. **Primary**: generative completion service
//! 2. **Secondary**: encyclopedia summary adapted to the level
//! 3. **Guaranteed**: deterministic template, cannot fail
//!
//! The fallible tiers implement [`Tier`] and report a [`TierOutcome`]
//! instead of raising; the pipeline walks them in order and stops at the
//! first success. The guaranteed tier is a plain value type that the
//! pipeline holds separately.

pub mod guaranteed;
pub mod primary;
pub mod secondary;

use async_trait::async_trait;
use oneminute_core::{AudienceLevel, SourceTier, Topic};

pub use guaranteed::GuaranteedTier;
pub use primary::PrimaryTier;
pub use secondary::{CANDIDATE_SUFFIXES, SecondaryTier};

/// What a tier produced for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierOutcome {
    /// Usable, normalized explanation text.
    Success(String),
    /// The tier answered, but the text failed the quality gate.
    Unacceptable(String),
    /// The tier could not answer (transport error, no content, timeout).
    Unavailable(String),
}

impl TierOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TierOutcome::Success(_))
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            TierOutcome::Success(_) => "success",
            TierOutcome::Unacceptable(_) => "unacceptable",
            TierOutcome::Unavailable(_) => "unavailable",
        }
    }
}

/// A content source that may decline to answer.
#[async_trait]
pub trait Tier: Send + Sync {
    /// The source tag reported when this tier answers.
    fn source(&self) -> SourceTier;

    /// Try to produce an explanation of `topic` for `level`.
    async fn produce(&self, topic: &Topic, level: AudienceLevel) -> TierOutcome;
}
