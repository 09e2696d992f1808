//! # OneMinute Core
//!
//! Domain types, traits, and error definitions for the OneMinute explanation
//! pipeline. This crate has **no network or framework dependencies**; it
//! defines the model that the provider, reference, and pipeline crates
//! implement against.
//!
//! ## Design Philosophy
//!
//! Every upstream collaborator is a trait here:
//! - [`Provider`]: a generative completion service
//! - [`ReferenceSource`]: an encyclopedia-style page lookup
//!
//! Implementations live in their own crates, so the pipeline can be tested
//! with deterministic fakes and no network access.

pub mod error;
pub mod explanation;
pub mod message;
pub mod provider;
pub mod reference;

// Re-export key types at crate root for ergonomics
pub use error::{Error, ProviderError, Result};
pub use explanation::{
    AudienceLevel, ELLIPSIS, Explanation, HARD_MAX_WORDS, Insights, MIN_WORDS, SourceTier,
    TARGET_WORDS, Topic,
};
pub use message::{Message, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
pub use reference::{ReferencePage, ReferenceSource};
