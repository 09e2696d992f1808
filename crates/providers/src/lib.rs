//! Generative completion providers for OneMinute.
//!
//! All providers implement the `oneminute_core::Provider` trait.
//! [`router::build_from_config`] picks the backend named in configuration.

pub mod openai_compat;
pub mod router;

pub use openai_compat::OpenAiCompatProvider;
pub use router::build_from_config;
