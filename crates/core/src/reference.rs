//! ReferenceSource trait: the abstraction over encyclopedia lookups.
//!
//! A lookup never fails: a page either exists and carries a summary, or it
//! does not. Transport problems are folded into "does not exist" by the
//! implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The result of looking up a single page title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencePage {
    /// The title that was requested
    pub title: String,

    /// Whether the page exists
    pub exists: bool,

    /// Plain-text summary (empty when the page is missing)
    #[serde(default)]
    pub summary: String,
}

impl ReferencePage {
    pub fn found(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            exists: true,
            summary: summary.into(),
        }
    }

    pub fn missing(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            exists: false,
            summary: String::new(),
        }
    }
}

/// An encyclopedia-style page lookup service.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    /// A human-readable name for this source (e.g., "wikipedia").
    fn name(&self) -> &str;

    /// Look up a page by its exact title.
    async fn lookup(&self, title: &str) -> ReferencePage;
}
