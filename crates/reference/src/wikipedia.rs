//! Wikipedia reference source.
//!
//! Uses the MediaWiki action API
//! (`GET {base}?action=query&prop=extracts&exintro=1&explaintext=1&redirects=1&titles=...`),
//! which returns the whole lead section (everything before the first
//! heading) as plain text. A page flagged `missing` or `invalid`, or a 404,
//! means the page does not exist. Any other failure is logged and reported
//! as a missing page, since a lookup has no error path.

use async_trait::async_trait;
use oneminute_config::{DEFAULT_USER_AGENT, ReferenceConfig};
use oneminute_core::reference::{ReferencePage, ReferenceSource};
use reqwest::header::HeaderValue;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// A [`ReferenceSource`] backed by a MediaWiki action API endpoint.
pub struct WikipediaSource {
    endpoint: String,
    user_agent: HeaderValue,
    client: reqwest::Client,
}

impl WikipediaSource {
    pub fn new(endpoint: impl Into<String>, user_agent: &str, timeout: Duration) -> Self {
        let user_agent = HeaderValue::from_str(user_agent).unwrap_or_else(|e| {
            warn!(error = %e, "Invalid reference user agent, using the default");
            HeaderValue::from_static(DEFAULT_USER_AGENT)
        });

        let client = reqwest::Client::builder()
            .user_agent(user_agent.clone())
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to build reference HTTP client, using defaults");
                reqwest::Client::new()
            });

        Self {
            endpoint: endpoint.into(),
            user_agent,
            client,
        }
    }

    pub fn from_config(config: &ReferenceConfig) -> Self {
        Self::new(
            &config.base_url,
            &config.user_agent,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Build the lead-section query URL for a title.
    fn query_url(&self, title: &str) -> Option<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.endpoint).ok()?;
        url.query_pairs_mut()
            .append_pair("action", "query")
            .append_pair("format", "json")
            .append_pair("formatversion", "2")
            .append_pair("prop", "extracts")
            .append_pair("exintro", "1")
            .append_pair("explaintext", "1")
            .append_pair("redirects", "1")
            .append_pair("titles", title.trim());
        Some(url)
    }

    async fn fetch(&self, title: &str) -> Result<ReferencePage, String> {
        let url = self
            .query_url(title)
            .ok_or_else(|| format!("invalid endpoint '{}'", self.endpoint))?;

        debug!(title, url = %url, "Looking up reference page");

        let response = self
            .client
            .get(url)
            // Set per request too, so a client built from defaults still identifies itself.
            .header(reqwest::header::USER_AGENT, self.user_agent.clone())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(ReferencePage::missing(title));
        }
        if !status.is_success() {
            return Err(format!("status {}", status.as_u16()));
        }

        let body: QueryResponse = response.json().await.map_err(|e| e.to_string())?;
        Ok(body.into_page(title))
    }
}

#[async_trait]
impl ReferenceSource for WikipediaSource {
    fn name(&self) -> &str {
        "wikipedia"
    }

    async fn lookup(&self, title: &str) -> ReferencePage {
        match self.fetch(title).await {
            Ok(page) => page,
            Err(reason) => {
                warn!(title, error = %reason, "Reference lookup failed, treating page as missing");
                ReferencePage::missing(title)
            }
        }
    }
}

// --- Action API types (internal) ---

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    query: Option<QueryBody>,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: Vec<QueryPage>,
}

#[derive(Debug, Deserialize)]
struct QueryPage {
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    #[serde(default)]
    extract: String,
}

impl QueryResponse {
    fn into_page(self, title: &str) -> ReferencePage {
        let page = self
            .query
            .and_then(|query| query.pages.into_iter().next());

        match page {
            Some(page) if !page.missing && !page.invalid && !page.extract.trim().is_empty() => {
                ReferencePage::found(title, page.extract)
            }
            _ => ReferencePage::missing(title),
        }
    }
}
