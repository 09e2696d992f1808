//! Shared test helpers: scripted providers and in-memory reference pages.

use async_trait::async_trait;
use oneminute_core::error::ProviderError;
use oneminute_core::message::Message;
use oneminute_core::provider::{Provider, ProviderRequest, ProviderResponse};
use oneminute_core::reference::{ReferencePage, ReferenceSource};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// A provider that replays scripted results in order.
///
/// With a single scripted result, every call returns it. With several, each
/// call takes the next one and the provider panics once they run out.
pub struct MockProvider {
    script: Vec<Result<String, ProviderError>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl MockProvider {
    pub fn scripted(script: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            script,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::scripted(vec![Ok(text.to_string())])
    }

    pub fn failing(error: ProviderError) -> Self {
        Self::scripted(vec![Err(error)])
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request);
            requests.len() - 1
        };

        let result = if self.script.len() == 1 {
            &self.script[0]
        } else {
            self.script.get(call).unwrap_or_else(|| {
                panic!(
                    "MockProvider exhausted: call #{}, have {}",
                    call,
                    self.script.len()
                )
            })
        };

        result.clone().map(|text| ProviderResponse {
            message: Message::assistant(text),
            usage: None,
            model: "mock-model".into(),
        })
    }
}

/// A provider that never answers (for timeout testing).
pub struct HangingProvider;

#[async_trait]
impl Provider for HangingProvider {
    fn name(&self) -> &str {
        "hanging"
    }

    async fn complete(&self, _request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        unreachable!()
    }
}

/// An in-memory reference source that records every lookup.
pub struct MockReference {
    pages: HashMap<String, String>,
    lookups: Mutex<Vec<String>>,
    delay: Duration,
}

impl MockReference {
    pub fn empty() -> Self {
        Self {
            pages: HashMap::new(),
            lookups: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
        }
    }

    /// Sleep this long before answering each lookup.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_page(mut self, title: &str, summary: &str) -> Self {
        self.pages.insert(title.to_string(), summary.to_string());
        self
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReferenceSource for MockReference {
    fn name(&self) -> &str {
        "mock-reference"
    }

    async fn lookup(&self, title: &str) -> ReferencePage {
        self.lookups.lock().unwrap().push(title.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match self.pages.get(title) {
            Some(summary) => ReferencePage::found(title, summary.as_str()),
            None => ReferencePage::missing(title),
        }
    }
}

/// `n` copies of "word" separated by spaces.
pub fn words(n: usize) -> String {
    vec!["word"; n].join(" ")
}

const ORDINALS: [&str; 10] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
];

/// `count` sentences ("Sentence one filler ... filler.") of `per_sentence`
/// words each. `per_sentence` must be at least 2 and `count` at most 10.
pub fn sentences(count: usize, per_sentence: usize) -> String {
    ORDINALS[..count]
        .iter()
        .map(|ordinal| {
            format!(
                "Sentence {ordinal} {}.",
                vec!["filler"; per_sentence - 2].join(" ")
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}
