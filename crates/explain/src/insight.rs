//! Takeaways and a real-world example for a finished explanation.
//!
//! Generated insights are only requested when the explanation itself came
//! from the primary tier. Every other path, and every failure along the
//! way, lands on deterministic text, so [`InsightBuilder::build`] always
//! returns three takeaways and a non-empty example.

use oneminute_config::AppConfig;
use oneminute_core::provider::{Provider, ProviderRequest};
use oneminute_core::{Insights, SourceTier};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::budget;
use crate::level::split_sentences;

const TOPIC_PLACEHOLDER: &str = "This topic";
const CORE_IDEA_SUFFIX: &str = "is easier when you focus on the core idea.";
const SHORT_EXPLANATIONS: &str = "Short explanations help you act without confusion.";

pub struct InsightBuilder {
    provider: Option<Arc<dyn Provider>>,
    model: String,
    takeaway_temperature: f32,
    example_temperature: f32,
    timeout: Duration,
}

impl InsightBuilder {
    /// A builder that never calls out and always uses the templates.
    pub fn deterministic() -> Self {
        Self {
            provider: None,
            model: String::new(),
            takeaway_temperature: 0.3,
            example_temperature: 0.4,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider: Some(provider),
            model: model.into(),
            ..Self::deterministic()
        }
    }

    pub fn with_temperatures(mut self, takeaway: f32, example: f32) -> Self {
        self.takeaway_temperature = takeaway;
        self.example_temperature = example;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Wire a builder from config, sharing the pipeline's provider if any.
    pub fn from_config(config: &AppConfig, provider: Option<Arc<dyn Provider>>) -> Self {
        let base = match provider {
            Some(provider) => Self::new(provider, &config.model),
            None => Self::deterministic(),
        };
        base.with_temperatures(
            config.generation.takeaway_temperature,
            config.generation.example_temperature,
        )
        .with_timeout(Duration::from_secs(config.generation.timeout_secs))
    }

    pub fn is_generative(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn build(&self, topic: &str, explanation: &str, source: SourceTier) -> Insights {
        let topic = topic.trim();
        let generative = source == SourceTier::Primary;

        let takeaways = match self.generated_takeaways(explanation, generative).await {
            Some(takeaways) => takeaways,
            None => fallback_takeaways(topic, explanation),
        };

        let example = match self.generated_example(topic, generative).await {
            Some(example) => example,
            None => fallback_example(topic),
        };

        Insights { takeaways, example }
    }

    async fn generated_takeaways(&self, explanation: &str, generative: bool) -> Option<[String; 3]> {
        if !generative {
            return None;
        }
        let prompt = format!(
            "From the explanation below, extract exactly 3 clear takeaways.\n\
             Each must be one sentence, specific, and useful.\n\n\
             Explanation:\n{explanation}\n"
        );
        let reply = self.ask(prompt, self.takeaway_temperature).await?;
        let lines = parse_takeaways(&reply);

        match <[String; 3]>::try_from(lines) {
            Ok(takeaways) => Some(takeaways),
            Err(lines) => {
                debug!(found = lines.len(), "Insights: too few takeaways, using fallback");
                None
            }
        }
    }

    async fn generated_example(&self, topic: &str, generative: bool) -> Option<String> {
        if !generative {
            return None;
        }
        let prompt = format!(
            "Give ONE realistic real-world example for learning \"{topic}\".\n\
             2–3 sentences. Specific situation. Plain English.\n"
        );
        let example = budget::normalize(&self.ask(prompt, self.example_temperature).await?);
        (!example.is_empty()).then_some(example)
    }

    /// One bounded completion. Any failure is logged and reported as `None`.
    async fn ask(&self, prompt: String, temperature: f32) -> Option<String> {
        let provider = self.provider.as_ref()?;
        let request = ProviderRequest::prompt(&self.model, prompt, temperature);

        match tokio::time::timeout(self.timeout, provider.complete(request)).await {
            Ok(Ok(response)) => Some(response.message.content),
            Ok(Err(e)) => {
                warn!(provider = %provider.name(), error = %e, "Insights: generation failed");
                None
            }
            Err(_) => {
                warn!(
                    provider = %provider.name(),
                    timeout_secs = self.timeout.as_secs(),
                    "Insights: generation timed out"
                );
                None
            }
        }
    }
}

/// Split a reply into at most 3 cleaned takeaway lines.
///
/// Heading lines ending in `:` are skipped.
pub fn parse_takeaways(reply: &str) -> Vec<String> {
    reply
        .lines()
        .map(strip_marker)
        .filter(|line| !line.is_empty() && !line.ends_with(':'))
        .map(str::to_string)
        .take(3)
        .collect()
}

/// Remove one leading bullet (`-`, `•`, `*`) or ordinal (`1.`, `2)`), then
/// a `**bold**` wrapper around what is left.
///
/// Markers only count when followed by whitespace.
pub fn strip_marker(line: &str) -> &str {
    let line = line.trim();
    let line = strip_list_marker(line).unwrap_or(line);
    strip_bold(line)
}

fn strip_list_marker(line: &str) -> Option<&str> {
    let rest = match line.strip_prefix(['-', '•', '*']) {
        Some(rest) => rest,
        None => {
            let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
            if digits == 0 {
                return None;
            }
            line[digits..].strip_prefix(['.', ')'])?
        }
    };

    rest.starts_with(char::is_whitespace).then(|| rest.trim())
}

fn strip_bold(line: &str) -> &str {
    match line.strip_prefix("**").and_then(|rest| rest.strip_suffix("**")) {
        Some(inner) if !inner.trim().is_empty() => inner.trim(),
        _ => line,
    }
}

fn fallback_takeaways(topic: &str, explanation: &str) -> [String; 3] {
    let subject = if topic.is_empty() {
        TOPIC_PLACEHOLDER
    } else {
        topic
    };

    let first = match split_sentences(explanation).first() {
        Some(sentence) => format!("{sentence}."),
        None => format!("{subject} has one core idea worth learning first."),
    };

    [
        first,
        format!("{subject} {CORE_IDEA_SUFFIX}"),
        SHORT_EXPLANATIONS.to_string(),
    ]
}

fn fallback_example(topic: &str) -> String {
    let subject = if topic.is_empty() { "this topic" } else { topic };
    format!(
        "Example: You encounter {subject} while starting a task. Instead of reading long \
         material, you use a one-minute explanation to understand the idea and begin confidently."
    )
}
