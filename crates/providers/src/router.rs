//! Provider routing: builds the configured completion backend.
//!
//! The API key is taken from the loaded configuration and moved into the
//! provider; nothing downstream reads it again.

use oneminute_config::AppConfig;
use oneminute_core::provider::Provider;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::openai_compat::OpenAiCompatProvider;

/// Build the provider described by `config`.
///
/// Returns `None` when generation is not possible (no API key for a provider
/// that needs one). Callers then run without the primary tier.
pub fn build_from_config(config: &AppConfig) -> Option<Arc<dyn Provider>> {
    if !config.generation_enabled() {
        info!(provider = %config.provider, "No API key configured, generative tier disabled");
        return None;
    }

    let api_key = config
        .api_key
        .clone()
        .unwrap_or_else(|| config.provider.clone());

    let base_url = config
        .api_url
        .clone()
        .unwrap_or_else(|| default_base_url(&config.provider));

    debug!(provider = %config.provider, base_url = %base_url, "Building provider");

    // Slightly above the per-call bound applied by the pipeline.
    let timeout = Duration::from_secs(config.generation.timeout_secs + 5);

    Some(Arc::new(OpenAiCompatProvider::with_timeout(
        &config.provider,
        base_url,
        api_key,
        timeout,
    )))
}

/// Get the default base URL for well-known providers.
pub fn default_base_url(provider_name: &str) -> String {
    match provider_name {
        "openrouter" => "https://openrouter.ai/api/v1".into(),
        "openai" => "https://api.openai.com/v1".into(),
        "ollama" => "http://localhost:11434/v1".into(),
        "deepseek" => "https://api.deepseek.com/v1".into(),
        "groq" => "https://api.groq.com/openai/v1".into(),
        "together" => "https://api.together.xyz/v1".into(),
        "fireworks" => "https://api.fireworks.ai/inference/v1".into(),
        "mistral" => "https://api.mistral.ai/v1".into(),
        "vllm" => "http://localhost:8000/v1".into(),
        "llamacpp" | "llama.cpp" => "http://localhost:8080/v1".into(),
        _ => format!("https://{provider_name}.api.example.com/v1"),
    }
}
