//! Configuration loading, validation, and management for OneMinute.
//!
//! Loads configuration from `~/.oneminute/config.toml` with environment
//! variable overrides. Validates all settings at startup. The loaded value
//! is read-only afterwards and is handed explicitly to whatever needs it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use oneminute_core::MIN_WORDS;

/// User-Agent sent to the reference service unless configured otherwise.
pub const DEFAULT_USER_AGENT: &str = "OneMinuteExplain/1.0 (educational)";

/// The root configuration structure.
///
/// Maps directly to `~/.oneminute/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the generative provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Generative provider name ("openai", "openrouter", "ollama", ...)
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Model id sent with every completion request
    #[serde(default = "default_model")]
    pub model: String,

    /// Override for the provider's base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Generation settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Reference (encyclopedia) lookup settings
    #[serde(default)]
    pub reference: ReferenceConfig,

    /// Quality gate settings
    #[serde(default)]
    pub quality: QualityConfig,
}

fn default_provider() -> String {
    "openai".into()
}
fn default_model() -> String {
    "gpt-3.5-turbo".into()
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_url", &self.api_url)
            .field("generation", &self.generation)
            .field("reference", &self.reference)
            .field("quality", &self.quality)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Temperature for the explanation itself
    #[serde(default = "default_explanation_temperature")]
    pub explanation_temperature: f32,

    /// Temperature for takeaway extraction
    #[serde(default = "default_takeaway_temperature")]
    pub takeaway_temperature: f32,

    /// Temperature for the real-world example
    #[serde(default = "default_example_temperature")]
    pub example_temperature: f32,

    /// Upper bound on a single generation call
    #[serde(default = "default_generation_timeout")]
    pub timeout_secs: u64,
}

fn default_explanation_temperature() -> f32 {
    0.4
}
fn default_takeaway_temperature() -> f32 {
    0.3
}
fn default_example_temperature() -> f32 {
    0.4
}
fn default_generation_timeout() -> u64 {
    30
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            explanation_temperature: default_explanation_temperature(),
            takeaway_temperature: default_takeaway_temperature(),
            example_temperature: default_example_temperature(),
            timeout_secs: default_generation_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceConfig {
    /// Set to false to skip the reference tier entirely
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// MediaWiki action API endpoint (`.../w/api.php`)
    #[serde(default = "default_reference_url")]
    pub base_url: String,

    /// User-Agent sent with every lookup
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Upper bound on a single page lookup
    #[serde(default = "default_reference_timeout")]
    pub timeout_secs: u64,
}

fn default_true() -> bool {
    true
}
fn default_reference_url() -> String {
    "https://en.wikipedia.org/w/api.php".into()
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.into()
}
fn default_reference_timeout() -> u64 {
    15
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_reference_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_reference_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityConfig {
    /// Minimum word count for acceptable text
    #[serde(default = "default_min_words")]
    pub min_words: usize,

    /// Case-insensitive phrases marking a stub rather than real content
    #[serde(default = "default_reject_phrases")]
    pub reject_phrases: Vec<String>,
}

fn default_min_words() -> usize {
    MIN_WORDS
}
fn default_reject_phrases() -> Vec<String> {
    vec!["may refer to".into()]
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            min_words: default_min_words(),
            reject_phrases: default_reject_phrases(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.oneminute/config.toml).
    ///
    /// Also checks environment variables for the API key when the file has
    /// none:
    /// - `ONEMINUTE_API_KEY` (highest priority)
    /// - `OPENAI_API_KEY`
    /// - `OPENROUTER_API_KEY`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.api_key.is_none() {
            self.api_key = lookup("ONEMINUTE_API_KEY")
                .or_else(|| lookup("OPENAI_API_KEY"))
                .or_else(|| lookup("OPENROUTER_API_KEY"))
                .filter(|key| !key.trim().is_empty());
        }

        if let Some(provider) = lookup("ONEMINUTE_PROVIDER") {
            self.provider = provider;
        }

        if let Some(model) = lookup("ONEMINUTE_MODEL") {
            self.model = model;
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".oneminute")
    }

    /// Get the configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        let temperatures = [
            ("explanation_temperature", self.generation.explanation_temperature),
            ("takeaway_temperature", self.generation.takeaway_temperature),
            ("example_temperature", self.generation.example_temperature),
        ];
        for (name, value) in temperatures {
            if !(0.0..=2.0).contains(&value) {
                return Err(ConfigError::ValidationError(format!(
                    "generation.{name} must be between 0.0 and 2.0"
                )));
            }
        }

        if self.generation.timeout_secs == 0 || self.reference.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeouts must be at least 1 second".into(),
            ));
        }

        if self.quality.min_words == 0 {
            return Err(ConfigError::ValidationError(
                "quality.min_words must be > 0".into(),
            ));
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationError("model must not be empty".into()));
        }

        let agent = &self.reference.user_agent;
        if agent.trim().is_empty() || agent.chars().any(char::is_control) {
            return Err(ConfigError::ValidationError(
                "reference.user_agent must be non-empty printable text".into(),
            ));
        }

        Ok(())
    }

    /// Whether the configured provider works without a key.
    pub fn provider_is_keyless(&self) -> bool {
        matches!(
            self.provider.as_str(),
            "ollama" | "vllm" | "llamacpp" | "llama.cpp"
        )
    }

    /// Whether the primary (generative) tier can be used at all.
    pub fn generation_enabled(&self) -> bool {
        self.api_key.is_some() || self.provider_is_keyless()
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            provider: default_provider(),
            model: default_model(),
            api_url: None,
            generation: GenerationConfig::default(),
            reference: ReferenceConfig::default(),
            quality: QualityConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigError> for oneminute_core::Error {
    fn from(err: ConfigError) -> Self {
        oneminute_core::Error::Config {
            message: err.to_string(),
        }
    }
}
