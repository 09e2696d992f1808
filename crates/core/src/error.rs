//! Error types for the OneMinute domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Upstream failures never reach the caller of the pipeline; these errors
//! only surface for invalid input and from the individual clients.

use thiserror::Error;

/// The top-level error type for all OneMinute operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Input errors ---
    #[error("Topic must not be empty")]
    EmptyTopic,

    #[error("Unknown audience level '{0}' (expected beginner, intermediate or advanced)")]
    InvalidLevel(String),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures talking to a generative completion service.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}
