//! Resilient client for the Generative Language API.
//!
//! The pipeline wraps a plain `generateContent` POST with, from the outside
//! in: a shared advisory rate limiter, a retry loop with exponential
//! backoff, and a per-attempt model fallback chain. Successful output is
//! sanitized before it reaches callers.

mod api;
mod error;
mod limiter;
mod retry;
mod sanitize;

pub use api::{DEFAULT_BASE_URL, DEFAULT_MODELS, GeminiClient, GeminiConfig};
pub use error::{GenerateError, GenerateErrorKind, GenerateResult};
pub use limiter::RateLimiter;
pub use retry::BackoffPolicy;
pub use sanitize::{SanitizeMode, sanitize};

use anyhow::{Context, Result};

/// Resolves the API key with precedence: config > environment.
///
/// # Errors
/// Returns an error when neither source provides a non-empty key.
pub fn resolve_api_key(config_api_key: Option<&str>, env_var: &str) -> Result<String> {
    if let Some(key) = config_api_key {
        let trimmed = key.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }

    std::env::var(env_var).context(format!(
        "No API key available. Set {env_var} or api_key in config.toml."
    ))
}

/// Resolves the base URL with precedence: environment > config > default.
///
/// # Errors
/// Returns an error when a provided URL does not parse.
pub fn resolve_base_url(
    config_base_url: Option<&str>,
    env_var: &str,
    default_url: &str,
) -> Result<String> {
    if let Ok(env_url) = std::env::var(env_var) {
        let trimmed = env_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.to_string());
        }
    }

    if let Some(config_url) = config_base_url {
        let trimmed = config_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.to_string());
        }
    }

    Ok(default_url.to_string())
}

fn validate_url(url: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid Gemini base URL: {url}"))?;
    Ok(())
}

/// Shape check for Google AI keys. Catches pasted-in garbage before it
/// costs an HTTP round trip; the backend still has the final say.
pub fn looks_like_api_key(key: &str) -> bool {
    let trimmed = key.trim();
    !trimmed.is_empty() && trimmed.starts_with("AIza")
}
