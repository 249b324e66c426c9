//! Gemini API client (Generative Language API).

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::HeaderMap;
use serde_json::{Value, json};

use super::error::{GenerateError, GenerateErrorKind, GenerateResult};
use super::limiter::RateLimiter;
use super::looks_like_api_key;
use super::retry::BackoffPolicy;
use super::sanitize::{SanitizeMode, sanitize};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Candidate models, tried in order within a single attempt.
pub const DEFAULT_MODELS: &[&str] = &["gemini-1.5-flash", "gemini-pro"];

const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Gemini API configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    /// Fallback chain; must not be empty.
    pub models: Vec<String>,
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl GeminiConfig {
    /// Defaults for everything but the key; generation parameters are
    /// tuned for code output.
    pub fn with_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            models: DEFAULT_MODELS.iter().map(ToString::to_string).collect(),
            temperature: 0.3,
            top_p: 0.9,
            top_k: 40,
            max_output_tokens: 2048,
        }
    }
}

/// Gemini client.
///
/// One logical `generate` call is all-or-nothing: it either returns the
/// sanitized text of one successful backend response or a single
/// [`GenerateError`]; callers never see partial output.
pub struct GeminiClient {
    config: GeminiConfig,
    policy: BackoffPolicy,
    limiter: Arc<RateLimiter>,
    http: reqwest::Client,
}

impl GeminiClient {
    /// Creates a new client sharing `limiter` with every other client in
    /// the process.
    ///
    /// # Panics
    /// - In test builds, panics if `base_url` is the production API.
    /// - At runtime, panics if `CPX_BLOCK_REAL_API=1` and `base_url` is the
    ///   production API.
    ///
    /// This prevents tests from accidentally making real network requests;
    /// point `GEMINI_BASE_URL` at a mock server instead.
    pub fn new(config: GeminiConfig, policy: BackoffPolicy, limiter: Arc<RateLimiter>) -> Self {
        #[cfg(test)]
        assert!(
            config.base_url != DEFAULT_BASE_URL,
            "Tests must not use the production Gemini API! \
             Set GEMINI_BASE_URL to a mock server (e.g., wiremock)."
        );

        #[cfg(not(test))]
        if std::env::var("CPX_BLOCK_REAL_API").is_ok_and(|v| v == "1")
            && config.base_url == DEFAULT_BASE_URL
        {
            panic!(
                "CPX_BLOCK_REAL_API=1 but trying to use the production Gemini API! \
                 Set GEMINI_BASE_URL to a mock server."
            );
        }

        Self {
            config,
            policy,
            limiter,
            http: reqwest::Client::new(),
        }
    }

    /// Runs one logical generation request through the resilience pipeline
    /// and sanitizes the output according to `mode`.
    ///
    /// # Errors
    /// Returns a typed [`GenerateError`]; transient failures (429/503) only
    /// surface after the retry budget is exhausted.
    pub async fn generate(&self, prompt: &str, mode: SanitizeMode) -> GenerateResult<String> {
        if !looks_like_api_key(&self.config.api_key) {
            return Err(GenerateError::new(
                GenerateErrorKind::InvalidCredential,
                "API key is missing or malformed (expected an AIza… Google AI key)",
            ));
        }

        let request = build_request(prompt, &self.config);
        let attempts = self.policy.max_retries + 1;
        let mut last_err: Option<GenerateError> = None;

        for attempt in 0..attempts {
            if attempt > 0 {
                let delay = backoff_delay(&self.policy, attempt, last_err.as_ref());
                tracing::debug!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "retrying after transient failure"
                );
                tokio::time::sleep(delay).await;
            }

            self.limiter.wait_if_needed().await;

            match self.try_model_chain(&request).await {
                Ok(text) => {
                    self.limiter.record();
                    tracing::debug!(attempt, chars = text.len(), "generation succeeded");
                    return Ok(sanitize(&text, mode));
                }
                Err(err) if err.kind.is_retryable() => {
                    tracing::warn!(attempt, error = %err, "transient generation failure");
                    last_err = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        Err(last_err
            .unwrap_or_else(|| {
                GenerateError::new(GenerateErrorKind::UnknownTransport, "no attempts were made")
            })
            .after_attempts(attempts))
    }

    /// Tries each candidate model in order within a single attempt.
    ///
    /// This is a fallback chain, not a retry: it never consumes retry
    /// budget, and errors the whole chain would reproduce (bad credential,
    /// blocked content, shape mismatches) abort it immediately.
    async fn try_model_chain(&self, request: &Value) -> GenerateResult<String> {
        let mut last_err: Option<GenerateError> = None;

        for model in &self.config.models {
            match self.call_model(model, request).await {
                Ok(text) => return Ok(text),
                Err(err) => {
                    tracing::debug!(model = %model, error = %err, "model candidate failed");
                    if err.kind.advances_fallback() {
                        last_err = Some(err);
                    } else {
                        return Err(err);
                    }
                }
            }
        }

        Err(last_err.unwrap_or_else(|| {
            GenerateError::new(
                GenerateErrorKind::UnknownTransport,
                "no candidate models configured",
            )
        }))
    }

    /// One HTTP round trip against one model.
    async fn call_model(&self, model: &str, request: &Value) -> GenerateResult<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, model, self.config.api_key
        );

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = parse_retry_after(response.headers());
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::from_status(status.as_u16(), &body)
                .with_retry_after(retry_after));
        }

        let value: Value = response.json().await.map_err(|e| {
            GenerateError::new(
                GenerateErrorKind::MalformedResponse,
                format!("failed to decode response body: {e}"),
            )
        })?;
        extract_text(&value)
    }
}

/// Delay before retry attempt `attempt`: a server-provided `retry-after`
/// wins outright; otherwise exponential backoff with jitter.
fn backoff_delay(policy: &BackoffPolicy, attempt: u32, last_err: Option<&GenerateError>) -> Duration {
    if let Some(retry_after) = last_err.and_then(|err| err.retry_after) {
        return retry_after;
    }
    policy.delay(attempt)
}

/// Classifies a reqwest error. Everything here is transport-level and lands
/// in `UnknownTransport`; the message keeps the distinction.
fn classify_reqwest_error(e: &reqwest::Error) -> GenerateError {
    let message = if e.is_timeout() {
        format!("Request timed out: {e}")
    } else if e.is_connect() {
        format!("Connection failed: {e}")
    } else {
        format!("Network error: {e}")
    };
    GenerateError::new(GenerateErrorKind::UnknownTransport, message)
}

fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get("retry-after")?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

fn build_request(prompt: &str, config: &GeminiConfig) -> Value {
    let safety_settings: Vec<Value> = SAFETY_CATEGORIES
        .iter()
        .map(|category| json!({ "category": category, "threshold": "BLOCK_NONE" }))
        .collect();

    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "temperature": config.temperature,
            "topP": config.top_p,
            "topK": config.top_k,
            "maxOutputTokens": config.max_output_tokens,
        },
        "safetySettings": safety_settings,
    })
}

/// Pulls `candidates[0].content.parts[0].text` out of a success body,
/// checking the safety verdict before trusting the text.
fn extract_text(value: &Value) -> GenerateResult<String> {
    let candidate = value
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.first())
        .ok_or_else(|| {
            GenerateError::new(
                GenerateErrorKind::MalformedResponse,
                "response contained no candidates",
            )
        })?;

    if candidate.get("finishReason").and_then(Value::as_str) == Some("SAFETY") {
        return Err(GenerateError::new(
            GenerateErrorKind::ContentBlocked,
            "the response was blocked by the provider's safety filters",
        ));
    }

    let text = candidate
        .get("content")
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array)
        .and_then(|parts| parts.first())
        .and_then(|part| part.get("text"))
        .and_then(Value::as_str)
        .ok_or_else(|| {
            GenerateError::new(
                GenerateErrorKind::MalformedResponse,
                "candidate is missing content.parts[0].text",
            )
        })?;

    if text.trim().is_empty() {
        return Err(GenerateError::new(
            GenerateErrorKind::EmptyResponse,
            "the model returned an empty response",
        ));
    }

    Ok(text.to_string())
}
