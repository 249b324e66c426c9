//! Typed failure taxonomy for generation calls.

use std::fmt;
use std::time::Duration;

use serde_json::Value;

/// Categories of generation failures.
///
/// Caller-fixable kinds need a changed credential or input; transient kinds
/// are retried with backoff and only surface after exhaustion; contract
/// kinds indicate a backend/client mismatch and are never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateErrorKind {
    /// Missing, malformed or rejected API key (HTTP 401).
    InvalidCredential,
    /// The key exists but lacks access (HTTP 403).
    PermissionDenied,
    /// HTTP 429, surfaced after the retry budget is exhausted.
    RateLimitExceeded,
    /// HTTP 503, surfaced after the retry budget is exhausted.
    ServiceUnavailable,
    /// The backend blocked the output via safety filtering.
    ContentBlocked,
    /// The response body did not have the expected shape.
    MalformedResponse,
    /// The response parsed but carried no usable text.
    EmptyResponse,
    /// Anything else: connection failures, timeouts, unclassified statuses.
    UnknownTransport,
}

impl GenerateErrorKind {
    /// Transient failures worth another attempt after a backoff delay.
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            GenerateErrorKind::RateLimitExceeded | GenerateErrorKind::ServiceUnavailable
        )
    }

    /// Whether the model-fallback chain should advance past this failure.
    ///
    /// Credential, safety and response-shape errors would fail identically
    /// on every candidate, so they abort the chain instead.
    pub fn advances_fallback(self) -> bool {
        matches!(
            self,
            GenerateErrorKind::RateLimitExceeded
                | GenerateErrorKind::ServiceUnavailable
                | GenerateErrorKind::UnknownTransport
        )
    }
}

impl fmt::Display for GenerateErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GenerateErrorKind::InvalidCredential => "invalid_credential",
            GenerateErrorKind::PermissionDenied => "permission_denied",
            GenerateErrorKind::RateLimitExceeded => "rate_limit_exceeded",
            GenerateErrorKind::ServiceUnavailable => "service_unavailable",
            GenerateErrorKind::ContentBlocked => "content_blocked",
            GenerateErrorKind::MalformedResponse => "malformed_response",
            GenerateErrorKind::EmptyResponse => "empty_response",
            GenerateErrorKind::UnknownTransport => "unknown_transport",
        };
        write!(f, "{label}")
    }
}

/// Structured generation failure with kind and details.
#[derive(Debug, Clone)]
pub struct GenerateError {
    /// Error category.
    pub kind: GenerateErrorKind,
    /// One-line summary suitable for display.
    pub message: String,
    /// HTTP status that produced this error, when one exists.
    pub status: Option<u16>,
    /// Server-requested delay from a `retry-after` header, when present.
    pub retry_after: Option<Duration>,
}

impl GenerateError {
    /// Creates a new generation error.
    pub fn new(kind: GenerateErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            retry_after: None,
        }
    }

    /// Classifies an HTTP error status.
    ///
    /// Tries to extract the provider's `error.message` from a JSON body for
    /// a cleaner summary; falls back to the bare status line.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<Value>(body)
            .ok()
            .as_ref()
            .and_then(|json| json.get("error"))
            .and_then(|error| error.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string);

        let (kind, summary) = match status {
            401 => (
                GenerateErrorKind::InvalidCredential,
                "the API key was rejected",
            ),
            403 => (
                GenerateErrorKind::PermissionDenied,
                "the API key lacks the required permissions",
            ),
            429 => (GenerateErrorKind::RateLimitExceeded, "rate limit exceeded"),
            503 => (
                GenerateErrorKind::ServiceUnavailable,
                "the service is temporarily unavailable",
            ),
            _ => (GenerateErrorKind::UnknownTransport, "request failed"),
        };

        let message = match detail {
            Some(detail) => format!("HTTP {status}: {summary} ({detail})"),
            None => format!("HTTP {status}: {summary}"),
        };

        Self {
            kind,
            message,
            status: Some(status),
            retry_after: None,
        }
    }

    /// Attaches a server-requested retry delay.
    pub fn with_retry_after(mut self, retry_after: Option<Duration>) -> Self {
        self.retry_after = retry_after;
        self
    }

    /// Marks this error as the survivor of an exhausted retry budget.
    pub fn after_attempts(mut self, attempts: u32) -> Self {
        self.message = format!("{}; gave up after {attempts} attempts", self.message);
        self
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for GenerateError {}

/// Result type for generation operations.
pub type GenerateResult<T> = std::result::Result<T, GenerateError>;
