//! Generation pipeline tests against a mock backend.
//!
//! Every test points the client at a wiremock server; the constructor's
//! production-URL guard plus `expect()` call counts keep the retry and
//! fallback accounting honest.

use std::sync::Arc;
use std::time::{Duration, Instant};

use cpx_core::gemini::{
    BackoffPolicy, GeminiClient, GeminiConfig, GenerateErrorKind, RateLimiter, SanitizeMode,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer) -> GeminiConfig {
    GeminiConfig {
        base_url: server.uri(),
        ..GeminiConfig::with_key("AIzaTestKey")
    }
}

/// Millisecond-scale backoff so exhaustion tests stay fast.
fn fast_policy() -> BackoffPolicy {
    BackoffPolicy {
        max_retries: 5,
        base_delay: Duration::from_millis(1),
        multiplier: 2.0,
        max_delay: Duration::from_millis(10),
        jitter: 0.2,
    }
}

fn client(server: &MockServer) -> GeminiClient {
    GeminiClient::new(test_config(server), fast_policy(), Arc::new(RateLimiter::default()))
}

fn success_body(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

#[tokio::test]
async fn success_returns_stripped_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .and(query_param("key", "AIzaTestKey"))
        .and(body_partial_json(
            json!({ "contents": [{ "parts": [{ "text": "make a driver" }] }] }),
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(success_body("```cpp\nint main(){}\n```")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let output = client(&server)
        .generate("make a driver", SanitizeMode::Strip)
        .await
        .unwrap();
    assert_eq!(output, "int main(){}");
}

#[tokio::test]
async fn preserve_mode_keeps_markdown_for_the_renderer() {
    let server = MockServer::start().await;
    let answer = "Use a map.\n\n```cpp\nstd::map<int,int> m;\n```\n\nThen iterate.";
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body(answer)))
        .expect(1)
        .mount(&server)
        .await;

    let output = client(&server)
        .generate("hint please", SanitizeMode::Preserve)
        .await
        .unwrap();
    assert_eq!(output, answer);
}

#[tokio::test]
async fn http_401_short_circuits_after_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .generate("anything", SanitizeMode::Strip)
        .await
        .unwrap_err();
    assert_eq!(err.kind, GenerateErrorKind::InvalidCredential);
    assert_eq!(err.status, Some(401));
}

#[tokio::test]
async fn malformed_key_fails_before_any_request() {
    let server = MockServer::start().await;
    // No mounts: any request would 404 and the expect(0) default applies.
    let config = GeminiConfig {
        api_key: "not-a-google-key".to_string(),
        ..test_config(&server)
    };
    let client = GeminiClient::new(config, fast_policy(), Arc::new(RateLimiter::default()));

    let err = client.generate("anything", SanitizeMode::Strip).await.unwrap_err();
    assert_eq!(err.kind, GenerateErrorKind::InvalidCredential);
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}

#[tokio::test]
async fn persistent_429_exhausts_the_retry_budget() {
    let server = MockServer::start().await;
    // Both candidate models are tried per attempt: 6 attempts x 2 models.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .expect(12)
        .mount(&server)
        .await;

    let err = client(&server)
        .generate("anything", SanitizeMode::Strip)
        .await
        .unwrap_err();
    assert_eq!(err.kind, GenerateErrorKind::RateLimitExceeded);
    assert!(err.message.contains("6 attempts"), "{}", err.message);
}

#[tokio::test]
async fn fallback_model_rescues_the_attempt_without_a_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-pro:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let output = client(&server)
        .generate("anything", SanitizeMode::Strip)
        .await
        .unwrap();
    assert_eq!(output, "ok");
}

#[tokio::test]
async fn retry_after_header_overrides_backoff() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("ok")))
        .expect(1)
        .mount(&server)
        .await;

    // Single-model chain so the 429 must be healed by a retry, and a huge
    // computed backoff so only the server-provided zero delay can explain a
    // fast recovery.
    let config = GeminiConfig {
        models: vec!["gemini-1.5-flash".to_string()],
        ..test_config(&server)
    };
    let policy = BackoffPolicy {
        base_delay: Duration::from_secs(30),
        max_delay: Duration::from_secs(30),
        ..fast_policy()
    };
    let client = GeminiClient::new(config, policy, Arc::new(RateLimiter::default()));

    let started = Instant::now();
    let output = client.generate("anything", SanitizeMode::Strip).await.unwrap();
    assert_eq!(output, "ok");
    assert!(
        started.elapsed() < Duration::from_secs(5),
        "computed backoff was used despite retry-after"
    );
}

#[tokio::test]
async fn safety_block_surfaces_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "finishReason": "SAFETY" }]
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .generate("anything", SanitizeMode::Strip)
        .await
        .unwrap_err();
    assert_eq!(err.kind, GenerateErrorKind::ContentBlocked);
}

#[tokio::test]
async fn shape_mismatch_surfaces_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .generate("anything", SanitizeMode::Strip)
        .await
        .unwrap_err();
    assert_eq!(err.kind, GenerateErrorKind::MalformedResponse);
}

#[tokio::test]
async fn empty_text_surfaces_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("  \n")))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .generate("anything", SanitizeMode::Strip)
        .await
        .unwrap_err();
    assert_eq!(err.kind, GenerateErrorKind::EmptyResponse);
}

#[tokio::test]
async fn successful_calls_land_in_the_shared_limiter_window() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("ok")))
        .mount(&server)
        .await;

    let limiter = Arc::new(RateLimiter::default());
    let client = GeminiClient::new(test_config(&server), fast_policy(), Arc::clone(&limiter));

    client.generate("one", SanitizeMode::Strip).await.unwrap();
    client.generate("two", SanitizeMode::Strip).await.unwrap();
    assert_eq!(limiter.in_window(), 2);
}
