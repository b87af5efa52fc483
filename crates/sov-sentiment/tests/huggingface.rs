//! Integration tests for the hosted classifier using wiremock HTTP mocks.

use sov_core::{BrandSentiment, SentimentLabel};
use sov_scraper::HttpSettings;
use sov_sentiment::{ContextScorer, HuggingFaceClassifier, SentimentClassifier, SentimentError};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "distilbert-base-uncased-finetuned-sst-2-english";

fn settings() -> HttpSettings {
    HttpSettings {
        timeout_secs: 5,
        user_agent: "sov-test".to_string(),
        max_retries: 1,
        retry_backoff_base_ms: 0,
    }
}

fn classifier(server: &MockServer) -> HuggingFaceClassifier {
    HuggingFaceClassifier::with_base_url("hf_test", MODEL, &settings(), &server.uri()).unwrap()
}

#[tokio::test]
async fn classify_posts_inputs_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/{MODEL}")))
        .and(header("authorization", "Bearer hf_test"))
        .and(body_json(serde_json::json!({ "inputs": "Atomberg is quiet" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([[
            { "label": "POSITIVE", "score": 0.97 },
            { "label": "NEGATIVE", "score": 0.03 }
        ]])))
        .expect(1)
        .mount(&server)
        .await;

    let out = classifier(&server).classify("Atomberg is quiet").await.unwrap();
    assert_eq!(out.label, "POSITIVE");
    assert!((out.score - 0.97).abs() < 1e-12);
    server.verify().await;
}

#[tokio::test]
async fn model_loading_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(serde_json::json!({ "error": "Model is currently loading" })),
        )
        .expect(2)
        .mount(&server)
        .await;

    let err = classifier(&server).classify("Havells").await.unwrap_err();
    assert!(
        matches!(err, SentimentError::Inference { status: 503, ref message } if message.contains("loading")),
        "got: {err:?}"
    );
    server.verify().await;
}

#[tokio::test]
async fn bad_token_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let err = classifier(&server).classify("Usha").await.unwrap_err();
    assert!(matches!(err, SentimentError::Inference { status: 401, .. }));
    server.verify().await;
}

#[tokio::test]
async fn scorer_over_failing_endpoint_returns_neutral_default() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let scorer = ContextScorer::new(classifier(&server));
    let s = scorer.score("Orient fans are fine", "orient").await;
    assert_eq!(s, BrandSentiment::NEUTRAL_DEFAULT);
    assert_eq!(s.label, SentimentLabel::Neutral);
    assert_eq!(s.score, 0.5);
}
