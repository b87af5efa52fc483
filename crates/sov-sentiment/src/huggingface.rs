//! Hosted text-classification client for the Hugging Face inference API.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use sov_scraper::retry::retry_with_backoff;
use sov_scraper::HttpSettings;

use crate::classifier::{RawSentiment, SentimentClassifier};
use crate::error::SentimentError;

/// Error bodies longer than this are cut before landing in an error message.
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// Pipelines return either one list per input or a bare list for a single input.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

/// Classifier backed by a hosted sentiment model.
pub struct HuggingFaceClassifier {
    client: reqwest::Client,
    url: String,
    token: String,
    max_retries: u32,
    retry_backoff_base_ms: u64,
}

impl HuggingFaceClassifier {
    /// Create a classifier for `model` under the inference root `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the HTTP client cannot be built.
    pub fn with_base_url(
        token: &str,
        model: &str,
        settings: &HttpSettings,
        base_url: &str,
    ) -> Result<Self, SentimentError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()?;
        Ok(Self {
            client,
            url: format!("{}/{}", base_url.trim_end_matches('/'), model.trim_matches('/')),
            token: token.to_string(),
            max_retries: settings.max_retries,
            retry_backoff_base_ms: settings.retry_backoff_base_ms,
        })
    }

    async fn request(&self, text: &str) -> Result<RawSentiment, SentimentError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&InferenceRequest { inputs: text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SentimentError::Inference {
                status: status.as_u16(),
                message: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let parsed: InferenceResponse = response
            .json()
            .await
            .map_err(|e| SentimentError::MalformedResponse(e.to_string()))?;
        best_label(parsed)
    }
}

impl SentimentClassifier for HuggingFaceClassifier {
    async fn classify(&self, text: &str) -> Result<RawSentiment, SentimentError> {
        retry_with_backoff(self.max_retries, self.retry_backoff_base_ms, || {
            self.request(text)
        })
        .await
    }
}

/// Highest-scoring label of the first input's candidates.
fn best_label(response: InferenceResponse) -> Result<RawSentiment, SentimentError> {
    let candidates = match response {
        InferenceResponse::Nested(mut outer) => {
            if outer.is_empty() {
                Vec::new()
            } else {
                outer.swap_remove(0)
            }
        }
        InferenceResponse::Flat(list) => list,
    };
    candidates
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .map(|best| RawSentiment {
            label: best.label,
            score: best.score,
        })
        .ok_or_else(|| SentimentError::MalformedResponse("no labels in response".to_string()))
}
