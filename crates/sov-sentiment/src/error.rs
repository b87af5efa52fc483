use sov_scraper::retry::Transient;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("inference endpoint returned status {status}: {message}")]
    Inference { status: u16, message: String },

    #[error("unexpected inference response: {0}")]
    MalformedResponse(String),

    #[error("classifier error: {0}")]
    Classifier(String),
}

impl Transient for SentimentError {
    /// Model cold starts surface as 503, throttling as 429; both clear up on retry.
    fn is_transient(&self) -> bool {
        match self {
            SentimentError::Http(e) => e.is_transient(),
            SentimentError::Inference { status, .. } => *status == 429 || *status >= 500,
            SentimentError::MalformedResponse(_) | SentimentError::Classifier(_) => false,
        }
    }
}
