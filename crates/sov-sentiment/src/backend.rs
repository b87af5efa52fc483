//! Classifier selection from configuration.

use sov_core::{AppConfig, SentimentBackend};
use sov_scraper::HttpSettings;

use crate::classifier::{RawSentiment, SentimentClassifier};
use crate::error::SentimentError;
use crate::huggingface::HuggingFaceClassifier;
use crate::lexicon::LexiconClassifier;

/// The classifier chosen by `SOV_SENTIMENT_BACKEND`.
pub enum ConfiguredClassifier {
    HuggingFace(HuggingFaceClassifier),
    Lexicon(LexiconClassifier),
}

impl ConfiguredClassifier {
    /// # Errors
    ///
    /// Returns [`SentimentError::Classifier`] when the hosted backend is
    /// selected without a token, or [`SentimentError::Http`] when its client
    /// cannot be built.
    pub fn from_config(config: &AppConfig, settings: &HttpSettings) -> Result<Self, SentimentError> {
        match config.sentiment_backend {
            SentimentBackend::Lexicon => Ok(Self::Lexicon(LexiconClassifier)),
            SentimentBackend::HuggingFace => {
                let token = config.huggingface_api_token.as_deref().ok_or_else(|| {
                    SentimentError::Classifier("HUGGINGFACE_API_TOKEN is not set".to_string())
                })?;
                let classifier = HuggingFaceClassifier::with_base_url(
                    token,
                    &config.sentiment_model,
                    settings,
                    &config.sentiment_endpoint,
                )?;
                Ok(Self::HuggingFace(classifier))
            }
        }
    }
}

impl SentimentClassifier for ConfiguredClassifier {
    async fn classify(&self, text: &str) -> Result<RawSentiment, SentimentError> {
        match self {
            Self::HuggingFace(c) => c.classify(text).await,
            Self::Lexicon(c) => c.classify(text).await,
        }
    }
}
