//! Sentiment classification collaborators.

use crate::error::SentimentError;

/// A classifier's verdict before label normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSentiment {
    /// Label in the classifier's own vocabulary (`POSITIVE`, `LABEL_2`, `neg`, ...).
    pub label: String,
    /// Confidence for `label`.
    pub score: f64,
}

/// Anything that can label a short text span.
///
/// Implementations may be remote models, local lexicons, or test doubles;
/// callers never see their failures past the scorer.
#[allow(async_fn_in_trait)]
pub trait SentimentClassifier {
    /// # Errors
    ///
    /// Returns [`SentimentError`] for any network, model, or input failure.
    async fn classify(&self, text: &str) -> Result<RawSentiment, SentimentError>;
}

impl<T: SentimentClassifier + ?Sized> SentimentClassifier for &T {
    async fn classify(&self, text: &str) -> Result<RawSentiment, SentimentError> {
        (**self).classify(text).await
    }
}
