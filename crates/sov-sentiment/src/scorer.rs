//! Contextual sentiment scoring around a brand's first mention.

use std::time::Duration;

use sov_core::{BrandSentiment, SentimentLabel};

use crate::classifier::SentimentClassifier;
use crate::mentions::first_occurrence;

/// Characters kept on each side of the first mention.
pub const CONTEXT_RADIUS: usize = 200;

/// Longest span handed to a classifier.
pub const MAX_CLASSIFIER_CHARS: usize = 512;

/// Text around the first case-insensitive occurrence of `brand`.
///
/// The window starts up to [`CONTEXT_RADIUS`] characters before the match and
/// ends [`CONTEXT_RADIUS`] characters after its start, clamped to the text,
/// then cut to [`MAX_CLASSIFIER_CHARS`]. `None` when the brand never occurs.
#[must_use]
pub fn context_window(text: &str, brand: &str) -> Option<String> {
    let idx = first_occurrence(text, brand)?;
    let start = idx.saturating_sub(CONTEXT_RADIUS);
    let end = idx + CONTEXT_RADIUS;
    Some(
        text.chars()
            .skip(start)
            .take(end - start)
            .take(MAX_CLASSIFIER_CHARS)
            .collect(),
    )
}

/// Wraps a classifier so scoring never fails.
///
/// Every classifier error, and every score that is not a finite number, is
/// logged and replaced by [`BrandSentiment::NEUTRAL_DEFAULT`].
pub struct ContextScorer<C> {
    classifier: C,
    throttle: Duration,
}

impl<C: SentimentClassifier> ContextScorer<C> {
    #[must_use]
    pub fn new(classifier: C) -> Self {
        Self {
            classifier,
            throttle: Duration::ZERO,
        }
    }

    /// Sleep for `throttle` before each classifier call.
    #[must_use]
    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    /// Sentiment of the context around `brand`'s first mention in `text`.
    pub async fn score(&self, text: &str, brand: &str) -> BrandSentiment {
        let Some(window) = context_window(text, brand) else {
            tracing::debug!(brand, "brand not found in text; using neutral default");
            return BrandSentiment::NEUTRAL_DEFAULT;
        };

        if !self.throttle.is_zero() {
            tokio::time::sleep(self.throttle).await;
        }

        match self.classifier.classify(&window).await {
            Ok(raw) if raw.score.is_finite() => BrandSentiment::new(
                SentimentLabel::normalize(&raw.label),
                raw.score.clamp(0.0, 1.0),
            ),
            Ok(raw) => {
                tracing::warn!(brand, label = %raw.label, score = raw.score, "non-finite classifier score; using neutral default");
                BrandSentiment::NEUTRAL_DEFAULT
            }
            Err(e) => {
                tracing::warn!(brand, error = %e, "sentiment classification failed; using neutral default");
                BrandSentiment::NEUTRAL_DEFAULT
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::classifier::RawSentiment;
    use crate::error::SentimentError;

    struct AlwaysFails;

    impl SentimentClassifier for AlwaysFails {
        async fn classify(&self, _text: &str) -> Result<RawSentiment, SentimentError> {
            Err(SentimentError::Classifier("model unavailable".to_string()))
        }
    }

    struct Fixed {
        label: &'static str,
        score: f64,
        seen: Mutex<Vec<String>>,
    }

    impl Fixed {
        fn new(label: &'static str, score: f64) -> Self {
            Self {
                label,
                score,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl SentimentClassifier for Fixed {
        async fn classify(&self, text: &str) -> Result<RawSentiment, SentimentError> {
            self.seen.lock().unwrap().push(text.to_string());
            Ok(RawSentiment {
                label: self.label.to_string(),
                score: self.score,
            })
        }
    }

    #[test]
    fn window_is_clamped_to_text() {
        let window = context_window("Atomberg is quiet", "atomberg").unwrap();
        assert_eq!(window, "Atomberg is quiet");
    }

    #[test]
    fn window_spans_radius_around_first_mention() {
        let text = format!("{}Havells{}", "x".repeat(300), "y".repeat(300));
        let window = context_window(&text, "havells").unwrap();
        assert_eq!(window.chars().count(), 2 * CONTEXT_RADIUS);
        assert!(window.starts_with(&"x".repeat(CONTEXT_RADIUS)));
        assert!(window[CONTEXT_RADIUS..].starts_with("Havells"));
    }

    #[test]
    fn window_uses_first_occurrence_only() {
        let text = format!("Orient first{}Orient second", " ".repeat(500));
        let window = context_window(&text, "orient").unwrap();
        assert!(window.contains("first"));
        assert!(!window.contains("second"));
    }

    #[test]
    fn window_never_exceeds_classifier_limit() {
        let text = "Bajaj ".repeat(1000);
        let window = context_window(&text, "bajaj").unwrap();
        assert!(window.chars().count() <= MAX_CLASSIFIER_CHARS);
    }

    #[test]
    fn window_absent_brand_is_none() {
        assert_eq!(context_window("no fans here", "Usha"), None);
    }

    #[tokio::test]
    async fn failing_classifier_yields_neutral_default() {
        let scorer = ContextScorer::new(AlwaysFails);
        for text in ["Atomberg rocks", "Atomberg is noisy", "ATOMBERG"] {
            let s = scorer.score(text, "Atomberg").await;
            assert_eq!(s.label, SentimentLabel::Neutral);
            assert_eq!(s.score, 0.5);
            assert_eq!(s.value(), 0.5);
        }
    }

    #[tokio::test]
    async fn labels_are_normalized() {
        let scorer = ContextScorer::new(Fixed::new("positive", 0.93));
        let s = scorer.score("Crompton is great", "crompton").await;
        assert_eq!(s, BrandSentiment::new(SentimentLabel::Positive, 0.93));

        let scorer = ContextScorer::new(Fixed::new("LABEL_1", 0.8));
        let s = scorer.score("Crompton is fine", "crompton").await;
        assert_eq!(s.label, SentimentLabel::Neutral);
        assert!(!s.fallback);
    }

    #[tokio::test]
    async fn non_finite_score_falls_back() {
        let scorer = ContextScorer::new(Fixed::new("POSITIVE", f64::NAN));
        let s = scorer.score("Usha", "usha").await;
        assert_eq!(s, BrandSentiment::NEUTRAL_DEFAULT);
    }

    #[tokio::test]
    async fn out_of_range_score_is_clamped() {
        let scorer = ContextScorer::new(Fixed::new("NEGATIVE", 1.7));
        let s = scorer.score("Usha", "usha").await;
        assert_eq!(s.score, 1.0);
    }

    #[tokio::test]
    async fn classifier_receives_context_window() {
        let classifier = Fixed::new("POSITIVE", 0.9);
        let text = format!("{}Havells fan", "a".repeat(250));
        let scorer = ContextScorer::new(&classifier);
        scorer.score(&text, "havells").await;
        let seen = classifier.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], format!("{}Havells fan", "a".repeat(CONTEXT_RADIUS)));
    }

    #[tokio::test]
    async fn missing_brand_skips_classifier() {
        let classifier = Fixed::new("POSITIVE", 0.9);
        let scorer = ContextScorer::new(&classifier);
        let s = scorer.score("nothing relevant", "Orient").await;
        assert_eq!(s, BrandSentiment::NEUTRAL_DEFAULT);
        assert!(classifier.seen.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn throttle_sleeps_before_classification() {
        let scorer = ContextScorer::new(Fixed::new("POSITIVE", 0.9))
            .with_throttle(Duration::from_millis(500));
        let started = tokio::time::Instant::now();
        scorer.score("Bajaj", "bajaj").await;
        assert!(started.elapsed() >= Duration::from_millis(500));
    }
}
