//! Offline lexicon classifier for consumer-product review text.

use crate::classifier::{RawSentiment, SentimentClassifier};
use crate::error::SentimentError;

/// Word weights.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative. The final score is clamped to `[-1.0, 1.0]`.
pub(crate) const LEXICON: &[(&str, f32)] = &[
    // Positive signals
    ("great", 0.4),
    ("good", 0.3),
    ("excellent", 0.5),
    ("amazing", 0.5),
    ("love", 0.5),
    ("loved", 0.5),
    ("best", 0.5),
    ("recommend", 0.4),
    ("recommended", 0.4),
    ("quality", 0.3),
    ("silent", 0.3),
    ("quiet", 0.3),
    ("efficient", 0.4),
    ("saving", 0.3),
    ("savings", 0.3),
    ("reliable", 0.4),
    ("durable", 0.4),
    ("stylish", 0.3),
    ("smart", 0.2),
    ("worth", 0.3),
    ("affordable", 0.3),
    ("innovative", 0.4),
    ("premium", 0.3),
    ("happy", 0.4),
    // Negative signals
    ("bad", -0.4),
    ("poor", -0.4),
    ("terrible", -0.6),
    ("worst", -0.6),
    ("noisy", -0.4),
    ("noise", -0.3),
    ("broken", -0.5),
    ("defective", -0.6),
    ("faulty", -0.5),
    ("failed", -0.4),
    ("failure", -0.4),
    ("problem", -0.3),
    ("issue", -0.3),
    ("issues", -0.3),
    ("expensive", -0.3),
    ("overpriced", -0.4),
    ("complaint", -0.4),
    ("disappointed", -0.5),
    ("disappointing", -0.5),
    ("waste", -0.5),
    ("slow", -0.2),
    ("refund", -0.3),
];

/// Scores below this magnitude are neutral.
const NEUTRAL_BAND: f32 = 0.05;

/// Score a text string using the lexicon.
///
/// Splits text into lowercase words, sums matching weights, and clamps
/// the result to `[-1.0, 1.0]`. Returns `0.0` for empty or unknown text.
#[must_use]
pub fn lexicon_score(text: &str) -> f32 {
    let mut score = 0.0_f32;
    for word in text.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        for &(lex_word, weight) in LEXICON {
            if w == lex_word {
                score += weight;
                break;
            }
        }
    }
    score.clamp(-1.0, 1.0)
}

/// Deterministic classifier over [`lexicon_score`]; needs no network.
///
/// Confidence grows from `0.5` at the neutral band edge to `1.0` at a fully
/// saturated score.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconClassifier;

impl SentimentClassifier for LexiconClassifier {
    async fn classify(&self, text: &str) -> Result<RawSentiment, SentimentError> {
        let score = lexicon_score(text);
        let (label, confidence) = if score > NEUTRAL_BAND {
            ("POSITIVE", 0.5 + f64::from(score) / 2.0)
        } else if score < -NEUTRAL_BAND {
            ("NEGATIVE", 0.5 + f64::from(-score) / 2.0)
        } else {
            ("NEUTRAL", 0.5)
        };
        Ok(RawSentiment {
            label: label.to_string(),
            score: confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_returns_zero() {
        assert_eq!(lexicon_score(""), 0.0);
    }

    #[test]
    fn unknown_text_returns_zero() {
        assert_eq!(lexicon_score("the quick brown fox"), 0.0);
    }

    #[test]
    fn positive_keyword_returns_positive() {
        let score = lexicon_score("this fan is great");
        assert!(score > 0.0, "expected positive score, got {score}");
    }

    #[test]
    fn negative_keyword_returns_negative() {
        let score = lexicon_score("the motor is noisy");
        assert!(score < 0.0, "expected negative score, got {score}");
    }

    #[test]
    fn score_clamps_to_positive_one() {
        let text = "great excellent best love recommend quality amazing reliable";
        assert_eq!(lexicon_score(text), 1.0);
    }

    #[test]
    fn score_clamps_to_negative_one() {
        let text = "terrible worst broken defective faulty waste disappointed";
        assert_eq!(lexicon_score(text), -1.0);
    }

    #[test]
    fn punctuation_stripped_from_words() {
        let score = lexicon_score("silent!");
        assert!(score > 0.0, "expected positive score for 'silent!', got {score}");
    }

    #[tokio::test]
    async fn classifier_labels_follow_score_sign() {
        let pos = LexiconClassifier.classify("excellent and reliable").await.unwrap();
        assert_eq!(pos.label, "POSITIVE");
        assert!(pos.score > 0.5 && pos.score <= 1.0);

        let neg = LexiconClassifier.classify("broken and noisy").await.unwrap();
        assert_eq!(neg.label, "NEGATIVE");
        assert!(neg.score > 0.5 && neg.score <= 1.0);

        let neu = LexiconClassifier.classify("ceiling fan").await.unwrap();
        assert_eq!(neu.label, "NEUTRAL");
        assert_eq!(neu.score, 0.5);
    }

    #[tokio::test]
    async fn saturated_score_is_full_confidence() {
        let out = LexiconClassifier
            .classify("great excellent best love recommend quality amazing reliable")
            .await
            .unwrap();
        assert_eq!(out.score, 1.0);
    }
}
