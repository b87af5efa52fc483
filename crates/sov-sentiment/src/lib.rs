//! Brand mention extraction, contextual sentiment scoring and share-of-voice
//! aggregation.
//!
//! Collected items become [`sov_core::MentionRecord`]s through
//! [`pipeline::build_record`]: brands are counted case-insensitively, then the
//! text around each mentioned brand's first occurrence is classified by a
//! [`SentimentClassifier`]. Classification never fails the run; errors fall
//! back to a neutral default. [`aggregate`] turns records into summaries.

pub mod aggregate;
pub mod backend;
pub mod classifier;
pub mod error;
pub mod huggingface;
pub mod lexicon;
pub mod mentions;
pub mod pipeline;
pub mod scorer;

pub use aggregate::{
    average_sentiment, breakdown, frequency, global_summary, platform_summary, share_of_voice,
    SovBreakdown,
};
pub use backend::ConfiguredClassifier;
pub use classifier::{RawSentiment, SentimentClassifier};
pub use error::SentimentError;
pub use huggingface::HuggingFaceClassifier;
pub use lexicon::{lexicon_score, LexiconClassifier};
pub use mentions::count_brand_mentions;
pub use pipeline::{build_record, score_items};
pub use scorer::{context_window, ContextScorer};
