use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Platform an item was collected from.
///
/// Deserialization also accepts the service names older reports used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Platform {
    #[serde(alias = "Google", alias = "google", alias = "web")]
    Web,
    #[serde(alias = "YouTube", alias = "youtube", alias = "video")]
    Video,
    #[serde(alias = "Twitter", alias = "twitter", alias = "social")]
    Social,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Web, Platform::Video, Platform::Social];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Web => "Web",
            Platform::Video => "Video",
            Platform::Social => "Social",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Canonical sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Map an arbitrary classifier label onto the canonical three.
    ///
    /// `POS` anywhere in the label wins, then `NEG`; everything else
    /// (including `LABEL_1`-style ids) is neutral.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let upper = raw.to_uppercase();
        if upper.contains("POS") {
            SentimentLabel::Positive
        } else if upper.contains("NEG") {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "Positive"),
            SentimentLabel::Negative => write!(f, "Negative"),
            SentimentLabel::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Neutral prior used wherever no usable sentiment exists for a brand.
pub const NEUTRAL_PRIOR: f64 = 0.5;

/// Sentiment of the context around one brand's first mention in an item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrandSentiment {
    pub label: SentimentLabel,
    /// Classifier confidence in `[0.0, 1.0]`.
    pub score: f64,
    /// Set when classification failed and this entry is the neutral stand-in.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
}

impl BrandSentiment {
    /// Substituted whenever classification fails.
    pub const NEUTRAL_DEFAULT: BrandSentiment = BrandSentiment {
        label: SentimentLabel::Neutral,
        score: 0.5,
        fallback: true,
    };

    #[must_use]
    pub fn new(label: SentimentLabel, score: f64) -> Self {
        Self {
            label,
            score,
            fallback: false,
        }
    }

    /// Contribution of this sentiment to a brand's average:
    /// full confidence when positive, half when neutral, nothing when negative.
    /// A fallback entry carries no signal and contributes the neutral prior.
    #[must_use]
    pub fn value(&self) -> f64 {
        if self.fallback {
            return NEUTRAL_PRIOR;
        }
        match self.label {
            SentimentLabel::Positive => self.score,
            SentimentLabel::Neutral => 0.5 * self.score,
            SentimentLabel::Negative => 0.0,
        }
    }
}

/// One collected content item, scored for every brand it mentions.
///
/// Brands with zero mentions never appear in `brand_counts` or
/// `sentiment_by_brand`, and every `sentiment_by_brand` key is also a
/// `brand_counts` key. [`MentionRecord::new`] enforces both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionRecord {
    pub platform: Platform,
    pub keyword: String,
    pub title: Option<String>,
    pub url: Option<String>,
    pub brand_counts: BTreeMap<String, u64>,
    pub sentiment_by_brand: BTreeMap<String, BrandSentiment>,
    pub engagement: Option<BTreeMap<String, u64>>,
}

impl MentionRecord {
    #[must_use]
    pub fn new(
        platform: Platform,
        keyword: impl Into<String>,
        mut brand_counts: BTreeMap<String, u64>,
        mut sentiment_by_brand: BTreeMap<String, BrandSentiment>,
    ) -> Self {
        brand_counts.retain(|_, count| *count > 0);
        sentiment_by_brand.retain(|brand, _| brand_counts.contains_key(brand));
        Self {
            platform,
            keyword: keyword.into(),
            title: None,
            url: None,
            brand_counts,
            sentiment_by_brand,
            engagement: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    #[must_use]
    pub fn with_engagement(mut self, engagement: Option<BTreeMap<String, u64>>) -> Self {
        self.engagement = engagement;
        self
    }

    /// Occurrences of `brand` in this item; `0` when absent.
    #[must_use]
    pub fn mentions_of(&self, brand: &str) -> u64 {
        self.brand_counts.get(brand).copied().unwrap_or(0)
    }

    /// Occurrences of all brands in this item.
    #[must_use]
    pub fn total_mentions(&self) -> u64 {
        self.brand_counts.values().sum()
    }
}

/// Global share-of-voice row for one brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandSummary {
    pub brand: String,
    pub total_mentions: u64,
    pub sov: f64,
}

/// Share-of-voice row for one brand on one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformBrandSummary {
    pub platform: Platform,
    pub brand: String,
    pub total_mentions: u64,
    pub sov: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, u64)]) -> BTreeMap<String, u64> {
        pairs.iter().map(|(b, c)| ((*b).to_string(), *c)).collect()
    }

    #[test]
    fn new_drops_zero_counts_and_orphan_sentiment() {
        let mut sentiment = BTreeMap::new();
        sentiment.insert("A".to_string(), BrandSentiment::NEUTRAL_DEFAULT);
        sentiment.insert("B".to_string(), BrandSentiment::NEUTRAL_DEFAULT);

        let record = MentionRecord::new(
            Platform::Web,
            "smart fan",
            counts(&[("A", 2), ("B", 0)]),
            sentiment,
        );

        assert_eq!(record.brand_counts, counts(&[("A", 2)]));
        assert!(record.sentiment_by_brand.contains_key("A"));
        assert!(!record.sentiment_by_brand.contains_key("B"));
    }

    #[test]
    fn mentions_of_absent_brand_is_zero() {
        let record = MentionRecord::new(Platform::Video, "k", counts(&[("A", 3)]), BTreeMap::new());
        assert_eq!(record.mentions_of("A"), 3);
        assert_eq!(record.mentions_of("Z"), 0);
        assert_eq!(record.total_mentions(), 3);
    }

    #[test]
    fn normalize_label_variants() {
        assert_eq!(SentimentLabel::normalize("POSITIVE"), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::normalize("positive"), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::normalize("NEGATIVE"), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::normalize("neg"), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::normalize("NEUTRAL"), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::normalize("LABEL_1"), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::normalize(""), SentimentLabel::Neutral);
    }

    #[test]
    fn sentiment_value_weights_by_label() {
        let pos = BrandSentiment::new(SentimentLabel::Positive, 0.9);
        let neu = BrandSentiment::new(SentimentLabel::Neutral, 0.8);
        let neg = BrandSentiment::new(SentimentLabel::Negative, 0.99);
        assert!((pos.value() - 0.9).abs() < 1e-12);
        assert!((neu.value() - 0.4).abs() < 1e-12);
        assert_eq!(neg.value(), 0.0);
    }

    #[test]
    fn fallback_contributes_neutral_prior() {
        let fallback = BrandSentiment::NEUTRAL_DEFAULT;
        assert_eq!(fallback.label, SentimentLabel::Neutral);
        assert_eq!(fallback.score, 0.5);
        assert_eq!(fallback.value(), NEUTRAL_PRIOR);
    }

    #[test]
    fn fallback_flag_only_serialized_when_set() {
        let classified = serde_json::to_string(&BrandSentiment::new(SentimentLabel::Positive, 0.9))
            .unwrap();
        assert_eq!(classified, r#"{"label":"Positive","score":0.9}"#);

        let fallback = serde_json::to_string(&BrandSentiment::NEUTRAL_DEFAULT).unwrap();
        assert_eq!(fallback, r#"{"label":"Neutral","score":0.5,"fallback":true}"#);

        let parsed: BrandSentiment = serde_json::from_str(r#"{"label":"Negative","score":0.7}"#)
            .unwrap();
        assert!(!parsed.fallback);
    }

    fn platform(name: &str) -> Result<Platform, serde_json::Error> {
        serde_json::from_value(serde_json::Value::String(name.to_string()))
    }

    #[test]
    fn platform_accepts_canonical_and_service_names() {
        assert_eq!(platform("web").unwrap(), Platform::Web);
        assert_eq!(platform("Google").unwrap(), Platform::Web);
        assert_eq!(platform("YouTube").unwrap(), Platform::Video);
        assert_eq!(platform("twitter").unwrap(), Platform::Social);
        assert!(platform("tiktok").is_err());
    }

    #[test]
    fn platform_display_matches_serialized_name() {
        for p in Platform::ALL {
            assert_eq!(serde_json::to_value(p).unwrap(), p.to_string());
            assert_eq!(platform(&p.to_string()).unwrap(), p);
        }
    }
}
