//! Turning collected items into scored mention records.

use std::collections::BTreeMap;

use sov_core::{MentionRecord, Platform};
use sov_scraper::RawItem;

use crate::classifier::SentimentClassifier;
use crate::mentions::count_brand_mentions;
use crate::scorer::ContextScorer;

/// Count every brand in `item` and score each brand it mentions.
///
/// Brands are visited in configured order so classifier calls (and their
/// throttle) happen in a predictable sequence.
pub async fn build_record<S, C>(
    item: RawItem,
    platform: Platform,
    keyword: &str,
    brands: &[S],
    scorer: &ContextScorer<C>,
) -> MentionRecord
where
    S: AsRef<str>,
    C: SentimentClassifier,
{
    let text = item.full_text();
    let counts = count_brand_mentions(&text, brands);

    let mut sentiment = BTreeMap::new();
    for brand in brands {
        let brand = brand.as_ref();
        if counts.get(brand).copied().unwrap_or(0) == 0 {
            continue;
        }
        sentiment.insert(brand.to_string(), scorer.score(&text, brand).await);
    }

    MentionRecord::new(platform, keyword, counts, sentiment)
        .with_title(item.title)
        .with_url(item.url)
        .with_engagement(item.engagement)
}

/// Score a platform's batch of items sequentially, preserving order.
pub async fn score_items<S, C>(
    items: Vec<RawItem>,
    platform: Platform,
    keyword: &str,
    brands: &[S],
    scorer: &ContextScorer<C>,
) -> Vec<MentionRecord>
where
    S: AsRef<str>,
    C: SentimentClassifier,
{
    let mut records = Vec::with_capacity(items.len());
    for item in items {
        records.push(build_record(item, platform, keyword, brands, scorer).await);
    }
    tracing::debug!(platform = %platform, keyword, records = records.len(), "scored items");
    records
}
