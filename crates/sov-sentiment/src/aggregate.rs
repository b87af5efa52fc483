//! Share-of-voice aggregation over mention records.
//!
//! Pure arithmetic: no I/O, no clock, no randomness. Sums are taken over
//! integers or over values sorted first, so results do not depend on row
//! order.

use sov_core::{
    BrandSummary, MentionRecord, Platform, PlatformBrandSummary, SovWeights, NEUTRAL_PRIOR,
};

/// The two components of a brand's score and their weighted combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SovBreakdown {
    pub frequency: f64,
    pub average_sentiment: f64,
    pub sov: f64,
}

/// Share of all brand mentions in `rows` that belong to `brand`.
///
/// `0.0` when `rows` carries no mentions at all.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn frequency(brand: &str, rows: &[MentionRecord]) -> f64 {
    let total: u64 = rows.iter().map(MentionRecord::total_mentions).sum();
    if total == 0 {
        return 0.0;
    }
    let own: u64 = rows.iter().map(|r| r.mentions_of(brand)).sum();
    own as f64 / total as f64
}

/// Mean sentiment value over rows that scored `brand`.
///
/// [`NEUTRAL_PRIOR`] when no row has a sentiment entry for `brand`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_sentiment(brand: &str, rows: &[MentionRecord]) -> f64 {
    let mut values: Vec<f64> = rows
        .iter()
        .filter_map(|r| r.sentiment_by_brand.get(brand))
        .map(sov_core::BrandSentiment::value)
        .collect();
    if values.is_empty() {
        return NEUTRAL_PRIOR;
    }
    values.sort_by(f64::total_cmp);
    values.iter().sum::<f64>() / values.len() as f64
}

/// Frequency, average sentiment and their weighted sum for `brand`.
#[must_use]
pub fn breakdown(brand: &str, rows: &[MentionRecord], weights: SovWeights) -> SovBreakdown {
    let frequency = frequency(brand, rows);
    let average_sentiment = average_sentiment(brand, rows);
    SovBreakdown {
        frequency,
        average_sentiment,
        sov: weights.frequency() * frequency + weights.sentiment() * average_sentiment,
    }
}

#[must_use]
pub fn share_of_voice(brand: &str, rows: &[MentionRecord], weights: SovWeights) -> f64 {
    breakdown(brand, rows, weights).sov
}

fn total_mentions(brand: &str, rows: &[MentionRecord]) -> u64 {
    rows.iter().map(|r| r.mentions_of(brand)).sum()
}

/// One row per configured brand, highest SoV first.
///
/// Brands with no mentions still get a row. Ties keep configured order.
#[must_use]
pub fn global_summary<S: AsRef<str>>(
    brands: &[S],
    rows: &[MentionRecord],
    weights: SovWeights,
) -> Vec<BrandSummary> {
    let mut summary: Vec<BrandSummary> = brands
        .iter()
        .map(|brand| {
            let brand = brand.as_ref();
            BrandSummary {
                brand: brand.to_string(),
                total_mentions: total_mentions(brand, rows),
                sov: share_of_voice(brand, rows, weights),
            }
        })
        .collect();
    summary.sort_by(|a, b| b.sov.total_cmp(&a.sov));
    summary
}

/// One row per platform present in `rows` and configured brand.
///
/// Platforms sort by name; within a platform, highest SoV first with ties in
/// configured order.
#[must_use]
pub fn platform_summary<S: AsRef<str>>(
    brands: &[S],
    rows: &[MentionRecord],
    weights: SovWeights,
) -> Vec<PlatformBrandSummary> {
    let mut platforms: Vec<Platform> = Platform::ALL
        .into_iter()
        .filter(|p| rows.iter().any(|r| r.platform == *p))
        .collect();
    platforms.sort_by_key(|p| p.as_str());

    let mut summary = Vec::with_capacity(platforms.len() * brands.len());
    for platform in platforms {
        let platform_rows: Vec<MentionRecord> = rows
            .iter()
            .filter(|r| r.platform == platform)
            .cloned()
            .collect();
        summary.extend(
            global_summary(brands, &platform_rows, weights)
                .into_iter()
                .map(|row| PlatformBrandSummary {
                    platform,
                    brand: row.brand,
                    total_mentions: row.total_mentions,
                    sov: row.sov,
                }),
        );
    }
    summary
}
