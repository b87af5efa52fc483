//! Case-insensitive brand mention counting.
//!
//! Matching is plain substring matching on lowercased text: no tokenization
//! and no word boundaries, so a brand inside a longer word still counts.

use std::collections::BTreeMap;

/// Lowercased text plus a map from each lowercased byte back to the index of
/// the original character it came from.
struct FoldedText {
    folded: String,
    source_char: Vec<usize>,
}

impl FoldedText {
    fn new(text: &str) -> Self {
        let mut folded = String::with_capacity(text.len());
        let mut source_char = Vec::with_capacity(text.len());
        for (idx, c) in text.chars().enumerate() {
            for lower in c.to_lowercase() {
                folded.push(lower);
                source_char.extend(std::iter::repeat_n(idx, lower.len_utf8()));
            }
        }
        Self {
            folded,
            source_char,
        }
    }
}

fn fold(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// Count non-overlapping case-insensitive occurrences of each brand in `text`.
///
/// Every brand appears in the result, with `0` when absent. An empty brand
/// name never matches.
#[must_use]
pub fn count_brand_mentions<S: AsRef<str>>(text: &str, brands: &[S]) -> BTreeMap<String, u64> {
    let folded = fold(text);
    brands
        .iter()
        .map(|brand| {
            let brand = brand.as_ref();
            let needle = fold(brand);
            let count = if needle.is_empty() {
                0
            } else {
                folded.matches(needle.as_str()).count() as u64
            };
            (brand.to_string(), count)
        })
        .collect()
}

/// Character index in `text` where `brand` first occurs, case-insensitively.
#[must_use]
pub fn first_occurrence(text: &str, brand: &str) -> Option<usize> {
    let needle = fold(brand);
    if needle.is_empty() {
        return None;
    }
    let folded = FoldedText::new(text);
    folded
        .folded
        .find(needle.as_str())
        .map(|byte| folded.source_char[byte])
}
