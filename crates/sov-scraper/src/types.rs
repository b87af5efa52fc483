use std::collections::BTreeMap;

/// One organic web search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub url: String,
    pub title: String,
}

/// One raw content item handed from a collector to the scoring pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawItem {
    pub title: Option<String>,
    pub url: Option<String>,
    pub body_text: String,
    /// Platform-specific counters (views, likes, retweets). `None` for web pages.
    pub engagement: Option<BTreeMap<String, u64>>,
}

impl RawItem {
    /// Title and body joined by a single space; whichever is present when only one is.
    #[must_use]
    pub fn full_text(&self) -> String {
        match self.title.as_deref().filter(|t| !t.is_empty()) {
            Some(title) if !self.body_text.is_empty() => format!("{title} {}", self.body_text),
            Some(title) => title.to_string(),
            None => self.body_text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_text_joins_title_and_body() {
        let item = RawItem {
            title: Some("Best fans".to_string()),
            body_text: "Atomberg leads".to_string(),
            ..RawItem::default()
        };
        assert_eq!(item.full_text(), "Best fans Atomberg leads");
    }

    #[test]
    fn full_text_without_title_is_body() {
        let item = RawItem {
            body_text: "just a tweet".to_string(),
            ..RawItem::default()
        };
        assert_eq!(item.full_text(), "just a tweet");
    }

    #[test]
    fn full_text_with_empty_body_is_title() {
        let item = RawItem {
            title: Some("Title only".to_string()),
            ..RawItem::default()
        };
        assert_eq!(item.full_text(), "Title only");
    }
}
