//! `YouTube` Data API v3 video collector.

use std::collections::{BTreeMap, HashMap};

use reqwest::{Client, Url};
use serde::Deserialize;
use sov_core::Platform;

use crate::client::{normalise_base_url, status_error, HttpSettings};
use crate::error::ScraperError;
use crate::retry::retry_with_backoff;
use crate::types::RawItem;
use crate::ContentCollector;

const YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";
/// API ceiling for `maxResults` on `search.list`.
const MAX_RESULTS_PER_CALL: usize = 50;

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: String,
    #[serde(default)]
    statistics: HashMap<String, serde_json::Value>,
}

/// Client and collector for the `YouTube` Data API.
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
    settings: HttpSettings,
}

impl YouTubeClient {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn new(api_key: &str, settings: &HttpSettings) -> Result<Self, ScraperError> {
        Self::with_base_url(api_key, settings, YOUTUBE_BASE_URL)
    }

    /// Creates a client against a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built, or
    /// [`ScraperError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        settings: &HttpSettings,
        base_url: &str,
    ) -> Result<Self, ScraperError> {
        Ok(Self {
            client: settings.build_client()?,
            api_key: api_key.to_owned(),
            base_url: normalise_base_url(base_url)?,
            settings: settings.clone(),
        })
    }

    /// Videos matching `keyword`, with engagement counters attached.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] when the search call itself fails. A failed
    /// statistics call only leaves engagement empty.
    pub async fn search_videos(
        &self,
        keyword: &str,
        n: usize,
    ) -> Result<Vec<RawItem>, ScraperError> {
        let max_results = n.clamp(1, MAX_RESULTS_PER_CALL).to_string();
        let url = self.endpoint(
            "search",
            &[
                ("part", "snippet"),
                ("type", "video"),
                ("maxResults", &max_results),
                ("q", keyword),
            ],
        )?;
        let body = self.get_json(&url).await?;
        let search: SearchListResponse =
            serde_json::from_value(body).map_err(|e| ScraperError::Deserialize {
                context: format!("youtube search(q={keyword})"),
                source: e,
            })?;

        let videos: Vec<(String, Snippet)> = search
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id.map(|id| (id, item.snippet)))
            .collect();

        let ids: Vec<&str> = videos.iter().map(|(id, _)| id.as_str()).collect();
        let mut stats = match self.video_statistics(&ids).await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::warn!(keyword, error = %e, "YouTube statistics lookup failed");
                HashMap::new()
            }
        };

        Ok(videos
            .into_iter()
            .map(|(id, snippet)| RawItem {
                engagement: Some(stats.remove(&id).unwrap_or_default()),
                url: Some(format!("https://youtu.be/{id}")),
                title: Some(snippet.title),
                body_text: snippet.description,
            })
            .collect())
    }

    /// Engagement counters per video id, fetched in one batched call.
    async fn video_statistics(
        &self,
        ids: &[&str],
    ) -> Result<HashMap<String, BTreeMap<String, u64>>, ScraperError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let joined = ids.join(",");
        let url = self.endpoint("videos", &[("part", "statistics"), ("id", &joined)])?;
        let body = self.get_json(&url).await?;
        let videos: VideoListResponse =
            serde_json::from_value(body).map_err(|e| ScraperError::Deserialize {
                context: "youtube videos(part=statistics)".to_owned(),
                source: e,
            })?;

        Ok(videos
            .items
            .into_iter()
            .map(|v| (v.id, engagement_from_statistics(&v.statistics)))
            .collect())
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, ScraperError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| ScraperError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    async fn get_json(&self, url: &Url) -> Result<serde_json::Value, ScraperError> {
        retry_with_backoff(
            self.settings.max_retries,
            self.settings.retry_backoff_base_ms,
            || async {
                let response = self
                    .client
                    .get(url.clone())
                    .send()
                    .await
                    .map_err(reqwest::Error::without_url)?;
                let status = response.status();
                if !status.is_success() {
                    // Never echo the query string: it carries the API key.
                    let mut redacted = url.clone();
                    redacted.set_query(None);
                    return Err(status_error(status, redacted.as_str()));
                }
                Ok::<_, ScraperError>(response.json().await.map_err(reqwest::Error::without_url)?)
            },
        )
        .await
    }
}

impl ContentCollector for YouTubeClient {
    fn platform(&self) -> Platform {
        Platform::Video
    }

    async fn collect(&self, keyword: &str, limit: usize) -> Result<Vec<RawItem>, ScraperError> {
        let items = self.search_videos(keyword, limit).await?;
        tracing::info!(keyword, count = items.len(), "collected YouTube videos");
        Ok(items)
    }
}

/// Numeric statistics keyed by short counter names (`viewCount` → `views`).
fn engagement_from_statistics(
    statistics: &HashMap<String, serde_json::Value>,
) -> BTreeMap<String, u64> {
    statistics
        .iter()
        .filter_map(|(key, value)| {
            let count = match value {
                serde_json::Value::String(s) => s.parse::<u64>().ok()?,
                serde_json::Value::Number(n) => n.as_u64()?,
                _ => return None,
            };
            let name = match key.as_str() {
                "viewCount" => "views",
                "likeCount" => "likes",
                "dislikeCount" => "dislikes",
                "commentCount" => "comments",
                "favoriteCount" => "favorites",
                other => other,
            };
            Some((name.to_string(), count))
        })
        .collect()
}
