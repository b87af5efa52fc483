//! Twitter/X social collector via the `bird` CLI.
//!
//! Invokes `bird search "{keyword}" --json -n {limit} --auth-token ... --ct0 ...`
//! as a subprocess. Yields nothing when credentials are not configured.

use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;
use sov_core::Platform;

use crate::error::ScraperError;
use crate::types::RawItem;
use crate::ContentCollector;

#[derive(Deserialize)]
struct BirdTweet {
    id: String,
    text: String,
    #[serde(default, alias = "likeCount", alias = "favorite_count")]
    like_count: Option<u64>,
    #[serde(default, alias = "retweetCount")]
    retweet_count: Option<u64>,
}

/// Social platform collector.
pub struct TwitterCollector {
    auth_token: Option<String>,
    ct0: Option<String>,
    program: String,
}

impl TwitterCollector {
    #[must_use]
    pub fn new(auth_token: Option<String>, ct0: Option<String>) -> Self {
        Self {
            auth_token,
            ct0,
            program: "bird".to_string(),
        }
    }

    /// Use a different executable in place of `bird`.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Recent tweets matching `keyword`, at most `limit`.
    ///
    /// Returns an empty `Vec` when credentials are absent or `bird` exits
    /// non-zero.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Subprocess`] if the `bird` subprocess cannot be
    /// spawned.
    pub async fn search_tweets(
        &self,
        keyword: &str,
        limit: usize,
    ) -> Result<Vec<RawItem>, ScraperError> {
        let (Some(auth_token), Some(ct0)) = (self.auth_token.as_deref(), self.ct0.as_deref())
        else {
            tracing::info!(keyword, "Twitter credentials not set, skipping");
            return Ok(vec![]);
        };

        let output = tokio::process::Command::new(&self.program)
            .args([
                "search",
                keyword,
                "--json",
                "-n",
                &limit.to_string(),
                "--auth-token",
                auth_token,
                "--ct0",
                ct0,
            ])
            .output()
            .await
            .map_err(|e| ScraperError::Subprocess(format!("{} search: {e}", self.program)))?;

        if !output.status.success() {
            tracing::warn!(
                keyword,
                status = %output.status,
                "bird search returned non-zero exit"
            );
            return Ok(vec![]);
        }

        Ok(parse_bird_output(&output.stdout, limit))
    }
}

impl ContentCollector for TwitterCollector {
    fn platform(&self) -> Platform {
        Platform::Social
    }

    async fn collect(&self, keyword: &str, limit: usize) -> Result<Vec<RawItem>, ScraperError> {
        let items = self.search_tweets(keyword, limit).await?;
        tracing::info!(keyword, count = items.len(), "collected tweets");
        Ok(items)
    }
}

/// Tweets from `bird --json` output, de-duplicated by id. Malformed output is empty.
fn parse_bird_output(stdout: &[u8], limit: usize) -> Vec<RawItem> {
    let tweets: Vec<BirdTweet> = serde_json::from_slice(stdout).unwrap_or_default();
    let mut seen: HashSet<String> = HashSet::new();

    tweets
        .into_iter()
        .filter(|t| seen.insert(t.id.clone()))
        .take(limit)
        .map(|tweet| {
            let mut engagement = BTreeMap::new();
            if let Some(likes) = tweet.like_count {
                engagement.insert("likes".to_string(), likes);
            }
            if let Some(retweets) = tweet.retweet_count {
                engagement.insert("retweets".to_string(), retweets);
            }
            RawItem {
                title: None,
                url: None,
                body_text: tweet.text,
                engagement: Some(engagement),
            }
        })
        .collect()
}
