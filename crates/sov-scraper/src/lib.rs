//! Content collectors for share-of-voice runs.
//!
//! Each platform has one collector: web search (SerpAPI with a results-page
//! scrape fallback, plus page text for every hit), `YouTube` Data API videos,
//! and Twitter/X via the `bird` CLI. Collectors return typed errors; callers
//! decide whether a failure empties the platform or aborts.

pub mod client;
pub mod error;
pub mod page;
pub mod retry;
pub mod search;
pub mod twitter;
pub mod types;
pub mod youtube;

use sov_core::Platform;

pub use client::HttpSettings;
pub use error::ScraperError;
pub use search::{SerpApiClient, WebCollector};
pub use twitter::TwitterCollector;
pub use types::{RawItem, SearchHit};
pub use youtube::YouTubeClient;

/// A platform source of raw items for a keyword.
#[allow(async_fn_in_trait)]
pub trait ContentCollector {
    fn platform(&self) -> Platform;

    /// Up to `limit` items for `keyword`, in source order.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] when the platform cannot be queried at all.
    async fn collect(&self, keyword: &str, limit: usize) -> Result<Vec<RawItem>, ScraperError>;
}
