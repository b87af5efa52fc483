//! Web search collector: SerpAPI first, Google results-page scrape as fallback.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{Client, Url};
use scraper::{Html, Selector};
use serde::Deserialize;
use sov_core::Platform;

use crate::client::{normalise_base_url, status_error, HttpSettings};
use crate::error::ScraperError;
use crate::page::fetch_page_text;
use crate::retry::retry_with_backoff;
use crate::types::{RawItem, SearchHit};
use crate::ContentCollector;

const SERPAPI_BASE_URL: &str = "https://serpapi.com/";
const GOOGLE_BASE_URL: &str = "https://www.google.com/";

#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    link: Option<String>,
    title: Option<String>,
}

/// Client for SerpAPI's Google engine.
pub struct SerpApiClient {
    client: Client,
    api_key: String,
    base_url: Url,
    settings: HttpSettings,
}

impl SerpApiClient {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn new(api_key: &str, settings: &HttpSettings) -> Result<Self, ScraperError> {
        Self::with_base_url(api_key, settings, SERPAPI_BASE_URL)
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

    /// Top `n` organic results for `keyword`, hits without a link dropped.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Api`] when SerpAPI reports an error in the body.
    /// - [`ScraperError::Http`] / [`ScraperError::UnexpectedStatus`] on transport failures.
    /// - [`ScraperError::Deserialize`] if the body is not the expected shape.
    pub async fn search(&self, keyword: &str, n: usize) -> Result<Vec<SearchHit>, ScraperError> {
        let mut url = self
            .base_url
            .join("search.json")
            .map_err(|e| ScraperError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("engine", "google")
            .append_pair("q", keyword)
            .append_pair("num", &n.to_string())
            .append_pair("api_key", &self.api_key);

        let body: serde_json::Value = retry_with_backoff(
            self.settings.max_retries,
            self.settings.retry_backoff_base_ms,
            || self.request_json(&url),
        )
        .await?;

        let parsed: SerpApiResponse =
            serde_json::from_value(body).map_err(|e| ScraperError::Deserialize {
                context: format!("serpapi search(q={keyword})"),
                source: e,
            })?;

        if let Some(message) = parsed.error {
            return Err(ScraperError::Api {
                service: "serpapi".to_owned(),
                message,
            });
        }

        Ok(parsed
            .organic_results
            .into_iter()
            .filter_map(|r| {
                let link = r.link.filter(|l| !l.is_empty())?;
                Some(SearchHit {
                    url: link,
                    title: r.title.unwrap_or_default(),
                })
            })
            .take(n)
            .collect())
    }

    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, ScraperError> {
        // The query string carries the API key; keep it out of error messages.
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let status = response.status();
        // SerpAPI reports bad keys as 401 with a JSON `error`; surface that message.
        if !status.is_success() && status.as_u16() != 401 {
            return Err(status_error(status, self.base_url.as_str()));
        }
        Ok(response.json().await.map_err(reqwest::Error::without_url)?)
    }
}

/// Web platform collector.
///
/// Resolves search hits through SerpAPI when a key is configured, otherwise
/// (or when SerpAPI fails) scrapes the Google results page. Each hit's page
/// text is fetched; a page that cannot be fetched contributes its title only.
pub struct WebCollector {
    client: Client,
    serpapi: Option<SerpApiClient>,
    google_base_url: Url,
}

impl WebCollector {
    /// # Errors
    ///
    /// Returns [`ScraperError`] if an HTTP client cannot be built.
    pub fn new(serpapi_key: Option<&str>, settings: &HttpSettings) -> Result<Self, ScraperError> {
        let serpapi = serpapi_key
            .map(|key| SerpApiClient::new(key, settings))
            .transpose()?;
        Self::with_parts(serpapi, settings, GOOGLE_BASE_URL)
    }

    /// Assemble a collector from an explicit SerpAPI client and Google base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] if the HTTP client cannot be built or the
    /// base URL does not parse.
    pub fn with_parts(
        serpapi: Option<SerpApiClient>,
        settings: &HttpSettings,
        google_base_url: &str,
    ) -> Result<Self, ScraperError> {
        Ok(Self {
            client: settings.build_client()?,
            serpapi,
            google_base_url: normalise_base_url(google_base_url)?,
        })
    }

    /// Ordered search hits for `keyword`.
    ///
    /// # Errors
    ///
    /// Returns the fallback scrape's error when both SerpAPI and the scrape fail.
    pub async fn search(&self, keyword: &str, n: usize) -> Result<Vec<SearchHit>, ScraperError> {
        if let Some(serpapi) = &self.serpapi {
            match serpapi.search(keyword, n).await {
                Ok(hits) => {
                    tracing::info!(keyword, count = hits.len(), "web search via SerpAPI");
                    return Ok(hits);
                }
                Err(e) => {
                    tracing::warn!(
                        keyword,
                        error = %e,
                        "SerpAPI search failed, falling back to scraping"
                    );
                }
            }
        } else {
            tracing::info!(keyword, "SerpAPI not configured, scraping results page");
        }

        let hits = self.scrape_results_page(keyword, n).await?;
        tracing::info!(keyword, count = hits.len(), "web search via results-page scrape");
        Ok(hits)
    }

    async fn scrape_results_page(
        &self,
        keyword: &str,
        n: usize,
    ) -> Result<Vec<SearchHit>, ScraperError> {
        let encoded = utf8_percent_encode(keyword, NON_ALPHANUMERIC).to_string();
        let url = format!("{}search?q={encoded}", self.google_base_url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, &url));
        }
        let body = response.text().await?;
        Ok(parse_google_results(&body, n))
    }
}

impl ContentCollector for WebCollector {
    fn platform(&self) -> Platform {
        Platform::Web
    }

    async fn collect(&self, keyword: &str, limit: usize) -> Result<Vec<RawItem>, ScraperError> {
        let hits = self.search(keyword, limit).await?;
        let mut items = Vec::with_capacity(hits.len());
        for hit in hits {
            let body_text = match fetch_page_text(&self.client, &hit.url).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(url = %hit.url, error = %e, "page fetch failed, using empty text");
                    String::new()
                }
            };
            tracing::debug!(url = %hit.url, chars = body_text.len(), "fetched page text");
            items.push(RawItem {
                title: Some(hit.title),
                url: Some(hit.url),
                body_text,
                engagement: None,
            });
        }
        Ok(items)
    }
}

/// Extract organic results (`div.tF2Cxc` blocks) from a Google results page.
fn parse_google_results(html: &str, n: usize) -> Vec<SearchHit> {
    let doc = Html::parse_document(html);
    let block_sel = Selector::parse("div.tF2Cxc").expect("valid result selector");
    let link_sel = Selector::parse("a").expect("valid link selector");
    let title_sel = Selector::parse("h3").expect("valid title selector");

    doc.select(&block_sel)
        .take(n)
        .filter_map(|block| {
            let href = block.select(&link_sel).next()?.value().attr("href")?;
            let title = block.select(&title_sel).next()?;
            let url = resolve_result_href(href)?;
            Some(SearchHit {
                url,
                title: title.text().collect::<String>().trim().to_string(),
            })
        })
        .collect()
}

/// Absolute result URL from a result anchor; unwraps `/url?q=` redirects.
fn resolve_result_href(href: &str) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    let redirect = Url::parse("https://www.google.com").ok()?.join(href).ok()?;
    if redirect.path() != "/url" {
        return None;
    }
    redirect
        .query_pairs()
        .find(|(k, _)| k == "q" || k == "url")
        .map(|(_, v)| v.into_owned())
        .filter(|v| v.starts_with("http"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS_PAGE: &str = r#"<html><body>
<div class="g"><div class="tF2Cxc"><a href="https://example.com/fans"><h3>Best smart fans 2024</h3></a></div></div>
<div class="g"><div class="tF2Cxc"><a href="/url?q=https://shop.test/atomberg&amp;sa=U"><h3>Atomberg Renesa</h3></a></div></div>
<div class="g"><div class="tF2Cxc"><a href="/search?q=related"><h3>Related</h3></a></div></div>
<div class="g"><div class="tF2Cxc"><span>no link</span></div></div>
</body></html>"#;

    #[test]
    fn parses_result_blocks() {
        let hits = parse_google_results(RESULTS_PAGE, 10);
        assert_eq!(
            hits,
            vec![
                SearchHit {
                    url: "https://example.com/fans".to_string(),
                    title: "Best smart fans 2024".to_string(),
                },
                SearchHit {
                    url: "https://shop.test/atomberg".to_string(),
                    title: "Atomberg Renesa".to_string(),
                },
            ]
        );
    }

    #[test]
    fn respects_result_limit() {
        let hits = parse_google_results(RESULTS_PAGE, 1);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].url, "https://example.com/fans");
    }

    #[test]
    fn page_without_results_is_empty() {
        assert!(parse_google_results("<html><body>captcha</body></html>", 5).is_empty());
    }

    #[test]
    fn internal_links_are_not_results() {
        assert_eq!(resolve_result_href("/search?q=fans"), None);
        assert_eq!(resolve_result_href("#top"), None);
    }
}
