//! Shared HTTP client settings for every collector.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ScraperError;

/// Timeouts, identity and retry policy applied to collector HTTP calls.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
}

impl HttpSettings {
    #[must_use]
    pub fn from_config(config: &sov_core::AppConfig) -> Self {
        Self {
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            max_retries: config.max_retries,
            retry_backoff_base_ms: config.retry_backoff_base_ms,
        }
    }

    /// Build a `reqwest::Client` with the per-call timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the client cannot be constructed.
    pub fn build_client(&self) -> Result<Client, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .connect_timeout(Duration::from_secs(self.timeout_secs.min(10)))
            .user_agent(self.user_agent.clone())
            .build()?;
        Ok(client)
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: "Mozilla/5.0".to_string(),
            max_retries: 2,
            retry_backoff_base_ms: 500,
        }
    }
}

/// Parse `base_url`, normalised to end with exactly one slash so joined
/// paths append rather than replace the last segment.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidBaseUrl`] when the URL does not parse.
pub(crate) fn normalise_base_url(base_url: &str) -> Result<Url, ScraperError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| ScraperError::InvalidBaseUrl {
        url: base_url.to_owned(),
        reason: e.to_string(),
    })
}

/// Map a non-success response status to the matching error.
pub(crate) fn status_error(status: reqwest::StatusCode, url: &str) -> ScraperError {
    if status.as_u16() == 429 {
        ScraperError::RateLimited {
            url: url.to_owned(),
        }
    } else {
        ScraperError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_single_trailing_slash() {
        let url = normalise_base_url("http://127.0.0.1:9000/v3//").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/v3/");
        assert_eq!(url.join("search").unwrap().as_str(), "http://127.0.0.1:9000/v3/search");
    }

    #[test]
    fn invalid_base_url_is_reported() {
        let err = normalise_base_url("not a url").unwrap_err();
        assert!(matches!(err, ScraperError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn status_429_is_rate_limited() {
        let err = status_error(reqwest::StatusCode::TOO_MANY_REQUESTS, "https://x.test");
        assert!(matches!(err, ScraperError::RateLimited { .. }));
        let err = status_error(reqwest::StatusCode::BAD_GATEWAY, "https://x.test");
        assert!(matches!(err, ScraperError::UnexpectedStatus { status: 502, .. }));
    }

    #[test]
    fn default_settings_match_documented_defaults() {
        let s = HttpSettings::default();
        assert_eq!(s.timeout_secs, 10);
        assert_eq!(s.user_agent, "Mozilla/5.0");
        assert!(s.build_client().is_ok());
    }
}
