use std::path::PathBuf;

use crate::weights::SovWeights;

/// Which sentiment collaborator scores mention contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentBackend {
    /// Hosted Hugging Face inference model; needs `HUGGINGFACE_API_TOKEN`.
    HuggingFace,
    /// Offline word lexicon; no credentials.
    Lexicon,
}

impl std::fmt::Display for SentimentBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentBackend::HuggingFace => write!(f, "huggingface"),
            SentimentBackend::Lexicon => write!(f, "lexicon"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub keywords: Vec<String>,
    pub results_per_platform: usize,
    pub brands_path: PathBuf,
    pub weights: SovWeights,
    pub output_dir: PathBuf,
    pub output_prefix: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub sentiment_delay_ms: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub sentiment_backend: SentimentBackend,
    pub huggingface_api_token: Option<String>,
    pub sentiment_model: String,
    pub sentiment_endpoint: String,
    pub serpapi_api_key: Option<String>,
    pub youtube_api_key: Option<String>,
    pub twitter_enabled: bool,
    pub twitter_auth_token: Option<String>,
    pub twitter_ct0: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[redacted]");
        f.debug_struct("AppConfig")
            .field("keywords", &self.keywords)
            .field("results_per_platform", &self.results_per_platform)
            .field("brands_path", &self.brands_path)
            .field("weights", &self.weights)
            .field("output_dir", &self.output_dir)
            .field("output_prefix", &self.output_prefix)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("sentiment_delay_ms", &self.sentiment_delay_ms)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("sentiment_backend", &self.sentiment_backend)
            .field("huggingface_api_token", &redact(&self.huggingface_api_token))
            .field("sentiment_model", &self.sentiment_model)
            .field("sentiment_endpoint", &self.sentiment_endpoint)
            .field("serpapi_api_key", &redact(&self.serpapi_api_key))
            .field("youtube_api_key", &redact(&self.youtube_api_key))
            .field("twitter_enabled", &self.twitter_enabled)
            .field("twitter_auth_token", &redact(&self.twitter_auth_token))
            .field("twitter_ct0", &redact(&self.twitter_ct0))
            .finish()
    }
}
