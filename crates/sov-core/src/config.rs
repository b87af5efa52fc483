use crate::app_config::{AppConfig, SentimentBackend};
use crate::weights::SovWeights;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a pure
/// `HashMap` lookup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default =
        |var: &str, default: &str| -> String { optional(var).unwrap_or_else(|| default.to_string()) };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        or_default(var, default)
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let keywords = parse_list(&or_default("SOV_KEYWORDS", "smart fan"));
    if keywords.is_empty() {
        return Err(invalid(
            "SOV_KEYWORDS",
            "at least one keyword is required".to_string(),
        ));
    }

    let results_per_platform = or_default("SOV_RESULTS_PER_PLATFORM", "25")
        .parse::<usize>()
        .map_err(|e| invalid("SOV_RESULTS_PER_PLATFORM", e.to_string()))?;
    if results_per_platform == 0 {
        return Err(invalid(
            "SOV_RESULTS_PER_PLATFORM",
            "must be at least 1".to_string(),
        ));
    }

    let weights = SovWeights::new(
        parse_f64("SOV_WEIGHT_FREQUENCY", "0.6")?,
        parse_f64("SOV_WEIGHT_SENTIMENT", "0.4")?,
    )?;

    let sentiment_backend = parse_backend(&or_default("SOV_SENTIMENT_BACKEND", "huggingface"))?;
    let huggingface_api_token = optional("HUGGINGFACE_API_TOKEN");
    if sentiment_backend == SentimentBackend::HuggingFace && huggingface_api_token.is_none() {
        return Err(ConfigError::MissingEnvVar(
            "HUGGINGFACE_API_TOKEN".to_string(),
        ));
    }

    Ok(AppConfig {
        keywords,
        results_per_platform,
        brands_path: PathBuf::from(or_default("SOV_BRANDS_PATH", "./config/brands.yaml")),
        weights,
        output_dir: PathBuf::from(or_default("SOV_OUTPUT_DIR", ".")),
        output_prefix: or_default("SOV_OUTPUT_PREFIX", "sov_multi"),
        log_level: or_default("SOV_LOG_LEVEL", "info"),
        request_timeout_secs: parse_u64("SOV_REQUEST_TIMEOUT_SECS", "10")?,
        user_agent: or_default("SOV_USER_AGENT", "Mozilla/5.0"),
        sentiment_delay_ms: parse_u64("SOV_SENTIMENT_DELAY_MS", "500")?,
        max_retries: parse_u32("SOV_MAX_RETRIES", "2")?,
        retry_backoff_base_ms: parse_u64("SOV_RETRY_BACKOFF_BASE_MS", "500")?,
        sentiment_backend,
        huggingface_api_token,
        sentiment_model: or_default(
            "SOV_SENTIMENT_MODEL",
            "distilbert-base-uncased-finetuned-sst-2-english",
        ),
        sentiment_endpoint: or_default(
            "SOV_SENTIMENT_ENDPOINT",
            "https://api-inference.huggingface.co/models",
        ),
        serpapi_api_key: optional("SERPAPI_API_KEY"),
        youtube_api_key: optional("YOUTUBE_API_KEY"),
        twitter_enabled: parse_flag(&or_default("SOV_TWITTER_ENABLED", "false")),
        twitter_auth_token: optional("TWITTER_AUTH_TOKEN"),
        twitter_ct0: optional("TWITTER_CT0"),
    })
}

/// Split a comma-separated list, dropping blank entries.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_backend(s: &str) -> Result<SentimentBackend, ConfigError> {
    match s.to_ascii_lowercase().as_str() {
        "huggingface" | "hf" => Ok(SentimentBackend::HuggingFace),
        "lexicon" => Ok(SentimentBackend::Lexicon),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SOV_SENTIMENT_BACKEND".to_string(),
            reason: format!("unknown backend '{other}'; expected huggingface or lexicon"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
