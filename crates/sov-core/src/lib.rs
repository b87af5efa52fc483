//! Shared domain types and configuration for the share-of-voice pipeline.

pub mod app_config;
pub mod brands;
pub mod config;
pub mod record;
pub mod weights;

use thiserror::Error;

pub use app_config::{AppConfig, SentimentBackend};
pub use brands::{load_brands, BrandConfig, BrandsFile};
pub use config::{build_app_config, load_app_config, load_app_config_from_env};
pub use record::{
    BrandSentiment, BrandSummary, MentionRecord, Platform, PlatformBrandSummary, SentimentLabel,
    NEUTRAL_PRIOR,
};
pub use weights::SovWeights;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read brands file {path}: {source}")]
    BrandsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse brands file: {0}")]
    BrandsFileParse(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}
