//! Command handlers: collection runs, re-aggregation and summary display.
//!
//! Collector failures are logged and the platform contributes no items for
//! that keyword; classification failures never reach this layer. Only
//! configuration and report I/O errors abort a command.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use sov_core::{load_brands, AppConfig, MentionRecord, Platform};
use sov_scraper::{
    ContentCollector, HttpSettings, RawItem, TwitterCollector, WebCollector, YouTubeClient,
};
use sov_sentiment::{
    global_summary, platform_summary, score_items, ConfiguredClassifier, ContextScorer,
    SentimentClassifier,
};

use crate::report::{self, ReportPaths};

/// Items from one platform for one keyword; a failed collector yields none.
async fn collect_platform<C: ContentCollector>(
    collector: &C,
    keyword: &str,
    limit: usize,
) -> Vec<RawItem> {
    match collector.collect(keyword, limit).await {
        Ok(items) => {
            tracing::info!(platform = %collector.platform(), keyword, items = items.len(), "collected");
            items
        }
        Err(e) => {
            tracing::warn!(
                platform = %collector.platform(),
                keyword,
                error = %e,
                "collector failed; platform yields no items"
            );
            Vec::new()
        }
    }
}

/// The collectors enabled by configuration, in run order.
struct Collectors {
    web: WebCollector,
    video: Option<YouTubeClient>,
    social: Option<TwitterCollector>,
}

impl Collectors {
    fn from_config(config: &AppConfig, settings: &HttpSettings) -> anyhow::Result<Self> {
        let web = WebCollector::new(config.serpapi_api_key.as_deref(), settings)?;
        let video = config
            .youtube_api_key
            .as_deref()
            .map(|key| YouTubeClient::new(key, settings))
            .transpose()?;
        let social = config.twitter_enabled.then(|| {
            TwitterCollector::new(
                config.twitter_auth_token.clone(),
                config.twitter_ct0.clone(),
            )
        });
        Ok(Self { web, video, social })
    }

    fn platforms(&self) -> Vec<Platform> {
        let mut platforms = vec![Platform::Web];
        if self.video.is_some() {
            platforms.push(Platform::Video);
        }
        if self.social.is_some() {
            platforms.push(Platform::Social);
        }
        platforms
    }
}

/// Collect and score every enabled platform for each keyword, in order.
async fn collect_records<C: SentimentClassifier>(
    collectors: &Collectors,
    keywords: &[String],
    brands: &[String],
    limit: usize,
    scorer: &ContextScorer<C>,
) -> Vec<MentionRecord> {
    let mut records = Vec::new();
    for keyword in keywords {
        tracing::info!(keyword = %keyword, "processing keyword");

        let items = collect_platform(&collectors.web, keyword, limit).await;
        records.extend(score_items(items, Platform::Web, keyword, brands, scorer).await);

        if let Some(video) = &collectors.video {
            let items = collect_platform(video, keyword, limit).await;
            records.extend(score_items(items, Platform::Video, keyword, brands, scorer).await);
        }

        if let Some(social) = &collectors.social {
            let items = collect_platform(social, keyword, limit).await;
            records.extend(score_items(items, Platform::Social, keyword, brands, scorer).await);
        }
    }
    records
}

/// Summaries for `records`, printed and written to the configured output directory.
fn emit_summaries(
    config: &AppConfig,
    brands: &[String],
    records: &[MentionRecord],
    paths: &ReportPaths,
) -> anyhow::Result<()> {
    let summary = global_summary(brands, records, config.weights);
    let per_platform = platform_summary(brands, records, config.weights);

    println!("Global share of voice");
    print!("{}", report::summary_table(&summary));
    println!();
    println!("Share of voice by platform");
    print!("{}", report::platform_table(&per_platform));

    report::write_summary(&paths.summary, &summary)?;
    report::write_platform_summary(&paths.platform_summary, &per_platform)?;
    Ok(())
}

fn resolve_keywords(config: &AppConfig, overrides: &[String]) -> Vec<String> {
    let overrides: Vec<String> = overrides
        .iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect();
    if overrides.is_empty() {
        config.keywords.clone()
    } else {
        overrides
    }
}

/// Run a full collection: collect, score, aggregate and write all three reports.
///
/// When `dry_run` is `true`, prints the keywords, brands and enabled platforms
/// and returns without any network calls.
///
/// # Errors
///
/// Returns an error if the brand list cannot be loaded, a collector or the
/// classifier cannot be constructed, or a report cannot be written.
pub(crate) async fn run_collection(
    config: &AppConfig,
    keyword_overrides: &[String],
    dry_run: bool,
) -> anyhow::Result<()> {
    let brands = load_brands(&config.brands_path)?.names();
    let keywords = resolve_keywords(config, keyword_overrides);
    let settings = HttpSettings::from_config(config);
    let collectors = Collectors::from_config(config, &settings)?;

    if collectors.video.is_none() {
        tracing::info!("YOUTUBE_API_KEY not set; skipping video platform");
    }

    if dry_run {
        let platforms: Vec<&str> = collectors.platforms().iter().map(|p| p.as_str()).collect();
        println!(
            "dry-run: would search {} keywords [{}] for {} brands [{}] on [{}] ({} results per platform, {} sentiment)",
            keywords.len(),
            keywords.join(", "),
            brands.len(),
            brands.join(", "),
            platforms.join(", "),
            config.results_per_platform,
            config.sentiment_backend,
        );
        return Ok(());
    }

    let classifier = ConfiguredClassifier::from_config(config, &settings)?;
    let scorer = ContextScorer::new(classifier)
        .with_throttle(Duration::from_millis(config.sentiment_delay_ms));

    let records = collect_records(
        &collectors,
        &keywords,
        &brands,
        config.results_per_platform,
        &scorer,
    )
    .await;
    tracing::info!(records = records.len(), "collection finished");

    let paths = ReportPaths::new(&config.output_dir, &config.output_prefix);
    report::write_details(&paths.details, &records)?;
    emit_summaries(config, &brands, &records, &paths)?;

    println!();
    println!("wrote {}", paths.details.display());
    println!("wrote {}", paths.summary.display());
    println!("wrote {}", paths.platform_summary.display());
    Ok(())
}

/// Re-aggregate an existing details CSV with the configured brands and weights.
///
/// # Errors
///
/// Returns an error if the brand list or details file cannot be read, or the
/// summaries cannot be written.
pub(crate) fn run_summarize(config: &AppConfig, details: &Path) -> anyhow::Result<()> {
    let brands = load_brands(&config.brands_path)?.names();
    let records = report::read_details(details)
        .with_context(|| format!("failed to load details from {}", details.display()))?;
    tracing::info!(records = records.len(), path = %details.display(), "loaded details");

    let paths = ReportPaths::new(&config.output_dir, &config.output_prefix);
    emit_summaries(config, &brands, &records, &paths)?;

    println!();
    println!("wrote {}", paths.summary.display());
    println!("wrote {}", paths.platform_summary.display());
    Ok(())
}

/// Print the latest summaries as Markdown tables.
///
/// # Errors
///
/// Returns an error if either summary file is missing or unreadable.
pub(crate) fn run_show(config: &AppConfig) -> anyhow::Result<()> {
    let paths = ReportPaths::new(&config.output_dir, &config.output_prefix);
    for path in [&paths.summary, &paths.platform_summary] {
        if !path.exists() {
            anyhow::bail!(
                "no summary found at {}; run `sov run` first",
                path.display()
            );
        }
    }

    let summary = report::read_summary(&paths.summary)?;
    let per_platform = report::read_platform_summary(&paths.platform_summary)?;

    println!("# Share of Voice");
    println!();
    println!(
        "**Weights**: frequency {}, sentiment {}",
        config.weights.frequency(),
        config.weights.sentiment()
    );
    println!();
    println!("## Overall");
    println!();
    print!("{}", report::summary_markdown(&summary));
    println!();
    println!("## By platform");
    println!();
    print!("{}", report::platform_markdown(&per_platform));
    Ok(())
}
