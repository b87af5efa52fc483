//! CSV report emission and loading, plus terminal rendering of summaries.
//!
//! Detail rows flatten the mapping fields of a [`MentionRecord`] into JSON
//! object strings so a details file can be loaded back and re-aggregated.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sov_core::{BrandSentiment, BrandSummary, MentionRecord, Platform, PlatformBrandSummary};

/// Width of the longest bar in Markdown output.
const BAR_WIDTH: usize = 30;

const DETAILS_HEADER: [&str; 7] = [
    "platform",
    "keyword",
    "title",
    "url",
    "brand_counts",
    "sentiment_by_brand",
    "engagement",
];
const SUMMARY_HEADER: [&str; 3] = ["brand", "total_mentions", "sov"];
const PLATFORM_SUMMARY_HEADER: [&str; 4] = ["platform", "brand", "total_mentions", "sov"];

/// The three report files for one output prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReportPaths {
    pub details: PathBuf,
    pub summary: PathBuf,
    pub platform_summary: PathBuf,
}

impl ReportPaths {
    pub(crate) fn new(dir: &Path, prefix: &str) -> Self {
        Self {
            details: dir.join(format!("{prefix}_details.csv")),
            summary: dir.join(format!("{prefix}_summary.csv")),
            platform_summary: dir.join(format!("{prefix}_platform_summary.csv")),
        }
    }
}

/// One line of the details CSV.
#[derive(Debug, Serialize, Deserialize)]
struct DetailRow {
    platform: Platform,
    keyword: String,
    title: Option<String>,
    url: Option<String>,
    brand_counts: String,
    sentiment_by_brand: String,
    engagement: Option<String>,
}

impl DetailRow {
    fn from_record(record: &MentionRecord) -> anyhow::Result<Self> {
        Ok(Self {
            platform: record.platform,
            keyword: record.keyword.clone(),
            title: record.title.clone(),
            url: record.url.clone(),
            brand_counts: serde_json::to_string(&record.brand_counts)?,
            sentiment_by_brand: serde_json::to_string(&record.sentiment_by_brand)?,
            engagement: record
                .engagement
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?,
        })
    }

    fn into_record(self) -> anyhow::Result<MentionRecord> {
        let brand_counts: BTreeMap<String, u64> = serde_json::from_str(&self.brand_counts)
            .with_context(|| format!("invalid brand_counts: {}", self.brand_counts))?;
        let sentiment: BTreeMap<String, BrandSentiment> =
            serde_json::from_str(&self.sentiment_by_brand).with_context(|| {
                format!("invalid sentiment_by_brand: {}", self.sentiment_by_brand)
            })?;
        let engagement = self
            .engagement
            .as_deref()
            .map(serde_json::from_str::<BTreeMap<String, u64>>)
            .transpose()
            .context("invalid engagement")?;

        Ok(MentionRecord::new(self.platform, self.keyword, brand_counts, sentiment)
            .with_title(self.title)
            .with_url(self.url)
            .with_engagement(engagement))
    }
}

/// Write `rows` under `header`. The serializer only emits a header alongside
/// the first row, so an empty set gets it written directly.
fn write_rows<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to open {} for writing", path.display()))?;
    if rows.is_empty() {
        writer.write_record(header)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    reader
        .deserialize::<T>()
        .enumerate()
        .map(|(i, row)| row.with_context(|| format!("{}: bad row {}", path.display(), i + 1)))
        .collect()
}

pub(crate) fn write_details(path: &Path, records: &[MentionRecord]) -> anyhow::Result<()> {
    let rows = records
        .iter()
        .map(DetailRow::from_record)
        .collect::<anyhow::Result<Vec<_>>>()?;
    write_rows(path, &DETAILS_HEADER, &rows)
}

pub(crate) fn read_details(path: &Path) -> anyhow::Result<Vec<MentionRecord>> {
    read_rows::<DetailRow>(path)?
        .into_iter()
        .map(DetailRow::into_record)
        .collect()
}

pub(crate) fn write_summary(path: &Path, rows: &[BrandSummary]) -> anyhow::Result<()> {
    write_rows(path, &SUMMARY_HEADER, rows)
}

pub(crate) fn read_summary(path: &Path) -> anyhow::Result<Vec<BrandSummary>> {
    read_rows(path)
}

pub(crate) fn write_platform_summary(
    path: &Path,
    rows: &[PlatformBrandSummary],
) -> anyhow::Result<()> {
    write_rows(path, &PLATFORM_SUMMARY_HEADER, rows)
}

pub(crate) fn read_platform_summary(path: &Path) -> anyhow::Result<Vec<PlatformBrandSummary>> {
    read_rows(path)
}

/// Plain-text table of the global summary.
pub(crate) fn summary_table(rows: &[BrandSummary]) -> String {
    let mut out = format!("{:<20}{:>10}{:>10}\n", "BRAND", "MENTIONS", "SOV");
    for row in rows {
        let _ = writeln!(
            out,
            "{:<20}{:>10}{:>10.4}",
            row.brand, row.total_mentions, row.sov
        );
    }
    out
}

/// Plain-text table of the per-platform summary.
pub(crate) fn platform_table(rows: &[PlatformBrandSummary]) -> String {
    let mut out = format!(
        "{:<10}{:<20}{:>10}{:>10}\n",
        "PLATFORM", "BRAND", "MENTIONS", "SOV"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<10}{:<20}{:>10}{:>10.4}",
            row.platform, row.brand, row.total_mentions, row.sov
        );
    }
    out
}

/// Bar proportional to `value / max`, at most [`BAR_WIDTH`] cells.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || !value.is_finite() {
        return String::new();
    }
    let cells = ((value / max).clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(cells)
}

fn max_sov(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, f64::max)
}

/// Markdown table of the global summary with a bar column.
pub(crate) fn summary_markdown(rows: &[BrandSummary]) -> String {
    let max = max_sov(rows.iter().map(|r| r.sov));
    let mut out = String::from("| Brand | Mentions | SoV | |\n|-------|----------|-----|---|\n");
    for row in rows {
        let _ = writeln!(
            out,
            "| {} | {} | {:.4} | {} |",
            row.brand,
            row.total_mentions,
            row.sov,
            bar(row.sov, max)
        );
    }
    out
}

/// Markdown table of the per-platform summary, bars scaled per platform.
pub(crate) fn platform_markdown(rows: &[PlatformBrandSummary]) -> String {
    let mut out = String::from(
        "| Platform | Brand | Mentions | SoV | |\n|----------|-------|----------|-----|---|\n",
    );
    for row in rows {
        let max = max_sov(
            rows.iter()
                .filter(|r| r.platform == row.platform)
                .map(|r| r.sov),
        );
        let _ = writeln!(
            out,
            "| {} | {} | {} | {:.4} | {} |",
            row.platform,
            row.brand,
            row.total_mentions,
            row.sov,
            bar(row.sov, max)
        );
    }
    out
}
