mod report;
mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sov")]
#[command(about = "Share-of-voice analysis across web, video and social search results")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect, score and aggregate mentions, then write the CSV reports
    Run {
        /// Keyword to search; repeat to search several. Overrides `SOV_KEYWORDS`
        #[arg(long = "keyword", short = 'k')]
        keywords: Vec<String>,

        /// Print the keywords, brands and platforms that would be used, then exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Recompute both summaries from an existing details CSV
    Summarize {
        /// Path to a `<prefix>_details.csv` file
        #[arg(long)]
        details: PathBuf,
    },
    /// Print the latest summaries as Markdown tables
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = sov_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Run { keywords, dry_run } => {
            run::run_collection(&config, &keywords, dry_run).await?;
        }
        Commands::Summarize { details } => run::run_summarize(&config, &details)?,
        Commands::Show => run::run_show(&config)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
