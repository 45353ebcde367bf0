//! Gleaner main entry point
//!
//! Command-line interface for the news acquisition engine: keyword search
//! with enrichment, bounded breadth-first crawling, and batch article
//! ingestion.

use anyhow::Context;
use clap::{Parser, Subcommand};
use gleaner::config::{load_config_with_hash, Config};
use gleaner::crawler::crawl_site;
use gleaner::feed::fetch_search_feed;
use gleaner::fetch::{build_http_client, FetchLimits};
use gleaner::pipeline::{enrich_feed, ingest_urls, sort_newest_first, Pacing};
use gleaner::storage::ArticleStore;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Gleaner: a news acquisition engine
///
/// Fetches keyword news from an aggregator feed, resolves indirected
/// article links, extracts representative imagery and body text, and crawls
/// sites breadth-first.
#[derive(Parser, Debug)]
#[command(name = "gleaner")]
#[command(version)]
#[command(about = "News acquisition: search, crawl, ingest", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search the aggregator feed for a keyword and print enriched items
    /// as JSON lines, newest first
    Search {
        /// Keyword to search for
        keyword: String,
    },

    /// Crawl a site breadth-first, printing one line per discovered URL
    Crawl {
        /// URL to start crawling from
        start_url: String,

        /// Maximum link depth; 0 fetches only the start URL
        #[arg(long, value_name = "DEPTH")]
        max_depth: Option<u32>,
    },

    /// Fetch, extract, and store every URL in a newline-delimited file
    Batch {
        /// Path to the URL list
        url_file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            tracing::info!(path = %path.display(), hash, "configuration loaded");
            config
        }
        None => Config::default(),
    };

    match cli.command {
        Command::Search { keyword } => handle_search(&config, &keyword).await,
        Command::Crawl {
            start_url,
            max_depth,
        } => handle_crawl(&config, &start_url, max_depth).await,
        Command::Batch { url_file } => handle_batch(&config, &url_file).await,
    }
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("gleaner=info,warn"),
            1 => EnvFilter::new("gleaner=debug,info"),
            2 => EnvFilter::new("gleaner=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles the search subcommand: feed fetch, enrichment, JSON lines out
async fn handle_search(config: &Config, keyword: &str) -> anyhow::Result<()> {
    let client = build_http_client(&config.fetch).context("failed to build HTTP client")?;

    let items = fetch_search_feed(&client, &config.aggregator, keyword)
        .await
        .context("feed fetch failed")?;

    let mut enriched = enrich_feed(
        &client,
        &config.aggregator,
        &config.fetch,
        &config.pipeline,
        Pacing::from_config(&config.pipeline),
        items,
    )
    .await;

    sort_newest_first(&mut enriched);

    for item in &enriched {
        println!("{}", serde_json::to_string(item)?);
    }

    Ok(())
}

/// Handles the crawl subcommand, streaming discovery output as it happens
async fn handle_crawl(
    config: &Config,
    start_url: &str,
    max_depth: Option<u32>,
) -> anyhow::Result<()> {
    let client = build_http_client(&config.fetch).context("failed to build HTTP client")?;
    let max_depth = max_depth.unwrap_or(config.crawler.max_depth);
    let limits = FetchLimits::body(config.fetch.max_body_bytes);

    crawl_site(
        &client,
        start_url,
        max_depth,
        limits,
        |record| println!("[{}] {}", record.depth, record.url),
        |url, message| eprintln!("[error] {}: {}", url, message),
    )
    .await
    .with_context(|| format!("invalid start URL: {}", start_url))?;

    Ok(())
}

/// Handles the batch subcommand
///
/// The exit status reflects whether the input file was readable; per-URL
/// failures are printed and are not fatal.
async fn handle_batch(config: &Config, url_file: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(url_file)
        .with_context(|| format!("failed to read {}", url_file.display()))?;

    let urls: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    let client = build_http_client(&config.fetch).context("failed to build HTTP client")?;
    let mut store = ArticleStore::new(Path::new(&config.output.database_path))
        .context("failed to open article store")?;

    let reports = ingest_urls(&client, &mut store, &config.fetch, &urls).await;

    for report in &reports {
        match &report.outcome {
            Ok(title) => {
                let prefix: String = title.chars().take(60).collect();
                println!("[OK] {} -> {}", report.url, prefix);
            }
            Err(message) => {
                println!("[FAIL] {}: {}", report.url, message);
            }
        }
    }

    Ok(())
}
