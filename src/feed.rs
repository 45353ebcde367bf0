//! Aggregator feed boundary
//!
//! Builds the keyword search URL, downloads the RSS document, and maps its
//! entries to [`FeedItem`]s. A malformed feed document is the one fatal
//! error in the acquisition path and is surfaced to the caller as such.

use crate::config::AggregatorConfig;
use crate::fetch::{fetch_page, FetchError, FetchLimits};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use thiserror::Error;
use url::Url;

/// Feeds are read whole; a keyword feed is far below this
const FEED_CAP: usize = 1024 * 1024;

/// Errors from fetching or parsing the aggregator feed
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Feed fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Feed URL invalid: {0}")]
    Url(#[from] url::ParseError),

    #[error("Malformed feed document: {0}")]
    Parse(String),
}

/// One raw item from the aggregator feed
///
/// `link` typically points at the aggregator's redirect endpoint rather
/// than the publisher; the enrichment pipeline resolves it.
#[derive(Debug, Clone)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    /// Description text with markup stripped
    pub snippet: String,
    pub published: Option<DateTime<Utc>>,
    /// Thumbnail harvested from the raw description markup, if any
    pub feed_image: Option<String>,
}

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

static IMG_SRC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<img[^>]+src=["']([^"']+)["']"#).unwrap());

/// Builds the aggregator's keyword search feed URL
pub fn search_feed_url(config: &AggregatorConfig, keyword: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(&config.feed_url)?;
    url.query_pairs_mut()
        .append_pair("q", keyword)
        .append_pair("hl", &config.language)
        .append_pair("gl", &config.country)
        .append_pair("ceid", &config.edition);
    Ok(url)
}

/// Downloads and parses the keyword search feed
pub async fn fetch_search_feed(
    client: &Client,
    config: &AggregatorConfig,
    keyword: &str,
) -> Result<Vec<FeedItem>, FeedError> {
    let url = search_feed_url(config, keyword)?;
    tracing::info!(%url, keyword, "fetching aggregator feed");

    let page = fetch_page(client, url.as_str(), FetchLimits::body(FEED_CAP)).await?;
    let items = parse_feed(page.body.as_bytes())?;

    tracing::info!(count = items.len(), keyword, "feed parsed");
    Ok(items)
}

/// Parses an RSS/Atom document into feed items, preserving entry order
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<FeedItem>, FeedError> {
    let feed = feed_rs::parser::parse(bytes).map_err(|e| FeedError::Parse(e.to_string()))?;

    Ok(feed.entries.iter().filter_map(entry_to_item).collect())
}

fn entry_to_item(entry: &feed_rs::model::Entry) -> Option<FeedItem> {
    let link = entry.links.first().map(|l| l.href.clone())?;

    let title = entry
        .title
        .as_ref()
        .map(|t| t.content.trim().to_string())
        .unwrap_or_default();

    let description = entry
        .summary
        .as_ref()
        .map(|s| s.content.clone())
        .unwrap_or_default();

    let snippet = TAG_RE.replace_all(&description, "").trim().to_string();

    let feed_image = IMG_SRC_RE
        .captures(&description)
        .map(|c| c[1].to_string());

    Some(FeedItem {
        title,
        link,
        snippet,
        published: entry.published,
        feed_image,
    })
}
