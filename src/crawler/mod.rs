//! Bounded breadth-first site crawler
//!
//! Orchestrates the frontier, the fetcher, and link discovery. Fetch
//! failures are reported and skipped; they never end the crawl. Dropping
//! the returned future stops new fetches at the next queue step.

mod discover;
mod scheduler;

pub use discover::discover_links;
pub use scheduler::CrawlQueue;

use crate::fetch::{fetch_page, FetchLimits};
use crate::url::normalize_url;
use crate::{GleanerError, Result};
use reqwest::Client;
use url::Url;

/// One URL discovered by a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRecord {
    pub url: Url,
    pub depth: u32,
}

/// Crawls a site breadth-first from `start_url` up to `max_depth` hops
///
/// Expansion is scoped to the start URL's host. Depth 0 is the start URL
/// itself; `max_depth = 0` fetches only the start URL and discovers
/// nothing. Each unique URL is fetched at most once.
///
/// Records and per-URL fetch errors are streamed through the sinks as they
/// occur, so a CLI can print while the crawl runs; the full record list is
/// also returned.
///
/// # Errors
///
/// Only an unparsable start URL fails the call. Everything downstream
/// degrades per URL.
pub async fn crawl_site(
    client: &Client,
    start_url: &str,
    max_depth: u32,
    limits: FetchLimits,
    mut on_record: impl FnMut(&CrawlRecord),
    mut on_error: impl FnMut(&Url, &str),
) -> Result<Vec<CrawlRecord>> {
    let start = normalize_url(start_url).map_err(GleanerError::UrlParse)?;

    tracing::info!(start = %start, max_depth, "starting crawl");

    let mut queue = CrawlQueue::new(start.clone(), max_depth);
    let mut records = Vec::new();

    while let Some((url, depth)) = queue.next() {
        let page = match fetch_page(client, url.as_str(), limits).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(url = %url, depth, error = %e, "fetch failed");
                on_error(&url, &e.to_string());
                continue;
            }
        };

        let record = CrawlRecord {
            url: url.clone(),
            depth,
        };
        on_record(&record);
        records.push(record);

        if !queue.should_expand(depth) {
            continue;
        }

        let links = discover_links(&page.body, &page.final_url, &start);
        tracing::debug!(url = %url, depth, found = links.len(), "expanding");
        for link in links {
            queue.push(link, depth + 1);
        }
    }

    tracing::info!(fetched = queue.visited_count(), "crawl complete");
    Ok(records)
}
