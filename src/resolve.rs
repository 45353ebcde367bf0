//! Redirect resolution for aggregator-indirected article links
//!
//! Aggregators are inconsistent: some article links answer with a real HTTP
//! redirect chain, others serve an interstitial page that navigates via
//! script. The resolver absorbs both without per-site special-casing: follow
//! the HTTP chain first, and if it never leaves the aggregator's domain,
//! sniff the response body for the destination.

use crate::fetch::{fetch_page, FetchLimits};
use crate::url::on_domain;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use url::Url;

/// Byte budget for the interstitial body sample; navigation directives sit
/// well within the first 64 KiB
const SNIFF_CAP: usize = 64 * 1024;

/// How a destination URL was determined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMethod {
    /// The HTTP redirect chain left the aggregator's domain
    HttpRedirect,
    /// The destination was found inside an interstitial page body
    ContentSniff,
    /// No destination found; `resolved` equals the original link
    Unchanged,
}

/// Result of resolving one aggregator article link
#[derive(Debug, Clone)]
pub struct ResolvedUrl {
    pub original: String,
    pub resolved: String,
    pub method: ResolutionMethod,
}

impl ResolvedUrl {
    fn unchanged(original: &str) -> Self {
        Self {
            original: original.to_string(),
            resolved: original.to_string(),
            method: ResolutionMethod::Unchanged,
        }
    }
}

static NAV_DIRECTIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"location\.replace\(\s*["']([^"']+)["']\s*\)"#).unwrap());

static URL_PARAM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"url=(https?://[^"'&<>\s]+)"#).unwrap());

static ABS_HREF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"href=["'](https?://[^"']+)["']"#).unwrap());

/// Content-sniff sub-patterns, tried in order; the order is a preserved
/// heuristic, not a ranking anyone has validated
static SNIFF_PATTERNS: [(&str, &Lazy<Regex>); 3] = [
    ("client-navigation", &NAV_DIRECTIVE_RE),
    ("url-parameter", &URL_PARAM_RE),
    ("absolute-href", &ABS_HREF_RE),
];

/// Resolves an aggregator article link to its real destination
///
/// Never fails: fetch errors and unresolvable interstitials both yield
/// [`ResolutionMethod::Unchanged`], which callers must treat as "skip
/// extraction", not as an error.
pub async fn resolve_article_url(
    client: &Client,
    original: &str,
    aggregator_domain: &str,
) -> ResolvedUrl {
    let page = match fetch_page(client, original, FetchLimits::body(SNIFF_CAP)).await {
        Ok(page) => page,
        Err(e) => {
            tracing::warn!(url = original, error = %e, "resolution fetch failed");
            return ResolvedUrl::unchanged(original);
        }
    };

    if !on_domain(&page.final_url, aggregator_domain) {
        tracing::debug!(url = original, resolved = %page.final_url, "resolved via redirect chain");
        return ResolvedUrl {
            original: original.to_string(),
            resolved: page.final_url.to_string(),
            method: ResolutionMethod::HttpRedirect,
        };
    }

    // Redirect chain exhausted on the aggregator's own domain; the page is
    // an interstitial
    match sniff_destination(&page.body, aggregator_domain) {
        Some(destination) => {
            tracing::debug!(url = original, resolved = %destination, "resolved via content sniff");
            ResolvedUrl {
                original: original.to_string(),
                resolved: destination,
                method: ResolutionMethod::ContentSniff,
            }
        }
        None => ResolvedUrl::unchanged(original),
    }
}

/// Searches an interstitial body for the first off-aggregator destination
fn sniff_destination(body: &str, aggregator_domain: &str) -> Option<String> {
    for &(label, pattern) in SNIFF_PATTERNS.iter() {
        for capture in pattern.captures_iter(body) {
            let candidate = unescape_entities(&capture[1]);
            let parsed = match Url::parse(&candidate) {
                Ok(u) => u,
                Err(_) => continue,
            };
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                continue;
            }
            if on_domain(&parsed, aggregator_domain) {
                continue;
            }
            tracing::trace!(pattern = label, destination = %parsed, "sniff pattern matched");
            return Some(parsed.to_string());
        }
    }
    None
}

/// Undoes the HTML entity escaping commonly found in captured attribute
/// values and inline script fragments
fn unescape_entities(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x2F;", "/")
}
