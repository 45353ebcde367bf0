//! Representative image extraction
//!
//! An ordered cascade of metadata strategies is tried against the page head;
//! the first hit wins. Earlier entries are structured, high-confidence
//! signals (Open Graph), later ones generic fallbacks. Missing everywhere is
//! a common, valid outcome.

use crate::url::{on_domain, page_origin};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

/// Metadata cascade in priority order: (selector, attribute carrying the URL)
const IMAGE_SOURCES: &[(&str, &str)] = &[
    (r#"meta[property="og:image:secure_url"]"#, "content"),
    (r#"meta[property="og:image"]"#, "content"),
    (r#"meta[name="twitter:image"]"#, "content"),
    (r#"link[rel="image_src"]"#, "href"),
    (r#"meta[itemprop="image"]"#, "content"),
];

static COMPILED_IMAGE_SOURCES: Lazy<Vec<(Selector, &'static str)>> = Lazy::new(|| {
    IMAGE_SOURCES
        .iter()
        .map(|(sel, attr)| (Selector::parse(sel).unwrap(), *attr))
        .collect()
});

/// Last-resort structural patterns for named high-traffic hosts whose photo
/// markup predates their metadata tags
const SITE_PATTERNS: &[(&str, &str, &str)] = &[
    ("naver.com", "img#img1", "src"),
    ("naver.com", ".end_photo_org img", "src"),
];

static COMPILED_SITE_PATTERNS: Lazy<Vec<(&'static str, Selector, &'static str)>> =
    Lazy::new(|| {
        SITE_PATTERNS
            .iter()
            .map(|(domain, sel, attr)| (*domain, Selector::parse(sel).unwrap(), *attr))
            .collect()
    });

/// Extracts the best representative image URL from a page
///
/// Deterministic for a given page: the cascade is walked in order and the
/// first strategy that yields a non-empty, normalizable value returns
/// immediately. Returns `None` when every strategy misses.
pub fn extract_image(html: &str, page_url: &Url) -> Option<String> {
    let document = Html::parse_document(html);

    for (selector, attr) in COMPILED_IMAGE_SOURCES.iter() {
        if let Some(element) = document.select(selector).next() {
            if let Some(raw) = element.value().attr(attr) {
                if let Some(normalized) = normalize_image_url(raw, page_url) {
                    tracing::debug!(url = %page_url, image = %normalized, "image metadata matched");
                    return Some(normalized);
                }
            }
        }
    }

    for (domain, selector, attr) in COMPILED_SITE_PATTERNS.iter() {
        if !on_domain(page_url, domain) {
            continue;
        }
        if let Some(element) = document.select(selector).next() {
            if let Some(raw) = element.value().attr(attr) {
                if let Some(normalized) = normalize_image_url(raw, page_url) {
                    tracing::debug!(url = %page_url, image = %normalized, "site pattern matched");
                    return Some(normalized);
                }
            }
        }
    }

    None
}

/// Normalizes a captured image reference into an absolute URL
///
/// Absolute URLs pass through, protocol-relative references gain `https:`,
/// root-relative paths resolve against the page's own origin, and anything
/// else is joined against the page URL.
pub fn normalize_image_url(raw: &str, page_url: &Url) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if raw.starts_with("http://") || raw.starts_with("https://") {
        return Some(raw.to_string());
    }

    if let Some(rest) = raw.strip_prefix("//") {
        return Some(format!("https://{}", rest));
    }

    if raw.starts_with('/') {
        return Some(format!("{}{}", page_origin(page_url), raw));
    }

    page_url.join(raw).ok().map(|u| u.to_string())
}
