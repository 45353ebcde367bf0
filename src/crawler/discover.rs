//! Hyperlink discovery for crawl expansion
//!
//! Resolves every anchor against the page URL and keeps only links on the
//! crawl's start host. Duplicates within one page are retained; global
//! deduplication belongs to the scheduler's visited set.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

static ANCHORS: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// Extracts same-host links from a page, in document order
///
/// * `base_url` - the fetched page's URL, used to resolve relative hrefs
/// * `scope` - the crawl's start URL; only links sharing its host exactly
///   are retained (scheme and path differences are ignored)
pub fn discover_links(html: &str, base_url: &Url, scope: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    for element in document.select(&ANCHORS) {
        let href = match element.value().attr("href") {
            Some(href) => href.trim(),
            None => continue,
        };

        if href.is_empty()
            || href.starts_with('#')
            || href.starts_with("javascript:")
            || href.starts_with("mailto:")
            || href.starts_with("tel:")
            || href.starts_with("data:")
        {
            continue;
        }

        let resolved = match base_url.join(href) {
            Ok(url) => url,
            Err(_) => continue,
        };

        if resolved.scheme() != "http" && resolved.scheme() != "https" {
            continue;
        }

        if crate::url::same_host(&resolved, scope) {
            links.push(resolved);
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/section/page").unwrap()
    }

    #[test]
    fn test_relative_links_resolved() {
        let html = r#"<html><body><a href="/other">x</a><a href="sibling">y</a></body></html>"#;
        let links = discover_links(html, &base(), &base());
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].as_str(), "https://example.com/other");
        assert_eq!(links[1].as_str(), "https://example.com/section/sibling");
    }

    #[test]
    fn test_external_host_dropped() {
        let html = r#"<html><body>
            <a href="https://example.com/in">in</a>
            <a href="https://elsewhere.com/out">out</a>
        </body></html>"#;
        let links = discover_links(html, &base(), &base());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].as_str(), "https://example.com/in");
    }

    #[test]
    fn test_subdomain_is_a_different_host() {
        let html = r#"<html><body><a href="https://blog.example.com/p">x</a></body></html>"#;
        let links = discover_links(html, &base(), &base());
        assert!(links.is_empty());
    }

    #[test]
    fn test_document_order_and_duplicates_kept() {
        let html = r#"<html><body>
            <a href="/b">1</a>
            <a href="/a">2</a>
            <a href="/b">3</a>
        </body></html>"#;
        let links = discover_links(html, &base(), &base());
        let paths: Vec<&str> = links.iter().map(|u| u.path()).collect();
        assert_eq!(paths, vec!["/b", "/a", "/b"]);
    }

    #[test]
    fn test_special_schemes_skipped() {
        let html = r##"<html><body>
            <a href="javascript:void(0)">j</a>
            <a href="mailto:a@b.com">m</a>
            <a href="tel:+123">t</a>
            <a href="#frag">f</a>
            <a href="/real">r</a>
        </body></html>"##;
        let links = discover_links(html, &base(), &base());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].path(), "/real");
    }
}
