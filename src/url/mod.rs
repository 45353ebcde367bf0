//! URL handling for gleaner
//!
//! Normalization for visited-set keys, host comparison for domain scoping,
//! and origin reconstruction for root-relative path resolution.

mod normalize;

pub use normalize::{normalize_url, visited_key};

use url::Url;

/// Extracts the lowercase host from a URL
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Whether two URLs share the same host exactly
///
/// Scheme and path differences are ignored; `www.example.com` and
/// `example.com` are different hosts.
pub fn same_host(a: &Url, b: &Url) -> bool {
    match (a.host_str(), b.host_str()) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => false,
    }
}

/// Whether a URL belongs to the given domain
///
/// A bare domain matches the host itself and any subdomain. A
/// `host:port` domain (useful against local test servers) must match the
/// URL's authority exactly.
pub fn on_domain(url: &Url, domain: &str) -> bool {
    let host = match url.host_str() {
        Some(host) => host.to_lowercase(),
        None => return false,
    };
    let domain = domain.to_lowercase();

    if domain.contains(':') {
        let authority = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host,
        };
        return authority == domain;
    }

    host == domain || host.ends_with(&format!(".{}", domain))
}

/// The origin (scheme + host + non-default port) of a URL, without a
/// trailing slash
pub fn page_origin(url: &Url) -> String {
    let mut origin = format!("{}://{}", url.scheme(), url.host_str().unwrap_or_default());
    if let Some(port) = url.port() {
        origin.push(':');
        origin.push_str(&port.to_string());
    }
    origin
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_host_lowercases() {
        let url = Url::parse("https://Example.COM/path").unwrap();
        assert_eq!(extract_host(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_same_host_exact() {
        let a = Url::parse("https://example.com/a").unwrap();
        let b = Url::parse("http://example.com/b?x=1").unwrap();
        assert!(same_host(&a, &b));
    }

    #[test]
    fn test_same_host_www_differs() {
        let a = Url::parse("https://example.com/").unwrap();
        let b = Url::parse("https://www.example.com/").unwrap();
        assert!(!same_host(&a, &b));
    }

    #[test]
    fn test_on_domain_subdomain() {
        let url = Url::parse("https://news.google.com/articles/x").unwrap();
        assert!(on_domain(&url, "google.com"));
        assert!(on_domain(&url, "news.google.com"));
        assert!(!on_domain(&url, "example.com"));
    }

    #[test]
    fn test_on_domain_no_suffix_confusion() {
        let url = Url::parse("https://notgoogle.com/").unwrap();
        assert!(!on_domain(&url, "google.com"));
    }

    #[test]
    fn test_on_domain_with_port() {
        let url = Url::parse("http://127.0.0.1:4000/x").unwrap();
        assert!(on_domain(&url, "127.0.0.1:4000"));
        assert!(!on_domain(&url, "127.0.0.1:5000"));
    }

    #[test]
    fn test_page_origin() {
        let url = Url::parse("https://site.com/a/b?c=d").unwrap();
        assert_eq!(page_origin(&url), "https://site.com");

        let url = Url::parse("http://127.0.0.1:8080/a").unwrap();
        assert_eq!(page_origin(&url), "http://127.0.0.1:8080");
    }
}
