use url::Url;

/// Normalizes a URL into the form used for visited-set keys
///
/// Parsing already lowercases the host and drops default ports; on top of
/// that the fragment and an empty query are removed, so `/page#a`, `/page#b`
/// and `/page?` all collapse to the same key and no page is fetched twice
/// because of an anchor difference.
pub fn normalize_url(url_str: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(url_str)?;
    url.set_fragment(None);
    if url.query() == Some("") {
        url.set_query(None);
    }
    Ok(url)
}

/// String form of a URL as stored in the visited set
pub fn visited_key(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);
    if url.query() == Some("") {
        url.set_query(None);
    }
    url.to_string()
}
