//! Integration tests for the breadth-first crawler
//!
//! These tests use wiremock to stand up a local site and verify the
//! crawler's fetch-count, deduplication, and depth-bound properties
//! end-to-end.

use gleaner::config::FetchConfig;
use gleaner::crawler::{crawl_site, CrawlRecord};
use gleaner::fetch::{build_http_client, FetchLimits};
use reqwest::Client;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client() -> Client {
    build_http_client(&FetchConfig::default()).expect("client builds")
}

fn limits() -> FetchLimits {
    FetchLimits::body(100_000)
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, route: &str, body: &str, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_page(body))
        .expect(expected_hits)
        .mount(server)
        .await;
}

async fn run_crawl(client: &Client, start: &str, max_depth: u32) -> (Vec<CrawlRecord>, Vec<String>) {
    let mut errors = Vec::new();
    let records = crawl_site(
        client,
        start,
        max_depth,
        limits(),
        |_| {},
        |url, message| errors.push(format!("{}: {}", url, message)),
    )
    .await
    .expect("start URL is valid");
    (records, errors)
}

#[tokio::test]
async fn test_depth_one_fetches_start_and_same_domain_links_only() {
    let server = MockServer::start().await;
    let base = server.uri();

    let root_body = format!(
        r#"<a href="{base}/page1">1</a>
           <a href="{base}/page2">2</a>
           <a href="/page3">3</a>
           <a href="https://external.invalid/away">out</a>"#,
    );
    mount_page(&server, "/", &root_body, 1).await;
    mount_page(&server, "/page1", "one", 1).await;
    mount_page(&server, "/page2", "two", 1).await;
    mount_page(&server, "/page3", "three", 1).await;

    let client = test_client();
    let (records, errors) = run_crawl(&client, &format!("{}/", base), 1).await;

    // start + 3 same-domain links; the external link is never fetched
    assert_eq!(records.len(), 4);
    assert!(errors.is_empty());
    assert_eq!(records[0].depth, 0);
    assert!(records[1..].iter().all(|r| r.depth == 1));
    assert!(records
        .iter()
        .all(|r| r.url.host_str() != Some("external.invalid")));
}

#[tokio::test]
async fn test_shared_link_fetched_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        &format!(r#"<a href="{base}/a">a</a><a href="{base}/b">b</a>"#),
        1,
    )
    .await;
    // Both branches point at /shared; the visited set collapses them
    mount_page(&server, "/a", r#"<a href="/shared">s</a>"#, 1).await;
    mount_page(&server, "/b", r#"<a href="/shared">s</a>"#, 1).await;
    mount_page(&server, "/shared", "leaf", 1).await;

    let client = test_client();
    let (records, _) = run_crawl(&client, &format!("{}/", base), 2).await;

    let shared_count = records
        .iter()
        .filter(|r| r.url.path() == "/shared")
        .count();
    assert_eq!(shared_count, 1);
    assert_eq!(records.len(), 4);
}

#[tokio::test]
async fn test_max_depth_zero_fetches_only_start() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", r#"<a href="/page1">1</a>"#, 1).await;
    mount_page(&server, "/page1", "never", 0).await;

    let client = test_client();
    let (records, errors) = run_crawl(&client, &format!("{}/", base), 0).await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].depth, 0);
    assert!(errors.is_empty());
}

#[tokio::test]
async fn test_fetch_failure_is_reported_and_skipped() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<a href="/missing">gone</a><a href="/ok">ok</a>"#,
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/ok", "fine", 1).await;

    let client = test_client();
    let (records, errors) = run_crawl(&client, &format!("{}/", base), 1).await;

    // The 404 goes to the error stream; the crawl continues past it
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("/missing"));
    assert_eq!(records.len(), 2);
    assert!(records.iter().any(|r| r.url.path() == "/ok"));
}

#[tokio::test]
async fn test_depth_bound_stops_expansion() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", r#"<a href="/l1">1</a>"#, 1).await;
    mount_page(&server, "/l1", r#"<a href="/l2">2</a>"#, 1).await;
    // /l2 is reachable only at depth 2, beyond the bound
    mount_page(&server, "/l2", "deep", 0).await;

    let client = test_client();
    let (records, _) = run_crawl(&client, &format!("{}/", base), 1).await;

    assert_eq!(records.len(), 2);
}
