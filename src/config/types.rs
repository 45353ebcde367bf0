use serde::Deserialize;

/// Main configuration structure for gleaner
///
/// Every section has defaults so the CLI can run without a config file.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub aggregator: AggregatorConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// HTTP fetch behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Byte budget for capped page reads
    #[serde(rename = "max-body-bytes", default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Browser-like User-Agent sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Accept-Language header sent with every request
    #[serde(rename = "accept-language", default = "default_accept_language")]
    pub accept_language: String,
}

/// Aggregator feed configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AggregatorConfig {
    /// Host of the aggregator; links still on this host after redirect
    /// resolution are treated as unresolved
    #[serde(default = "default_aggregator_domain")]
    pub domain: String,

    /// Base URL of the keyword search feed
    #[serde(rename = "feed-url", default = "default_feed_url")]
    pub feed_url: String,

    /// Feed language parameter
    #[serde(rename = "language", default = "default_language")]
    pub language: String,

    /// Feed country parameter
    #[serde(rename = "country", default = "default_country")]
    pub country: String,

    /// Feed edition parameter
    #[serde(rename = "edition", default = "default_edition")]
    pub edition: String,
}

/// Enrichment pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Pause between consecutive off-aggregator fetches (milliseconds)
    #[serde(rename = "pause-millis", default = "default_pause_millis")]
    pub pause_millis: u64,

    /// Batch size at which the inter-request pause kicks in
    #[serde(rename = "pause-threshold", default = "default_pause_threshold")]
    pub pause_threshold: usize,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum depth to crawl from the start URL; 0 fetches only the start URL
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite article database
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_body_bytes() -> usize {
    100_000
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
        .to_string()
}

fn default_accept_language() -> String {
    "ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7".to_string()
}

fn default_aggregator_domain() -> String {
    "news.google.com".to_string()
}

fn default_feed_url() -> String {
    "https://news.google.com/rss/search".to_string()
}

fn default_language() -> String {
    "ko".to_string()
}

fn default_country() -> String {
    "KR".to_string()
}

fn default_edition() -> String {
    "KR:ko".to_string()
}

fn default_pause_millis() -> u64 {
    300
}

fn default_pause_threshold() -> usize {
    5
}

fn default_max_depth() -> u32 {
    1
}

fn default_database_path() -> String {
    "articles.db".to_string()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            max_body_bytes: default_max_body_bytes(),
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
        }
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            domain: default_aggregator_domain(),
            feed_url: default_feed_url(),
            language: default_language(),
            country: default_country(),
            edition: default_edition(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            pause_millis: default_pause_millis(),
            pause_threshold: default_pause_threshold(),
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}
