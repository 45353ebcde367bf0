//! Gleaner: a news acquisition engine
//!
//! This crate fetches keyword news from an aggregator's RSS feed, resolves the
//! aggregator's indirected article links to their real destinations, extracts
//! representative imagery and body text from the resolved pages, and (as a
//! separate mode) performs bounded breadth-first link discovery across a site.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod feed;
pub mod fetch;
pub mod pipeline;
pub mod resolve;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for gleaner operations
#[derive(Debug, Error)]
pub enum GleanerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] fetch::FetchError),

    #[error("Feed error: {0}")]
    Feed(#[from] feed::FeedError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for gleaner operations
pub type Result<T> = std::result::Result<T, GleanerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::CrawlRecord;
pub use pipeline::EnrichedItem;
pub use resolve::{ResolutionMethod, ResolvedUrl};
