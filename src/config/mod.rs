//! Configuration module for gleaner
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every section carries defaults, so the CLI also runs with no
//! config file at all.

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    AggregatorConfig, Config, CrawlerConfig, FetchConfig, OutputConfig, PipelineConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
