use crate::config::types::{AggregatorConfig, Config, FetchConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetch_config(&config.fetch)?;
    validate_aggregator_config(&config.aggregator)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "connect-timeout-secs must be >= 1".to_string(),
        ));
    }

    // Anything smaller cannot hold a document head
    if config.max_body_bytes < 1024 {
        return Err(ConfigError::Validation(format!(
            "max-body-bytes must be >= 1024, got {}",
            config.max_body_bytes
        )));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates aggregator configuration
fn validate_aggregator_config(config: &AggregatorConfig) -> Result<(), ConfigError> {
    if config.domain.is_empty() {
        return Err(ConfigError::Validation(
            "aggregator domain cannot be empty".to_string(),
        ));
    }

    if config.domain.contains("://") || config.domain.contains('/') {
        return Err(ConfigError::Validation(format!(
            "aggregator domain must be a bare host, got '{}'",
            config.domain
        )));
    }

    let feed_url = Url::parse(&config.feed_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid feed-url: {}", e)))?;

    if feed_url.scheme() != "http" && feed_url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "feed-url must use HTTP(S), got scheme '{}'",
            feed_url.scheme()
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.fetch.timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_tiny_byte_budget_rejected() {
        let mut config = Config::default();
        config.fetch.max_body_bytes = 100;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_aggregator_domain_with_scheme_rejected() {
        let mut config = Config::default();
        config.aggregator.domain = "https://news.google.com".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bad_feed_url_rejected() {
        let mut config = Config::default();
        config.aggregator.feed_url = "not a url".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_database_path_rejected() {
        let mut config = Config::default();
        config.output.database_path = String::new();
        assert!(validate(&config).is_err());
    }
}
