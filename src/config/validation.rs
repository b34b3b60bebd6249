use crate::config::types::{Config, CrawlerConfig, DatabaseConfig, NerConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Upper bound for the per-fetch timeout
const MAX_FETCH_TIMEOUT_SECS: u64 = 300;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_database_config(&config.database)?;
    validate_ner_config(&config.ner)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.cooldown_hours == 0 {
        return Err(ConfigError::Validation(
            "cooldown_hours must be >= 1".to_string(),
        ));
    }

    if config.fetch_timeout_secs == 0 || config.fetch_timeout_secs > MAX_FETCH_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "fetch_timeout_secs must be between 1 and {}, got {}",
            MAX_FETCH_TIMEOUT_SECS, config.fetch_timeout_secs
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}

/// Validates store connection configuration
fn validate_database_config(config: &DatabaseConfig) -> Result<(), ConfigError> {
    if config.server.trim().is_empty() {
        return Err(ConfigError::Validation(
            "database server cannot be empty".to_string(),
        ));
    }

    if config.name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "database name cannot be empty".to_string(),
        ));
    }

    // The name is a file stem inside the server directory
    if config.name.contains('/') || config.name.contains('\\') || config.name.contains("..") {
        return Err(ConfigError::Validation(format!(
            "database name '{}' must not contain path separators",
            config.name
        )));
    }

    Ok(())
}

/// Validates NER service configuration
fn validate_ner_config(config: &NerConfig) -> Result<(), ConfigError> {
    if let Some(endpoint) = &config.endpoint {
        let url = Url::parse(endpoint)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid ner endpoint: {}", e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "ner endpoint '{}' must use http or https",
                endpoint
            )));
        }
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "ner timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}
