use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Environment variable naming the store connection endpoint
pub const DB_SERVER_ENV: &str = "crawler_db_server";

/// Environment variable naming the database namespace
pub const DB_NAME_ENV: &str = "crawler_db_name";

/// Loads and parses a configuration file from the given path
///
/// Environment overrides are applied after parsing and before validation.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use contact_harvester::config::load_config;
///
/// let config = load_config(Path::new("harvester.toml")).unwrap();
/// println!("Cooldown: {}h", config.crawler.cooldown_hours);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut config: Config = toml::from_str(&content)?;

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate(&config)?;

    Ok(config)
}

/// Builds a configuration from defaults and the environment only
pub fn load_default_config() -> Result<Config, ConfigError> {
    let mut config = Config::default();
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate(&config)?;
    Ok(config)
}

/// Applies the `crawler_db_server` / `crawler_db_name` overrides
///
/// Takes a lookup function so tests don't have to mutate the process
/// environment. Empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(server) = lookup(DB_SERVER_ENV).filter(|v| !v.trim().is_empty()) {
        config.database.server = server;
    }

    if let Some(name) = lookup(DB_NAME_ENV).filter(|v| !v.trim().is_empty()) {
        config.database.name = name;
    }
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so a run can be tied to the exact config it used.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}
