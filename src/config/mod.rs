//! Configuration module for Contact-Harvester
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file, plus the `crawler_db_server` / `crawler_db_name`
//! environment overrides for the store connection.
//!
//! # Example
//!
//! ```no_run
//! use contact_harvester::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvester.toml")).unwrap();
//! println!("Database: {}", config.database.database_path().display());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, DatabaseConfig, NerConfig, UserAgentConfig, DEFAULT_COOLDOWN_HOURS,
    DEFAULT_DB_NAME, DEFAULT_DB_SERVER, DEFAULT_FETCH_TIMEOUT_SECS, IN_MEMORY_SERVER,
};

// Re-export parser functions
pub use parser::{
    apply_env_overrides, compute_config_hash, load_config, load_config_with_hash,
    load_default_config, DB_NAME_ENV, DB_SERVER_ENV,
};
pub use validation::validate;
