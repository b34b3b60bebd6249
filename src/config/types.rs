use serde::Deserialize;
use std::path::PathBuf;

/// Cooldown between two crawls of the same URL
pub const DEFAULT_COOLDOWN_HOURS: u64 = 48;

/// Per-request HTTP timeout
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Default connection endpoint for local development
pub const DEFAULT_DB_SERVER: &str = "./data";

/// Default database namespace for local development
pub const DEFAULT_DB_NAME: &str = "crawler_db";

/// Server value that selects a non-persistent store
pub const IN_MEMORY_SERVER: &str = ":memory:";

/// Main configuration structure for Contact-Harvester
///
/// Every section is optional in the TOML file; missing sections fall back to
/// their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub ner: NerConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Hours after a crawl before the same URL becomes eligible again
    #[serde(rename = "cooldown-hours", default = "default_cooldown_hours")]
    pub cooldown_hours: u64,

    /// Timeout applied to every page fetch (seconds)
    #[serde(rename = "fetch-timeout-secs", default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            cooldown_hours: DEFAULT_COOLDOWN_HOURS,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default = "default_contact_url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            contact_url: default_contact_url(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }
}

/// Store connection configuration
///
/// `server` is the connection endpoint (the directory holding the database
/// file) and `name` the namespace (the file stem).
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_server")]
    pub server: String,

    #[serde(default = "default_db_name")]
    pub name: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            server: default_db_server(),
            name: default_db_name(),
        }
    }
}

impl DatabaseConfig {
    /// Returns true if the store should live in memory only
    pub fn is_in_memory(&self) -> bool {
        self.server == IN_MEMORY_SERVER
    }

    /// Path of the database file: `{server}/{name}.db`
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.server).join(format!("{}.db", self.name))
    }
}

/// Named-entity recognition service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NerConfig {
    /// Endpoint of the NER service; names are not extracted when absent
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Timeout for a single recognition request (seconds)
    #[serde(rename = "timeout-secs", default = "default_ner_timeout")]
    pub timeout_secs: u64,
}

impl Default for NerConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: default_ner_timeout(),
        }
    }
}

fn default_cooldown_hours() -> u64 {
    DEFAULT_COOLDOWN_HOURS
}

fn default_fetch_timeout() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

fn default_crawler_name() -> String {
    "ContactHarvester".to_string()
}

fn default_crawler_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_contact_url() -> String {
    "https://example.com/bot".to_string()
}

fn default_db_server() -> String {
    DEFAULT_DB_SERVER.to_string()
}

fn default_db_name() -> String {
    DEFAULT_DB_NAME.to_string()
}

fn default_ner_timeout() -> u64 {
    30
}
