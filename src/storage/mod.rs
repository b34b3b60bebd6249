//! Storage module for persisting crawl data
//!
//! This module handles all database operations for the harvester:
//! - SQLite database initialization and schema management
//! - Seed domain persistence
//! - Per-URL crawl records keyed by URL fingerprint
//! - Aggregate counts for the statistics view

mod fingerprint;
mod schema;
mod sqlite;
mod traits;

pub use fingerprint::fingerprint;
pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageError, StorageResult};

use crate::config::DatabaseConfig;
use crate::HarvestError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

/// Opens the store described by the database configuration
///
/// The server directory is created if missing. The `:memory:` server opens
/// a store that lives only as long as the returned handle.
///
/// # Returns
///
/// * `Ok(SqliteStorage)` - Successfully opened store
/// * `Err(HarvestError)` - Failed to create the directory or open the database
pub fn open_storage(config: &DatabaseConfig) -> Result<SqliteStorage, HarvestError> {
    if config.is_in_memory() {
        return Ok(SqliteStorage::new_in_memory()?);
    }

    std::fs::create_dir_all(&config.server)?;
    Ok(SqliteStorage::new(&config.database_path())?)
}

/// A crawl record for one URL
#[derive(Debug, Clone, PartialEq)]
pub struct UrlRecord {
    /// Fingerprint of `url`
    pub url_md5: String,
    /// The literal URL string the record was created with
    pub url: String,
    pub last_crawled_date: Option<DateTime<Utc>>,
    pub text_content: String,
    pub emails: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub names: Vec<String>,
}

/// The entity collections stored on every URL record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Email,
    PhoneNumber,
    Name,
}

impl EntityKind {
    /// Name of the JSON column holding this entity set
    pub fn column(&self) -> &'static str {
        match self {
            Self::Email => "emails",
            Self::PhoneNumber => "phone_numbers",
            Self::Name => "names",
        }
    }
}

/// Formats a timestamp the way it is written to the store (RFC 3339, UTC)
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parses a stored timestamp
///
/// Accepts RFC 3339 with any offset, or a naive ISO 8601 date/time which is
/// taken to be UTC. Returns `None` for anything else.
pub fn parse_stored_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
