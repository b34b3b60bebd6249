//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::extract::ExtractedEntities;
use crate::storage::{EntityKind, UrlRecord};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// Two logical collections: seed domains, and crawl records keyed by URL
/// fingerprint. Connectivity failures are returned as errors and are
/// expected to be fatal for the caller.
pub trait Storage {
    // ===== Domains =====

    /// Adds a seed domain
    ///
    /// # Returns
    ///
    /// `true` if the domain was inserted, `false` if it already existed
    fn add_domain(&mut self, url: &str) -> StorageResult<bool>;

    /// Checks whether a seed domain is already stored
    fn domain_exists(&self, url: &str) -> StorageResult<bool>;

    /// Returns every seed domain URL in insertion order
    fn get_domains(&self) -> StorageResult<Vec<String>>;

    // ===== URL records =====

    /// Inserts or updates the crawl record for `url` in a single statement
    ///
    /// The `url` field is written only on insert. Timestamp, text and all
    /// three entity sets are replaced unconditionally.
    fn upsert_url_record(
        &mut self,
        url: &str,
        text_content: &str,
        entities: &ExtractedEntities,
        crawled_at: DateTime<Utc>,
    ) -> StorageResult<()>;

    /// Gets the crawl record for a URL by its fingerprint
    fn get_url_record(&self, url: &str) -> StorageResult<Option<UrlRecord>>;

    /// Gets only the last-crawl timestamp for a URL
    ///
    /// Returns `None` when there is no record or the record carries no
    /// usable timestamp.
    fn get_last_crawled(&self, url: &str) -> StorageResult<Option<DateTime<Utc>>>;

    /// Lists records whose URL starts with the literal `prefix`
    fn find_urls_by_prefix(&self, prefix: &str) -> StorageResult<Vec<UrlRecord>>;

    // ===== Statistics =====

    /// Counts seed domains
    fn count_domains(&self) -> StorageResult<u64>;

    /// Counts URL records
    fn count_url_records(&self) -> StorageResult<u64>;

    /// Counts URL records crawled strictly after `cutoff`
    fn count_crawled_since(&self, cutoff: DateTime<Utc>) -> StorageResult<u64>;

    /// Counts distinct values of one entity type across all records
    fn count_distinct_entities(&self, kind: EntityKind) -> StorageResult<u64>;
}
