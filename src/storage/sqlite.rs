//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.

use crate::extract::ExtractedEntities;
use crate::storage::fingerprint::fingerprint;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Storage, StorageResult};
use crate::storage::{format_timestamp, parse_stored_timestamp, EntityKind, UrlRecord};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::time::Duration;

/// How long a writer waits on a locked database before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const URL_RECORD_COLUMNS: &str =
    "url_md5, url, last_crawled_date, text_content, emails, phone_numbers, names";

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        // WAL lets independent connections upsert the same file concurrently
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Underlying connection, for ad-hoc queries and maintenance
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// Decodes a JSON array column into a list of strings
fn json_list(row: &Row<'_>, idx: usize) -> rusqlite::Result<Vec<String>> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Decodes a stored timestamp, treating unparseable values as absent
fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.get(idx)?;
    Ok(raw.and_then(|value| {
        let parsed = parse_stored_timestamp(&value);
        if parsed.is_none() {
            tracing::warn!("Ignoring unparseable last_crawled_date: {:?}", value);
        }
        parsed
    }))
}

fn url_record_from_row(row: &Row<'_>) -> rusqlite::Result<UrlRecord> {
    Ok(UrlRecord {
        url_md5: row.get(0)?,
        url: row.get(1)?,
        last_crawled_date: timestamp_column(row, 2)?,
        text_content: row.get(3)?,
        emails: json_list(row, 4)?,
        phone_numbers: json_list(row, 5)?,
        names: json_list(row, 6)?,
    })
}

impl Storage for SqliteStorage {
    // ===== Domains =====

    fn add_domain(&mut self, url: &str) -> StorageResult<bool> {
        let inserted = self
            .conn
            .execute("INSERT OR IGNORE INTO domains (url) VALUES (?1)", params![url])?;
        Ok(inserted == 1)
    }

    fn domain_exists(&self, url: &str) -> StorageResult<bool> {
        let found: Option<i64> = self
            .conn
            .query_row("SELECT 1 FROM domains WHERE url = ?1", params![url], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    fn get_domains(&self) -> StorageResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT url FROM domains ORDER BY rowid")?;
        let domains = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(domains)
    }

    // ===== URL records =====

    fn upsert_url_record(
        &mut self,
        url: &str,
        text_content: &str,
        entities: &ExtractedEntities,
        crawled_at: DateTime<Utc>,
    ) -> StorageResult<()> {
        let emails = serde_json::to_string(&entities.emails)?;
        let phone_numbers = serde_json::to_string(&entities.phone_numbers)?;
        let names = serde_json::to_string(&entities.names)?;

        // `url` is insert-only
        self.conn.execute(
            "INSERT INTO urls (url_md5, url, last_crawled_date, text_content, emails, phone_numbers, names)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(url_md5) DO UPDATE SET
                last_crawled_date = excluded.last_crawled_date,
                text_content = excluded.text_content,
                emails = excluded.emails,
                phone_numbers = excluded.phone_numbers,
                names = excluded.names",
            params![
                fingerprint(url),
                url,
                format_timestamp(crawled_at),
                text_content,
                emails,
                phone_numbers,
                names
            ],
        )?;
        Ok(())
    }

    fn get_url_record(&self, url: &str) -> StorageResult<Option<UrlRecord>> {
        let sql = format!(
            "SELECT {} FROM urls WHERE url_md5 = ?1",
            URL_RECORD_COLUMNS
        );
        let record = self
            .conn
            .query_row(&sql, params![fingerprint(url)], url_record_from_row)
            .optional()?;
        Ok(record)
    }

    fn get_last_crawled(&self, url: &str) -> StorageResult<Option<DateTime<Utc>>> {
        let stamp = self
            .conn
            .query_row(
                "SELECT last_crawled_date FROM urls WHERE url_md5 = ?1",
                params![fingerprint(url)],
                |row| timestamp_column(row, 0),
            )
            .optional()?;
        Ok(stamp.flatten())
    }

    fn find_urls_by_prefix(&self, prefix: &str) -> StorageResult<Vec<UrlRecord>> {
        // substr comparison keeps `%` and `_` in the prefix literal
        let sql = format!(
            "SELECT {} FROM urls WHERE substr(url, 1, length(?1)) = ?1 ORDER BY url",
            URL_RECORD_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map(params![prefix], url_record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    // ===== Statistics =====

    fn count_domains(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM domains", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_url_records(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM urls", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_crawled_since(&self, cutoff: DateTime<Utc>) -> StorageResult<u64> {
        // Stored timestamps may be naive or carry offsets, so compare parsed values
        let mut stmt = self
            .conn
            .prepare("SELECT last_crawled_date FROM urls WHERE last_crawled_date IS NOT NULL")?;
        let stamps = stmt
            .query_map([], |row| timestamp_column(row, 0))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(stamps
            .into_iter()
            .flatten()
            .filter(|stamp| *stamp > cutoff)
            .count() as u64)
    }

    fn count_distinct_entities(&self, kind: EntityKind) -> StorageResult<u64> {
        let sql = format!(
            "SELECT COUNT(DISTINCT entity.value) FROM urls, json_each(urls.{}) AS entity",
            kind.column()
        );
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
