//! Database schema definitions
//!
//! Two document-like tables: seed domains and per-URL crawl records. Entity
//! sets are stored as JSON arrays.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Crawl seeds entered by the operator
CREATE TABLE IF NOT EXISTS domains (
    url TEXT PRIMARY KEY
);

-- One record per URL fingerprint
CREATE TABLE IF NOT EXISTS urls (
    url_md5 TEXT PRIMARY KEY,
    url TEXT NOT NULL,
    last_crawled_date TEXT,
    text_content TEXT NOT NULL DEFAULT '',
    emails TEXT NOT NULL DEFAULT '[]',
    phone_numbers TEXT NOT NULL DEFAULT '[]',
    names TEXT NOT NULL DEFAULT '[]'
);

CREATE INDEX IF NOT EXISTS idx_urls_url ON urls(url);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
