//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end against a file-backed store.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use contact_harvester::config::{Config, DatabaseConfig};
use contact_harvester::crawler::Coordinator;
use contact_harvester::extract::{EntityExtractor, EntitySpan, ExtractError, NameRecognizer};
use contact_harvester::storage::{open_storage, SqliteStorage, Storage};
use contact_harvester::{CrawlReport, ExtractedEntities};
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Recognizer that tags every scripted name found in the text as a PERSON
struct ScriptedRecognizer {
    names: Vec<&'static str>,
}

#[async_trait]
impl NameRecognizer for ScriptedRecognizer {
    async fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>, ExtractError> {
        Ok(self
            .names
            .iter()
            .filter(|name| text.contains(*name))
            .map(|name| EntitySpan {
                text: name.to_string(),
                label: "PERSON".to_string(),
            })
            .collect())
    }
}

/// Creates a test configuration whose store lives in `dir`
fn create_test_config(dir: &TempDir) -> Config {
    Config {
        database: DatabaseConfig {
            server: dir.path().display().to_string(),
            name: "test_db".to_string(),
        },
        ..Config::default()
    }
}

/// Opens the store, registers `seeds` and builds a coordinator over it
fn create_coordinator(config: &Config, seeds: &[&str]) -> Coordinator<SqliteStorage> {
    let mut storage = open_storage(&config.database).expect("Failed to open storage");
    for seed in seeds {
        assert!(storage.add_domain(seed).expect("Failed to add seed"));
    }

    let recognizer = Arc::new(ScriptedRecognizer {
        names: vec!["Jane Doe", "John Smith", "Weather"],
    });
    Coordinator::new(config, storage, EntityExtractor::new(recognizer))
        .expect("Failed to create coordinator")
}

async fn mount_page(server: &MockServer, route: &str, html: String, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("content-type", "text/html"),
        )
        .expect(expected_hits)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_seed_and_one_link_are_stored() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><head><title>Example</title></head><body>
           <p>Jane Doe | jane@example.com | (212) 555-0100</p>
           <a href="/contact">Contact</a>
           </body></html>"#
            .to_string(),
        1,
    )
    .await;

    mount_page(
        &mock_server,
        "/contact",
        r#"<html><body><h1>Contact</h1>
           <p>John Smith, sales@example.com, call 212.555.0199</p>
           <script>var decoy = "hidden@example.com";</script>
           </body></html>"#
            .to_string(),
        1,
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    let mut coordinator = create_coordinator(&config, &[base_url.as_str()]);

    let before = Utc::now();
    let report = coordinator.run().await.expect("Crawl failed");
    let after = Utc::now();

    assert_eq!(report.seeds_stored, 1);
    assert_eq!(report.links_stored, 1);
    assert_eq!(report.records_written(), 2);

    let storage = coordinator.storage();
    assert_eq!(storage.count_url_records().unwrap(), 2);

    let seed = storage.get_url_record(&base_url).unwrap().expect("seed record");
    assert_eq!(seed.url, base_url);
    assert_eq!(seed.emails, vec!["jane@example.com"]);
    assert_eq!(seed.phone_numbers, vec!["+1 212-555-0100"]);
    assert_eq!(seed.names, vec!["Jane Doe"]);
    assert!(seed.text_content.contains("Jane Doe"));

    let link_url = format!("{}/contact", base_url);
    let link = storage.get_url_record(&link_url).unwrap().expect("link record");
    assert_eq!(link.emails, vec!["sales@example.com"]);
    assert_eq!(link.phone_numbers, vec!["+1 212-555-0199"]);
    assert_eq!(link.names, vec!["John Smith"]);
    assert!(!link.text_content.contains("hidden@example.com"));

    for record in [&seed, &link] {
        let crawled = record.last_crawled_date.expect("timestamp");
        assert!(crawled >= before && crawled <= after);
    }
}

#[tokio::test]
async fn test_second_cycle_skips_fresh_urls() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Each page may only be fetched once across both cycles
    mount_page(
        &mock_server,
        "/",
        r#"<a href="/about">About</a>"#.to_string(),
        1,
    )
    .await;
    mount_page(&mock_server, "/about", "<p>About us</p>".to_string(), 1).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    let mut coordinator = create_coordinator(&config, &[base_url.as_str()]);

    let first = coordinator.run().await.unwrap();
    assert!(first.crawled_any());

    let second = coordinator.run().await.unwrap();
    assert_eq!(
        second,
        CrawlReport {
            seeds_skipped: 1,
            ..CrawlReport::default()
        }
    );
    assert!(!second.crawled_any());
}

#[tokio::test]
async fn test_stale_seed_is_recrawled_and_replaced() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", "<p>Nothing to see</p>".to_string(), 1).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    let mut coordinator = create_coordinator(&config, &[base_url.as_str()]);

    // A 49-hour-old record with entities that are no longer on the page
    let stale = ExtractedEntities {
        emails: vec!["old@example.com".to_string()],
        phone_numbers: vec![],
        names: vec!["Jane Doe".to_string()],
    };
    {
        let mut storage = open_storage(&config.database).unwrap();
        storage
            .upsert_url_record(&base_url, "old", &stale, Utc::now() - Duration::hours(49))
            .unwrap();
    }

    let report = coordinator.run().await.unwrap();
    assert_eq!(report.seeds_stored, 1);

    let record = coordinator
        .storage()
        .get_url_record(&base_url)
        .unwrap()
        .unwrap();
    assert_eq!(record.text_content, "Nothing to see");
    assert!(record.emails.is_empty());
    assert!(record.names.is_empty());
    assert_eq!(coordinator.storage().count_url_records().unwrap(), 1);
}

#[tokio::test]
async fn test_failed_seed_writes_nothing() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    let mut coordinator = create_coordinator(&config, &[base_url.as_str()]);

    let report = coordinator.run().await.unwrap();

    assert_eq!(report.seeds_failed, 1);
    assert!(!report.crawled_any());
    assert_eq!(coordinator.storage().count_url_records().unwrap(), 0);
}

#[tokio::test]
async fn test_links_are_followed_one_level_only() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<a href="/a">A</a>"#.to_string(), 1).await;
    mount_page(&mock_server, "/a", r#"<a href="/b">B</a>"#.to_string(), 1).await;
    mount_page(&mock_server, "/b", "<p>Too deep</p>".to_string(), 0).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    let mut coordinator = create_coordinator(&config, &[base_url.as_str()]);

    let report = coordinator.run().await.unwrap();

    assert_eq!(report.records_written(), 2);
    assert!(coordinator
        .storage()
        .get_url_record(&format!("{}/b", base_url))
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_cross_origin_links_are_not_followed() {
    let mock_server = MockServer::start().await;
    let other_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        format!(r#"<a href="{}/elsewhere">Elsewhere</a>"#, other_server.uri()),
        1,
    )
    .await;
    mount_page(&other_server, "/elsewhere", "<p>Other</p>".to_string(), 0).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    let mut coordinator = create_coordinator(&config, &[base_url.as_str()]);

    let report = coordinator.run().await.unwrap();

    assert_eq!(report.seeds_stored, 1);
    assert_eq!(report.links_stored + report.links_failed + report.links_skipped, 0);
}

#[tokio::test]
async fn test_failed_link_does_not_stop_cycle() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/broken">Broken</a><a href="/ok">OK</a>"#.to_string(),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/ok", "<p>Weather update</p>".to_string(), 1).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    let mut coordinator = create_coordinator(&config, &[base_url.as_str()]);

    let report = coordinator.run().await.unwrap();

    assert_eq!(report.links_failed, 1);
    assert_eq!(report.links_stored, 1);

    let storage = coordinator.storage();
    assert!(storage
        .get_url_record(&format!("{}/broken", base_url))
        .unwrap()
        .is_none());

    // "Weather" is tagged PERSON by the scripted model but stoplisted
    let ok = storage
        .get_url_record(&format!("{}/ok", base_url))
        .unwrap()
        .unwrap();
    assert!(ok.names.is_empty());
}

#[tokio::test]
async fn test_link_without_text_is_stored_empty() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/blank">Blank</a><a href="/shell">Shell</a>"#.to_string(),
        1,
    )
    .await;
    mount_page(&mock_server, "/blank", String::new(), 1).await;
    mount_page(&mock_server, "/shell", "<html></html>".to_string(), 1).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    let mut coordinator = create_coordinator(&config, &[base_url.as_str()]);

    let report = coordinator.run().await.unwrap();

    assert_eq!(report.links_stored, 2);
    assert_eq!(report.links_failed, 0);

    for route in ["/blank", "/shell"] {
        let record = coordinator
            .storage()
            .get_url_record(&format!("{}{}", base_url, route))
            .unwrap()
            .expect("empty page is still recorded");
        assert_eq!(record.text_content, "");
        assert!(record.emails.is_empty());
        assert!(record.phone_numbers.is_empty());
        assert!(record.names.is_empty());
        assert!(record.last_crawled_date.is_some());
    }
}

#[tokio::test]
async fn test_records_persist_across_reopen() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", "<p>jane@example.com</p>".to_string(), 1).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    {
        let mut coordinator = create_coordinator(&config, &[base_url.as_str()]);
        coordinator.run().await.unwrap();
    }

    assert!(dir.path().join("test_db.db").exists());

    let reopened = open_storage(&config.database).unwrap();
    assert_eq!(reopened.get_domains().unwrap(), vec![base_url.clone()]);
    let record = reopened.get_url_record(&base_url).unwrap().unwrap();
    assert_eq!(record.emails, vec!["jane@example.com"]);
}

#[tokio::test]
async fn test_no_domains_is_a_quiet_no_op() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    let mut coordinator = create_coordinator(&config, &[]);

    let report = coordinator.run().await.unwrap();

    assert_eq!(report, CrawlReport::default());
    assert_eq!(coordinator.storage().count_url_records().unwrap(), 0);
}
