//! Integration tests for the operator flows against a file-backed store

use chrono::Utc;
use contact_harvester::config::DatabaseConfig;
use contact_harvester::operator::{add_domains, prompt_and_query, StreamPrompter};
use contact_harvester::output::load_statistics;
use contact_harvester::storage::{open_storage, Storage};
use contact_harvester::ExtractedEntities;
use std::io::Cursor;
use tempfile::TempDir;

fn database_config(dir: &TempDir) -> DatabaseConfig {
    DatabaseConfig {
        server: dir.path().join("nested").display().to_string(),
        name: "operator_db".to_string(),
    }
}

#[test]
fn test_added_domains_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let config = database_config(&dir);

    {
        let mut storage = open_storage(&config).unwrap();
        let mut output = Vec::new();
        let mut prompter = StreamPrompter::new(
            Cursor::new("https://a.com\nhttps://b.com\nhttps://a.com\nDone\n"),
            &mut output,
        );
        let summary = add_domains(&mut storage, &mut prompter).unwrap();

        assert_eq!(summary.added.len(), 2);
        assert_eq!(summary.rejected, vec!["https://a.com"]);
    }

    // Server directory is created on first open
    assert!(dir.path().join("nested").join("operator_db.db").exists());

    let storage = open_storage(&config).unwrap();
    assert_eq!(
        storage.get_domains().unwrap(),
        vec!["https://a.com", "https://b.com"]
    );
}

#[test]
fn test_query_and_stats_over_stored_records() {
    let dir = TempDir::new().unwrap();
    let config = database_config(&dir);
    let mut storage = open_storage(&config).unwrap();

    let entities = ExtractedEntities {
        emails: vec!["jane@a.com".to_string(), "info@a.com".to_string()],
        phone_numbers: vec!["+1 212-555-0100".to_string()],
        names: vec!["Jane Doe".to_string()],
    };
    storage.add_domain("https://a.com").unwrap();
    storage
        .upsert_url_record("https://a.com", "text", &entities, Utc::now())
        .unwrap();
    storage
        .upsert_url_record("https://a.com/team", "text", &entities, Utc::now())
        .unwrap();

    let mut output = Vec::new();
    let mut prompter = StreamPrompter::new(Cursor::new("https://a.com/t\n"), &mut output);
    let matched = prompt_and_query(&storage, &mut prompter).unwrap();
    let output = String::from_utf8(output).unwrap();

    assert_eq!(matched, 1);
    assert!(output.contains("URL: https://a.com/team"));
    assert!(output.contains("Emails: jane@a.com, info@a.com"));

    let stats = load_statistics(&storage, 48).unwrap();
    assert_eq!(stats.domains, 1);
    assert_eq!(stats.url_records, 2);
    assert_eq!(stats.fresh_records, 2);
    assert_eq!(stats.distinct_emails, 2);
    assert_eq!(stats.distinct_names, 1);
}
