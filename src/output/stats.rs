//! Statistics generation from the harvest database
//!
//! This module provides functionality for extracting and displaying
//! harvest statistics from the storage layer.

use crate::storage::{EntityKind, Storage};
use crate::HarvestError;
use chrono::{DateTime, Duration, Utc};

/// Harvest statistics summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestStatistics {
    /// Number of registered seed domains
    pub domains: u64,

    /// Number of stored URL records
    pub url_records: u64,

    /// Records crawled inside the cooldown window
    pub fresh_records: u64,

    /// Cooldown the fresh count was computed with
    pub cooldown_hours: u64,

    /// Distinct emails across all records
    pub distinct_emails: u64,

    /// Distinct phone numbers across all records
    pub distinct_phone_numbers: u64,

    /// Distinct person names across all records
    pub distinct_names: u64,
}

/// Loads statistics from storage
///
/// # Arguments
///
/// * `storage` - The storage backend to query
/// * `cooldown_hours` - Window used to count still-fresh records
///
/// # Returns
///
/// * `Ok(HarvestStatistics)` - Successfully loaded statistics
/// * `Err(HarvestError)` - Failed to query statistics
pub fn load_statistics(
    storage: &dyn Storage,
    cooldown_hours: u64,
) -> Result<HarvestStatistics, HarvestError> {
    load_statistics_at(storage, cooldown_hours, Utc::now())
}

/// Loads statistics with an explicit reference time
pub fn load_statistics_at(
    storage: &dyn Storage,
    cooldown_hours: u64,
    now: DateTime<Utc>,
) -> Result<HarvestStatistics, HarvestError> {
    let window = i64::try_from(cooldown_hours)
        .ok()
        .and_then(Duration::try_hours)
        .unwrap_or(Duration::MAX);
    let cutoff = now.checked_sub_signed(window).unwrap_or(DateTime::<Utc>::MIN_UTC);

    Ok(HarvestStatistics {
        domains: storage.count_domains()?,
        url_records: storage.count_url_records()?,
        fresh_records: storage.count_crawled_since(cutoff)?,
        cooldown_hours,
        distinct_emails: storage.count_distinct_entities(EntityKind::Email)?,
        distinct_phone_numbers: storage.count_distinct_entities(EntityKind::PhoneNumber)?,
        distinct_names: storage.count_distinct_entities(EntityKind::Name)?,
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &HarvestStatistics) {
    println!("=== Harvest Statistics ===\n");

    println!("Overview:");
    println!("  Seed domains: {}", stats.domains);
    println!("  URL records: {}", stats.url_records);

    let percentage = if stats.url_records > 0 {
        (stats.fresh_records as f64 / stats.url_records as f64) * 100.0
    } else {
        0.0
    };
    println!(
        "  Crawled in the last {}h: {} ({:.1}%)",
        stats.cooldown_hours, stats.fresh_records, percentage
    );
    println!();

    println!("Distinct Entities:");
    println!("  Emails: {}", stats.distinct_emails);
    println!("  Phone numbers: {}", stats.distinct_phone_numbers);
    println!("  Names: {}", stats.distinct_names);
}
