//! Crawl-freshness gate
//!
//! A URL is eligible for crawling when it has never been crawled, when its
//! record carries no usable timestamp, or when strictly more than the
//! cooldown has elapsed since the last crawl.

use crate::storage::{Storage, StorageResult};
use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessGate {
    cooldown: Duration,
}

impl FreshnessGate {
    pub fn new(cooldown: Duration) -> Self {
        Self { cooldown }
    }

    /// Builds a gate from a cooldown in whole hours, saturating on overflow
    pub fn from_hours(hours: u64) -> Self {
        let cooldown = i64::try_from(hours)
            .ok()
            .and_then(Duration::try_hours)
            .unwrap_or(Duration::MAX);
        Self::new(cooldown)
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Checks eligibility against the current time
    pub fn is_eligible<S: Storage + ?Sized>(&self, storage: &S, url: &str) -> StorageResult<bool> {
        self.is_eligible_at(storage, url, Utc::now())
    }

    /// Checks eligibility against an explicit `now`
    pub fn is_eligible_at<S: Storage + ?Sized>(
        &self,
        storage: &S,
        url: &str,
        now: DateTime<Utc>,
    ) -> StorageResult<bool> {
        Ok(match storage.get_last_crawled(url)? {
            Some(last_crawled) => self.is_stale(last_crawled, now),
            None => true,
        })
    }

    /// True once strictly more than the cooldown separates the two instants
    ///
    /// A timestamp in the future is never stale.
    pub fn is_stale(&self, last_crawled: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(last_crawled) > self.cooldown
    }
}

impl Default for FreshnessGate {
    fn default() -> Self {
        Self::from_hours(crate::config::DEFAULT_COOLDOWN_HOURS)
    }
}
