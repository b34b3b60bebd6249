//! Per-URL crawl outcome definitions
//!
//! Every URL the coordinator visits ends in exactly one of these states.

use std::collections::BTreeSet;
use std::fmt;

/// Terminal outcome of visiting one URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// Crawled inside the cooldown window; nothing fetched
    SkippedFresh,

    /// Transport failure, timeout or non-success status; nothing written
    FetchFailed,

    /// Record upserted
    Stored {
        /// Same-origin links found on the page. Only populated when link
        /// discovery was requested for this URL.
        links: BTreeSet<String>,
    },
}

impl CrawlOutcome {
    /// Returns true if a record was written
    pub fn is_stored(&self) -> bool {
        matches!(self, Self::Stored { .. })
    }

    /// Short name used in logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SkippedFresh => "skipped_fresh",
            Self::FetchFailed => "fetch_failed",
            Self::Stored { .. } => "stored",
        }
    }
}

impl fmt::Display for CrawlOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
