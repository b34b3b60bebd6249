use crate::state::CrawlOutcome;

/// Tally of one crawl cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    pub seeds_stored: u64,
    pub seeds_skipped: u64,
    pub seeds_failed: u64,
    pub links_stored: u64,
    pub links_skipped: u64,
    pub links_failed: u64,
}

impl CrawlReport {
    /// Records the outcome of visiting a seed
    pub fn record_seed(&mut self, outcome: &CrawlOutcome) {
        match outcome {
            CrawlOutcome::SkippedFresh => self.seeds_skipped += 1,
            CrawlOutcome::FetchFailed => self.seeds_failed += 1,
            CrawlOutcome::Stored { .. } => self.seeds_stored += 1,
        }
    }

    /// Records the outcome of visiting a discovered link
    pub fn record_link(&mut self, outcome: &CrawlOutcome) {
        match outcome {
            CrawlOutcome::SkippedFresh => self.links_skipped += 1,
            CrawlOutcome::FetchFailed => self.links_failed += 1,
            CrawlOutcome::Stored { .. } => self.links_stored += 1,
        }
    }

    /// True if at least one seed was fetched and stored
    pub fn crawled_any(&self) -> bool {
        self.seeds_stored > 0
    }

    /// Total records written this cycle
    pub fn records_written(&self) -> u64 {
        self.seeds_stored + self.links_stored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_tally() {
        let mut report = CrawlReport::default();
        report.record_seed(&CrawlOutcome::SkippedFresh);
        report.record_seed(&CrawlOutcome::Stored {
            links: BTreeSet::new(),
        });
        report.record_link(&CrawlOutcome::FetchFailed);
        report.record_link(&CrawlOutcome::Stored {
            links: BTreeSet::new(),
        });

        assert_eq!(report.seeds_skipped, 1);
        assert_eq!(report.seeds_stored, 1);
        assert_eq!(report.links_failed, 1);
        assert_eq!(report.records_written(), 2);
        assert!(report.crawled_any());
    }

    #[test]
    fn test_links_alone_do_not_count_as_crawled() {
        let mut report = CrawlReport::default();
        report.record_seed(&CrawlOutcome::SkippedFresh);
        report.record_link(&CrawlOutcome::Stored {
            links: BTreeSet::new(),
        });
        assert!(!report.crawled_any());
    }
}
