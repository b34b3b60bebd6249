//! Crawler coordinator - main crawl orchestration logic
//!
//! One crawl cycle walks every seed domain in insertion order. Each seed that
//! passes the freshness gate is fetched, stored with its extracted entities,
//! and mined for same-origin links. Those links are visited exactly once each
//! and never mined further, so discovery stops one level below the seeds.
//! Visits are sequential.

use crate::config::Config;
use crate::crawler::freshness::FreshnessGate;
use crate::crawler::parser::{extract_text, parse_html};
use crate::crawler::{build_http_client, fetch_url, FetchResult};
use crate::extract::EntityExtractor;
use crate::state::{CrawlOutcome, CrawlReport, CrawlStage};
use crate::storage::Storage;
use crate::HarvestError;
use chrono::Utc;
use reqwest::Client;
use std::collections::BTreeSet;
use url::Url;

/// Role of a URL within a crawl cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitKind {
    /// A registered domain; its page is mined for links
    Seed,
    /// A link found on a seed page; never mined
    Link,
}

/// Main crawler coordinator structure
pub struct Coordinator<S: Storage> {
    storage: S,
    client: Client,
    gate: FreshnessGate,
    extractor: EntityExtractor,
}

impl<S: Storage> Coordinator<S> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration (cooldown, timeout, user agent)
    /// * `storage` - An opened store
    /// * `extractor` - The entity extractor, already wired to a name recognizer
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(HarvestError)` - The HTTP client could not be built
    pub fn new(
        config: &Config,
        storage: S,
        extractor: EntityExtractor,
    ) -> Result<Self, HarvestError> {
        let client = build_http_client(&config.crawler, &config.user_agent)?;
        let gate = FreshnessGate::from_hours(config.crawler.cooldown_hours);

        Ok(Self::with_client(storage, client, gate, extractor))
    }

    /// Creates a coordinator from prebuilt parts
    pub fn with_client(
        storage: S,
        client: Client,
        gate: FreshnessGate,
        extractor: EntityExtractor,
    ) -> Self {
        Self {
            storage,
            client,
            gate,
            extractor,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Runs one crawl cycle over every seed domain
    ///
    /// Fetch failures never abort the cycle. Store failures do.
    pub async fn run(&mut self) -> Result<CrawlReport, HarvestError> {
        let mut report = CrawlReport::default();

        let seeds = self.storage.get_domains()?;
        if seeds.is_empty() {
            tracing::info!("No domains found in the database");
            return Ok(report);
        }

        tracing::info!(
            "Starting crawl cycle over {} seed domain(s), cooldown {}h",
            seeds.len(),
            self.gate.cooldown().num_hours()
        );
        let start_time = std::time::Instant::now();

        for seed in &seeds {
            let outcome = self.crawl_url(seed, VisitKind::Seed).await?;
            report.record_seed(&outcome);

            let CrawlOutcome::Stored { links } = outcome else {
                continue;
            };

            for link in &links {
                let link_outcome = self.crawl_url(link, VisitKind::Link).await?;
                report.record_link(&link_outcome);
            }
        }

        if !report.crawled_any() {
            tracing::info!(
                "Nothing new crawled: every seed was crawled within the last {} hours or could not be fetched",
                self.gate.cooldown().num_hours()
            );
        }

        tracing::info!(
            "Crawl cycle completed in {:?}: {} record(s) written ({} seed, {} link), {} skipped, {} failed",
            start_time.elapsed(),
            report.records_written(),
            report.seeds_stored,
            report.links_stored,
            report.seeds_skipped + report.links_skipped,
            report.seeds_failed + report.links_failed
        );

        Ok(report)
    }

    /// Runs the per-URL state machine
    ///
    /// `CheckFresh` consults the gate, `Fetch` downloads the page, `Extract`
    /// pulls text and entities, and `Store` upserts the record stamped with
    /// the current time. Seeds additionally yield their same-origin links.
    pub async fn crawl_url(
        &mut self,
        url: &str,
        kind: VisitKind,
    ) -> Result<CrawlOutcome, HarvestError> {
        trace_stage(CrawlStage::CheckFresh, url);
        if !self.gate.is_eligible(&self.storage, url)? {
            match kind {
                VisitKind::Seed => tracing::info!("Skipping (Already Crawled): {}", url),
                VisitKind::Link => tracing::debug!("Skipping fresh link: {}", url),
            }
            return Ok(CrawlOutcome::SkippedFresh);
        }

        match kind {
            VisitKind::Seed => tracing::info!("Crawling: {}", url),
            VisitKind::Link => tracing::info!(" - Found: {}", url),
        }

        trace_stage(CrawlStage::Fetch, url);
        let body = match fetch_url(&self.client, url).await {
            FetchResult::Success { body, .. } => body,
            failed => {
                tracing::warn!("Failed to fetch {}: {}", url, failed);
                return Ok(CrawlOutcome::FetchFailed);
            }
        };

        trace_stage(CrawlStage::Extract, url);
        let (text, links) = match kind {
            VisitKind::Seed => seed_text_and_links(&body, url),
            VisitKind::Link => (extract_text(&body), BTreeSet::new()),
        };
        let entities = self.extractor.extract_all(&text).await;

        trace_stage(CrawlStage::Store, url);
        self.storage
            .upsert_url_record(url, &text, &entities, Utc::now())?;

        tracing::debug!(
            "Stored {}: {} email(s), {} phone number(s), {} name(s)",
            url,
            entities.emails.len(),
            entities.phone_numbers.len(),
            entities.names.len()
        );

        Ok(CrawlOutcome::Stored { links })
    }
}

fn trace_stage(stage: CrawlStage, url: &str) {
    tracing::trace!(stage = %stage, "{}", url);
}

/// Parses a seed page once for both its text and its same-origin links
///
/// A seed that is not an absolute URL still has its text stored; it just
/// yields no links.
fn seed_text_and_links(body: &str, url: &str) -> (String, BTreeSet<String>) {
    match Url::parse(url) {
        Ok(base_url) => {
            let parsed = parse_html(body, &base_url);
            (parsed.text, parsed.links)
        }
        Err(e) => {
            tracing::debug!("Cannot resolve links against {}: {}", url, e);
            (extract_text(body), BTreeSet::new())
        }
    }
}
