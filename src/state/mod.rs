//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlStage`: steps of the per-URL state machine
//! - `CrawlOutcome`: terminal state of one visited URL (skipped, failed, stored)
//! - `CrawlReport`: per-cycle tally of seed and link outcomes

mod outcome;
mod report;
mod stage;

// Re-export main types
pub use outcome::CrawlOutcome;
pub use report::CrawlReport;
pub use stage::CrawlStage;
