//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with failure classification
//! - Visible-text and same-origin link extraction
//! - The crawl-freshness gate
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod freshness;
mod parser;

pub use coordinator::{Coordinator, VisitKind};
pub use fetcher::{build_http_client, fetch_html, fetch_url, FetchResult};
pub use freshness::FreshnessGate;
pub use parser::{extract_links, extract_text, parse_html, ParsedPage};
