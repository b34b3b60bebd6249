//! Output module for presenting harvested data
//!
//! This module handles:
//! - Formatting stored URL records for the query listing
//! - Loading and printing database statistics

mod records;
pub mod stats;

pub use records::{format_record, RECORD_SEPARATOR_WIDTH};
pub use stats::{load_statistics, load_statistics_at, print_statistics, HarvestStatistics};
