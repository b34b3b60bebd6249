//! URL handling module for Contact-Harvester
//!
//! Network-location extraction and same-origin checks used when filtering
//! discovered links. URLs are never normalized: a record is keyed by the
//! literal string it was crawled under.

mod domain;

pub use domain::{is_same_origin, network_location};
