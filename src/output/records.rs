use crate::storage::UrlRecord;
use std::fmt::Write as _;

/// Separator printed after each record in query listings
pub const RECORD_SEPARATOR_WIDTH: usize = 50;

/// Formats one stored record as the query tool prints it
///
/// Text content is omitted. Empty entity lists render as `None`.
pub fn format_record(record: &UrlRecord) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "URL: {}", record.url);
    let _ = writeln!(out, "Emails: {}", join_or_none(&record.emails));
    let _ = writeln!(out, "Phone Numbers: {}", join_or_none(&record.phone_numbers));
    let _ = writeln!(out, "Names: {}", join_or_none(&record.names));
    out.push_str(&"-".repeat(RECORD_SEPARATOR_WIDTH));
    out.push('\n');

    out
}

fn join_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "None".to_string()
    } else {
        values.join(", ")
    }
}
