use phonenumber::{country, Mode};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Coarse numeric-looking run: starts and ends with a digit, at least 10 chars
static PHONE_CANDIDATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\d[\d\s().-]{8,}\d").expect("valid regex"));

/// Extract valid US phone numbers from text.
///
/// Candidates are parsed with US as the default region and kept only when
/// the number is valid and its region is exactly US, which excludes other
/// NANP territories. Kept numbers are formatted in international form
/// (`+1 212-555-0100`) and deduplicated in order of first appearance.
pub fn extract_phone_numbers(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    PHONE_CANDIDATE_RE
        .find_iter(text)
        .filter_map(|m| canonical_us_number(m.as_str()))
        .filter(|number| seen.insert(number.clone()))
        .collect()
}

/// Parses one candidate, returning its international form if it is a valid US number
fn canonical_us_number(candidate: &str) -> Option<String> {
    let number = match phonenumber::parse(Some(country::Id::US), candidate) {
        Ok(number) => number,
        Err(e) => {
            tracing::trace!("Discarding phone candidate {:?}: {}", candidate, e);
            return None;
        }
    };

    if !phonenumber::is_valid(&number) || number.country().id() != Some(country::Id::US) {
        return None;
    }

    Some(number.format().mode(Mode::International).to_string())
}
