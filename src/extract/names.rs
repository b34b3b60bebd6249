use crate::extract::recognizer::EntitySpan;
use std::collections::HashSet;

/// Entity label the recognizer uses for people
pub const PERSON_LABEL: &str = "PERSON";

/// Site-chrome strings that recognizers routinely mislabel as people
pub const NAME_STOPLIST: [&str; 4] = ["Weather", "Blog", "Subscribe", "Connect@"];

/// Reduce recognizer output to the list of person names.
///
/// Keeps PERSON spans only, deduplicates by exact string, and drops exact
/// stoplist matches. "John" and "John Smith" stay distinct.
pub fn person_names(spans: Vec<EntitySpan>) -> Vec<String> {
    let mut seen = HashSet::new();
    spans
        .into_iter()
        .filter(|span| span.label == PERSON_LABEL)
        .map(|span| span.text)
        .filter(|name| !name.is_empty() && !NAME_STOPLIST.contains(&name.as_str()))
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
