use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Syntactic email match: local part, `@`, domain, and a 2+ letter TLD
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("valid regex")
});

/// Extract email addresses from text. Returns deduplicated matches in order
/// of first appearance. No MX or existence checks are made.
pub fn extract_emails(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    EMAIL_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .filter(|email| seen.insert(email.clone()))
        .collect()
}
