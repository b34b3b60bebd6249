//! HTML parser for extracting visible text and same-origin links
//!
//! Text is flattened to a single space-joined string; entity extraction
//! downstream only ever sees prose. Links are restricted to the network
//! location of the page they were found on.

use crate::url::is_same_origin;
use scraper::{Html, Node, Selector};
use std::collections::BTreeSet;
use url::Url;

/// Elements whose text content is never rendered
const NON_VISIBLE_ELEMENTS: [&str; 3] = ["script", "style", "template"];

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// Visible text, stripped text nodes joined with single spaces
    pub text: String,

    /// Same-origin absolute links
    pub links: BTreeSet<String>,
}

/// Parses HTML once and extracts both text and same-origin links
///
/// # Example
///
/// ```
/// use contact_harvester::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><body><p>Hi</p><a href="/about">About</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url);
/// assert_eq!(parsed.text, "Hi About");
/// assert!(parsed.links.contains("https://example.com/about"));
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        text: visible_text(&document),
        links: same_origin_links(&document, base_url),
    }
}

/// Extracts visible text from HTML
///
/// Every text node outside `<script>`, `<style>` and `<template>` is
/// trimmed; non-empty ones are joined in document order with single spaces.
/// `<noscript>` content is parsed as markup so only its text is kept.
/// Empty or malformed HTML yields an empty or partial string, never an error.
pub fn extract_text(html: &str) -> String {
    visible_text(&Html::parse_document(html))
}

/// Extracts all same-origin links from HTML
///
/// Each `<a href>` is resolved against `base_url`; hrefs that fail to
/// resolve are dropped, as are links whose network location
/// (`[userinfo@]host[:port]`) differs from the base's. An unparseable base
/// yields no links.
pub fn extract_links(html: &str, base_url: &str) -> BTreeSet<String> {
    let base = match Url::parse(base_url) {
        Ok(base) => base,
        Err(e) => {
            tracing::debug!("Cannot resolve links against {}: {}", base_url, e);
            return BTreeSet::new();
        }
    };

    same_origin_links(&Html::parse_document(html), &base)
}

fn visible_text(document: &Html) -> String {
    let mut parts = Vec::new();
    collect_text(document, &mut parts);
    parts.join(" ")
}

fn collect_text(document: &Html, parts: &mut Vec<String>) {
    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| NON_VISIBLE_ELEMENTS.contains(&el.name()))
        });
        if hidden {
            continue;
        }

        // With scripting enabled <noscript> holds its markup as one raw text node
        let in_noscript = node
            .parent()
            .and_then(|parent| parent.value().as_element().map(|el| el.name() == "noscript"))
            .unwrap_or(false);
        if in_noscript {
            collect_text(&Html::parse_fragment(text), parts);
            continue;
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed.to_string());
        }
    }
}

fn same_origin_links(document: &Html, base_url: &Url) -> BTreeSet<String> {
    let mut links = BTreeSet::new();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&a_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        match base_url.join(href) {
            Ok(absolute) if is_same_origin(&absolute, base_url) => {
                links.insert(absolute.to_string());
            }
            Ok(_) => {}
            Err(e) => tracing::trace!("Dropping unresolvable href {:?}: {}", href, e),
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://a.com").unwrap()
    }

    #[test]
    fn test_extract_text_joins_stripped_nodes() {
        let html = r#"<html><head><title> Home </title></head>
            <body><p>  Hello   <b>World</b> </p><div>
            Contact us</div></body></html>"#;
        assert_eq!(extract_text(html), "Home Hello World Contact us");
    }

    #[test]
    fn test_extract_text_skips_scripts_and_styles() {
        let html = r#"<html><head><style>p { color: red }</style>
            <script>var tracking = "jane@example.com";</script></head>
            <body><p>Visible</p><!-- hidden comment --></body></html>"#;
        assert_eq!(extract_text(html), "Visible");
    }

    #[test]
    fn test_extract_text_keeps_inner_spacing() {
        let html = "<p>Call  us</p>";
        assert_eq!(extract_text(html), "Call  us");
    }

    #[test]
    fn test_extract_text_unwraps_noscript_markup() {
        assert_eq!(
            extract_text("<p>a</p><noscript>b <i>c</i></noscript>"),
            "a b c"
        );
    }

    #[test]
    fn test_extract_text_empty_html() {
        assert_eq!(extract_text(""), "");
        assert_eq!(extract_text("<html><body></body></html>"), "");
    }

    #[test]
    fn test_extract_text_malformed_html() {
        assert_eq!(extract_text("<div><p>unclosed <b>tags"), "unclosed tags");
    }

    #[test]
    fn test_same_origin_filter() {
        let html = r#"<html><body>
            <a href="https://a.com/x">X</a>
            <a href="https://b.com/y">Y</a>
            <a href="/z">Z</a>
            </body></html>"#;
        let links = extract_links(html, "https://a.com");

        let expected: BTreeSet<String> = ["https://a.com/x", "https://a.com/z"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(links, expected);
    }

    #[test]
    fn test_relative_path_link() {
        let html = r#"<a href="other">Link</a>"#;
        let base = Url::parse("https://a.com/dir/page").unwrap();
        let parsed = parse_html(html, &base);
        assert!(parsed.links.contains("https://a.com/dir/other"));
    }

    #[test]
    fn test_links_are_deduplicated() {
        let html = r#"<a href="/x">1</a><a href="https://a.com/x">2</a><a href="/x">3</a>"#;
        assert_eq!(parse_html(html, &base_url()).links.len(), 1);
    }

    #[test]
    fn test_hostless_schemes_are_excluded() {
        let html = r#"
            <a href="mailto:jane@a.com">Mail</a>
            <a href="tel:+12125550100">Call</a>
            <a href="javascript:void(0)">JS</a>"#;
        assert!(parse_html(html, &base_url()).links.is_empty());
    }

    #[test]
    fn test_different_port_is_excluded() {
        let html = r#"<a href="https://a.com:8443/admin">Admin</a>"#;
        assert!(parse_html(html, &base_url()).links.is_empty());
    }

    #[test]
    fn test_userinfo_is_not_same_origin() {
        let html = r#"<a href="https://user@a.com/u">U</a><a href="/v">V</a>"#;
        let links = extract_links(html, "https://a.com");
        assert_eq!(links.into_iter().collect::<Vec<_>>(), vec!["https://a.com/v"]);
    }

    #[test]
    fn test_anchors_without_href_are_ignored() {
        let html = r#"<a name="top">Top</a><a href="/ok">OK</a>"#;
        let parsed = parse_html(html, &base_url());
        assert_eq!(parsed.links.len(), 1);
    }

    #[test]
    fn test_unresolvable_href_is_dropped() {
        let html = r#"<a href="https://[::1">Broken</a><a href="/fine">Fine</a>"#;
        let parsed = parse_html(html, &base_url());
        assert_eq!(
            parsed.links.into_iter().collect::<Vec<_>>(),
            vec!["https://a.com/fine"]
        );
    }

    #[test]
    fn test_invalid_base_yields_no_links() {
        assert!(extract_links(r#"<a href="/x">X</a>"#, "not a url").is_empty());
    }

    #[test]
    fn test_non_anchor_links_are_ignored() {
        let html = r#"<head><link rel="canonical" href="https://a.com/c"></head>
            <body><img src="https://a.com/i.png"></body>"#;
        assert!(parse_html(html, &base_url()).links.is_empty());
    }
}
