//! Shared parsing helpers.

use std::sync::LazyLock;

use regex::Regex;

/// Matches a breaking-change trailer at the start of a body paragraph.
pub(crate) static BREAKING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^BREAKING[ -]CHANGE: (.+)$").expect("invalid regex"));

/// Splits a commit message into trimmed, non-empty paragraphs.
pub(crate) fn parse_paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(String::from)
        .collect()
}

/// Collects the text of breaking-change trailers from the body paragraphs
/// (everything after the subject).
pub(crate) fn breaking_descriptions(descriptions: &[String]) -> Vec<String> {
    descriptions
        .iter()
        .skip(1)
        .filter_map(|paragraph| BREAKING_RE.captures(paragraph))
        .map(|captures| captures[1].to_string())
        .collect()
}
