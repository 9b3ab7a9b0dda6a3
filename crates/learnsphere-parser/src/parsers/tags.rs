//! Inline tag parser: `#tag`, `#机器学习`
//!
//! A tag is `#` followed by ASCII letters, digits or CJK unified ideographs
//! (U+4E00..=U+9FA5). Any other character ends the tag, so `#rust-lang`
//! yields `rust`.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Matches #tag with ASCII alphanumerics and CJK ideographs
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([a-zA-Z0-9\x{4e00}-\x{9fa5}]+)").unwrap());

/// Extract inline tags without the leading `#`, deduplicated, first
/// occurrence order preserved.
///
/// Heading markers are not tags: `# Title` has a space after the `#` and
/// never matches.
pub fn extract_tags(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    TAG_PATTERN
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|tag| seen.insert(*tag))
        .map(str::to_string)
        .collect()
}

/// Merge explicit tags with inline tags: explicit first, then inline ones not
/// already present. Empty explicit tags are dropped.
pub fn merge_tags<I, S>(explicit: I, content: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut merged: Vec<String> = Vec::new();
    for tag in explicit {
        let tag: String = tag.into();
        let tag = tag.trim().trim_start_matches('#').to_string();
        if !tag.is_empty() && !merged.contains(&tag) {
            merged.push(tag);
        }
    }
    for tag in extract_tags(content) {
        if !merged.contains(&tag) {
            merged.push(tag);
        }
    }
    merged
}
