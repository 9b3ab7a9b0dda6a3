//! Plain-text summaries of markdown bodies.

use regex::Regex;
use std::sync::LazyLock;

/// Default maximum summary length, in characters
pub const DEFAULT_SUMMARY_LENGTH: usize = 150;

static HEADING_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#{1,6}\s+").unwrap());
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]*)\]\([^)]*\)").unwrap());
static CROSS_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").unwrap());
static FENCED_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// Strip markdown syntax from `content`.
///
/// Substitutions run in a fixed order; fenced code is dropped entirely while
/// every other construct is replaced by its inner text.
pub fn strip_markdown(content: &str) -> String {
    let text = HEADING_MARKER.replace_all(content, "");
    let text = BOLD.replace_all(&text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    let text = MARKDOWN_LINK.replace_all(&text, "$1");
    let text = CROSS_REFERENCE.replace_all(&text, "$1");
    let text = FENCED_CODE.replace_all(&text, "");
    let text = INLINE_CODE.replace_all(&text, "$1");
    text.trim().to_string()
}

/// Plain-text summary of at most `max_length` characters, plus `"..."` when
/// truncated.
pub fn extract_summary(content: &str, max_length: usize) -> String {
    let plain = strip_markdown(content);
    if plain.chars().count() <= max_length {
        return plain;
    }

    let mut summary: String = plain.chars().take(max_length).collect();
    summary.push_str("...");
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_strips_markup() {
        let summary = extract_summary("# Title\n**bold** [[Link]] normal", 100);
        assert_eq!(normalized(&summary), "Title bold Link normal");
        assert!(!summary.ends_with("..."));
    }

    #[test]
    fn test_truncates_with_ellipsis() {
        let summary = extract_summary("abcdefghij", 4);
        assert_eq!(summary, "abcd...");
    }

    #[test]
    fn test_exact_length_is_not_truncated() {
        assert_eq!(extract_summary("abcd", 4), "abcd");
    }

    #[test]
    fn test_truncation_counts_characters() {
        let summary = extract_summary("机器学习是人工智能的一个分支", 4);
        assert_eq!(summary, "机器学习...");
    }

    #[test]
    fn test_removes_fenced_code() {
        let summary = extract_summary("Before\n```rust\nfn main() {}\n```\nAfter", 100);
        assert_eq!(normalized(&summary), "Before After");
    }

    #[test]
    fn test_inline_code_and_links() {
        let summary = extract_summary("Run `cargo` per [the guide](https://x.y) and *care*", 100);
        assert_eq!(summary, "Run cargo per the guide and care");
    }

    #[test]
    fn test_link_next_to_cross_reference() {
        let summary = extract_summary("[[A]] and [b](c)", 100);
        assert_eq!(summary, "A and b");
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(extract_summary("", 10), "");
        assert_eq!(extract_summary("   \n  ", 10), "");
    }

    #[test]
    fn test_summary_length_bound() {
        let content = "word ".repeat(100);
        let summary = extract_summary(&content, DEFAULT_SUMMARY_LENGTH);
        assert!(summary.chars().count() <= DEFAULT_SUMMARY_LENGTH + 3);
    }
}
