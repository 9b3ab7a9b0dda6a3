//! Table of contents: `# H1`, `## H2`, ... `###### H6`

use lazy_static::lazy_static;
use learnsphere_core::TocEntry;
use regex::Regex;

lazy_static! {
    /// Matches a heading line; at least one space or tab after the hashes.
    static ref HEADING_PATTERN: Regex = Regex::new(r"(?m)^(#{1,6})[ \t]+(.+)$").unwrap();

    /// Runs of characters that are not ASCII word characters or CJK ideographs
    static ref ANCHOR_SEPARATOR: Regex =
        Regex::new(r"[^A-Za-z0-9_\x{4e00}-\x{9fa5}]+").unwrap();
}

/// Build the outline of `content`, in document order.
///
/// Seven or more hashes, or hashes without following whitespace, are not
/// headings. Headings inside fenced code are not filtered out.
pub fn generate_toc(content: &str) -> Vec<TocEntry> {
    HEADING_PATTERN
        .captures_iter(content)
        .filter_map(|caps| {
            let level = caps.get(1)?.as_str().len() as u8;
            let title = caps.get(2)?.as_str().trim();
            if title.is_empty() {
                return None;
            }

            Some(TocEntry {
                level,
                title: title.to_string(),
                anchor: heading_anchor(title),
            })
        })
        .collect()
}

/// Lowercase, then collapse every run of non-word characters into `-`.
///
/// Leading and trailing separators are kept: `"Hello, World!"` becomes
/// `"hello-world-"`.
pub fn heading_anchor(title: &str) -> String {
    ANCHOR_SEPARATOR
        .replace_all(&title.to_lowercase(), "-")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_and_anchors() {
        let toc = generate_toc("# A\n## B\n### C");
        let levels: Vec<u8> = toc.iter().map(|e| e.level).collect();
        let anchors: Vec<&str> = toc.iter().map(|e| e.anchor.as_str()).collect();
        assert_eq!(levels, vec![1, 2, 3]);
        assert_eq!(anchors, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_title_is_trimmed() {
        let toc = generate_toc("##   Spaced Title   \nbody");
        assert_eq!(toc.len(), 1);
        assert_eq!(toc[0].title, "Spaced Title");
        assert_eq!(toc[0].anchor, "spaced-title");
    }

    #[test]
    fn test_not_headings() {
        assert!(generate_toc("#NoSpace").is_empty());
        assert!(generate_toc("####### Seven").is_empty());
        assert!(generate_toc("text # not at line start").is_empty());
        assert!(generate_toc("").is_empty());
    }

    #[test]
    fn test_cjk_heading() {
        let toc = generate_toc("## 机器学习 基础");
        assert_eq!(toc[0].title, "机器学习 基础");
        assert_eq!(toc[0].anchor, "机器学习-基础");
    }

    #[test]
    fn test_anchor_keeps_edge_separators() {
        assert_eq!(heading_anchor("Hello, World!"), "hello-world-");
        assert_eq!(heading_anchor("What's new?"), "what-s-new-");
        assert_eq!(heading_anchor("snake_case"), "snake_case");
    }

    #[test]
    fn test_crlf_lines() {
        let toc = generate_toc("# One\r\n## Two\r\n");
        let titles: Vec<&str> = toc.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Two"]);
    }

    #[test]
    fn test_entries_per_heading_line() {
        let content = "# Title\ntext\n## Part 1\nmore\n## Part 2\n###### Deep";
        assert_eq!(generate_toc(content).len(), 4);
    }
}
