//! Command output formatting.

use learnsphere_core::{BiDirectionalLink, DocumentAnalysis};
use serde::Serialize;
use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Readable text for a terminal
    #[default]
    Human,
    /// Pretty-printed JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unknown output format '{}'. Valid options: human, json",
                s
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Pretty-printed JSON
pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// Human-readable analysis of one document
pub fn format_analysis(name: &str, analysis: &DocumentAnalysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", name);
    let _ = writeln!(
        out,
        "  {} words, {} min read",
        analysis.word_count, analysis.reading_time
    );

    if !analysis.summary.is_empty() {
        let _ = writeln!(out, "\nSummary:\n  {}", analysis.summary);
    }

    if !analysis.tags.is_empty() {
        let tags: Vec<String> = analysis.tags.iter().map(|t| format!("#{}", t)).collect();
        let _ = writeln!(out, "\nTags: {}", tags.join(" "));
    }

    if !analysis.toc.is_empty() {
        let _ = writeln!(out, "\nOutline:");
        for entry in &analysis.toc {
            let indent = "  ".repeat(usize::from(entry.level));
            let _ = writeln!(out, "{}{} (#{})", indent, entry.title, entry.anchor);
        }
    }

    if !analysis.outbound_links.is_empty() {
        let _ = writeln!(out, "\nLinks to:");
        for target in &analysis.outbound_links {
            let _ = writeln!(out, "  [[{}]]", target);
        }
    }

    out
}

/// Human-readable backlink listing
pub fn format_backlinks(title: &str, links: &[BiDirectionalLink]) -> String {
    if links.is_empty() {
        return format!("No backlinks to [[{}]]\n", title);
    }

    let mut out = String::new();
    let _ = writeln!(out, "Backlinks to [[{}]] ({}):", title, links.len());
    for link in links {
        let _ = writeln!(out, "  {}", link.source_id);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnsphere_core::{LinkType, TocEntry};

    #[test]
    fn test_parse_format() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Human);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default().to_string(), "human");
    }

    #[test]
    fn test_format_analysis() {
        let analysis = DocumentAnalysis {
            summary: "Notes on ownership".to_string(),
            tags: vec!["rust".to_string()],
            toc: vec![TocEntry {
                level: 1,
                title: "Ownership".to_string(),
                anchor: "ownership".to_string(),
            }],
            outbound_links: vec!["Borrowing".to_string()],
            word_count: 42,
            reading_time: 1,
        };

        let text = format_analysis("rust.md", &analysis);
        assert!(text.starts_with("rust.md\n  42 words, 1 min read\n"));
        assert!(text.contains("Tags: #rust"));
        assert!(text.contains("  Ownership (#ownership)"));
        assert!(text.contains("  [[Borrowing]]"));
    }

    #[test]
    fn test_format_backlinks() {
        assert_eq!(format_backlinks("Rust", &[]), "No backlinks to [[Rust]]\n");

        let links = vec![BiDirectionalLink {
            source_id: "a.md".to_string(),
            target_id: "rust.md".to_string(),
            source_text: "Rust".to_string(),
            target_title: "Rust".to_string(),
            link_type: LinkType::Reference,
        }];
        assert_eq!(
            format_backlinks("Rust", &links),
            "Backlinks to [[Rust]] (1):\n  a.md\n"
        );
    }
}
