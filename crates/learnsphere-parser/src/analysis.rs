//! One-pass document analysis.
//!
//! Bundles every derived view of a body (summary, tags, outline, outgoing
//! references, word count, reading time) into a [`DocumentAnalysis`].
//!
//! # Example
//!
//! ```
//! use learnsphere_parser::analyze;
//!
//! let analysis = analyze("# Intro\n\nSee [[Rust]] #lang");
//! assert_eq!(analysis.toc.len(), 1);
//! assert_eq!(analysis.outbound_links, vec!["Rust"]);
//! assert_eq!(analysis.tags, vec!["lang"]);
//! assert_eq!(analysis.reading_time, 1);
//! ```

use learnsphere_core::{DocumentAnalysis, DocumentConfig};

use crate::parsers::{
    DEFAULT_SUMMARY_LENGTH, READING_SPEED_WPM, extract_summary, extract_tags, generate_toc,
    parse_links, reading_time_with_speed, word_count,
};

/// Analysis settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Analyzer {
    /// Words per minute for the reading time estimate
    pub reading_speed_wpm: u32,
    /// Maximum summary length in characters
    pub summary_max_length: usize,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self {
            reading_speed_wpm: READING_SPEED_WPM,
            summary_max_length: DEFAULT_SUMMARY_LENGTH,
        }
    }
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings taken from the document section of the app config.
    pub fn from_config(config: &DocumentConfig) -> Self {
        Self {
            reading_speed_wpm: config.reading_speed_wpm,
            summary_max_length: config.summary_max_length,
        }
    }

    /// Builder method to set the reading speed.
    pub fn with_reading_speed(mut self, words_per_minute: u32) -> Self {
        self.reading_speed_wpm = words_per_minute;
        self
    }

    /// Builder method to set the summary length.
    pub fn with_summary_length(mut self, max_length: usize) -> Self {
        self.summary_max_length = max_length;
        self
    }

    /// Analyze a markdown body.
    pub fn analyze(&self, content: &str) -> DocumentAnalysis {
        DocumentAnalysis {
            summary: extract_summary(content, self.summary_max_length),
            tags: extract_tags(content),
            toc: generate_toc(content),
            outbound_links: parse_links(content),
            word_count: word_count(content),
            reading_time: reading_time_with_speed(content, self.reading_speed_wpm),
        }
    }
}

/// Analyze `content` with default settings.
pub fn analyze(content: &str) -> DocumentAnalysis {
    Analyzer::default().analyze(content)
}
