//! # LearnSphere Parser
//!
//! Stateless text utilities over markdown note bodies.
//!
//! This crate provides:
//! - Cross-reference extraction (`[[Title]]`), backlink discovery and
//!   clickable rendering
//! - Inline tags (`#tag`, including CJK ideographs)
//! - Table of contents with URL-safe anchors
//! - Plain-text summaries and reading time estimates
//! - HTML preview via `pulldown-cmark`
//! - Editor toolbar helpers
//!
//! Every function is pure: no I/O, no shared state, safe to call from any
//! thread.
//!
//! ## Quick Start
//!
//! ```
//! use learnsphere_parser::prelude::*;
//!
//! let content = "# Rust\n\n**Ownership** is explained in [[The Book]]. #rust";
//!
//! assert_eq!(parse_links(content), vec!["The Book"]);
//! assert_eq!(extract_tags(content), vec!["rust"]);
//! assert_eq!(generate_toc(content)[0].anchor, "rust");
//! assert_eq!(calculate_reading_time(content), 1);
//!
//! let summary = extract_summary(content, DEFAULT_SUMMARY_LENGTH);
//! assert!(summary.starts_with("Rust"));
//! ```
//!
//! ## Backlinks
//!
//! ```
//! use learnsphere_parser::find_backlinks;
//! use learnsphere_core::LinkSource;
//!
//! struct Note(&'static str, &'static str, &'static str);
//!
//! impl LinkSource for Note {
//!     fn id(&self) -> &str { self.0 }
//!     fn title(&self) -> &str { self.1 }
//!     fn content(&self) -> &str { self.2 }
//! }
//!
//! let notes = [Note("1", "Target", ""), Note("2", "Other", "see [[Target]]")];
//! let links = find_backlinks("Target", &notes);
//! assert_eq!(links.len(), 1);
//! assert_eq!(links[0].source_id, "2");
//! ```

pub mod analysis;
pub mod editing;
pub mod parsers;
pub mod preview;

pub use analysis::{Analyzer, analyze};
pub use editing::{Edit, Markup, Selection, insert_markup};
pub use parsers::{
    DEFAULT_SUMMARY_LENGTH, READING_SPEED_WPM, calculate_reading_time, extract_summary,
    extract_tags, find_backlinks, generate_toc, heading_anchor, merge_tags, parse_links,
    reading_time_with_speed, render_links, rendered_link_targets, strip_markdown, word_count,
};
pub use preview::render_preview;

/// Re-export commonly used items
pub mod prelude {
    pub use crate::analysis::{Analyzer, analyze};
    pub use crate::editing::{Edit, Markup, Selection, insert_markup};
    pub use crate::parsers::*;
    pub use crate::preview::render_preview;
    pub use learnsphere_core::{BiDirectionalLink, DocumentAnalysis, LinkSource, TocEntry};
}
