//! # Link Graph Analysis
//!
//! Link graph over a document collection using petgraph.
//!
//! Provides:
//! - Directed graph of documents and their cross-references
//! - Title resolution (first document wins on duplicate titles)
//! - Backlink and forward-link queries
//! - Unresolved reference and orphan detection
//! - Graph statistics
//! - Recomputation of every document's derived `backlinks` field
//!
//! ## Quick Start
//!
//! ```
//! use learnsphere_graph::LinkGraph;
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
//! let notes = [
//!     Note("1", "Rust", "See [[Ownership]]"),
//!     Note("2", "Ownership", "Back to [[Rust]] and [[Nowhere]]"),
//! ];
//! let graph = LinkGraph::build(&notes);
//!
//! assert_eq!(graph.backlinks("2"), vec!["1"]);
//! assert_eq!(graph.resolve_title("Rust"), Some("1"));
//! assert_eq!(graph.unresolved_links().len(), 1);
//! ```
//!
//! ## Core Concepts
//!
//! - **Nodes**: documents, keyed by id
//! - **Edges**: one per resolved `[[Token]]`, labelled with the token
//! - **Directed**: links flow from the referencing document to the target

pub mod graph;

pub use graph::{GraphStats, LinkGraph, UnresolvedLink};

pub mod prelude {
    pub use crate::graph::{GraphStats, LinkGraph, UnresolvedLink};
}
