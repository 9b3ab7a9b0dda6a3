//! Link graph using petgraph for document relationship analysis

use learnsphere_core::{BiDirectionalLink, Document, LinkSource};
use learnsphere_parser::parse_links;
use petgraph::prelude::*;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Node index type for graph
type NodeIndex = petgraph::graph::NodeIndex;

/// A cross-reference whose token matches no document title
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnresolvedLink {
    pub source_id: String,
    pub token: String,
}

/// Link graph over a document collection
#[derive(Debug, Clone, Default)]
pub struct LinkGraph {
    /// Directed graph: nodes are document ids, edges carry the matched token
    graph: DiGraph<String, String>,

    /// Map from document id to node index
    id_index: HashMap<String, NodeIndex>,

    /// Map from title to node index; the first document with a title wins
    title_index: HashMap<String, NodeIndex>,

    /// References that did not resolve, in scan order
    unresolved: Vec<UnresolvedLink>,
}

impl LinkGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph for a collection.
    ///
    /// Nodes are added in collection order. Every `[[Token]]` whose token
    /// equals a document title becomes an edge; self-references are skipped.
    pub fn build<D: LinkSource>(documents: &[D]) -> Self {
        let mut graph = Self::new();

        for doc in documents {
            let idx = graph.graph.add_node(doc.id().to_string());
            graph.id_index.insert(doc.id().to_string(), idx);
            graph.title_index.entry(doc.title().to_string()).or_insert(idx);
        }

        for doc in documents {
            let Some(&source_idx) = graph.id_index.get(doc.id()) else {
                continue;
            };

            for token in parse_links(doc.content()) {
                match graph.title_index.get(&token) {
                    Some(&target_idx) if target_idx == source_idx => {}
                    Some(&target_idx) => {
                        graph.graph.add_edge(source_idx, target_idx, token);
                    }
                    None => graph.unresolved.push(UnresolvedLink {
                        source_id: doc.id().to_string(),
                        token,
                    }),
                }
            }
        }

        log::debug!(
            "Built link graph: {} documents, {} links, {} unresolved",
            graph.node_count(),
            graph.edge_count(),
            graph.unresolved.len()
        );

        graph
    }

    /// Resolve a title to a document id
    pub fn resolve_title(&self, title: &str) -> Option<&str> {
        self.title_index
            .get(title)
            .map(|&idx| self.graph[idx].as_str())
    }

    /// Fill `target_id` on every record whose title resolves.
    /// Unresolvable records keep an empty `target_id`.
    pub fn resolve_links(&self, links: &mut [BiDirectionalLink]) {
        for link in links.iter_mut() {
            if let Some(id) = self.resolve_title(&link.target_title) {
                link.target_id = id.to_string();
            }
        }
    }

    /// Ids of documents linking to `id`, in collection order, distinct
    pub fn backlinks(&self, id: &str) -> Vec<&str> {
        let Some(&target_idx) = self.id_index.get(id) else {
            return vec![];
        };

        let mut sources: Vec<NodeIndex> = self
            .graph
            .edges_directed(target_idx, Incoming)
            .map(|edge| edge.source())
            .collect();
        sources.sort_unstable();
        sources.dedup();

        sources
            .into_iter()
            .map(|idx| self.graph[idx].as_str())
            .collect()
    }

    /// Ids of documents `id` links to, in first-reference order, distinct
    pub fn forward_links(&self, id: &str) -> Vec<&str> {
        let Some(&source_idx) = self.id_index.get(id) else {
            return vec![];
        };

        let mut edges: Vec<(EdgeIndex, NodeIndex)> = self
            .graph
            .edges(source_idx)
            .map(|edge| (edge.id(), edge.target()))
            .collect();
        edges.sort_unstable_by_key(|(edge_idx, _)| *edge_idx);

        let mut seen = HashSet::new();
        edges
            .into_iter()
            .filter(|(_, target)| seen.insert(*target))
            .map(|(_, target)| self.graph[target].as_str())
            .collect()
    }

    /// References whose token matches no title
    pub fn unresolved_links(&self) -> &[UnresolvedLink] {
        &self.unresolved
    }

    /// Documents with no incoming or outgoing links
    pub fn orphans(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .filter(|&idx| {
                let in_degree = self.graph.edges_directed(idx, Incoming).count();
                let out_degree = self.graph.edges(idx).count();
                in_degree == 0 && out_degree == 0
            })
            .map(|idx| self.graph[idx].as_str())
            .collect()
    }

    /// Get statistics about the graph
    pub fn stats(&self) -> GraphStats {
        let node_count = self.graph.node_count();
        let edge_count = self.graph.edge_count();

        let average_links_per_document = if node_count > 0 {
            edge_count as f64 / node_count as f64
        } else {
            0.0
        };

        GraphStats {
            total_documents: node_count,
            total_links: edge_count,
            unresolved_links: self.unresolved.len(),
            orphaned_documents: self.orphans().len(),
            average_links_per_document,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.id_index.contains_key(id)
    }

    /// Get node count
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get edge count
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Recompute the `backlinks` field of every document.
    ///
    /// A document's backlinks are the other documents whose body references
    /// its title, in collection order and without duplicates. Documents
    /// sharing a title all receive the same sources.
    pub fn refresh_backlinks(documents: &mut [Document]) {
        let mut sources_by_token: HashMap<String, Vec<usize>> = HashMap::new();

        for (position, doc) in documents.iter().enumerate() {
            for token in parse_links(&doc.content) {
                let sources = sources_by_token.entry(token).or_default();
                if sources.last() != Some(&position) {
                    sources.push(position);
                }
            }
        }

        let ids: Vec<String> = documents.iter().map(|d| d.id.clone()).collect();

        for (position, doc) in documents.iter_mut().enumerate() {
            doc.backlinks = sources_by_token
                .get(&doc.title)
                .map(|sources| {
                    sources
                        .iter()
                        .filter(|&&source| source != position)
                        .map(|&source| ids[source].clone())
                        .collect()
                })
                .unwrap_or_default();
        }
    }
}

/// Statistics about the graph
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub total_documents: usize,
    pub total_links: usize,
    pub unresolved_links: usize,
    pub orphaned_documents: usize,
    pub average_links_per_document: f64,
}
