//! Filtering and sorting for document lists.

use learnsphere_core::Document;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Sort order for listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Most recently updated first
    #[default]
    Updated,
    /// Most recently created first
    Created,
    /// Alphabetical by title
    Title,
}

/// Listing parameters; `category: None` means every category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentQuery {
    pub category: Option<String>,
    pub sort_by: SortBy,
}

impl DocumentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn sorted_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }
}

/// Apply `query` to `documents`. Sorting is stable.
pub fn list_documents(documents: &[Document], query: &DocumentQuery) -> Vec<Document> {
    let mut listed: Vec<Document> = documents
        .iter()
        .filter(|doc| query.category.as_deref().is_none_or(|c| doc.category == c))
        .cloned()
        .collect();

    match query.sort_by {
        SortBy::Updated => listed.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        SortBy::Created => listed.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortBy::Title => listed.sort_by(|a, b| a.title.cmp(&b.title)),
    }

    listed
}

/// Distinct categories in first-seen order
pub fn categories(documents: &[Document]) -> Vec<String> {
    let mut seen = HashSet::new();
    documents
        .iter()
        .filter(|doc| seen.insert(doc.category.as_str()))
        .map(|doc| doc.category.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::sample_documents;

    #[test]
    fn test_default_sorts_by_updated() {
        let listed = list_documents(&sample_documents(), &DocumentQuery::new());
        let ids: Vec<&str> = listed.iter().map(|d| d.id.as_str()).collect();
        // Updated 30 minutes, 1 hour and 2 hours ago
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_sort_by_created_and_title() {
        let docs = sample_documents();

        let created = list_documents(&docs, &DocumentQuery::new().sorted_by(SortBy::Created));
        let ids: Vec<&str> = created.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);

        let titled = list_documents(&docs, &DocumentQuery::new().sorted_by(SortBy::Title));
        let titles: Vec<&str> = titled.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["CityU AI Course Plan", "Deep Learning Overview", "Machine Learning Basics"]
        );
    }

    #[test]
    fn test_category_filter() {
        let docs = sample_documents();
        let listed = list_documents(&docs, &DocumentQuery::new().in_category("Study Notes"));
        assert_eq!(listed.len(), 2);

        let none = list_documents(&docs, &DocumentQuery::new().in_category("Unknown"));
        assert!(none.is_empty());
    }

    #[test]
    fn test_categories_distinct() {
        assert_eq!(
            categories(&sample_documents()),
            vec!["Study Notes", "Academic Planning"]
        );
    }
}
