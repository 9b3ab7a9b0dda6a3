//! State-owning document service.
//!
//! Holds the client-side view of the collection (documents, current
//! document, recently opened, search results, loading flag and last error)
//! and keeps every document's `backlinks` consistent after each mutation.

use learnsphere_core::prelude::*;
use learnsphere_graph::LinkGraph;
use learnsphere_parser::{Analyzer, find_backlinks};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::listing::{DocumentQuery, categories, list_documents};
use crate::repository::DocumentRepository;

/// Snapshot of the service state
#[derive(Debug, Clone, Default)]
pub struct DocumentState {
    pub documents: Vec<Document>,
    pub current: Option<Document>,
    /// Most recently opened first, bounded, no duplicates
    pub recent: Vec<Document>,
    pub search_results: Vec<Document>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl DocumentState {
    fn push_recent(&mut self, document: Document, limit: usize) {
        self.recent.retain(|d| d.id != document.id);
        self.recent.insert(0, document);
        self.recent.truncate(limit);
    }

    fn replace_everywhere(&mut self, document: &Document) {
        for list in [&mut self.documents, &mut self.recent, &mut self.search_results] {
            if let Some(slot) = list.iter_mut().find(|d| d.id == document.id) {
                *slot = document.clone();
            }
        }
        if self.current.as_ref().is_some_and(|d| d.id == document.id) {
            self.current = Some(document.clone());
        }
    }

    fn remove_everywhere(&mut self, id: &str) {
        self.documents.retain(|d| d.id != id);
        self.recent.retain(|d| d.id != id);
        self.search_results.retain(|d| d.id != id);
        if self.current.as_ref().is_some_and(|d| d.id == id) {
            self.current = None;
        }
    }

    /// Recompute backlinks and propagate them to the derived lists
    fn refresh_backlinks(&mut self) {
        LinkGraph::refresh_backlinks(&mut self.documents);

        let documents = &self.documents;
        let sync = |doc: &mut Document| {
            if let Some(fresh) = documents.iter().find(|d| d.id == doc.id) {
                doc.backlinks = fresh.backlinks.clone();
            }
        };
        self.recent.iter_mut().for_each(sync);
        self.search_results.iter_mut().for_each(sync);
        if let Some(current) = self.current.as_mut() {
            sync(current);
        }
    }
}

/// Document manager
pub struct DocumentService {
    repository: Arc<dyn DocumentRepository>,
    config: DocumentConfig,
    analyzer: Analyzer,
    state: Arc<RwLock<DocumentState>>,
}

impl DocumentService {
    /// Create a service over `repository`
    pub fn new(repository: Arc<dyn DocumentRepository>, config: DocumentConfig) -> Self {
        let analyzer = Analyzer::from_config(&config);
        Self {
            repository,
            config,
            analyzer,
            state: Arc::new(RwLock::new(DocumentState::default())),
        }
    }

    // ==================== Queries ====================

    pub async fn snapshot(&self) -> DocumentState {
        self.state.read().await.clone()
    }

    pub async fn documents(&self) -> Vec<Document> {
        self.state.read().await.documents.clone()
    }

    pub async fn current(&self) -> Option<Document> {
        self.state.read().await.current.clone()
    }

    pub async fn recent(&self) -> Vec<Document> {
        self.state.read().await.recent.clone()
    }

    pub async fn search_results(&self) -> Vec<Document> {
        self.state.read().await.search_results.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    /// References to document `id` from the other loaded documents. Every
    /// record carries `id` as its `target_id`, even when other documents
    /// share the title.
    pub async fn backlinks_for(&self, id: &str) -> Result<Vec<BiDirectionalLink>> {
        let state = self.state.read().await;
        let target = state
            .documents
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| Error::not_found(format!("document {}", id)))?;

        let mut links = find_backlinks(
            &target.title,
            state.documents.iter().filter(|d| d.id != id),
        );
        for link in &mut links {
            link.target_id = id.to_string();
        }
        Ok(links)
    }

    /// Summary, tags, outline, outgoing references and reading time for a
    /// loaded document
    pub async fn analyze(&self, id: &str) -> Result<DocumentAnalysis> {
        let state = self.state.read().await;
        let document = state
            .documents
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| Error::not_found(format!("document {}", id)))?;
        Ok(self.analyzer.analyze(&document.content))
    }

    /// Filtered and sorted view of the loaded documents
    pub async fn list(&self, query: &DocumentQuery) -> Vec<Document> {
        list_documents(&self.state.read().await.documents, query)
    }

    /// Distinct categories of the loaded documents
    pub async fn categories(&self) -> Vec<String> {
        categories(&self.state.read().await.documents)
    }

    // ==================== Commands ====================

    /// Load the whole collection
    #[instrument(skip(self), name = "documents_fetch")]
    pub async fn fetch_documents(&self) -> Result<()> {
        self.begin_loading().await;

        match self.repository.fetch_all().await {
            Ok(documents) => {
                log::info!("Loaded {} documents", documents.len());
                let mut state = self.state.write().await;
                state.documents = documents;
                state.refresh_backlinks();
                state.is_loading = false;
                state.error = None;
                Ok(())
            }
            Err(e) => Err(self.fail("Failed to load documents", e).await),
        }
    }

    /// Fetch one document, make it current and add it to the recent list
    #[instrument(skip(self), name = "documents_open")]
    pub async fn open_document(&self, id: &str) -> Result<Document> {
        self.begin_loading().await;

        match self.repository.fetch(id).await {
            Ok(document) => {
                let mut state = self.state.write().await;
                state.current = Some(document.clone());
                state.push_recent(document.clone(), self.config.recent_limit);
                state.is_loading = false;
                Ok(document)
            }
            Err(e) => Err(self.fail("Failed to open document", e).await),
        }
    }

    #[instrument(skip(self, data), fields(title = %data.title), name = "documents_create")]
    pub async fn create_document(&self, data: CreateDocument) -> Result<Document> {
        match self
            .repository
            .create(data, &self.config.default_editor)
            .await
        {
            Ok(document) => {
                log::info!("Created document {} ({})", document.id, document.title);
                let mut state = self.state.write().await;
                state.documents.insert(0, document.clone());
                state.refresh_backlinks();
                let created = state
                    .documents
                    .iter()
                    .find(|d| d.id == document.id)
                    .cloned()
                    .unwrap_or(document);
                Ok(created)
            }
            Err(e) => Err(self.fail("Failed to create document", e).await),
        }
    }

    #[instrument(skip(self, data), name = "documents_update")]
    pub async fn update_document(&self, id: &str, data: UpdateDocument) -> Result<Document> {
        match self
            .repository
            .update(id, data, &self.config.default_editor)
            .await
        {
            Ok(document) => {
                log::debug!("Updated document {}", document.id);
                let mut state = self.state.write().await;
                if !state.documents.iter().any(|d| d.id == document.id) {
                    state.documents.insert(0, document.clone());
                }
                state.replace_everywhere(&document);
                state.refresh_backlinks();
                let updated = state
                    .documents
                    .iter()
                    .find(|d| d.id == document.id)
                    .cloned()
                    .unwrap_or(document);
                Ok(updated)
            }
            Err(e) => Err(self.fail("Failed to update document", e).await),
        }
    }

    #[instrument(skip(self), name = "documents_delete")]
    pub async fn delete_document(&self, id: &str) -> Result<()> {
        match self.repository.delete(id).await {
            Ok(()) => {
                log::info!("Deleted document {}", id);
                let mut state = self.state.write().await;
                state.remove_everywhere(id);
                state.refresh_backlinks();
                Ok(())
            }
            Err(e) => Err(self.fail("Failed to delete document", e).await),
        }
    }

    #[instrument(skip(self), name = "documents_search")]
    pub async fn search_documents(&self, query: &str) -> Result<Vec<Document>> {
        match self.repository.search(query).await {
            Ok(results) => {
                log::debug!("Search '{}' matched {} documents", query, results.len());
                self.state.write().await.search_results = results.clone();
                Ok(results)
            }
            Err(e) => Err(self.fail("Search failed", e).await),
        }
    }

    /// Make a loaded document current (and recent), or clear the selection
    pub async fn set_current_document(&self, id: Option<&str>) -> Result<()> {
        let mut state = self.state.write().await;
        let Some(id) = id else {
            state.current = None;
            return Ok(());
        };

        let document = state
            .documents
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("document {}", id)))?;
        state.current = Some(document.clone());
        state.push_recent(document, self.config.recent_limit);
        Ok(())
    }

    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    async fn begin_loading(&self) {
        let mut state = self.state.write().await;
        state.is_loading = true;
        state.error = None;
    }

    /// Record a failure and hand the error back to the caller
    async fn fail(&self, context: &str, error: Error) -> Error {
        log::warn!("{}: {}", context, error);
        let mut state = self.state.write().await;
        state.is_loading = false;
        state.error = Some(error.to_string());
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::SortBy;
    use crate::repository::InMemoryDocumentRepository;

    async fn service() -> DocumentService {
        service_with(DocumentConfig::default()).await
    }

    async fn service_with(config: DocumentConfig) -> DocumentService {
        let repository = Arc::new(InMemoryDocumentRepository::seeded(config.clone()));
        let service = DocumentService::new(repository, config);
        service.fetch_documents().await.unwrap();
        service
    }

    fn create(title: &str, content: &str) -> CreateDocument {
        CreateDocument {
            title: title.to_string(),
            content: Some(content.to_string()),
            category: "Study Notes".to_string(),
            ..CreateDocument::default()
        }
    }

    /// Backlinks must equal the other documents referencing the title
    fn assert_backlink_invariant(documents: &[Document]) {
        for doc in documents {
            let expected: Vec<String> = documents
                .iter()
                .filter(|other| other.id != doc.id)
                .filter(|other| learnsphere_parser::parse_links(&other.content).contains(&doc.title))
                .map(|other| other.id.clone())
                .collect();
            assert_eq!(doc.backlinks, expected, "backlinks of {}", doc.title);
        }
    }

    #[tokio::test]
    async fn test_fetch_documents() {
        let service = service().await;
        let documents = service.documents().await;
        assert_eq!(documents.len(), 3);
        assert!(!service.is_loading().await);
        assert!(service.error().await.is_none());
        assert_backlink_invariant(&documents);
    }

    #[tokio::test]
    async fn test_open_document_sets_current_and_recent() {
        let service = service().await;
        service.open_document("2").await.unwrap();
        service.open_document("1").await.unwrap();
        service.open_document("2").await.unwrap();

        assert_eq!(service.current().await.map(|d| d.id), Some("2".to_string()));
        let recent: Vec<String> = service.recent().await.into_iter().map(|d| d.id).collect();
        assert_eq!(recent, vec!["2", "1"]);
    }

    #[tokio::test]
    async fn test_recent_is_bounded() {
        let config = DocumentConfig {
            recent_limit: 2,
            ..DocumentConfig::default()
        };
        let service = service_with(config).await;
        for id in ["1", "2", "3"] {
            service.set_current_document(Some(id)).await.unwrap();
        }

        let recent: Vec<String> = service.recent().await.into_iter().map(|d| d.id).collect();
        assert_eq!(recent, vec!["3", "2"]);
    }

    #[tokio::test]
    async fn test_open_unknown_records_error() {
        let service = service().await;
        let result = service.open_document("missing").await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
        assert!(service.error().await.is_some());
        assert!(!service.is_loading().await);

        service.clear_error().await;
        assert!(service.error().await.is_none());
    }

    #[tokio::test]
    async fn test_create_prepends_and_keeps_invariant() {
        let service = service().await;
        let created = service
            .create_document(create("Neural Nets", "Builds on [[Deep Learning Overview]]"))
            .await
            .unwrap();

        let documents = service.documents().await;
        assert_eq!(documents[0].id, created.id);
        assert_eq!(created.metadata.last_edited_by, "Demo Student");
        assert_backlink_invariant(&documents);

        let target = documents.iter().find(|d| d.id == "2").unwrap();
        assert!(target.backlinks.contains(&created.id));
    }

    #[tokio::test]
    async fn test_update_retitle_keeps_invariant() {
        let service = service().await;
        service.open_document("1").await.unwrap();

        let update = UpdateDocument {
            title: Some("ML Basics".to_string()),
            ..UpdateDocument::default()
        };
        let updated = service.update_document("1", update).await.unwrap();
        assert_eq!(updated.title, "ML Basics");
        // Nobody references the new title
        assert!(updated.backlinks.is_empty());

        let documents = service.documents().await;
        assert_backlink_invariant(&documents);
        assert_eq!(service.current().await.map(|d| d.title), Some("ML Basics".to_string()));
    }

    #[tokio::test]
    async fn test_delete_clears_current_and_keeps_invariant() {
        let service = service().await;
        service.open_document("2").await.unwrap();
        service.delete_document("2").await.unwrap();

        assert!(service.current().await.is_none());
        assert!(service.recent().await.is_empty());

        let documents = service.documents().await;
        assert_eq!(documents.len(), 2);
        assert_backlink_invariant(&documents);
    }

    #[tokio::test]
    async fn test_delete_unknown_is_error() {
        let service = service().await;
        assert!(service.delete_document("missing").await.is_err());
        assert!(service.error().await.is_some());
        assert_eq!(service.documents().await.len(), 3);
    }

    #[tokio::test]
    async fn test_search_documents() {
        let service = service().await;
        let results = service.search_documents("deep learning").await.unwrap();
        assert!(results.iter().any(|d| d.id == "2"));
        assert_eq!(service.search_results().await.len(), results.len());
    }

    #[tokio::test]
    async fn test_backlinks_for_resolves_targets() {
        let service = service().await;
        let links = service.backlinks_for("1").await.unwrap();

        // Two references from note 2, one from note 3
        assert_eq!(links.len(), 3);
        assert!(links.iter().all(|l| l.target_id == "1"));
        let sources: Vec<&str> = links.iter().map(|l| l.source_id.as_str()).collect();
        assert_eq!(sources, vec!["2", "2", "3"]);

        assert!(service.backlinks_for("missing").await.is_err());
    }

    #[tokio::test]
    async fn test_backlinks_for_shared_title_targets_requested_id() {
        let service = service().await;
        let source = service
            .create_document(create("Src", "See [[Same]]"))
            .await
            .unwrap();
        let b = service.create_document(create("Same", "First twin")).await.unwrap();
        let a = service.create_document(create("Same", "Second twin")).await.unwrap();

        for target in [&b, &a] {
            let links = service.backlinks_for(&target.id).await.unwrap();
            assert_eq!(links.len(), 1, "backlinks of {}", target.id);
            assert_eq!(links[0].source_id, source.id);
            assert_eq!(links[0].target_id, target.id);
        }
    }

    #[tokio::test]
    async fn test_analyze_document() {
        let service = service().await;
        let analysis = service.analyze("1").await.unwrap();
        assert_eq!(analysis.toc[0].title, "Machine Learning Basics");
        assert_eq!(analysis.outbound_links.len(), 3);
        assert!(analysis.summary.chars().count() <= 153);
        assert_eq!(analysis.reading_time, 1);
    }

    #[tokio::test]
    async fn test_list_and_categories() {
        let service = service().await;
        let listed = service
            .list(&DocumentQuery::new().in_category("Study Notes").sorted_by(SortBy::Title))
            .await;
        let titles: Vec<String> = listed.into_iter().map(|d| d.title).collect();
        assert_eq!(titles, vec!["Deep Learning Overview", "Machine Learning Basics"]);

        assert_eq!(service.categories().await.len(), 2);
    }

    #[tokio::test]
    async fn test_set_current_none_clears() {
        let service = service().await;
        service.set_current_document(Some("1")).await.unwrap();
        service.set_current_document(None).await.unwrap();
        assert!(service.current().await.is_none());
        assert!(service.set_current_document(Some("missing")).await.is_err());
    }
}
