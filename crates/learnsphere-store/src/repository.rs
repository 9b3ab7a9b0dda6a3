//! Document repositories.
//!
//! [`DocumentRepository`] is the seam between services and whatever holds the
//! documents. The shipped implementation keeps everything in memory.

use async_trait::async_trait;
use chrono::Utc;
use learnsphere_core::prelude::*;
use learnsphere_graph::LinkGraph;
use learnsphere_parser::{merge_tags, reading_time_with_speed, word_count};
use tokio::sync::RwLock;
use tracing::instrument;

use crate::seed::sample_documents;

/// Asynchronous document storage
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Every document, in collection order
    async fn fetch_all(&self) -> Result<Vec<Document>>;

    /// One document by id
    async fn fetch(&self, id: &str) -> Result<Document>;

    /// Create a document; `editor` is recorded as `last_edited_by`
    async fn create(&self, data: CreateDocument, editor: &str) -> Result<Document>;

    /// Merge the provided fields into an existing document
    async fn update(&self, id: &str, data: UpdateDocument, editor: &str) -> Result<Document>;

    async fn delete(&self, id: &str) -> Result<()>;

    /// Case-insensitive match over title, body and tags
    async fn search(&self, query: &str) -> Result<Vec<Document>>;
}

/// Derived statistics for a body
pub fn compute_metadata(content: &str, editor: &str, words_per_minute: u32) -> DocumentMetadata {
    DocumentMetadata {
        word_count: word_count(content),
        reading_time: reading_time_with_speed(content, words_per_minute),
        last_edited_by: editor.to_string(),
    }
}

/// Ordered in-memory collection; newest documents first.
pub struct InMemoryDocumentRepository {
    config: DocumentConfig,
    documents: RwLock<Vec<Document>>,
}

impl InMemoryDocumentRepository {
    /// Create an empty repository
    pub fn new(config: DocumentConfig) -> Self {
        Self::with_documents(config, Vec::new())
    }

    /// Create a repository holding `documents`; backlinks are recomputed.
    pub fn with_documents(config: DocumentConfig, mut documents: Vec<Document>) -> Self {
        LinkGraph::refresh_backlinks(&mut documents);
        Self {
            config,
            documents: RwLock::new(documents),
        }
    }

    /// Repository preloaded with the sample study notes
    pub fn seeded(config: DocumentConfig) -> Self {
        Self::with_documents(config, sample_documents())
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn fetch_all(&self) -> Result<Vec<Document>> {
        Ok(self.documents.read().await.clone())
    }

    async fn fetch(&self, id: &str) -> Result<Document> {
        self.documents
            .read()
            .await
            .iter()
            .find(|doc| doc.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("document {}", id)))
    }

    #[instrument(skip(self, data), fields(title = %data.title), name = "repository_create")]
    async fn create(&self, data: CreateDocument, editor: &str) -> Result<Document> {
        data.validate().into_result()?;

        let content = data.content.unwrap_or_default();
        let now = Utc::now();
        let document = Document {
            id: uuid::Uuid::new_v4().to_string(),
            title: data.title,
            tags: merge_tags(data.tags.unwrap_or_default(), &content),
            metadata: compute_metadata(&content, editor, self.config.reading_speed_wpm),
            content,
            category: data.category,
            created_at: now,
            updated_at: now,
            author_id: self.config.default_author_id.clone(),
            is_public: false,
            collaborators: Vec::new(),
            backlinks: Vec::new(),
        };

        let mut documents = self.documents.write().await;
        documents.insert(0, document);
        LinkGraph::refresh_backlinks(&mut documents);

        log::debug!("Created document {}", documents[0].id);
        Ok(documents[0].clone())
    }

    #[instrument(skip(self, data), name = "repository_update")]
    async fn update(&self, id: &str, data: UpdateDocument, editor: &str) -> Result<Document> {
        data.validate().into_result()?;

        let mut documents = self.documents.write().await;
        let position = documents
            .iter()
            .position(|doc| doc.id == id)
            .ok_or_else(|| Error::not_found(format!("document {}", id)))?;

        let refresh = data.affects_links();
        {
            let doc = &mut documents[position];
            if let Some(title) = data.title {
                doc.title = title;
            }
            if let Some(content) = data.content {
                doc.content = content;
            }
            if let Some(category) = data.category {
                doc.category = category;
            }
            let base_tags = data.tags.unwrap_or_else(|| doc.tags.clone());
            doc.tags = merge_tags(base_tags, &doc.content);
            doc.metadata = compute_metadata(&doc.content, editor, self.config.reading_speed_wpm);
            doc.updated_at = Utc::now();
        }

        if refresh {
            LinkGraph::refresh_backlinks(&mut documents);
        }

        Ok(documents[position].clone())
    }

    #[instrument(skip(self), name = "repository_delete")]
    async fn delete(&self, id: &str) -> Result<()> {
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|doc| doc.id != id);
        if documents.len() == before {
            return Err(Error::not_found(format!("document {}", id)));
        }

        LinkGraph::refresh_backlinks(&mut documents);
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<Vec<Document>> {
        Ok(self
            .documents
            .read()
            .await
            .iter()
            .filter(|doc| doc.matches_query(query))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> InMemoryDocumentRepository {
        InMemoryDocumentRepository::seeded(DocumentConfig::default())
    }

    fn new_doc(title: &str, content: &str) -> CreateDocument {
        CreateDocument {
            title: title.to_string(),
            content: Some(content.to_string()),
            category: "Notes".to_string(),
            ..CreateDocument::default()
        }
    }

    #[tokio::test]
    async fn test_seeded_backlinks_are_derived() {
        let docs = repo().fetch_all().await.unwrap();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].backlinks, vec!["2", "3"]);
        assert_eq!(docs[1].backlinks, vec!["1"]);
        assert!(docs[2].backlinks.is_empty());
    }

    #[tokio::test]
    async fn test_create_assigns_id_metadata_and_tags() {
        let repo = repo();
        let mut data = new_doc("Graph Theory", "Nodes and edges #math #graphs");
        data.tags = Some(vec!["study".to_string(), "math".to_string()]);

        let doc = repo.create(data, "Tester").await.unwrap();
        assert!(uuid::Uuid::parse_str(&doc.id).is_ok());
        assert_eq!(doc.tags, vec!["study", "math", "graphs"]);
        assert_eq!(doc.metadata.word_count, 5);
        assert_eq!(doc.metadata.reading_time, 1);
        assert_eq!(doc.metadata.last_edited_by, "Tester");
        assert_eq!(doc.created_at, doc.updated_at);

        let all = repo.fetch_all().await.unwrap();
        assert_eq!(all[0].id, doc.id);
    }

    #[tokio::test]
    async fn test_create_without_content() {
        let repo = InMemoryDocumentRepository::new(DocumentConfig::default());
        let data = CreateDocument {
            title: "Empty".to_string(),
            category: "Notes".to_string(),
            ..CreateDocument::default()
        };
        let doc = repo.create(data, "Tester").await.unwrap();
        assert_eq!(doc.content, "");
        assert_eq!(doc.metadata.word_count, 0);
        assert_eq!(doc.metadata.reading_time, 0);
    }

    #[tokio::test]
    async fn test_create_rejects_missing_title() {
        let repo = repo();
        let result = repo.create(new_doc("  ", "body"), "Tester").await;
        assert!(matches!(result, Err(Error::ValidationError { .. })));
    }

    #[tokio::test]
    async fn test_create_updates_backlinks() {
        let repo = repo();
        let doc = repo
            .create(new_doc("Linker", "See [[Deep Learning Overview]]"), "Tester")
            .await
            .unwrap();

        let target = repo.fetch("2").await.unwrap();
        assert_eq!(target.backlinks, vec![doc.id.clone(), "1".to_string()]);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let repo = repo();
        let original = repo.fetch("3").await.unwrap();
        let update = UpdateDocument {
            content: Some("Rewritten plan #planning".to_string()),
            ..UpdateDocument::default()
        };

        let updated = repo.update("3", update, "Editor").await.unwrap();
        assert_eq!(updated.title, original.title);
        assert_eq!(updated.category, original.category);
        assert_eq!(updated.content, "Rewritten plan #planning");
        assert!(updated.updated_at >= original.updated_at);
        assert_eq!(updated.metadata.word_count, 3);
        assert_eq!(updated.metadata.last_edited_by, "Editor");
        assert!(updated.tags.starts_with(&original.tags));
        assert_eq!(updated.tags.last().map(String::as_str), Some("planning"));
    }

    #[tokio::test]
    async fn test_update_rejects_blank_title() {
        let repo = repo();
        let update = UpdateDocument {
            title: Some("  ".to_string()),
            ..UpdateDocument::default()
        };
        let result = repo.update("1", update, "Editor").await;
        assert!(matches!(result, Err(Error::ValidationError { .. })));
        assert_eq!(repo.fetch("1").await.unwrap().title, "Machine Learning Basics");
    }

    #[tokio::test]
    async fn test_update_removing_reference_drops_backlink() {
        let repo = repo();
        let update = UpdateDocument {
            content: Some("No references any more".to_string()),
            ..UpdateDocument::default()
        };
        repo.update("3", update, "Editor").await.unwrap();

        let target = repo.fetch("1").await.unwrap();
        assert_eq!(target.backlinks, vec!["2"]);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let repo = repo();
        assert!(matches!(repo.fetch("missing").await, Err(Error::NotFound { .. })));
        assert!(matches!(
            repo.update("missing", UpdateDocument::default(), "x").await,
            Err(Error::NotFound { .. })
        ));
        assert!(matches!(repo.delete("missing").await, Err(Error::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_refreshes_backlinks() {
        let repo = repo();
        repo.delete("2").await.unwrap();

        let docs = repo.fetch_all().await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].backlinks, vec!["3"]);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let repo = repo();
        let results = repo.search("NEURAL").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "2");

        let by_tag = repo.search("cityu").await.unwrap();
        assert!(by_tag.iter().any(|d| d.id == "3"));

        assert!(repo.search("zzz-no-match").await.unwrap().is_empty());
    }
}
