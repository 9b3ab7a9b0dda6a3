//! Integration tests for LearnSphere

#[cfg(test)]
mod tests {
    use learnsphere::prelude::*;
    use learnsphere::{analyze_file, backlinks_in_dir, load_markdown_dir};
    use learnsphere_core::UpdateDocument;
    use learnsphere_graph::LinkGraph;
    use learnsphere_parser::{find_backlinks, render_preview};
    use std::fs;
    use tempfile::TempDir;

    /// Helper to create a directory of linked notes
    fn create_notes() -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let dir = temp_dir.path();

        fs::write(
            dir.join("Index.md"),
            "# Index\n\nStart with [[Ownership]] then [[Lifetimes]]. #rust",
        )
        .expect("Failed to write Index.md");
        fs::write(
            dir.join("Ownership.md"),
            "# Ownership\n\nEvery value has one owner. See [[Lifetimes]].",
        )
        .expect("Failed to write Ownership.md");
        fs::write(
            dir.join("Lifetimes.md"),
            "# Lifetimes\n\n## Elision\n\nBack to [[Ownership]] and [[Index]].",
        )
        .expect("Failed to write Lifetimes.md");

        temp_dir
    }

    #[test]
    fn test_scan_and_link_graph() {
        let notes = create_notes();
        let files = load_markdown_dir(notes.path()).unwrap();
        assert_eq!(files.len(), 3);

        let graph = LinkGraph::build(&files);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 5);
        assert!(graph.unresolved_links().is_empty());
        assert!(graph.orphans().is_empty());

        let mut backlinks = graph.backlinks("Ownership.md");
        backlinks.sort();
        assert_eq!(backlinks, ["Index.md", "Lifetimes.md"]);
    }

    #[test]
    fn test_backlinks_command() {
        let notes = create_notes();
        let report = backlinks_in_dir("Lifetimes", notes.path()).unwrap();

        let sources: Vec<_> = report.links.iter().map(|l| l.source_id.as_str()).collect();
        assert_eq!(sources, ["Index.md", "Ownership.md"]);
        assert_eq!(report.target_id.as_deref(), Some("Lifetimes.md"));
    }

    #[test]
    fn test_analyze_command() {
        let notes = create_notes();
        let analysis =
            analyze_file(&notes.path().join("Lifetimes.md"), &DocumentConfig::default()).unwrap();

        assert_eq!(analysis.outbound_links, ["Ownership", "Index"]);
        assert_eq!(analysis.toc.len(), 2);
        assert_eq!(analysis.toc[1].anchor, "elision");
        assert_eq!(analysis.reading_time, 1);
    }

    #[test]
    fn test_backlinks_match_parser() {
        let notes = create_notes();
        let files = load_markdown_dir(notes.path()).unwrap();
        let links = find_backlinks("Ownership", &files);
        // The parser alone does not resolve targets
        assert!(links.iter().all(|l| l.target_id.is_empty()));
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn test_preview_renders_cross_references() {
        let html = render_preview("See [[Ownership]] and `[[code]]`");
        assert!(html.contains(r#"<span class="bi-link" data-link="Ownership">Ownership</span>"#));
        assert!(html.contains("<code>[[code]]</code>"));
    }

    #[tokio::test]
    async fn test_document_lifecycle_keeps_backlinks() {
        let app = LearnSphere::new(ConfigProfile::Testing.create_config()).unwrap();
        app.start().await.unwrap();
        let documents = app.documents();

        let created = documents
            .create_document(CreateDocument {
                title: "Gradient Descent".to_string(),
                content: Some("Used in [[Machine Learning Basics]]. #Optimization".to_string()),
                category: "Study Notes".to_string(),
                ..CreateDocument::default()
            })
            .await
            .unwrap();
        assert_eq!(created.tags, ["Optimization"]);

        let basics = documents
            .documents()
            .await
            .into_iter()
            .find(|d| d.id == "1")
            .unwrap();
        assert!(basics.backlinks.contains(&created.id));

        documents
            .update_document(
                &created.id,
                UpdateDocument {
                    content: Some("No references any more".to_string()),
                    ..UpdateDocument::default()
                },
            )
            .await
            .unwrap();
        let basics = documents.open_document("1").await.unwrap();
        let snapshot = documents.documents().await;
        let fresh = snapshot.iter().find(|d| d.id == basics.id).unwrap();
        assert!(!fresh.backlinks.contains(&created.id));

        documents.delete_document(&created.id).await.unwrap();
        assert_eq!(documents.documents().await.len(), 3);
    }

    #[tokio::test]
    async fn test_assistant_conversation_after_sign_in() {
        let app = LearnSphere::new(ConfigProfile::Testing.create_config()).unwrap();
        app.start().await.unwrap();
        app.sign_in(app.demo_credentials()).await.unwrap();

        let reply = app
            .assistant()
            .send_message(SendMessageRequest::new("Any tips about Hong Kong culture?"))
            .await
            .unwrap();
        assert!(reply.content.contains("Festivals"));

        let sessions = app.assistant().sessions().await;
        assert_eq!(sessions.len(), 3);
        assert_eq!(sessions[0].title, "Any tips about Hong Kong cultu...");
    }
}
