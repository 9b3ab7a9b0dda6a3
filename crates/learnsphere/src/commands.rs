//! Operations behind the `learnsphere` subcommands.

use learnsphere_core::prelude::*;
use learnsphere_graph::{GraphStats, LinkGraph};
use learnsphere_parser::{Analyzer, find_backlinks};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

use crate::app::LearnSphere;
use crate::files::{load_markdown_dir, load_markdown_file};

/// Question asked by [`run_demo`]
pub const DEMO_QUESTION: &str = "What is machine learning?";

/// Analyze one markdown file with the configured reading speed and summary length
pub fn analyze_file(path: &Path, config: &DocumentConfig) -> Result<DocumentAnalysis> {
    let file = load_markdown_file(path)?;
    Ok(Analyzer::from_config(config).analyze(&file.content))
}

/// References to one title across a directory of notes
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BacklinkReport {
    pub title: String,
    /// Id of the file named `title`, when there is one
    pub target_id: Option<String>,
    pub links: Vec<BiDirectionalLink>,
    pub stats: GraphStats,
}

/// Find every `[[title]]` in the markdown files under `dir`.
///
/// The file named after `title` is not counted as its own backlink.
pub fn backlinks_in_dir(title: &str, dir: &Path) -> Result<BacklinkReport> {
    let files = load_markdown_dir(dir)?;
    let graph = LinkGraph::build(&files);
    let target_id = graph.resolve_title(title).map(str::to_string);

    let mut links = find_backlinks(
        title,
        files
            .iter()
            .filter(|f| target_id.as_deref() != Some(f.id.as_str())),
    );
    graph.resolve_links(&mut links);

    Ok(BacklinkReport {
        title: title.to_string(),
        target_id,
        links,
        stats: graph.stats(),
    })
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoDocument {
    pub id: String,
    pub title: String,
    pub reading_time: u32,
    pub backlinks: Vec<String>,
}

/// What the demo walkthrough did
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoReport {
    pub user: String,
    pub documents: Vec<DemoDocument>,
    pub question: String,
    pub answer: String,
    pub session_title: String,
}

/// Sign in as the demo user, load the sample notes and ask the assistant
/// one question.
pub async fn run_demo(app: &LearnSphere) -> Result<DemoReport> {
    app.start().await?;
    let user = match app.auth().user().await {
        Some(user) => user,
        None => app.sign_in(app.demo_credentials()).await?,
    };

    let documents = app
        .documents()
        .documents()
        .await
        .into_iter()
        .map(|doc| DemoDocument {
            reading_time: doc.metadata.reading_time,
            id: doc.id,
            title: doc.title,
            backlinks: doc.backlinks,
        })
        .collect();

    let reply = app
        .assistant()
        .send_message(SendMessageRequest::new(DEMO_QUESTION))
        .await?;
    let session_title = app
        .assistant()
        .current_session()
        .await
        .map(|s| s.title)
        .unwrap_or_default();

    Ok(DemoReport {
        user: user.full_name,
        documents,
        question: DEMO_QUESTION.to_string(),
        answer: reply.content,
        session_title,
    })
}

/// Human-readable demo transcript
pub fn format_demo(report: &DemoReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Signed in as {}\n", report.user);
    let _ = writeln!(out, "Documents:");
    for doc in &report.documents {
        let _ = writeln!(
            out,
            "  [{}] {} ({} min, backlinks: {})",
            doc.id,
            doc.title,
            doc.reading_time,
            if doc.backlinks.is_empty() {
                "none".to_string()
            } else {
                doc.backlinks.join(", ")
            }
        );
    }
    let _ = writeln!(out, "\nSession: {}", report.session_title);
    let _ = writeln!(out, "> {}\n", report.question);
    let _ = writeln!(out, "{}", report.answer);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_backlinks_in_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Rust.md"), "See [[Rust]] and [[Cargo]]").unwrap();
        fs::write(dir.path().join("Cargo.md"), "Built with [[Rust]]").unwrap();
        fs::write(dir.path().join("Tips.md"), "[[Rust]] twice: [[Rust]]").unwrap();

        let report = backlinks_in_dir("Rust", dir.path()).unwrap();
        assert_eq!(report.target_id.as_deref(), Some("Rust.md"));
        let sources: Vec<_> = report.links.iter().map(|l| l.source_id.as_str()).collect();
        assert_eq!(sources, ["Cargo.md", "Tips.md", "Tips.md"]);
        assert!(report.links.iter().all(|l| l.target_id == "Rust.md"));
        assert_eq!(report.stats.total_documents, 3);
    }

    #[test]
    fn test_backlinks_to_missing_note() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.md"), "[[Ghost]]").unwrap();

        let report = backlinks_in_dir("Ghost", dir.path()).unwrap();
        assert!(report.target_id.is_none());
        assert_eq!(report.links.len(), 1);
        assert!(!report.links[0].is_resolved());
    }

    #[tokio::test]
    async fn test_run_demo() {
        let app = LearnSphere::new(ConfigProfile::Testing.create_config()).unwrap();
        let report = run_demo(&app).await.unwrap();

        assert_eq!(report.user, "Demo Student");
        assert_eq!(report.documents.len(), 3);
        assert_eq!(report.session_title, DEMO_QUESTION);
        assert!(report.answer.contains("Supervised learning"));

        let text = format_demo(&report);
        assert!(text.starts_with("Signed in as Demo Student"));
        assert!(text.contains("Machine Learning Basics"));
    }
}
