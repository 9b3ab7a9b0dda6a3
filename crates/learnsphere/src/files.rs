//! Markdown files on disk as link sources.

use learnsphere_core::{Error, LinkSource, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A markdown file whose title is its file stem.
///
/// The id is the path relative to the scanned directory, so `[[Title]]`
/// references resolve the same way they do between notes in the app.
#[derive(Debug, Clone)]
pub struct MarkdownFile {
    pub id: String,
    pub title: String,
    pub content: String,
    pub path: PathBuf,
}

impl LinkSource for MarkdownFile {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn content(&self) -> &str {
        &self.content
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"))
}

fn title_of(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Read a single markdown file; its id is the path as given
pub fn load_markdown_file(path: &Path) -> Result<MarkdownFile> {
    let content = std::fs::read_to_string(path)?;
    Ok(MarkdownFile {
        id: path.display().to_string(),
        title: title_of(path),
        content,
        path: path.to_path_buf(),
    })
}

/// Every markdown file under `dir`, sorted by relative path
pub fn load_markdown_dir(dir: &Path) -> Result<Vec<MarkdownFile>> {
    if !dir.is_dir() {
        return Err(Error::not_found(format!("directory {}", dir.display())));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.map_err(|e| Error::Io(e.into()))?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_markdown(path) {
            continue;
        }

        let relative = path.strip_prefix(dir).unwrap_or(path);
        files.push(MarkdownFile {
            id: relative.to_string_lossy().replace('\\', "/"),
            title: title_of(path),
            content: std::fs::read_to_string(path)?,
            path: path.to_path_buf(),
        });
    }

    files.sort_by(|a, b| a.id.cmp(&b.id));
    log::debug!("Loaded {} markdown files from {}", files.len(), dir.display());
    Ok(files)
}
