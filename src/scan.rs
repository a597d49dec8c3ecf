//! Document discovery and manifest generation.
//!
//! Stage 1 of the build pipeline. Lists the markdown files directly inside
//! the source directory and produces a [`Manifest`] that the generate stage
//! consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! docs/                    # Source directory
//! ├── config.toml          # Site configuration (optional)
//! ├── 001.md               # First document (rightmost on the page)
//! ├── 002.md
//! ├── 003-rainy-day.md
//! ├── drafts/              # Subdirectories are ignored
//! └── .scratch.md          # Hidden files are ignored
//! ```
//!
//! ## Ordering
//!
//! Documents are ordered by file name. Zero-padded prefixes (`001-`, `002-`)
//! or ISO dates (`2024-05-01.md`) sort naturally. The generate stage reverses
//! this order for display; the manifest always holds reading order.

use crate::config::{self, LabelStyle, SiteConfig};
use crate::naming;
use crate::types::{Document, normalize_newlines};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Source directory not found: {0}")]
    SourceNotFound(PathBuf),
    #[error("No markdown files found in {0}")]
    NoDocuments(PathBuf),
}

/// Manifest output from the scan stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Documents in reading order (by file name).
    pub documents: Vec<Document>,
    pub config: SiteConfig,
}

pub fn scan(source: &Path) -> Result<Manifest, ScanError> {
    if !source.is_dir() {
        return Err(ScanError::SourceNotFound(source.to_path_buf()));
    }
    info!("scanning {}", source.display());

    let config = config::load_config(source)?;

    let mut documents = Vec::new();
    for path in markdown_files(source) {
        let document = read_document(&path, source, config.site.labels)?;
        debug!(name = %document.name, bytes = document.body.len(), "found document");
        documents.push(document);
    }

    if documents.is_empty() {
        return Err(ScanError::NoDocuments(source.to_path_buf()));
    }

    Ok(Manifest { documents, config })
}

/// Markdown files directly inside `source`, sorted by file name.
fn markdown_files(source: &Path) -> Vec<PathBuf> {
    WalkDir::new(source)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_markdown(p))
        .collect()
}

fn is_markdown(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(true);
    !hidden
        && path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("md"))
            .unwrap_or(false)
}

fn read_document(path: &Path, source: &Path, labels: LabelStyle) -> Result<Document, ScanError> {
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let label = match labels {
        LabelStyle::Stem => name.clone(),
        LabelStyle::Title => naming::display_title(&name),
    };

    let source_path = path
        .strip_prefix(source)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string();

    let body = normalize_newlines(&fs::read_to_string(path)?);

    Ok(Document {
        name,
        label,
        source_path,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn scan_finds_all_fixture_documents() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(document_names(&manifest), vec!["001", "002", "003-rainy-day"]);
    }

    #[test]
    fn documents_sorted_by_file_name() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("010.md"), "c").unwrap();
        fs::write(tmp.path().join("002.md"), "b").unwrap();
        fs::write(tmp.path().join("001.md"), "a").unwrap();

        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(document_names(&manifest), vec!["001", "002", "010"]);
    }

    #[test]
    fn non_markdown_files_ignored() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert!(!document_names(&manifest).contains(&"notes"));
    }

    #[test]
    fn hidden_files_ignored() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join(".draft.md"), "secret").unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert!(!document_names(&manifest).iter().any(|n| n.contains("draft")));
    }

    #[test]
    fn subdirectories_not_scanned() {
        let tmp = setup_fixtures();
        let sub = tmp.path().join("drafts");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("000.md"), "nested").unwrap();

        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.documents.len(), 3);
    }

    #[test]
    fn uppercase_extension_accepted() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("001.MD"), "x").unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(document_names(&manifest), vec!["001"]);
    }

    #[test]
    fn body_read_verbatim() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let doc = find_document(&manifest, "001");
        assert!(doc.body.starts_with("# 始まり"));
    }

    #[test]
    fn crlf_normalized_on_read() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("001.md"), "a\r\nb\r\n").unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.documents[0].body, "a\nb\n");
    }

    #[test]
    fn source_path_is_relative() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(find_document(&manifest, "002").source_path, "002.md");
    }

    #[test]
    fn unnumbered_files_sort_after_numbered() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("notes.md"), "x").unwrap();
        fs::write(tmp.path().join("007-seven.md"), "x").unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(document_names(&manifest), vec!["007-seven", "notes"]);
    }

    // =========================================================================
    // Labels
    // =========================================================================

    #[test]
    fn stem_labels_by_default() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("003-rainy-day.md"), "x").unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.documents[0].label, "003-rainy-day");
    }

    #[test]
    fn title_labels_strip_prefix() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[site]\nlabels = \"title\"\n").unwrap();
        fs::write(tmp.path().join("001.md"), "x").unwrap();
        fs::write(tmp.path().join("003-rainy-day.md"), "x").unwrap();

        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(document_labels(&manifest), vec!["001", "rainy day"]);
    }

    // =========================================================================
    // Errors and config
    // =========================================================================

    #[test]
    fn missing_source_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = scan(&tmp.path().join("nope"));
        assert!(matches!(result, Err(ScanError::SourceNotFound(_))));
    }

    #[test]
    fn empty_source_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("readme.txt"), "not markdown").unwrap();
        let result = scan(tmp.path());
        assert!(matches!(result, Err(ScanError::NoDocuments(_))));
    }

    #[test]
    fn config_loaded_from_fixtures() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.config.site.title, "Test Nikki");
    }

    #[test]
    fn default_config_when_no_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("001.md"), "x").unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.config.site.title, "Nikki");
    }

    #[test]
    fn invalid_config_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("001.md"), "x").unwrap();
        fs::write(tmp.path().join("config.toml"), "[site]\nnope = 1\n").unwrap();
        let result = scan(tmp.path());
        assert!(matches!(result, Err(ScanError::Config(_))));
    }

    #[test]
    fn manifest_roundtrips_through_json() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let json = serde_json::to_string_pretty(&manifest).unwrap();
        let back: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.documents, manifest.documents);
        assert_eq!(back.config.site.title, manifest.config.site.title);
    }
}
