//! Shared test utilities.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//! let doc = find_document(&manifest, "002");
//! assert_eq!(document_names(&manifest), vec!["001", "002", "003-rainy-day"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::scan::Manifest;
use crate::types::Document;

/// Copy `fixtures/docs/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/docs");
    for entry in std::fs::read_dir(&fixtures).unwrap() {
        let path = entry.unwrap().path();
        if path.is_file() {
            std::fs::copy(&path, tmp.path().join(path.file_name().unwrap())).unwrap();
        }
    }
    tmp
}

/// Find a document by file stem. Panics if not found.
pub fn find_document<'a>(manifest: &'a Manifest, name: &str) -> &'a Document {
    manifest
        .documents
        .iter()
        .find(|d| d.name == name)
        .unwrap_or_else(|| {
            let names = document_names(manifest);
            panic!("document '{name}' not found. Available: {names:?}")
        })
}

/// All document stems in manifest order.
pub fn document_names(manifest: &Manifest) -> Vec<&str> {
    manifest.documents.iter().map(|d| d.name.as_str()).collect()
}

/// All document labels in manifest order.
pub fn document_labels(manifest: &Manifest) -> Vec<&str> {
    manifest.documents.iter().map(|d| d.label.as_str()).collect()
}

/// Build a document in memory, labelled with its name.
pub fn document(name: &str, body: &str) -> Document {
    Document {
        name: name.to_string(),
        label: name.to_string(),
        source_path: format!("{name}.md"),
        body: body.to_string(),
    }
}
