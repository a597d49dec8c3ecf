//! Shared types used across pipeline stages.
//!
//! These types are serialized to JSON between stages (scan → generate) and
//! must be identical on both sides.

use serde::{Deserialize, Serialize};

/// One markdown document from the source directory.
///
/// Documents are ordered by file name. The page shows them right to left,
/// so the first document by name is the rightmost block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// File stem, exactly as on disk (`001-rainy-day`)
    pub name: String,
    /// Text shown above the document on the page
    pub label: String,
    /// Path relative to the source directory
    pub source_path: String,
    /// Raw markdown with `\n` line endings
    pub body: String,
}

/// Normalize line endings to `\n`.
///
/// Documents saved on Windows arrive with `\r\n`; the transformer's
/// line-anchored patterns expect bare `\n`.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
