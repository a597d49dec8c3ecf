//! CLI output formatting for both pipeline stages.
//!
//! Output is information-first: each document leads with its positional
//! index and label, with the source file as an indented context line.
//!
//! ## Scan
//!
//! ```text
//! Documents
//! 001 001
//!     Source: 001.md
//!     始まり
//! 002 003-rainy-day
//!     Source: 003-rainy-day.md
//!     雨の日
//!
//! Config
//!     config.toml
//! ```
//!
//! ## Generate
//!
//! ```text
//! Page (right to left)
//! 001 001
//! 002 003-rainy-day
//!
//! Static site generated: index.html
//! Processed 2 markdown files
//! ```
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::config::CONFIG_FILE;
use crate::scan::Manifest;
use std::path::Path;

const PREVIEW_CHARS: usize = 40;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    }
}

/// First non-blank line of a document, with block markers stripped.
fn preview_line(body: &str) -> Option<String> {
    let line = body.lines().map(str::trim).find(|l| !l.is_empty())?;
    let stripped = line
        .trim_start_matches('#')
        .trim_start_matches('>')
        .trim_start_matches("- ")
        .trim();
    if stripped.is_empty() {
        None
    } else {
        Some(truncate_chars(stripped, PREVIEW_CHARS))
    }
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan stage output showing the discovered documents.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = vec!["Documents".to_string()];

    for (i, doc) in manifest.documents.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), doc.label));
        lines.push(format!("    Source: {}", doc.source_path));
        if let Some(preview) = preview_line(&doc.body) {
            lines.push(format!("    {}", preview));
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join(CONFIG_FILE).exists() {
        lines.push(format!("    {}", CONFIG_FILE));
    } else {
        lines.push("    (defaults)".to_string());
    }
    if manifest.config.counter.enabled {
        lines.push(format!("    counter: {}", manifest.config.counter.api_base));
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Format generate stage output: documents in on-page order, right to left.
pub fn format_generate_output(manifest: &Manifest, output_path: &Path) -> Vec<String> {
    let mut lines = vec!["Page (right to left)".to_string()];
    for (i, doc) in manifest.documents.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), doc.label));
    }
    lines.push(String::new());
    lines.push(format!("Static site generated: {}", output_path.display()));
    lines.push(format!("Processed {} markdown files", manifest.documents.len()));
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(manifest: &Manifest, output_path: &Path) {
    for line in format_generate_output(manifest, output_path) {
        println!("{}", line);
    }
}
