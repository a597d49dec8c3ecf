//! # Nikki
//!
//! Turns a folder of markdown notes into one self-contained HTML page that
//! reads like a Japanese book: each document is a column block set in
//! vertical writing (`writing-mode: vertical-rl`), the blocks run right to
//! left, and the page scrolls horizontally with paging dots underneath.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      docs/     →  manifest.json   (filesystem → structured data)
//! 2. Generate  manifest  →  index.html      (markup transform + page template)
//! ```
//!
//! The manifest is human-readable JSON, so a scan can be inspected (or
//! edited) before the page is rendered.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`markup`] | The text transformer: markdown-ish text → HTML fragments |
//! | [`scan`] | Stage 1: finds the documents, loads config, produces the manifest |
//! | [`generate`] | Stage 2: renders the page with Maud |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | Shared types serialized between stages (`Document`) |
//! | [`naming`] | `NNN-name` filename convention parser |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## A Transformer, Not a Parser
//!
//! [`markup`] is a fixed sequence of regex substitutions plus one paragraph
//! pass. It does not try to be CommonMark: headings of every level render
//! the same, lists don't nest, and emphasis nesting follows substitution
//! order. The rules are small enough to hold in your head, and their output
//! is predictable for the short diary entries this tool is for.
//!
//! ## One File Out
//!
//! CSS and JavaScript are embedded into the page. The result can be opened
//! from disk or dropped on any static host.
//!
//! ## Engagement Widgets Are Client-Side
//!
//! The visit counter and like button talk to a hosted counting API straight
//! from the browser. The Rust side only renders the widget and its settings;
//! it never calls the service.

pub mod config;
pub mod generate;
pub mod markup;
pub mod naming;
pub mod output;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
