//! HTML page generation.
//!
//! Stage 2 of the build pipeline. Reads the scan manifest, runs every
//! document through [`markup::transform`], and writes one self-contained
//! HTML file.
//!
//! ## Page Layout
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  ← scroll                                                  │
//! │  ┌──────┐      ┌──────┐      ┌──────┐                      │
//! │  │ 003  │      │ 002  │      │ 001  │   one .content per   │
//! │  │ 縦書 │ gap  │ 縦書 │ gap  │ 縦書 │   document, written  │
//! │  │  き  │      │  き  │      │  き  │   vertical-rl        │
//! │  └──────┘      └──────┘      └──────┘                      │
//! │                     ● ● ○                                  │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Documents are emitted in **reverse** manifest order so the first document
//! is the rightmost block, where a right-to-left reader starts. The page
//! opens scrolled to the right. Progress dots stay in manifest order: dot 0
//! is the first document.
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: layout and typography (colors injected from config)
//! - `static/scroll.js`: initial scroll, active dot tracking, dot clicks
//! - `static/counter.js`: visit counter and like button (only when
//!   `counter.enabled`)
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/). Labels and config strings are
//! escaped by maud; transformer output is embedded raw with `PreEscaped`.

use crate::config::{self, CounterConfig};
use crate::markup;
use crate::scan::Manifest;
use crate::types::Document;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const SCROLL_JS: &str = include_str!("../static/scroll.js");
const COUNTER_JS: &str = include_str!("../static/counter.js");

/// Fallback when the manifest was written by hand with a bad gap; scan
/// validation rejects those before they get here.
const DEFAULT_GAP_PX: u32 = 60;

/// Read a manifest written by the scan stage.
pub fn load_manifest(manifest_path: &Path) -> Result<Manifest, GenerateError> {
    let content = fs::read_to_string(manifest_path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Render the page for the manifest at `manifest_path` into `output_path`.
pub fn generate(manifest_path: &Path, output_path: &Path) -> Result<(), GenerateError> {
    let manifest = load_manifest(manifest_path)?;
    write_page(&manifest, output_path)
}

/// Render `manifest` and write it to `output_path`, creating parent
/// directories as needed.
pub fn write_page(manifest: &Manifest, output_path: &Path) -> Result<(), GenerateError> {
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let page = render_page(manifest);
    fs::write(output_path, page.into_string())?;
    info!(
        documents = manifest.documents.len(),
        "wrote {}",
        output_path.display()
    );
    Ok(())
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, lang: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders one document block: label plus transformed body.
fn render_document(document: &Document) -> Markup {
    html! {
        div.content {
            h2 { (document.label) }
            (PreEscaped(markup::transform(&document.body)))
        }
    }
}

/// Renders one paging dot per document, in reading order.
fn render_progress_dots(count: usize) -> Markup {
    html! {
        div.progress-dots {
            @for index in 0..count {
                div.dot data-index=(index) {}
            }
        }
    }
}

/// Renders the visit counter and like button, with their settings as a
/// JSON island for `counter.js`.
fn render_counter(counter: &CounterConfig) -> Markup {
    let labels = &counter.labels;
    let settings = serde_json::json!({
        "apiBase": counter.api_base.trim_end_matches('/'),
        "accessKey": counter.access_key,
        "likeKey": counter.like_key,
        "labels": {
            "likes": labels.likes,
            "currentLikes": labels.current_likes,
            "thanks": labels.thanks,
            "kiriban": labels.kiriban,
            "zorome": labels.zorome,
            "error": labels.error,
        },
    });
    // `<` can't appear raw inside a script element.
    let settings = settings.to_string().replace('<', "\\u003c");

    html! {
        div.engagement {
            div.access-counter {
                span.access-label { (labels.visits) }
                span.access-count id="access-count" { "-" }
                span.kiriban id="access-kiriban" style="display: none" {}
            }
            div.like {
                button.like-button id="like-button" type="button" { (labels.like_button) }
                div.like-message id="like-message" {}
            }
        }
        script type="application/json" id="nikki-counter-config" { (PreEscaped(settings)) }
        script { (PreEscaped(COUNTER_JS)) }
    }
}

// ============================================================================
// Page Renderer
// ============================================================================

/// Renders the whole page.
pub fn render_page(manifest: &Manifest) -> Markup {
    let config = &manifest.config;
    let css = format!("{}\n\n{}", config::generate_theme_css(config), CSS_STATIC);
    let gap = config.layout.gap_px().unwrap_or(DEFAULT_GAP_PX);

    let content = html! {
        div.container data-gap=(gap) {
            @for document in manifest.documents.iter().rev() {
                (render_document(document))
            }
        }
        (render_progress_dots(manifest.documents.len()))
        @if config.counter.enabled {
            (render_counter(&config.counter))
        }
        script { (PreEscaped(SCROLL_JS)) }
    };

    base_document(&config.site.title, &config.site.lang, &css, content)
}

// ============================================================================
// Tests
// ============================================================================
