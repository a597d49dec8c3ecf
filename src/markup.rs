//! Markdown-ish text → embeddable HTML fragments.
//!
//! This is not a markdown parser. It is an ordered pipeline of regex
//! substitutions over the whole document, followed by one line-by-line pass
//! that groups loose lines into paragraphs. The output is final markup,
//! ready to be dropped verbatim into a page.
//!
//! ## Pass Order
//!
//! ```text
//! 1. headings        ^#{1,3} x      → <h3>x</h3>   (all levels collapse to h3)
//! 2. emphasis        **x** __x__    → <strong>x</strong>
//!                    *x* _x_        → <em>x</em>
//! 3. code blocks     ```lang\n…\n``` → <pre><code>…</code></pre>
//! 4. inline code     `x`            → <code>x</code>
//! 5. block quotes    ^> x           → <blockquote>x</blockquote>
//! 6. list items      ^- x  ^1. x    → <li>x</li>
//! 7. list wrapping   <li>…</li> run → <ul>\n…</ul>\n
//! 8. paragraphs      loose lines    → <p>…</p>
//! ```
//!
//! The order is observable and must not change: bold runs before italic
//! because `*x*` also matches inside `**x**`, and code blocks run before
//! inline code so fence backticks are never read as inline spans. Passes 4–7
//! only see text outside the `<pre>` fragments produced by pass 3, so a code
//! block reaches the page exactly as written (emphasis from pass 2 excepted).
//!
//! Every heading level renders as the same `<h3>`. The document label on the
//! page is the `<h2>`, and headings inside a document sit below it.
//!
//! The transformer never fails. Unclosed fences and stray markers simply
//! don't match and fall through to paragraph handling.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

static RE_HEADING_3: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^### (.+)$").unwrap());
static RE_HEADING_2: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^## (.+)$").unwrap());
static RE_HEADING_1: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^# (.+)$").unwrap());

static RE_BOLD_STARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static RE_BOLD_UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"__(.+?)__").unwrap());
static RE_ITALIC_STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.+?)\*").unwrap());
static RE_ITALIC_UNDERSCORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"_(.+?)_").unwrap());

static RE_CODE_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```\w*\n(.*?)\n```").unwrap());
static RE_INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`(.+?)`").unwrap());

static RE_BLOCKQUOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^> (.+)$").unwrap());

static RE_BULLET_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^- (.+)$").unwrap());
static RE_NUMBERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[0-9]+\. (.+)$").unwrap());
static RE_LIST_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)(?:<li>.*?</li>\n?)+").unwrap());

const PRE_OPEN: &str = "<pre>";
const PRE_CLOSE: &str = "</pre>";
const LIST_OPEN: &str = "<ul>";
const LIST_CLOSE: &str = "</ul>";

/// Convert one document to HTML.
///
/// Returns the block fragments joined with `\n`. Empty input gives an empty
/// string.
pub fn transform(text: &str) -> String {
    let html = substitute_headings(text);
    let html = substitute_emphasis(&html);

    let html: String = split_code_blocks(&html)
        .into_iter()
        .map(|segment| match segment {
            Segment::Text(text) => {
                let text = substitute_inline_code(&text);
                let text = substitute_blockquotes(&text);
                let text = substitute_list_items(&text);
                wrap_lists(&text)
            }
            Segment::Preformatted(pre) => pre,
        })
        .collect();

    let fragments = assemble_paragraphs(&html);
    debug!(
        input_bytes = text.len(),
        fragments = fragments.len(),
        "transformed document"
    );
    fragments.join("\n")
}

// ── Passes 1–2: headings and emphasis ────────────────────────────────────────

/// Replace `#`, `##` and `###` heading lines with `<h3>` fragments.
pub fn substitute_headings(text: &str) -> String {
    let html = RE_HEADING_3.replace_all(text, "<h3>${1}</h3>");
    let html = RE_HEADING_2.replace_all(&html, "<h3>${1}</h3>");
    RE_HEADING_1.replace_all(&html, "<h3>${1}</h3>").into_owned()
}

/// Replace bold spans, then italic spans.
pub fn substitute_emphasis(text: &str) -> String {
    let html = RE_BOLD_STARS.replace_all(text, "<strong>${1}</strong>");
    let html = RE_BOLD_UNDERSCORES.replace_all(&html, "<strong>${1}</strong>");
    let html = RE_ITALIC_STAR.replace_all(&html, "<em>${1}</em>");
    RE_ITALIC_UNDERSCORE
        .replace_all(&html, "<em>${1}</em>")
        .into_owned()
}

// ── Pass 3: fenced code blocks ───────────────────────────────────────────────

/// A slice of the document after code-block substitution.
#[derive(Debug, Clone, PartialEq)]
enum Segment {
    /// Ordinary text, still subject to the remaining passes.
    Text(String),
    /// A finished `<pre><code>` fragment.
    Preformatted(String),
}

/// Cut the text at every fenced code block, rendering each block as a
/// `<pre><code>` fragment. The language tag after the opening fence is dropped.
fn split_code_blocks(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;
    for caps in RE_CODE_BLOCK.captures_iter(text) {
        let (Some(whole), Some(body)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        segments.push(Segment::Text(text[last..whole.start()].to_string()));
        segments.push(Segment::Preformatted(format!("<pre><code>{}</code></pre>", body.as_str())));
        last = whole.end();
    }
    segments.push(Segment::Text(text[last..].to_string()));
    segments
}

// ── Passes 4–7: inline code, quotes, lists ───────────────────────────────────

fn substitute_inline_code(text: &str) -> String {
    RE_INLINE_CODE
        .replace_all(text, "<code>${1}</code>")
        .into_owned()
}

fn substitute_blockquotes(text: &str) -> String {
    RE_BLOCKQUOTE
        .replace_all(text, "<blockquote>${1}</blockquote>")
        .into_owned()
}

/// Bullet and numbered items both become plain `<li>`; numbering is not kept.
fn substitute_list_items(text: &str) -> String {
    let html = RE_BULLET_ITEM.replace_all(text, "<li>${1}</li>");
    RE_NUMBERED_ITEM
        .replace_all(&html, "<li>${1}</li>")
        .into_owned()
}

/// Wrap each contiguous run of `<li>` fragments in a `<ul>`.
///
/// Items separated by a blank line are two runs and get two lists.
fn wrap_lists(text: &str) -> String {
    RE_LIST_RUN
        .replace_all(text, |caps: &Captures| {
            format!("{LIST_OPEN}\n{}{LIST_CLOSE}\n", &caps[0])
        })
        .into_owned()
}

// ── Pass 8: paragraph assembly ───────────────────────────────────────────────

/// Region tracking for the paragraph pass.
///
/// A region runs from the line holding the opening marker through the line
/// holding the closing marker, both inclusive.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct LineState {
    in_pre: bool,
    in_list: bool,
}

impl LineState {
    /// Step over `line`. Returns true when the line lies in a `<pre>` or
    /// `<ul>` region.
    fn advance(&mut self, line: &str) -> bool {
        let pre = self.in_pre || line.contains(PRE_OPEN);
        let list = self.in_list || line.contains(LIST_OPEN);

        self.in_pre = pre && !line.contains(PRE_CLOSE);
        self.in_list = list && !line.contains(LIST_CLOSE);

        pre || list
    }
}

/// Accumulates loose lines until a boundary flushes them as one `<p>`.
#[derive(Debug, Default)]
struct ParagraphBuffer<'a> {
    lines: Vec<&'a str>,
}

impl<'a> ParagraphBuffer<'a> {
    fn push(&mut self, line: &'a str) {
        self.lines.push(line);
    }

    /// Emit the pending paragraph, if any. Lines are concatenated without a
    /// separator; vertical CJK text has no inter-word spaces to restore.
    fn flush_into(&mut self, fragments: &mut Vec<String>) {
        if self.lines.is_empty() {
            return;
        }
        fragments.push(format!("<p>{}</p>", self.lines.concat()));
        self.lines.clear();
    }
}

/// Group loose lines into paragraphs and pass markup lines through.
fn assemble_paragraphs(html: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut paragraph = ParagraphBuffer::default();
    let mut state = LineState::default();

    for line in html.split('\n') {
        let in_region = state.advance(line);

        if in_region || (!line.trim().is_empty() && line.starts_with('<')) {
            paragraph.flush_into(&mut fragments);
            fragments.push(line.to_string());
        } else if line.trim().is_empty() {
            paragraph.flush_into(&mut fragments);
        } else {
            paragraph.push(line);
        }
    }
    paragraph.flush_into(&mut fragments);

    fragments
}
