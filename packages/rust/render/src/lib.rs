//! Markdown-to-HTML conversion and page assembly.
//!
//! Conversion uses `pulldown-cmark` with tables, strikethrough, and
//! footnotes enabled. Documents are re-read and re-converted on every
//! request; nothing is cached.

pub mod pages;

use pulldown_cmark::{Options, Parser, html};
use tracing::debug;

/// Convert markdown source to an HTML fragment.
pub fn render_markdown(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(source, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);

    debug!(source_len = source.len(), html_len = out.len(), "markdown converted");
    out
}
