//! Markdown → HTML fragment via pulldown-cmark.
//!
//! This stage defines no grammar of its own: headings, lists, emphasis, code
//! spans and tables all follow the dialect's standard rules. The enabled
//! extensions match what documentation written for GitHub renders with
//! (tables, strikethrough, footnotes, task lists).

use pulldown_cmark::{html, Options, Parser};
use tracing::debug;

/// Convert raw Markdown text to an HTML fragment.
///
/// Empty input produces an empty fragment, not an error.
pub fn to_fragment(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut fragment = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut fragment, parser);

    debug!(
        "Transformed {} bytes of markdown into {} bytes of HTML",
        markdown.len(),
        fragment.len()
    );
    fragment
}
