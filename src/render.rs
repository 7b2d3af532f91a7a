// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Highlighted titles and excerpts.
//!
//! Output is HTML: document text is escaped first, then every case-insensitive
//! occurrence of a query token is wrapped in `<mark>`. Tokens are applied one
//! after another, and each pass runs over the markup produced by the previous
//! one. For the query `"rust mark"`, the `mark` pass also matches inside the
//! `<mark>` tags inserted by the `rust` pass, and entity text such as `amp` in
//! `&amp;` is matchable. This mirrors the browser-side highlighter exactly.
//!
//! # Excerpt window
//!
//! ```text
//! content:  ........................xxxxMATCHxxxx.............................
//!                               |<-50->|
//!                               start                     start + max_length
//! output:   "..." + content[start..end] + "..."
//! ```
//!
//! Offsets are in characters, so multi-byte text never splits a code point.
//! The visible text (without markup and ellipses) is at most `max_length`
//! characters.

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::types::Document;

/// Excerpt length when the caller has no preference.
pub const DEFAULT_EXCERPT_LENGTH: usize = 150;

/// Characters of context kept before the first match.
pub const DEFAULT_EXCERPT_CONTEXT: usize = 50;

/// Decoration for a truncated excerpt edge.
pub const ELLIPSIS: &str = "...";

pub const MARK_OPEN: &str = "<mark>";
pub const MARK_CLOSE: &str = "</mark>";

/// One result ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedResult {
    pub title_html: String,
    pub excerpt_html: String,
    pub url: String,
}

/// Escape text for safe inclusion in HTML element content or attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn token_pattern(token: &str) -> Option<Regex> {
    RegexBuilder::new(&regex::escape(token))
        .case_insensitive(true)
        .build()
        .ok()
}

/// Wrap every case-insensitive occurrence of each query token in `<mark>`.
///
/// `markup` is treated as already safe; nothing is escaped here. Tokens are
/// the whitespace-separated, non-empty pieces of `query`, applied in order.
pub fn highlight(markup: &str, query: &str) -> String {
    let replacement = format!("{}$0{}", MARK_OPEN, MARK_CLOSE);
    query
        .split_whitespace()
        .filter_map(token_pattern)
        .fold(markup.to_string(), |out, pattern| {
            pattern.replace_all(&out, replacement.as_str()).into_owned()
        })
}

/// Escaped, highlighted title.
pub fn render_title(title: &str, query: &str) -> String {
    highlight(&escape_html(title), query)
}

/// Escaped, highlighted excerpt of `content` around the first match.
pub fn render_excerpt(content: &str, query: &str, max_length: usize) -> String {
    excerpt_with_context(content, query, max_length, DEFAULT_EXCERPT_CONTEXT)
}

/// Query words used to position the excerpt: lowercased, whitespace-split,
/// longer than one character. No symbol stripping.
fn excerpt_words(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|word| word.chars().count() > 1)
        .map(str::to_owned)
        .collect()
}

/// Char offset in `content` of the earliest occurrence of any word in the
/// lowercased content.
fn first_match(content: &str, words: &[String]) -> Option<usize> {
    if words.is_empty() {
        return None;
    }

    // Lowercasing can expand a char into several; remember where each
    // lowered char came from.
    let mut lowered = String::with_capacity(content.len());
    let mut origin: Vec<usize> = Vec::with_capacity(content.len());
    for (char_idx, c) in content.chars().enumerate() {
        for lower in c.to_lowercase() {
            lowered.push(lower);
            origin.push(char_idx);
        }
    }

    let byte_pos = words.iter().filter_map(|word| lowered.find(word.as_str())).min()?;
    let lowered_idx = lowered[..byte_pos].chars().count();
    origin.get(lowered_idx).copied()
}

/// Byte offset of the `char_idx`-th char (or `text.len()` past the end).
fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(offset, _)| offset)
}

fn excerpt_with_context(content: &str, query: &str, max_length: usize, context: usize) -> String {
    let total = content.chars().count();
    let start = match first_match(content, &excerpt_words(query)) {
        Some(pos) => pos.saturating_sub(context),
        None => 0,
    };
    let end = total.min(start.saturating_add(max_length));

    let slice = &content[byte_offset(content, start)..byte_offset(content, end)];

    let mut excerpt = String::with_capacity(slice.len() + 2 * ELLIPSIS.len());
    if start > 0 {
        excerpt.push_str(ELLIPSIS);
    }
    excerpt.push_str(slice);
    if end < total {
        excerpt.push_str(ELLIPSIS);
    }

    render_title(&excerpt, query)
}

/// Renders documents for display with a fixed excerpt policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    max_length: usize,
    context: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_EXCERPT_LENGTH,
            context: DEFAULT_EXCERPT_CONTEXT,
        }
    }
}

impl Renderer {
    pub fn new(max_length: usize, context: usize) -> Self {
        Self {
            max_length,
            context,
        }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn title(&self, title: &str, query: &str) -> String {
        render_title(title, query)
    }

    pub fn excerpt(&self, content: &str, query: &str) -> String {
        excerpt_with_context(content, query, self.max_length, self.context)
    }

    pub fn render(&self, doc: &Document, query: &str) -> RenderedResult {
        RenderedResult {
            title_html: self.title(&doc.title, query),
            excerpt_html: self.excerpt(&doc.content, query),
            url: doc.url.clone(),
        }
    }

    /// The no-results message. `{query}` in `template` is replaced by the
    /// escaped query; the template itself is escaped too.
    pub fn empty_state(&self, template: &str, query: &str) -> String {
        escape_html(template).replace("{query}", &escape_html(query))
    }
}
