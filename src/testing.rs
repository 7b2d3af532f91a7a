//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical fixtures and host doubles for the controller.

#![doc(hidden)]

use std::time::Duration;

use crate::controller::{SearchSurface, Ticket, Timers};
use crate::index::SearchIndex;
use crate::render::RenderedResult;
use crate::types::NewDocument;

/// Create a simple test document with default fields.
///
/// This is the canonical implementation used across all tests.
pub fn make_doc(id: usize, title: &str) -> NewDocument {
    NewDocument::new(title, format!("Content for {}", title), format!("/doc/{}", id))
}

/// A document with explicit content.
pub fn make_doc_with_content(id: usize, title: &str, content: &str) -> NewDocument {
    NewDocument::new(title, content, format!("/doc/{}", id))
}

/// The "Getting Started" page used by the ranking scenarios.
pub fn getting_started() -> NewDocument {
    NewDocument::new(
        "Getting Started",
        "Install the tool and run build",
        "/start",
    )
}

/// A small documentation site.
pub fn sample_corpus() -> Vec<NewDocument> {
    vec![
        getting_started(),
        NewDocument::new(
            "Configuration",
            "Every option can be set in the config file or on the command line",
            "/config",
        )
        .with_headings(["Options", "Environment"]),
        NewDocument::new(
            "Building for Production",
            "The build command writes a minified bundle; builds are reproducible",
            "/build",
        ),
        NewDocument::new(
            "Rust & WebAssembly",
            "Compile the search engine to wasm and load it in the browser",
            "/wasm",
        ),
    ]
}

pub fn sample_index() -> SearchIndex {
    SearchIndex::from_documents(sample_corpus())
}

/// The sample corpus as the JSON the site generator publishes.
pub fn sample_corpus_json() -> String {
    let entries: Vec<serde_json::Value> = sample_corpus()
        .into_iter()
        .map(|doc| {
            serde_json::json!({
                "title": doc.title,
                "content": doc.content,
                "url": doc.url,
                "headings": doc.headings,
            })
        })
        .collect();
    serde_json::Value::Array(entries).to_string()
}

/// Everything a [`RecordingSurface`] was asked to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    ShowResults(Vec<RenderedResult>),
    ShowEmpty(String),
    ClearResults,
    SetActive(Option<usize>),
    Reveal(usize),
    SetOpen(bool),
    FocusInput,
    ClearInput,
    DisableInput(String),
    Navigate(String),
}

/// Surface that records calls instead of touching a page.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the calls recorded so far.
    pub fn drain(&mut self) -> Vec<SurfaceCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn navigations(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Navigate(url) => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The most recent result list shown, if any.
    pub fn last_results(&self) -> Option<&[RenderedResult]> {
        self.calls.iter().rev().find_map(|call| match call {
            SurfaceCall::ShowResults(results) => Some(results.as_slice()),
            _ => None,
        })
    }
}

impl SearchSurface for RecordingSurface {
    fn show_results(&mut self, results: &[RenderedResult]) {
        self.calls.push(SurfaceCall::ShowResults(results.to_vec()));
    }

    fn show_empty(&mut self, message_html: &str) {
        self.calls.push(SurfaceCall::ShowEmpty(message_html.to_string()));
    }

    fn clear_results(&mut self) {
        self.calls.push(SurfaceCall::ClearResults);
    }

    fn set_active(&mut self, index: Option<usize>) {
        self.calls.push(SurfaceCall::SetActive(index));
    }

    fn reveal(&mut self, index: usize) {
        self.calls.push(SurfaceCall::Reveal(index));
    }

    fn set_open(&mut self, open: bool) {
        self.calls.push(SurfaceCall::SetOpen(open));
    }

    fn focus_input(&mut self) {
        self.calls.push(SurfaceCall::FocusInput);
    }

    fn clear_input(&mut self) {
        self.calls.push(SurfaceCall::ClearInput);
    }

    fn disable_input(&mut self, placeholder: &str) {
        self.calls
            .push(SurfaceCall::DisableInput(placeholder.to_string()));
    }

    fn navigate(&mut self, url: &str) {
        self.calls.push(SurfaceCall::Navigate(url.to_string()));
    }
}

/// Timers that only fire when the test says so.
#[derive(Debug, Default)]
pub struct ManualTimers {
    next_handle: usize,
    /// Scheduled and not cancelled: (handle, delay, ticket).
    pub pending: Vec<(usize, Duration, Ticket)>,
    pub cancelled: usize,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tickets of every live timer, oldest first.
    pub fn tickets(&self) -> Vec<Ticket> {
        self.pending.iter().map(|(_, _, ticket)| *ticket).collect()
    }

    /// Remove and return the newest live timer's ticket.
    pub fn pop_latest(&mut self) -> Option<Ticket> {
        self.pending.pop().map(|(_, _, ticket)| ticket)
    }
}

impl Timers for ManualTimers {
    type Handle = usize;

    fn schedule(&mut self, delay: Duration, ticket: Ticket) -> usize {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.pending.push((handle, delay, ticket));
        handle
    }

    fn cancel(&mut self, handle: usize) {
        self.cancelled += 1;
        self.pending.retain(|(h, _, _)| *h != handle);
    }
}
