// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Corpus loading.
//!
//! The corpus is a JSON array of `{title, content, url, headings?}` objects
//! published by the site generator. Where exactly it ends up depends on how
//! the site is served, so the loader walks an ordered list of candidate
//! locations:
//!
//! ```text
//! candidate 1 ──fetch──▶ ok + array? ──yes──▶ build index, stop
//!                              │ no
//! candidate 2 ──fetch──▶ ok + array? ──yes──▶ build index, stop
//!                              │ no
//!     ...                      ▼
//!                         Unavailable(failures)
//! ```
//!
//! Candidates are tried one at a time, never in parallel. Nothing here
//! returns `Err`: the worst case is [`LoadOutcome::Unavailable`] plus a
//! warning in the log.
//!
//! Entries that are not well-formed documents are skipped (and counted)
//! rather than failing the whole corpus.

use std::collections::HashMap;

use crate::error::LoadError;
use crate::index::{IndexBuilder, SearchIndex};
use crate::tokenize::Tokenizer;
use crate::types::NewDocument;

/// Result of a load attempt.
#[derive(Debug)]
pub enum LoadOutcome {
    /// A candidate was fetched and parsed.
    Ready(SearchIndex),
    /// Every candidate failed; one error per candidate, in order.
    Unavailable(Vec<LoadError>),
}

impl LoadOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadOutcome::Ready(_))
    }

    pub fn index(&self) -> Option<&SearchIndex> {
        match self {
            LoadOutcome::Ready(index) => Some(index),
            LoadOutcome::Unavailable(_) => None,
        }
    }
}

/// A corpus that loaded, with where it came from.
#[derive(Debug)]
pub struct LoadedCorpus {
    pub location: String,
    /// The payload as fetched.
    pub bytes: Vec<u8>,
    pub index: SearchIndex,
}

/// Somewhere corpus bytes can be fetched from.
///
/// Futures need not be `Send`: in the browser everything runs on one thread.
#[allow(async_fn_in_trait)]
pub trait CorpusSource {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, LoadError>;
}

/// Parse corpus bytes into a fresh index.
///
/// Fails only when the payload is not JSON or not an array. Malformed entries
/// are skipped with a warning.
pub fn parse_corpus(
    bytes: &[u8],
    location: &str,
    tokenizer: Tokenizer,
) -> Result<SearchIndex, LoadError> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|source| LoadError::Parse {
            location: location.to_string(),
            source,
        })?;

    let serde_json::Value::Array(entries) = value else {
        return Err(LoadError::NotAnArray {
            location: location.to_string(),
        });
    };

    let mut builder = IndexBuilder::with_tokenizer(tokenizer);
    for (position, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<NewDocument>(entry) {
            Ok(doc) => {
                builder.add_document(doc);
            }
            Err(e) => {
                tracing::warn!(
                    target: "sifter::loader",
                    location,
                    position,
                    error = %e,
                    "Skipping malformed corpus entry"
                );
                builder.note_skipped();
            }
        }
    }

    Ok(builder.build())
}

/// Fetches the corpus from the first working candidate.
#[derive(Debug)]
pub struct IndexLoader<S> {
    source: S,
    candidates: Vec<String>,
    tokenizer: Tokenizer,
}

impl<S: CorpusSource> IndexLoader<S> {
    pub fn new<I, L>(source: S, candidates: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            source,
            candidates: candidates.into_iter().map(Into::into).collect(),
            tokenizer: Tokenizer::default(),
        }
    }

    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Try each candidate in order; stop at the first usable one.
    pub async fn load(&self) -> LoadOutcome {
        match self.load_corpus().await {
            Ok(corpus) => LoadOutcome::Ready(corpus.index),
            Err(failures) => LoadOutcome::Unavailable(failures),
        }
    }

    /// Like [`load`](Self::load), but keeps the winning location and its raw
    /// bytes. On failure, one error per candidate in order.
    pub async fn load_corpus(&self) -> Result<LoadedCorpus, Vec<LoadError>> {
        let mut failures = Vec::new();

        for location in &self.candidates {
            let attempt = match self.source.fetch(location).await {
                Ok(bytes) => parse_corpus(&bytes, location, self.tokenizer).map(|index| (bytes, index)),
                Err(e) => Err(e),
            };

            match attempt {
                Ok((bytes, index)) => {
                    let stats = index.stats();
                    tracing::info!(
                        target: "sifter::loader",
                        location = location.as_str(),
                        documents = stats.documents,
                        terms = stats.terms,
                        skipped = stats.skipped,
                        "Search index ready"
                    );
                    return Ok(LoadedCorpus {
                        location: location.clone(),
                        bytes,
                        index,
                    });
                }
                Err(e) => {
                    tracing::debug!(
                        target: "sifter::loader",
                        location = location.as_str(),
                        error = %e,
                        "Corpus candidate failed"
                    );
                    failures.push(e);
                }
            }
        }

        tracing::warn!(
            target: "sifter::loader",
            attempts = failures.len(),
            "Search index unavailable: every corpus location failed"
        );
        Err(failures)
    }
}

/// In-memory corpus source. Locations not registered fail like a missing file.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    entries: HashMap<String, Result<Vec<u8>, u16>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` at `location`.
    pub fn with_body(mut self, location: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.entries.insert(location.into(), Ok(body.into()));
        self
    }

    /// Answer `location` with an HTTP error status.
    pub fn with_status(mut self, location: impl Into<String>, status: u16) -> Self {
        self.entries.insert(location.into(), Err(status));
        self
    }
}

impl CorpusSource for MemorySource {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, LoadError> {
        match self.entries.get(location) {
            Some(Ok(bytes)) => Ok(bytes.clone()),
            Some(Err(status)) => Err(LoadError::Status {
                location: location.to_string(),
                status: *status,
            }),
            None => Err(LoadError::Fetch {
                location: location.to_string(),
                reason: "not found".to_string(),
            }),
        }
    }
}

/// Reads candidates as paths below a site root, the way a static server
/// would resolve them. Leading `/` and `./` are relative to the root.
#[cfg(feature = "native")]
#[derive(Debug, Clone)]
pub struct FileSource {
    root: std::path::PathBuf,
}

#[cfg(feature = "native")]
impl FileSource {
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, location: &str) -> std::path::PathBuf {
        let relative = location
            .strip_prefix("./")
            .or_else(|| location.strip_prefix('/'))
            .unwrap_or(location);
        self.root.join(relative)
    }
}

#[cfg(feature = "native")]
impl CorpusSource for FileSource {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, LoadError> {
        let path = self.resolve(location);
        tokio::fs::read(&path).await.map_err(|e| LoadError::Fetch {
            location: location.to_string(),
            reason: format!("{}: {}", path.display(), e),
        })
    }
}
