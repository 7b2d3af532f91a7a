// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Zero-round-trip search for static documentation sites.
//!
//! The site generator publishes every page as a JSON corpus. This crate loads
//! that corpus once, builds an inverted index in memory, and answers each
//! keystroke locally: tokens that match a term exactly score 10, tokens that
//! are a strict prefix of a term score 5, and scores add up across tokens.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ tokenize.rs  │────▶│   index.rs   │────▶│  search.rs   │
//! │ (Tokenizer)  │     │(IndexBuilder,│     │ (search,     │
//! │              │     │ SearchIndex) │     │  scoring.rs) │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!        ▲                    ▲                    │
//!        │             ┌──────────────┐            ▼
//!        │             │  loader.rs   │     ┌──────────────┐
//!        │             │ (IndexLoader,│     │  render.rs   │
//!        │             │ CorpusSource)│     │ (highlight,  │
//!        │             └──────────────┘     │  excerpt)    │
//!        │                    ▲             └──────────────┘
//!        │                    │                    │
//! ┌──────┴────────────────────┴────────────────────▼──────┐
//! │                     controller/                       │
//! │  (Phase, transition table, Debouncer, Selection,      │
//! │   SearchSurface + Timers host traits)                 │
//! └───────────────────────────────────────────────────────┘
//!                  ▲                         ▲
//!            wasm.rs (DOM)            main.rs (CLI)
//! ```
//!
//! # Usage
//!
//! ```
//! use sifter::{search, NewDocument, SearchIndex};
//!
//! let index = SearchIndex::from_documents(vec![NewDocument::new(
//!     "Getting Started",
//!     "Install the tool and run build",
//!     "/start",
//! )]);
//!
//! let hits = search(&index, "buil", 10);
//! assert_eq!(hits[0].url, "/start");
//! ```

// Module declarations
pub mod config;
pub mod controller;
mod error;
mod index;
pub mod loader;
pub mod render;
mod scoring;
mod search;
pub mod testing;
mod tokenize;
mod types;

#[cfg(feature = "wasm")]
mod wasm;

// Re-exports for public API
pub use config::{KeyChord, KeyPress, SearchConfig, Variant};
pub use controller::{Controller, Event, Phase, SearchSurface, Timers};
pub use error::{BindError, ConfigError, LoadError};
pub use index::{IndexBuilder, IndexStats, InvertedIndex, SearchIndex};
pub use loader::{parse_corpus, CorpusSource, IndexLoader, LoadOutcome, LoadedCorpus, MemorySource};
pub use render::{render_excerpt, render_title, RenderedResult, Renderer};
pub use scoring::{ScoreMap, EXACT_MATCH_SCORE, PREFIX_MATCH_SCORE};
pub use search::{search, search_scored, DEFAULT_LIMIT};
pub use tokenize::{tokenize, Tokenizer, MIN_TOKEN_LEN};
pub use types::{DocId, Document, NewDocument, ScoredHit};

#[cfg(feature = "native")]
pub use loader::FileSource;
