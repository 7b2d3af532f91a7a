// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search configuration.
//!
//! Every field has a default, so an empty JSON object (or a JS `{}`) is a
//! complete configuration:
//!
//! ```json
//! {
//!   "limit": 10,
//!   "excerptLength": 150,
//!   "excerptContext": 50,
//!   "minTokenLength": 2,
//!   "debounceMs": 150,
//!   "corpusPaths": ["/search-index.json", "./search-index.json", "../search-index.json"],
//!   "variant": "overlay",
//!   "shortcuts": ["mod+k", "/"],
//!   "elements": { "input": "search-input", "results": "search-results", ... },
//!   "emptyMessage": "No results found for \"{query}\"",
//!   "unavailablePlaceholder": "Search unavailable"
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigError;
use crate::render::{Renderer, DEFAULT_EXCERPT_CONTEXT, DEFAULT_EXCERPT_LENGTH};
use crate::search::DEFAULT_LIMIT;
use crate::tokenize::{Tokenizer, MIN_TOKEN_LEN};

/// Input debounce when the caller has no preference.
pub const DEFAULT_DEBOUNCE_MS: u32 = 150;

/// Where the site generator puts the corpus, tried in order.
pub const DEFAULT_CORPUS_PATHS: &[&str] = &[
    "/search-index.json",
    "./search-index.json",
    "../search-index.json",
];

/// How the search UI is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Full-screen panel opened by a trigger or shortcut, dismissed by backdrop.
    #[default]
    Overlay,
    /// Dropdown under a persistent search field.
    Inline,
}

/// Ids of the page elements the browser binding attaches to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementIds {
    /// Text entry (required).
    pub input: String,
    /// Results region (required).
    pub results: String,
    pub trigger: String,
    pub backdrop: String,
    pub modal: String,
    pub close: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            input: "search-input".to_string(),
            results: "search-results".to_string(),
            trigger: "search-trigger".to_string(),
            backdrop: "search-backdrop".to_string(),
            modal: "search-modal".to_string(),
            close: "search-close".to_string(),
        }
    }
}

/// Configuration for loading, searching and the interaction controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    /// Maximum number of results (default: 10)
    pub limit: usize,
    /// Maximum visible excerpt characters (default: 150)
    pub excerpt_length: usize,
    /// Characters kept before the first match (default: 50)
    pub excerpt_context: usize,
    /// Shortest token kept by the tokenizer (default: 2)
    pub min_token_length: usize,
    /// Delay between the last keystroke and evaluation (default: 150)
    pub debounce_ms: u32,
    /// Corpus locations, tried in order
    pub corpus_paths: Vec<String>,
    pub variant: Variant,
    /// Global open shortcuts, e.g. `"mod+k"` or `"/"`
    pub shortcuts: Vec<String>,
    pub elements: ElementIds,
    /// No-results message; `{query}` is replaced by the escaped query
    pub empty_message: String,
    /// Input placeholder once search is known to be unavailable
    pub unavailable_placeholder: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            excerpt_length: DEFAULT_EXCERPT_LENGTH,
            excerpt_context: DEFAULT_EXCERPT_CONTEXT,
            min_token_length: MIN_TOKEN_LEN,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            corpus_paths: DEFAULT_CORPUS_PATHS.iter().map(|p| p.to_string()).collect(),
            variant: Variant::default(),
            shortcuts: vec!["mod+k".to_string(), "/".to_string()],
            elements: ElementIds::default(),
            empty_message: "No results found for \"{query}\"".to_string(),
            unavailable_placeholder: "Search unavailable".to_string(),
        }
    }
}

impl SearchConfig {
    /// Parse a JSON configuration. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check the configuration and parse its shortcuts.
    pub fn validate(&self) -> Result<Vec<KeyChord>, ConfigError> {
        if self.limit == 0 {
            return Err(ConfigError::ZeroLimit);
        }
        if self.excerpt_length == 0 {
            return Err(ConfigError::ZeroExcerptLength);
        }
        if self.min_token_length == 0 {
            return Err(ConfigError::ZeroTokenLength);
        }
        if self.corpus_paths.is_empty() {
            return Err(ConfigError::NoCorpusPaths);
        }
        self.shortcuts.iter().map(|s| KeyChord::parse(s)).collect()
    }

    pub fn tokenizer(&self) -> Tokenizer {
        Tokenizer::new(self.min_token_length)
    }

    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.excerpt_length, self.excerpt_context)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(u64::from(self.debounce_ms))
    }
}

/// A key press as seen by the page-level listener.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyPress {
    /// `KeyboardEvent.key`
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    /// Focus is inside an `<input>` or `<textarea>`.
    pub in_text_input: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn in_text_input(mut self) -> Self {
        self.in_text_input = true;
        self
    }
}

/// A global shortcut: a key, optionally with Ctrl/Cmd held.
///
/// `mod` (or `ctrl`, `cmd`, `meta`) accepts either Ctrl or Cmd so the same
/// chord works across platforms. Keys compare case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyChord {
    key: String,
    modifier: bool,
}

impl KeyChord {
    pub fn parse(chord: &str) -> Result<Self, ConfigError> {
        let invalid = |reason| ConfigError::InvalidShortcut {
            chord: chord.to_string(),
            reason,
        };

        let trimmed = chord.trim();
        if trimmed.is_empty() {
            return Err(invalid("empty chord"));
        }
        // "+" on its own (or "mod++") names the plus key.
        let (prefix, key) = match trimmed.rsplit_once('+') {
            Some((prefix, "")) => (prefix.strip_suffix('+').unwrap_or(prefix), "+"),
            Some((prefix, key)) => (prefix, key),
            None => ("", trimmed),
        };

        let modifier = match prefix.to_ascii_lowercase().as_str() {
            "" => false,
            "mod" | "ctrl" | "cmd" | "meta" => true,
            _ => return Err(invalid("unknown modifier")),
        };
        if key.chars().count() != 1 && !key.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(invalid("key must be a single character or a key name"));
        }

        Ok(Self {
            key: key.to_lowercase(),
            modifier,
        })
    }

    /// Whether `press` triggers this chord. Presses inside text inputs never do.
    pub fn matches(&self, press: &KeyPress) -> bool {
        if press.in_text_input {
            return false;
        }
        let held = press.ctrl || press.meta;
        held == self.modifier && press.key.to_lowercase() == self.key
    }
}
