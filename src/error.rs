// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types.
//!
//! Nothing here ever reaches the end user as a crash. A [`LoadError`] is one
//! failed corpus candidate; the loader collects them and degrades to the
//! disabled state when all candidates fail. [`ConfigError`] is returned when
//! a configuration cannot be used. [`BindError`] covers the browser binding.

use thiserror::Error;

/// Why one corpus candidate could not be used.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The fetch itself failed (network error, missing file).
    #[error("failed to fetch {location}: {reason}")]
    Fetch { location: String, reason: String },

    /// The fetch completed with a non-success status.
    #[error("fetching {location} returned HTTP {status}")]
    Status { location: String, status: u16 },

    /// The payload was not valid JSON.
    #[error("corpus at {location} is not valid JSON: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    /// The payload was JSON, but not an array of documents.
    #[error("corpus at {location} is not a JSON array")]
    NotAnArray { location: String },
}

impl LoadError {
    /// The candidate location this failure belongs to.
    pub fn location(&self) -> &str {
        match self {
            LoadError::Fetch { location, .. }
            | LoadError::Status { location, .. }
            | LoadError::Parse { location, .. }
            | LoadError::NotAnArray { location } => location,
        }
    }
}

/// A configuration value the controller cannot work with.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("result limit must be at least 1")]
    ZeroLimit,

    #[error("excerpt length must be at least 1")]
    ZeroExcerptLength,

    #[error("minimum token length must be at least 1")]
    ZeroTokenLength,

    #[error("at least one corpus location is required")]
    NoCorpusPaths,

    #[error("invalid shortcut {chord:?}: {reason}")]
    InvalidShortcut { chord: String, reason: &'static str },
}

/// The browser binding could not attach to the page.
///
/// Logged to the console, never thrown to the page.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("no window or document")]
    NoDocument,

    #[error("invalid search options: {0}")]
    Options(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{context}: {message}")]
    Js {
        context: &'static str,
        message: String,
    },
}
