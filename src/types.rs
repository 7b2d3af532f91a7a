// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The records a search index is made of.
//!
//! A corpus entry arrives as a [`NewDocument`] (no id yet). The builder stamps
//! it with a [`DocId`] equal to its insertion position and stores it as a
//! [`Document`]. Ids are only meaningful inside the index that assigned them:
//! a reload rebuilds everything and may hand out the same id to a different page.
//!
//! # Invariants
//!
//! - **Document**: `docs[id].id == id` for every stored document.
//! - **ScoredHit**: `doc_id < docs.len()` for the index that produced it.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// NEWTYPES
// =============================================================================

/// Type-safe document identifier.
///
/// Sequential, 0-based, assigned in insertion order. Ordering on `DocId` is the
/// deterministic tie-break used by ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct DocId(pub u32);

impl DocId {
    /// Create a new DocId, validating it's within bounds.
    #[inline]
    pub fn new(id: u32, num_docs: usize) -> Option<Self> {
        if (id as usize) < num_docs {
            Some(DocId(id))
        } else {
            None
        }
    }

    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Convert to usize for array indexing.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for DocId {
    fn from(id: u32) -> Self {
        DocId(id)
    }
}

impl From<DocId> for usize {
    fn from(id: DocId) -> Self {
        id.0 as usize
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// DOCUMENT TYPES
// =============================================================================

/// A corpus entry before it has been indexed.
///
/// This is the shape of one element of the corpus JSON array. Unknown fields
/// (the site generator also emits `description`) are ignored. `headings` may
/// be missing or `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDocument {
    pub title: String,
    pub content: String,
    pub url: String,
    #[serde(default, deserialize_with = "nullable_headings")]
    pub headings: Vec<String>,
}

fn nullable_headings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl NewDocument {
    pub fn new(title: impl Into<String>, content: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            url: url.into(),
            headings: Vec::new(),
        }
    }

    pub fn with_headings<I, S>(mut self, headings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headings = headings.into_iter().map(Into::into).collect();
        self
    }
}

/// An indexed page record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    pub content: String,
    pub url: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headings: Vec<String>,
}

impl Document {
    pub(crate) fn from_new(id: DocId, doc: NewDocument) -> Self {
        Self {
            id,
            title: doc.title,
            content: doc.content,
            url: doc.url,
            headings: doc.headings,
        }
    }

    /// The text that gets tokenized for this document: title, content and
    /// headings joined by a single space.
    pub fn searchable_text(&self) -> String {
        let mut text = String::with_capacity(
            self.title.len()
                + self.content.len()
                + self.headings.iter().map(|h| h.len() + 1).sum::<usize>()
                + 1,
        );
        text.push_str(&self.title);
        text.push(' ');
        text.push_str(&self.content);
        for heading in &self.headings {
            text.push(' ');
            text.push_str(heading);
        }
        text
    }
}

/// A ranked hit: which document, and how much it scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredHit {
    pub doc_id: DocId,
    pub score: u32,
}
