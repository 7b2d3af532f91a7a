// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Inverted index construction.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **SEQUENTIAL_IDS**: the n-th document added gets `DocId(n)`, and
//!    `docs[id].id == id`
//! 2. **DEDUPLICATED**: a document appears at most once in any term's set,
//!    however often the term occurs in its text
//! 3. **NON_EMPTY**: every term in the index maps to at least one document
//! 4. **BUILD_ONCE**: `IndexBuilder::build` consumes the builder. A reload
//!    starts from a fresh builder; nothing is patched incrementally.
//!
//! Terms are kept in a `BTreeMap`, so the vocabulary is sorted. Prefix
//! lookups visit the contiguous run of terms starting at the prefix instead of
//! scanning every term, and produce the same matches as the full scan.

use crate::tokenize::Tokenizer;
use crate::types::{DocId, Document, NewDocument};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::ops::Bound;

/// Term → set of documents containing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvertedIndex {
    terms: BTreeMap<String, BTreeSet<DocId>>,
}

impl InvertedIndex {
    /// Documents containing exactly `term`.
    pub fn get(&self, term: &str) -> Option<&BTreeSet<DocId>> {
        self.terms.get(term)
    }

    /// All terms starting with `prefix` (including `prefix` itself if indexed),
    /// in sorted order.
    pub fn with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a BTreeSet<DocId>)> + 'a {
        self.terms
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(term, _)| term.starts_with(prefix))
            .map(|(term, ids)| (term.as_str(), ids))
    }

    /// Every term with its document set, sorted by term.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<DocId>)> {
        self.terms.iter().map(|(term, ids)| (term.as_str(), ids))
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Total (term, document) pairs.
    pub fn posting_count(&self) -> usize {
        self.terms.values().map(BTreeSet::len).sum()
    }

    fn insert(&mut self, term: String, id: DocId) {
        self.terms.entry(term).or_default().insert(id);
    }
}

/// Summary numbers for a built index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    pub documents: usize,
    pub terms: usize,
    pub postings: usize,
    /// Corpus entries dropped because they were malformed.
    pub skipped: usize,
}

/// Accumulates documents and their terms. Single use.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    tokenizer: Tokenizer,
    docs: Vec<Document>,
    index: InvertedIndex,
    skipped: usize,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokenizer(tokenizer: Tokenizer) -> Self {
        Self {
            tokenizer,
            ..Self::default()
        }
    }

    /// Append a document and index its title, content and headings.
    ///
    /// The id is the number of documents added before it. Adding the same
    /// page twice yields two ids.
    pub fn add_document(&mut self, doc: NewDocument) -> DocId {
        let id = DocId(self.docs.len() as u32);
        let doc = Document::from_new(id, doc);

        let mut seen = HashSet::new();
        for token in self.tokenizer.tokenize(&doc.searchable_text()) {
            if seen.insert(token.clone()) {
                self.index.insert(token, id);
            }
        }

        self.docs.push(doc);
        id
    }

    /// Record a corpus entry that was rejected before reaching `add_document`.
    pub fn note_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn build(self) -> SearchIndex {
        SearchIndex {
            tokenizer: self.tokenizer,
            docs: self.docs,
            index: self.index,
            skipped: self.skipped,
        }
    }
}

/// A built, read-only search index.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    tokenizer: Tokenizer,
    docs: Vec<Document>,
    index: InvertedIndex,
    skipped: usize,
}

impl SearchIndex {
    /// Build an index from documents in order.
    pub fn from_documents<I>(docs: I) -> Self
    where
        I: IntoIterator<Item = NewDocument>,
    {
        let mut builder = IndexBuilder::new();
        for doc in docs {
            builder.add_document(doc);
        }
        builder.build()
    }

    pub fn docs(&self) -> &[Document] {
        &self.docs
    }

    pub fn doc(&self, id: DocId) -> Option<&Document> {
        self.docs.get(id.as_usize())
    }

    pub fn terms(&self) -> &InvertedIndex {
        &self.index
    }

    /// The tokenizer the index was built with. Queries must use the same one.
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn doc_count(&self) -> usize {
        self.docs.len()
    }

    pub fn term_count(&self) -> usize {
        self.index.len()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            documents: self.docs.len(),
            terms: self.index.len(),
            postings: self.index.posting_count(),
            skipped: self.skipped,
        }
    }
}
