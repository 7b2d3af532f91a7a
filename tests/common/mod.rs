//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::collections::BTreeSet;

use sifter::{DocId, NewDocument, SearchIndex};

// Re-export canonical test utilities from sifter::testing
pub use sifter::testing::{getting_started, make_doc, make_doc_with_content, sample_corpus};

/// Build an index from `(title, content)` pairs; urls are `/doc/{i}`.
pub fn build_test_index(pages: &[(&str, &str)]) -> SearchIndex {
    SearchIndex::from_documents(
        pages
            .iter()
            .enumerate()
            .map(|(i, (title, content))| make_doc_with_content(i, title, content)),
    )
}

/// Index over plain content strings. Titles are `#0`, `#1`, ... which
/// tokenize to nothing for fewer than 10 documents.
pub fn build_content_index(texts: &[String]) -> SearchIndex {
    SearchIndex::from_documents(
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| NewDocument::new(format!("#{}", i), text.clone(), format!("/{}", i))),
    )
}

/// Every posting list points at an existing document, and every document's
/// tokens are in the index.
pub fn assert_index_well_formed(index: &SearchIndex) {
    let count = index.doc_count();
    for (term, ids) in index.terms().iter() {
        assert!(!ids.is_empty(), "empty posting list for {:?}", term);
        for id in ids {
            assert!(id.as_usize() < count, "{:?} points past the corpus", term);
        }
    }
    for doc in index.docs() {
        for token in index.tokenizer().tokenize(&doc.searchable_text()) {
            let ids = index
                .terms()
                .get(&token)
                .unwrap_or_else(|| panic!("token {:?} of doc {} not indexed", token, doc.id));
            assert!(ids.contains(&doc.id));
        }
    }
}

/// Ids of a search result, in order.
pub fn ids(index: &SearchIndex, query: &str, limit: usize) -> Vec<u32> {
    sifter::search(index, query, limit)
        .iter()
        .map(|doc| doc.id.get())
        .collect()
}

pub fn id_set(ids: &[u32]) -> BTreeSet<DocId> {
    ids.iter().copied().map(DocId::from).collect()
}
