// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for query handling.
//!
//! Arbitrary bytes go through the query path of a fixed sample site. Search
//! must not panic, must respect the limit and must rank by score, then id.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sifter::testing::sample_index;
use sifter::{search, search_scored, SearchIndex};

fuzz_target!(|query: &[u8]| {
    static INDEX: std::sync::OnceLock<SearchIndex> = std::sync::OnceLock::new();
    let index = INDEX.get_or_init(sample_index);

    let query = String::from_utf8_lossy(query);
    let query: String = query.chars().take(200).collect();

    let hits = search_scored(index, &query, 3);

    // INVARIANT 1: bounded by limit
    assert!(hits.len() <= 3, "got {} results for limit 3", hits.len());

    // INVARIANT 2: every id names a document
    for hit in &hits {
        assert!(hit.doc_id.as_usize() < index.doc_count());
        assert!(hit.score > 0, "zero-score hit for {:?}", query);
    }

    // INVARIANT 3: score descending, then id ascending
    for pair in hits.windows(2) {
        assert!(
            pair[0].score > pair[1].score
                || (pair[0].score == pair[1].score && pair[0].doc_id < pair[1].doc_id),
            "misordered hits {:?} for {:?}",
            pair,
            query
        );
    }

    // INVARIANT 4: deterministic, and the document view agrees with the scored view
    assert_eq!(hits, search_scored(index, &query, 3));
    let docs = search(index, &query, 3);
    assert_eq!(docs.len(), hits.len());
    for (doc, hit) in docs.iter().zip(&hits) {
        assert_eq!(doc.id, hit.doc_id);
    }
});
