// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query evaluation.
//!
//! Tokenize the query with the index's tokenizer, credit exact and prefix
//! matches per token (see [`crate::scoring`]), rank, truncate. The index is
//! only read; two evaluations of the same query against the same index always
//! return the same list.

use crate::index::SearchIndex;
use crate::scoring::{ScoreMap, EXACT_MATCH_SCORE, PREFIX_MATCH_SCORE};
use crate::types::{Document, ScoredHit};

/// Number of results returned when the caller has no preference.
pub const DEFAULT_LIMIT: usize = 10;

/// Rank documents for `query`, returning at most `limit` hits with scores.
///
/// An empty query (or one whose tokens are all too short) returns nothing.
pub fn search_scored(index: &SearchIndex, query: &str, limit: usize) -> Vec<ScoredHit> {
    let tokens = index.tokenizer().tokenize(query);
    if tokens.is_empty() {
        return Vec::new();
    }

    let terms = index.terms();
    let mut scores = ScoreMap::new();

    for token in &tokens {
        if let Some(ids) = terms.get(token) {
            scores.credit(ids, EXACT_MATCH_SCORE);
        }

        for (term, ids) in terms.with_prefix(token) {
            if term != token.as_str() {
                scores.credit(ids, PREFIX_MATCH_SCORE);
            }
        }
    }

    let mut hits = scores.into_ranked();
    hits.truncate(limit);
    hits
}

/// Rank documents for `query`, returning the document records.
pub fn search<'a>(index: &'a SearchIndex, query: &str, limit: usize) -> Vec<&'a Document> {
    search_scored(index, query, limit)
        .into_iter()
        .filter_map(|hit| index.doc(hit.doc_id))
        .collect()
}
