// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Additive term scoring and result ranking.
//!
//! Every query token contributes independently:
//!
//! | Match  | Condition                          | Points per document |
//! |--------|------------------------------------|---------------------|
//! | Exact  | index term == token                | 10                  |
//! | Prefix | index term starts with token, != it | 5                  |
//!
//! Contributions add up, so a document matching two query tokens exactly
//! scores 20. A token that prefixes several terms of the same document adds
//! 5 for each of those terms.
//!
//! # Ranking
//!
//! Score descending, then `DocId` ascending. The id tie-break is insertion
//! order, the only deterministic order available, and tests depend on it.

use crate::types::{DocId, ScoredHit};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

/// Points for a query token equal to an index term.
pub const EXACT_MATCH_SCORE: u32 = 10;

/// Points for a query token that is a strict prefix of an index term.
pub const PREFIX_MATCH_SCORE: u32 = 5;

/// Per-query accumulator. Lives for one evaluation, never stored.
#[derive(Debug, Default)]
pub struct ScoreMap {
    scores: HashMap<DocId, u32>,
}

impl ScoreMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `points` to every document in `ids`.
    pub fn credit(&mut self, ids: &BTreeSet<DocId>, points: u32) {
        for id in ids {
            *self.scores.entry(*id).or_insert(0) += points;
        }
    }

    pub fn get(&self, id: DocId) -> Option<u32> {
        self.scores.get(&id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Consume the map into hits sorted by [`compare_hits`].
    pub fn into_ranked(self) -> Vec<ScoredHit> {
        let mut hits: Vec<ScoredHit> = self
            .scores
            .into_iter()
            .map(|(doc_id, score)| ScoredHit { doc_id, score })
            .collect();
        hits.sort_by(compare_hits);
        hits
    }
}

/// Compare two hits for ranking.
///
/// 1. **Score** - higher wins
/// 2. **Doc ID** - lower wins (insertion order)
pub fn compare_hits(a: &ScoredHit, b: &ScoredHit) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.doc_id.cmp(&b.doc_id))
}
