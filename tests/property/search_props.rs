//! Ranking properties, checked against a brute-force oracle.

use std::collections::{BTreeSet, HashMap};

use super::common::build_content_index;
use proptest::prelude::*;
use sifter::{search_scored, tokenize, EXACT_MATCH_SCORE, PREFIX_MATCH_SCORE};

fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-e]{2,5}").unwrap()
}

fn corpus_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::collection::vec(word_strategy(), 1..8).prop_map(|w| w.join(" ")),
        1..8,
    )
}

fn query_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::string::string_regex("[a-e]{1,4}").unwrap(), 0..4)
        .prop_map(|w| w.join(" "))
}

/// Score every document by scanning every term: no index, no prefix ranges.
fn oracle(texts: &[String], query: &str) -> Vec<(usize, u32)> {
    let mut scores: HashMap<usize, u32> = HashMap::new();
    for (doc, text) in texts.iter().enumerate() {
        let terms: BTreeSet<String> = tokenize(text).into_iter().collect();
        for token in tokenize(query) {
            for term in &terms {
                let points = if *term == token {
                    EXACT_MATCH_SCORE
                } else if term.starts_with(&token) {
                    PREFIX_MATCH_SCORE
                } else {
                    0
                };
                if points > 0 {
                    *scores.entry(doc).or_insert(0) += points;
                }
            }
        }
    }
    let mut ranked: Vec<(usize, u32)> = scores.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn prop_matches_oracle(texts in corpus_strategy(), query in query_strategy()) {
        let index = build_content_index(&texts);
        let actual: Vec<(usize, u32)> = search_scored(&index, &query, usize::MAX)
            .iter()
            .map(|hit| (hit.doc_id.as_usize(), hit.score))
            .collect();
        prop_assert_eq!(actual, oracle(&texts, &query));
    }

    #[test]
    fn prop_limit_respected(
        texts in corpus_strategy(),
        query in query_strategy(),
        limit in 0usize..12,
    ) {
        let index = build_content_index(&texts);
        let hits = search_scored(&index, &query, limit);
        prop_assert!(hits.len() <= limit);
        // Truncation is a prefix of the full ranking
        let full = search_scored(&index, &query, usize::MAX);
        prop_assert_eq!(&hits[..], &full[..hits.len()]);
    }

    #[test]
    fn prop_ranking_order(texts in corpus_strategy(), query in query_strategy()) {
        let index = build_content_index(&texts);
        let hits = search_scored(&index, &query, usize::MAX);
        for pair in hits.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].doc_id < pair[1].doc_id);
            }
        }
    }

    #[test]
    fn prop_deterministic(texts in corpus_strategy(), query in query_strategy()) {
        let index = build_content_index(&texts);
        prop_assert_eq!(
            search_scored(&index, &query, 10),
            search_scored(&index, &query, 10)
        );
    }
}
