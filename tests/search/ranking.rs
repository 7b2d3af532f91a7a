//! Ranking order and truncation.

use super::common::{build_test_index, ids};
use sifter::{search_scored, DEFAULT_LIMIT};

#[test]
fn test_exact_outranks_prefix() {
    let index = build_test_index(&[("One", "building"), ("Two", "build")]);
    assert_eq!(ids(&index, "build", 10), vec![1, 0]);
}

#[test]
fn test_more_matching_tokens_rank_higher() {
    let index = build_test_index(&[
        ("One", "rust"),
        ("Two", "wasm"),
        ("Three", "rust wasm"),
    ]);
    assert_eq!(ids(&index, "rust wasm", 10), vec![2, 0, 1]);
}

#[test]
fn test_ties_break_by_insertion_order() {
    let index = build_test_index(&[
        ("Page", "shared term"),
        ("Page", "shared term"),
        ("Page", "shared term"),
    ]);
    assert_eq!(ids(&index, "shared", 10), vec![0, 1, 2]);
}

#[test]
fn test_tie_order_survives_truncation() {
    let pages: Vec<(String, String)> = (0..15)
        .map(|i| (format!("Page {}", i), "common".to_string()))
        .collect();
    let refs: Vec<(&str, &str)> = pages
        .iter()
        .map(|(t, c)| (t.as_str(), c.as_str()))
        .collect();
    let index = build_test_index(&refs);

    assert_eq!(
        ids(&index, "common", DEFAULT_LIMIT),
        (0..10).collect::<Vec<u32>>()
    );
}

#[test]
fn test_truncation_keeps_best() {
    let index = build_test_index(&[
        ("One", "alpha"),
        ("Two", "alpha beta"),
        ("Three", "alpha beta gamma"),
    ]);
    assert_eq!(ids(&index, "alpha beta gamma", 2), vec![2, 1]);
}

#[test]
fn test_scores_non_increasing() {
    let index = build_test_index(&[
        ("Build Guide", "how to build"),
        ("Builders", "builder pattern"),
        ("Buildings", "architecture"),
        ("Unrelated", "nothing here"),
    ]);
    let hits = search_scored(&index, "build guide", 10);
    assert_eq!(hits.len(), 3);
    for pair in hits.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}
