//! Query correctness: what matches, and what each match is worth.
//!
//! Every expected score here is derived by hand from the two rules:
//! exact term +10, strict-prefix term +5, summed over query tokens.

use super::common::{build_test_index, ids};
use sifter::{search, search_scored, DocId, NewDocument, SearchIndex};

fn scores(index: &SearchIndex, query: &str) -> Vec<(u32, u32)> {
    search_scored(index, query, 10)
        .iter()
        .map(|hit| (hit.doc_id.get(), hit.score))
        .collect()
}

// ============================================================================
// NORMALIZATION
// ============================================================================

#[test]
fn test_case_insensitive() {
    let index = build_test_index(&[("Rust Guide", "Learn RUST today")]);
    assert_eq!(ids(&index, "rUsT", 10), vec![0]);
}

#[test]
fn test_punctuation_splits_words() {
    let index = build_test_index(&[("Notes", "hello-world, foo.bar")]);
    assert_eq!(scores(&index, "world"), vec![(0, 10)]);
    // Query punctuation splits the same way: foo + bar
    assert_eq!(scores(&index, "foo.bar"), vec![(0, 20)]);
}

#[test]
fn test_underscore_is_a_word_char() {
    let index = build_test_index(&[("Style", "use snake_case names")]);
    assert_eq!(scores(&index, "snake_case"), vec![(0, 10)]);
    assert_eq!(scores(&index, "snake"), vec![(0, 5)]);
    assert!(search(&index, "case", 10).is_empty());
}

#[test]
fn test_unicode_words() {
    let index = build_test_index(&[("Café Münster", "Straße")]);
    assert_eq!(scores(&index, "CAFÉ"), vec![(0, 10)]);
    assert_eq!(scores(&index, "mün"), vec![(0, 5)]);
    assert_eq!(scores(&index, "straße"), vec![(0, 10)]);
}

#[test]
fn test_single_char_query_tokens_ignored() {
    let index = build_test_index(&[("Letters", "a b c")]);
    assert!(search(&index, "a", 10).is_empty());
    assert!(search(&index, "a b c", 10).is_empty());
}

// ============================================================================
// FIELDS
// ============================================================================

#[test]
fn test_title_content_and_headings_are_searchable() {
    let index = SearchIndex::from_documents([NewDocument::new(
        "Deploying",
        "Upload the bundle",
        "/deploy",
    )
    .with_headings(["Troubleshooting"])]);

    for query in ["deploying", "bundle", "troubleshooting"] {
        assert_eq!(ids(&index, query, 10), vec![0], "query {:?}", query);
    }
}

#[test]
fn test_url_is_not_searchable() {
    let index = SearchIndex::from_documents([NewDocument::new("Home", "Welcome", "/secret-path")]);
    assert!(search(&index, "secret", 10).is_empty());
}

// ============================================================================
// SCORING RULES
// ============================================================================

#[test]
fn test_term_counted_once_per_document() {
    let index = build_test_index(&[("One", "build build build"), ("Two", "build")]);
    assert_eq!(scores(&index, "build"), vec![(0, 10), (1, 10)]);
}

#[test]
fn test_duplicate_query_tokens_add_up() {
    let index = build_test_index(&[("One", "build")]);
    assert_eq!(scores(&index, "build build"), vec![(0, 20)]);
}

#[test]
fn test_exact_term_is_not_also_a_prefix() {
    let index = build_test_index(&[("One", "build")]);
    assert_eq!(scores(&index, "build"), vec![(0, 10)]);
}

#[test]
fn test_each_extended_term_earns_prefix_points() {
    // "builder" and "builds" both extend "build"
    let index = build_test_index(&[("One", "builder builds")]);
    assert_eq!(scores(&index, "build"), vec![(0, 10)]);
}

#[test]
fn test_exact_and_prefix_combine() {
    let index = build_test_index(&[("One", "build building")]);
    assert_eq!(scores(&index, "build"), vec![(0, 15)]);
}

#[test]
fn test_unmatched_tokens_contribute_nothing() {
    let index = build_test_index(&[("One", "build")]);
    assert_eq!(scores(&index, "build zzzznotfound"), vec![(0, 10)]);
}

// ============================================================================
// RESULT SHAPE
// ============================================================================

#[test]
fn test_results_are_document_records() {
    let index = build_test_index(&[("Alpha", "first page"), ("Beta", "second page")]);
    let docs = search(&index, "second", 10);
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].id, DocId(1));
    assert_eq!(docs[0].title, "Beta");
    assert_eq!(docs[0].url, "/doc/1");
}

#[test]
fn test_empty_index() {
    let index = SearchIndex::from_documents(Vec::new());
    assert!(search(&index, "anything", 10).is_empty());
}

#[test]
fn test_zero_limit() {
    let index = build_test_index(&[("One", "build")]);
    assert!(search(&index, "build", 0).is_empty());
}
