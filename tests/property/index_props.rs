//! Index construction properties.

use super::common::{assert_index_well_formed, build_content_index};
use proptest::prelude::*;
use sifter::{tokenize, IndexBuilder, NewDocument};

fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{2,8}").unwrap()
}

fn document_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(word_strategy(), 1..10).prop_map(|words| words.join(" "))
}

fn corpus_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(document_strategy(), 1..6)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_index_well_formed(texts in corpus_strategy()) {
        let index = build_content_index(&texts);
        assert_index_well_formed(&index);
    }

    #[test]
    fn prop_rebuild_is_identical(texts in corpus_strategy()) {
        let a = build_content_index(&texts);
        let b = build_content_index(&texts);
        let a_terms: Vec<_> = a.terms().iter().map(|(t, ids)| (t.to_string(), ids.clone())).collect();
        let b_terms: Vec<_> = b.terms().iter().map(|(t, ids)| (t.to_string(), ids.clone())).collect();
        prop_assert_eq!(a_terms, b_terms);
    }

    #[test]
    fn prop_ids_are_insertion_order(texts in corpus_strategy()) {
        let mut builder = IndexBuilder::new();
        for (i, text) in texts.iter().enumerate() {
            let id = builder.add_document(NewDocument::new("", text.clone(), format!("/{}", i)));
            prop_assert_eq!(id.as_usize(), i);
        }
        let index = builder.build();
        prop_assert_eq!(index.doc_count(), texts.len());
    }

    #[test]
    fn prop_every_token_finds_its_document(texts in corpus_strategy()) {
        let index = build_content_index(&texts);
        for (i, text) in texts.iter().enumerate() {
            for token in tokenize(text) {
                let ids: Vec<usize> = sifter::search(&index, &token, 10)
                    .iter()
                    .map(|doc| doc.id.as_usize())
                    .collect();
                prop_assert!(ids.contains(&i), "token {:?} missed doc {}", token, i);
            }
        }
    }

    #[test]
    fn prop_tokens_are_normalized(text in "\\PC{0,64}") {
        for token in tokenize(&text) {
            prop_assert!(token.chars().count() >= 2);
            prop_assert!(token.chars().all(|c| c.is_alphanumeric() || c == '_'));
            prop_assert_eq!(token.to_lowercase(), token.clone());
        }
    }
}
