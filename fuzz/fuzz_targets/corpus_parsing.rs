// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for corpus parsing.
//!
//! Whatever a server sends back, parsing either fails with a typed error or
//! yields a well-formed index.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sifter::{parse_corpus, Tokenizer};

fuzz_target!(|bytes: &[u8]| {
    let Ok(index) = parse_corpus(bytes, "fuzz", Tokenizer::default()) else {
        return;
    };

    // INVARIANT: ids are dense and in insertion order
    for (position, doc) in index.docs().iter().enumerate() {
        assert_eq!(doc.id.as_usize(), position);
    }

    // INVARIANT: every posting names a document
    for (term, ids) in index.terms().iter() {
        assert!(term.chars().count() >= 2, "short term {:?}", term);
        for id in ids {
            assert!(index.doc(*id).is_some(), "{:?} points past the corpus", term);
        }
    }
});
