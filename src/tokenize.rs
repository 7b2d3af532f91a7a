// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text → terms.
//!
//! The same tokenizer runs over documents at build time and over queries at
//! search time, so both sides agree on what a term is:
//!
//! 1. Lowercase
//! 2. Replace every character that is neither a word character
//!    (alphanumeric or `_`) nor whitespace with a space
//! 3. Split on whitespace runs
//! 4. Drop tokens shorter than the minimum length (default 2 chars)
//!
//! No stemming, no stop words, duplicates preserved. Deduplication is the
//! caller's job where it matters (the index builder does it per document).
//!
//! ```text
//! "Hello, World! C++ is a_b" → ["hello", "world", "is", "a_b"]
//! ```

/// Tokens must be at least this many characters long.
pub const MIN_TOKEN_LEN: usize = 2;

/// Word characters survive tokenization, everything else becomes a separator.
#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Tokenizer with a configurable minimum token length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokenizer {
    min_len: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            min_len: MIN_TOKEN_LEN,
        }
    }
}

impl Tokenizer {
    /// A tokenizer keeping tokens of at least `min_len` characters.
    pub fn new(min_len: usize) -> Self {
        Self { min_len }
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// Split `text` into normalized terms. Total: never fails, may be empty.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let cleaned: String = text
            .to_lowercase()
            .chars()
            .map(|c| {
                if is_word_char(c) || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        cleaned
            .split_whitespace()
            .filter(|token| token.chars().count() >= self.min_len)
            .map(str::to_owned)
            .collect()
    }
}

/// Tokenize with the default minimum length.
pub fn tokenize(text: &str) -> Vec<String> {
    Tokenizer::default().tokenize(text)
}
