//! Excerpt and highlight properties.

use proptest::prelude::*;
use sifter::render::{escape_html, highlight, MARK_CLOSE, MARK_OPEN};
use sifter::render_excerpt;

fn content_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::string::string_regex("[a-z]{1,9}").unwrap(), 0..60)
        .prop_map(|w| w.join(" "))
}

/// Query words that cannot match inside the inserted `<mark>` tags.
fn query_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::string::string_regex("[a-z]{2,5}")
            .unwrap()
            .prop_filter("substring of the tag name", |w| !"mark".contains(w.as_str())),
        0..3,
    )
    .prop_map(|w| w.join(" "))
}

/// At most 49 chars, so any match sits inside the leading context window.
fn short_content_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::string::string_regex("[a-z]{1,9}").unwrap(), 0..5)
        .prop_map(|w| w.join(" "))
}

fn strip_marks(markup: &str) -> String {
    markup.replace(MARK_OPEN, "").replace(MARK_CLOSE, "")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn prop_visible_length_bounded(
        content in content_strategy(),
        query in query_strategy(),
        max_length in 1usize..200,
    ) {
        let excerpt = render_excerpt(&content, &query, max_length);
        let visible = strip_marks(&excerpt).replace("...", "");
        prop_assert!(visible.chars().count() <= max_length);
    }

    #[test]
    fn prop_excerpt_is_a_slice(
        content in content_strategy(),
        query in query_strategy(),
        max_length in 1usize..200,
    ) {
        let excerpt = render_excerpt(&content, &query, max_length);
        let visible = strip_marks(&excerpt).replace("...", "");
        prop_assert!(content.contains(&visible));
    }

    #[test]
    fn prop_short_content_untouched(content in short_content_strategy(), query in query_strategy()) {
        let max_length = content.chars().count().max(1);
        let excerpt = render_excerpt(&content, &query, max_length);
        prop_assert_eq!(strip_marks(&excerpt), content);
    }

    #[test]
    fn prop_highlight_preserves_text(text in "[a-zA-Z <>&\"']{0,40}", query in query_strategy()) {
        let escaped = escape_html(&text);
        let marked = highlight(&escaped, &query);
        prop_assert_eq!(strip_marks(&marked), escaped);
    }
}
