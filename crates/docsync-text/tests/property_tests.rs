//! Property tests for the reflow engine

use docsync_text::{display_width, reflow, wrap};
use proptest::prelude::*;

fn paragraph() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,12}|[一-龥]{1,6}", 1..40).prop_map(|words| words.join(" "))
}

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(paragraph(), 1..4).prop_map(|paragraphs| paragraphs.join("\n"))
}

proptest! {
    #[test]
    fn wrap_is_idempotent(text in document(), limit in 12usize..90) {
        let once = wrap(&text, "", limit);
        let twice = wrap(&once, "", limit);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn lines_respect_limit_unless_single_token(text in document(), limit in 12usize..90) {
        for line in wrap(&text, "// ", limit).lines() {
            let body = line.strip_prefix("// ").unwrap_or("");
            let single_token = !body.contains(' ')
                && body.chars().filter(|c| docsync_text::is_wide(*c)).count() <= 1;
            prop_assert!(
                display_width(body) <= limit || single_token,
                "line {:?} exceeds {}",
                line,
                limit
            );
        }
    }

    #[test]
    fn wrap_never_panics(text in "\\PC*", limit in 0usize..100) {
        let _ = wrap(&text, "// ", limit);
    }

    #[test]
    fn output_ends_with_newline_or_is_empty(text in "\\PC*") {
        let out = wrap(&text, "", 40);
        prop_assert!(out.is_empty() || (out.ends_with('\n') && !out.ends_with("\n\n")));
    }

    #[test]
    fn reflow_then_wrap_keeps_words(text in document(), limit in 12usize..90) {
        let wrapped = wrap(&reflow(&text), "", limit);
        let original: Vec<&str> = text.split_whitespace().collect();
        let joined = wrapped.split_whitespace().collect::<Vec<_>>().concat();
        prop_assert_eq!(original.concat(), joined);
    }
}
