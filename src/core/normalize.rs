//! Question normalization before the question is sent to the solver.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

/// `\( ... \)` inline math, non-greedy, spanning newlines.
static INLINE_MATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\\\((.+?)\\\)").expect("inline math pattern is valid")
});

/// Marker that replaces every inline math span.
const DISPLAY_MARKER: &str = "$$";

/// Replace every `\( ... \)` span (delimiters included) with a bare `$$` marker.
///
/// The enclosed expression is dropped, not re-wrapped. Returns the input unchanged
/// when there is no inline span.
pub fn normalize_prompt(text: &str) -> String {
    INLINE_MATH
        .replace_all(text, NoExpand(DISPLAY_MARKER))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_inline_span_is_unchanged() {
        let s = "Solve $$x^2 = 4$$ for x (x > 0)";
        assert_eq!(normalize_prompt(s), s);
    }

    #[test]
    fn empty_input() {
        assert_eq!(normalize_prompt(""), "");
    }

    #[test]
    fn inline_span_becomes_bare_marker() {
        assert_eq!(
            normalize_prompt(r"prefix \(x^2 + 1\) suffix"),
            "prefix $$ suffix"
        );
    }

    #[test]
    fn every_span_is_replaced() {
        assert_eq!(
            normalize_prompt(r"\(a\) and \(b\)"),
            "$$ and $$"
        );
    }

    #[test]
    fn span_across_newlines() {
        assert_eq!(normalize_prompt("a \\(x\n+ y\\) b"), "a $$ b");
    }

    #[test]
    fn unclosed_span_is_left_alone() {
        let s = r"value \(x + 1";
        assert_eq!(normalize_prompt(s), s);
    }

    #[test]
    fn empty_span_needs_content() {
        // `.+?` needs at least one character between the delimiters.
        let s = r"\(\)";
        assert_eq!(normalize_prompt(s), s);
    }

    #[test]
    fn dollar_marker_is_literal() {
        // A `$` in the replacement must not be read as a capture reference.
        let out = normalize_prompt(r"\(1\)");
        assert_eq!(out, "$$");
        assert_eq!(out.len(), 2);
    }
}
