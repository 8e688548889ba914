//! Compiled regex patterns used by the extraction pipeline.
//!
//! All patterns are compiled once on first use with `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Class/id keyword patterns
// =============================================================================

/// Class/id keywords marking nodes that are unlikely to be article content.
pub static CLS_UNLIKELY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)combx|comment|community|disqus|extra|foot|header|menu|remark|rss|shoutbox|sidebar|sponsor|ad-break|agegate|pagination|pager|perma|popup|tweet|twitter|social|breadcrumb|widget",
    )
    .expect("CLS_UNLIKELY regex")
});

/// Class/id keywords that override an unlikely match.
pub static CLS_MAYBE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)and|article|body|column|main|shadow|content|entry")
        .expect("CLS_MAYBE regex")
});

/// Class/id keywords worth +25.
pub static CLS_WEIGHT_POSITIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)article|body|content|entry|hentry|main|page|pagination|post|text|blog|story",
    )
    .expect("CLS_WEIGHT_POSITIVE regex")
});

/// Class/id keywords worth -25.
pub static CLS_WEIGHT_NEGATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)combx|comment|com-|contact|foot|footer|footnote|head|masthead|media|meta|outbrain|promo|related|scroll|shoutbox|sidebar|sponsor|shopping|tags|tool|widget",
    )
    .expect("CLS_WEIGHT_NEGATIVE regex")
});

// =============================================================================
// Markup patterns
// =============================================================================

/// A run of `<br>`/`<hr>` tags, possibly separated by whitespace.
pub static BREAK_TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:<\s*[bh]r\b[^>]*>\s*)+").expect("BREAK_TAGS regex")
});

/// A single `<br>`/`<hr>` tag; the capture is `b` or `h`.
pub static BREAK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<\s*([bh])r\b").expect("BREAK_TAG regex"));

/// Whitespace runs, for text normalization.
pub static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE regex"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlikely_matches_boilerplate_names() {
        for name in ["comments", "site-footer", "SideBar", "ad-break", "pagination", "breadcrumbs"] {
            assert!(CLS_UNLIKELY.is_match(name), "{name}");
        }
        assert!(!CLS_UNLIKELY.is_match("story"));
    }

    #[test]
    fn maybe_overrides_content_names() {
        assert!(CLS_MAYBE.is_match("article-comments"));
        assert!(CLS_MAYBE.is_match("main"));
        assert!(!CLS_MAYBE.is_match("sidebar"));
    }

    #[test]
    fn weight_patterns_are_case_insensitive() {
        assert!(CLS_WEIGHT_POSITIVE.is_match("POST"));
        assert!(CLS_WEIGHT_NEGATIVE.is_match("Comment"));
        assert!(!CLS_WEIGHT_POSITIVE.is_match("sidebar"));
    }

    #[test]
    fn break_tags_match_runs() {
        let m = BREAK_TAGS.find("a<br> \n<BR/>b").map(|m| m.as_str());
        assert_eq!(m, Some("<br> \n<BR/>"));
        assert!(BREAK_TAGS.is_match("<hr class=\"x\">"));
        assert!(!BREAK_TAGS.is_match("<b>bold</b>"));
    }
}
