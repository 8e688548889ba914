//! Tag catalogs used by scoring and cleaning.
//!
//! Arrays for iteration plus `HashSet`s for O(1) lookup where a set is
//! consulted per node.

use std::collections::HashSet;
use std::sync::LazyLock;

// === Tag Lists (arrays for iteration) ===

/// Tags whose paragraphs feed candidate scores (without `article`).
pub static SCORABLE_TAGS: [&str; 4] = ["div", "p", "td", "pre"];

/// Tags that start a candidate at +5.
pub static CONTAINER_TAGS: [&str; 2] = ["div", "article"];

/// Tags that start a candidate at +3.
pub static QUOTE_CELL_TAGS: [&str; 3] = ["pre", "td", "blockquote"];

/// Tags that start a candidate at -3.
pub static LIST_FORM_TAGS: [&str; 8] = ["address", "ol", "ul", "dl", "dd", "dt", "li", "form"];

/// Tags that start a candidate at -5.
pub static HEADING_CELL_TAGS: [&str; 7] = ["h1", "h2", "h3", "h4", "h5", "h6", "th"];

/// Headings dropped when their class/id weight is negative.
pub static WEIGHTED_HEADING_TAGS: [&str; 4] = ["h1", "h2", "h3", "h4"];

/// Headings dropped when mostly links.
pub static LINKY_HEADING_TAGS: [&str; 2] = ["h3", "h4"];

/// Embedded object tags.
pub static EMBED_TAGS: [&str; 2] = ["object", "embed"];

/// Tags subject to conditional cleaning.
pub static CONDITIONAL_TAGS: [&str; 5] = ["form", "table", "ul", "div", "p"];

/// Block tags that keep annexed siblings from being retagged.
pub static BLOCK_TAGS: [&str; 2] = ["div", "p"];

/// Substrings marking an embed as video worth keeping.
pub static TRUSTED_VIDEO_HOSTS: [&str; 3] = ["youtube", "blip.tv", "vimeo"];

// === Tag Sets (HashSets for O(1) lookup) ===

/// `SCORABLE_TAGS` plus `article`
pub static SCORABLE_TAG_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    SCORABLE_TAGS.into_iter().chain(["article"]).collect()
});

/// `CONDITIONAL_TAGS` as a `HashSet`
pub static CONDITIONAL_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| CONDITIONAL_TAGS.into_iter().collect());

// === Helpers ===

/// Whether `tag` is scored, with `article` included only on request.
#[must_use]
pub fn is_scorable_tag(tag: &str, include_article: bool) -> bool {
    if tag == "article" {
        return include_article;
    }
    SCORABLE_TAG_SET.contains(tag)
}

/// Score a new candidate starts with, before class/id weight.
#[must_use]
pub fn initial_tag_score(tag: &str) -> f64 {
    if CONTAINER_TAGS.contains(&tag) {
        5.0
    } else if QUOTE_CELL_TAGS.contains(&tag) {
        3.0
    } else if LIST_FORM_TAGS.contains(&tag) {
        -3.0
    } else if HEADING_CELL_TAGS.contains(&tag) {
        -5.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scorable_tags() {
        for tag in ["div", "p", "td", "pre"] {
            assert!(is_scorable_tag(tag, false));
        }
        assert!(is_scorable_tag("article", true));
        assert!(!is_scorable_tag("article", false));
        assert!(!is_scorable_tag("span", true));
    }

    #[test]
    fn test_initial_tag_score() {
        assert_eq!(initial_tag_score("div"), 5.0);
        assert_eq!(initial_tag_score("article"), 5.0);
        assert_eq!(initial_tag_score("blockquote"), 3.0);
        assert_eq!(initial_tag_score("li"), -3.0);
        assert_eq!(initial_tag_score("th"), -5.0);
        assert_eq!(initial_tag_score("body"), 0.0);
    }

    #[test]
    fn test_conditional_set() {
        assert!(CONDITIONAL_TAG_SET.contains("table"));
        assert!(!CONDITIONAL_TAG_SET.contains("ol"));
    }
}
