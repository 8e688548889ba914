//! Link density calculation.
//!
//! The share of a node's text that sits inside `<a>` elements. Images are
//! credited back a fixed number of characters each so that a gallery of
//! linked thumbnails is not mistaken for a navigation block.

use crate::dom::{normalized_len, select_within, NodeRef};

/// Fraction of `node`'s normalized text that belongs to descendant links.
///
/// Link text is reduced by `image_credit` characters per descendant `<img>`
/// (floored at zero). Returns `0.0` when the node has no text; otherwise the
/// result is within `[0, 1]`.
#[must_use]
pub fn link_density(node: &NodeRef, image_credit: usize) -> f64 {
    let text_length = normalized_len(&node.text());
    if text_length == 0 {
        return 0.0;
    }

    let link_length: usize = select_within(node, "a")
        .iter()
        .map(|a| normalized_len(&a.text()))
        .sum();
    let images = select_within(node, "img").len();
    let link_length = link_length.saturating_sub(images.saturating_mul(image_credit));

    (link_length as f64 / text_length as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    fn density(html: &str, credit: usize) -> f64 {
        let doc = Document::from(html);
        let node = doc.select("#target").nodes()[0];
        link_density(&node, credit)
    }

    #[test]
    fn test_no_links() {
        assert_eq!(density("<div id='target'>plain text only</div>", 50), 0.0);
    }

    #[test]
    fn test_empty_node_is_zero() {
        assert_eq!(density("<div id='target'></div>", 50), 0.0);
        assert_eq!(density("<div id='target'>  \n </div>", 50), 0.0);
    }

    #[test]
    fn test_all_links() {
        assert_eq!(density("<div id='target'><a href='/a'>link</a></div>", 0), 1.0);
    }

    #[test]
    fn test_half_links() {
        let d = density("<p id='target'>abcd <a href='/x'>efgh</a></p>", 0);
        // "abcd efgh" is 9 chars, link is 4
        assert!((d - 4.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_whitespace_is_normalized() {
        let d = density("<p id='target'>ab   \n\n  <a href='/x'>  cd  </a></p>", 0);
        // "ab cd" is 5 chars, link "cd" is 2
        assert!((d - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_image_credit_offsets_link_text() {
        let html = "<div id='target'><a href='/g'><img src='a.png'>caption</a> text</div>";
        assert!(density(html, 0) > 0.0);
        assert_eq!(density(html, 50), 0.0);
    }

    #[test]
    fn test_nested_anchors_stay_bounded() {
        let html = "<div id='target'><a href='/a'>one <a href='/b'>two</a></a></div>";
        let d = density(html, 0);
        assert!((0.0..=1.0).contains(&d));
    }
}
