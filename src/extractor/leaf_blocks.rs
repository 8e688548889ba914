//! Leaf-block normalization.
//!
//! A `<div>` that holds no block children is really a paragraph. Retagging
//! those to `<p>` before scoring lets the paragraph heuristics treat both
//! forms the same.

use crate::dom::{element_children, has_any_tag, Document, NodeRef};

/// Retag every leaf `<div>` in `dom` to `<p>`.
///
/// A div is a leaf when none of its element children is a `div` (or, with
/// `strict`, a `p`). The list of divs is taken before any retagging, and a
/// retagged node keeps its attributes, text and children. In strict mode,
/// running this twice gives the same tree as running it once.
///
/// Returns the number of divs retagged.
pub fn normalize_leaf_blocks(dom: &Document, strict: bool) -> usize {
    let blockers: &[&str] = if strict { &["div", "p"] } else { &["div"] };
    let divs: Vec<NodeRef> = dom.select("div").nodes().to_vec();

    let mut changed = 0;
    for div in divs {
        let is_leaf = !element_children(&div)
            .iter()
            .any(|child| has_any_tag(child, blockers));
        if is_leaf {
            tracing::trace!("Changing leaf block element <div> into <p>");
            div.rename("p");
            changed += 1;
        }
    }
    changed
}
