//! Winner selection and sibling annexation.
//!
//! The best candidate often holds only part of the article: a preamble, or
//! paragraphs split off by an ad block that was removed. Siblings that score
//! well, share the winner's class, or read like prose are moved into it.

use crate::diagnostics::{describe, Diagnostics, Event};
use crate::dom::{attr_or_empty, element_children, has_any_tag, has_tag, is_connected, move_into, parent_element, NodeRef};
use crate::error::{Error, Result};
use crate::link_density::link_density;
use crate::options::Options;

use super::scoring::{Candidate, CandidateMap};
use super::tags::BLOCK_TAGS;

/// Prose siblings longer than this only need a low link density.
const SIBLING_PROSE_LENGTH: usize = 80;

/// Highest-ranked candidate still attached to the document.
///
/// Candidates inside subtrees removed after scoring are skipped.
pub fn select_winner<'a>(candidates: &CandidateMap<'a>) -> Result<Candidate<'a>> {
    candidates
        .ranked()
        .into_iter()
        .find(|c| is_connected(&c.node))
        .copied()
        .ok_or(Error::NoCandidates)
}

/// Move related siblings of `winner` into it and return the winner's node.
///
/// A sibling is annexed when its own candidate score plus a same-class bonus
/// reaches `max(10, 0.2 × winner score)`, or when it is a `<p>` that reads
/// like prose. Annexed siblings that are neither `div` nor `p` are retagged
/// to `div`. The sibling list is taken before anything moves.
pub fn annex_siblings<'a>(
    winner: &Candidate<'a>,
    candidates: &CandidateMap<'a>,
    options: &Options,
    diagnostics: &dyn Diagnostics,
) -> NodeRef<'a> {
    let node = winner.node;
    let Some(parent) = parent_element(&node) else {
        return node;
    };

    let winner_class = attr_or_empty(&node, "class");
    let target = (winner.content_score * 0.2).max(10.0);

    for sibling in element_children(&parent) {
        if sibling.id == node.id {
            continue;
        }

        let mut bonus = 0.0;
        if !winner_class.is_empty() && attr_or_empty(&sibling, "class") == winner_class {
            bonus += winner.content_score * 0.2;
        }

        let mut append = candidates
            .get(&sibling.id)
            .is_some_and(|c| c.content_score + bonus >= target);

        if has_tag(&sibling, "p") && is_prose(&sibling, options.image_link_credit) {
            append = true;
        }

        if append {
            tracing::debug!(sibling = %describe(&sibling), "Sibling appended");
            if diagnostics.enabled() {
                diagnostics.record(Event::SiblingAnnexed { node: describe(&sibling) });
            }
            if !has_any_tag(&sibling, &BLOCK_TAGS) {
                sibling.rename("div");
            }
            move_into(&node, &sibling);
        }
    }

    node
}

/// Long text with few links, or a short link-free sentence.
fn is_prose(paragraph: &NodeRef, image_credit: usize) -> bool {
    let density = link_density(paragraph, image_credit);
    let content = paragraph.text();
    let length = content.chars().count();

    if length > SIBLING_PROSE_LENGTH {
        density < 0.25
    } else {
        length < SIBLING_PROSE_LENGTH && density == 0.0 && content.contains(". ")
    }
}
