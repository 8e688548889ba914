//! Extraction pipeline.
//!
//! Runs the stages in order: load, sanitize, normalize leaf blocks, score,
//! drop flagged nodes, pick and grow the winner, clean, assemble. Any stage
//! that comes up empty routes to the fallback, and the fallback to the error
//! document, so extraction itself never fails.

use crate::diagnostics::{describe, Diagnostics, DropReason, Event, FallbackReason, FlagReason};
use crate::document::{Input, OriginalDocument};
use crate::dom::{is_connected, Document, NodeId, NodeRef};
use crate::options::Options;
use crate::result::ReadableDocument;
use crate::sanitizer::Sanitizer;

use super::assembler::{build_base_document, build_error_document};
use super::cleaner::{clean_document, remove_orphans};
use super::leaf_blocks::normalize_leaf_blocks;
use super::scoring::{find_candidates, RankedCandidate};
use super::siblings::{annex_siblings, select_winner};

/// Everything one extraction run produces.
#[derive(Debug)]
pub struct Extraction {
    /// Trimmed `<title>` text; empty if missing or the input did not parse.
    pub title: String,
    /// The assembled output.
    pub readable: ReadableDocument,
    /// Candidates by descending score, as they stood when scoring finished.
    pub candidates: Vec<RankedCandidate>,
}

/// Run the whole pipeline over `input`.
pub fn extract_document(
    input: &Input,
    options: &Options,
    sanitizer: &dyn Sanitizer,
    diagnostics: &dyn Diagnostics,
) -> Extraction {
    let base_url = options.base_url();
    let original = match OriginalDocument::load(input, base_url.as_ref()) {
        Ok(original) => original,
        Err(err) => {
            tracing::debug!(error = %err, "Failed to load document");
            return Extraction {
                title: String::new(),
                readable: error_document(options, diagnostics),
                candidates: Vec::new(),
            };
        }
    };

    let title = original.title();
    let dom = original.into_dom();

    sanitizer.sanitize(&dom);
    normalize_leaf_blocks(&dom, options.strict_leaf_blocks);

    let (content, candidates) = {
        let (map, flagged) = find_candidates(&dom, options, diagnostics);
        drop_flagged(&dom, &flagged, diagnostics);
        let summaries = map.summaries();

        let scored = match select_winner(&map) {
            Ok(winner) => {
                tracing::debug!(winner = %winner, "Winner selected");
                if diagnostics.enabled() {
                    diagnostics.record(Event::WinnerSelected {
                        node: describe(&winner.node),
                        score: winner.content_score,
                    });
                }
                let node = annex_siblings(&winner, &map, options, diagnostics);
                clean_document(&node, options, diagnostics)
                    .map(|n| n.id)
                    .ok_or(FallbackReason::EmptyWinner)
            }
            Err(err) => {
                tracing::debug!(error = %err, "No candidates found in document.");
                Err(FallbackReason::NoCandidates)
            }
        };

        let content = match scored {
            Ok(id) => Some(id),
            Err(reason) => {
                if reason == FallbackReason::EmptyWinner {
                    tracing::debug!("Had candidates but failed to find a cleaned winning DOM.");
                }
                if diagnostics.enabled() {
                    diagnostics.record(Event::Fallback { reason });
                }
                fallback_content(&dom, options, diagnostics)
            }
        };
        (content, summaries)
    };

    let readable = match content {
        Some(id) => build_base_document(dom, id, options.return_fragment),
        None => error_document(options, diagnostics),
    };

    if options.remove_orphans && !readable.is_error() {
        remove_orphans(&readable.content());
    }

    Extraction {
        title,
        readable,
        candidates,
    }
}

/// Remove the nodes flagged during scoring.
///
/// A node inside an already removed subtree goes with it and is not
/// reported separately.
fn drop_flagged(dom: &Document, flagged: &[(NodeId, FlagReason)], diagnostics: &dyn Diagnostics) {
    for (id, reason) in flagged {
        let node = NodeRef::new(*id, &dom.tree);
        if !is_connected(&node) {
            continue;
        }
        if diagnostics.enabled() {
            diagnostics.record(Event::NodeDropped {
                node: describe(&node),
                reason: DropReason::Flagged(*reason),
            });
        }
        node.remove_from_parent();
    }
}

/// Clean the whole `<body>` (or `<html>` without one) when scoring found
/// nothing usable.
fn fallback_content(dom: &Document, options: &Options, diagnostics: &dyn Diagnostics) -> Option<NodeId> {
    let target = dom
        .select("body")
        .nodes()
        .first()
        .copied()
        .or_else(|| dom.select("html").nodes().first().copied())?;
    clean_document(&target, options, diagnostics).map(|n| n.id)
}

fn error_document(options: &Options, diagnostics: &dyn Diagnostics) -> ReadableDocument {
    tracing::debug!("No document to use.");
    if diagnostics.enabled() {
        diagnostics.record(Event::Fallback {
            reason: FallbackReason::NoDocument,
        });
    }
    build_error_document(options.return_fragment)
}
