//! Candidate scoring.
//!
//! One pass over the document classifies every element. Unlikely elements
//! and junk anchors are flagged for later removal; scorable paragraphs push
//! points up to their parent and grandparent, which become candidates.
//! Once every paragraph has contributed, each candidate is scaled by its
//! link density exactly once.
//!
//! The two phases are separate types: [`CandidateScores`] accepts additive
//! contributions, and [`CandidateScores::finalize`] consumes it into a
//! read-only [`CandidateMap`].

use std::collections::HashMap;
use std::fmt;

use crate::diagnostics::{describe, Diagnostics, Event, FlagReason};
use crate::dom::{attr_or_empty, descendant_elements, has_tag, parent_element, tag_name, Document, NodeId, NodeRef};
use crate::link_density::link_density;
use crate::options::Options;
use crate::patterns::{CLS_MAYBE, CLS_UNLIKELY, CLS_WEIGHT_NEGATIVE, CLS_WEIGHT_POSITIVE};

use super::tags::{initial_tag_score, is_scorable_tag};

/// Fragment length above which an anchor is treated as a generated permalink.
const MAX_FRAGMENT_LENGTH: usize = 25;

/// Mutually exclusive classification of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Boilerplate by class/id; removed
    Unlikely,
    /// Anchor target or permalink; removed
    BadLink,
    /// Paragraph-like element whose text feeds candidate scores
    Scorable,
    /// Left alone, may still receive points as a parent
    Neutral,
}

/// Classify an element for scoring.
#[must_use]
pub fn classify(node: &NodeRef, options: &Options) -> Classification {
    if is_unlikely_node(node) {
        Classification::Unlikely
    } else if is_bad_link(node) {
        Classification::BadLink
    } else if tag_name(node).is_some_and(|t| is_scorable_tag(&t, options.score_article_tags)) {
        Classification::Scorable
    } else {
        Classification::Neutral
    }
}

/// class or id matches the unlikely keywords, neither matches an override,
/// and the node is not `<body>`.
#[must_use]
pub fn is_unlikely_node(node: &NodeRef) -> bool {
    let class = attr_or_empty(node, "class");
    let id = attr_or_empty(node, "id");

    let unlikely = CLS_UNLIKELY.is_match(&class) || CLS_UNLIKELY.is_match(&id);
    let maybe = CLS_MAYBE.is_match(&class) || CLS_MAYBE.is_match(&id);

    unlikely && !maybe && !has_tag(node, "body")
}

/// An `<a>` that only names a target, or whose fragment looks generated.
#[must_use]
pub fn is_bad_link(node: &NodeRef) -> bool {
    if !has_tag(node, "a") {
        return false;
    }

    let name = attr_or_empty(node, "name");
    let href = attr_or_empty(node, "href");
    if !name.is_empty() && href.is_empty() {
        return true;
    }

    let parts: Vec<&str> = href.split('#').collect();
    parts.len() == 2 && parts[1].chars().count() > MAX_FRAGMENT_LENGTH
}

/// Class/id weight: ±25 for each of class and id matching the negative or
/// positive keywords. Always one of -50, -25, 0, 25, 50.
#[must_use]
pub fn class_weight(node: &NodeRef) -> i32 {
    let mut weight = 0;

    for attribute in ["class", "id"] {
        let value = attr_or_empty(node, attribute);
        if value.is_empty() {
            continue;
        }
        if CLS_WEIGHT_NEGATIVE.is_match(&value) {
            weight -= 25;
        }
        if CLS_WEIGHT_POSITIVE.is_match(&value) {
            weight += 25;
        }
    }

    weight
}

/// Points a paragraph's trimmed text contributes to its parent.
///
/// 1 base point, +0.25 per comma, -0.5 per double quote, and +1 per full
/// 100 characters up to 3.
#[must_use]
pub fn paragraph_score(inner_text: &str) -> f64 {
    let commas = inner_text.matches(',').count();
    let quotes = inner_text.matches('"').count();
    let length_points = (inner_text.chars().count() / 100).min(3);

    1.0 + commas as f64 * 0.25 - quotes as f64 * 0.5 + length_points as f64
}

/// A node being considered as the article root.
#[derive(Clone, Copy)]
pub struct Candidate<'a> {
    pub node: NodeRef<'a>,
    pub content_score: f64,
}

impl<'a> Candidate<'a> {
    /// New candidate scored by tag and class/id weight.
    #[must_use]
    pub fn new(node: NodeRef<'a>) -> Self {
        let tag_score = tag_name(&node).map_or(0.0, |t| initial_tag_score(&t));
        Self {
            node,
            content_score: tag_score + f64::from(class_weight(&node)),
        }
    }
}

impl fmt::Display for Candidate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.1}", describe(&self.node), self.content_score)
    }
}

impl fmt::Debug for Candidate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Candidate {self}>")
    }
}

/// Owned snapshot of a candidate, usable after the document is gone.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    /// `tag #id .class` description of the node
    pub node: String,
    pub content_score: f64,
}

impl fmt::Display for RankedCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.1}", self.node, self.content_score)
    }
}

/// Candidates still accepting paragraph points.
pub struct CandidateScores<'a> {
    index: HashMap<NodeId, usize>,
    candidates: Vec<Candidate<'a>>,
}

impl<'a> CandidateScores<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            candidates: Vec::new(),
        }
    }

    /// Make sure `node` has a candidate, creating it with its initial score.
    pub fn ensure(&mut self, node: NodeRef<'a>, diagnostics: &dyn Diagnostics) {
        if self.index.contains_key(&node.id) {
            return;
        }

        let candidate = Candidate::new(node);
        if diagnostics.enabled() {
            diagnostics.record(Event::CandidateCreated {
                node: describe(&node),
                initial_score: candidate.content_score,
            });
        }
        self.index.insert(node.id, self.candidates.len());
        self.candidates.push(candidate);
    }

    /// Add points to an existing candidate. Unknown nodes are ignored.
    pub fn add(&mut self, id: NodeId, points: f64) {
        if let Some(&i) = self.index.get(&id) {
            self.candidates[i].content_score += points;
        }
    }

    /// Scale every candidate by `1 - link_density` and freeze the scores.
    #[must_use]
    pub fn finalize(mut self, image_credit: usize, diagnostics: &dyn Diagnostics) -> CandidateMap<'a> {
        for candidate in &mut self.candidates {
            let density = link_density(&candidate.node, image_credit);
            tracing::trace!(
                score = candidate.content_score,
                adjustment = 1.0 - density,
                "Getting link density adjustment"
            );
            candidate.content_score *= 1.0 - density;

            if diagnostics.enabled() {
                diagnostics.record(Event::CandidateFinalized {
                    node: describe(&candidate.node),
                    link_density: density,
                    score: candidate.content_score,
                });
            }
        }

        CandidateMap {
            index: self.index,
            candidates: self.candidates,
        }
    }
}

impl Default for CandidateScores<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Final candidate scores keyed by node.
///
/// Iteration follows candidate creation order, which is document order of
/// the paragraphs that produced them.
pub struct CandidateMap<'a> {
    index: HashMap<NodeId, usize>,
    candidates: Vec<Candidate<'a>>,
}

impl<'a> CandidateMap<'a> {
    #[must_use]
    pub fn get(&self, id: &NodeId) -> Option<&Candidate<'a>> {
        self.index.get(id).map(|&i| &self.candidates[i])
    }

    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate<'a>> {
        self.candidates.iter()
    }

    /// Candidates by descending score; equal scores keep creation order.
    #[must_use]
    pub fn ranked(&self) -> Vec<&Candidate<'a>> {
        let mut ranked: Vec<&Candidate<'a>> = self.candidates.iter().collect();
        ranked.sort_by(|a, b| b.content_score.total_cmp(&a.content_score));
        ranked
    }

    /// Owned, ranked copy of the scores.
    #[must_use]
    pub fn summaries(&self) -> Vec<RankedCandidate> {
        self.ranked()
            .into_iter()
            .map(|c| RankedCandidate {
                node: describe(&c.node),
                content_score: c.content_score,
            })
            .collect()
    }
}

/// Score paragraphs into their parents and grandparents.
///
/// Paragraphs without an element parent and grandparent, or whose trimmed
/// text is shorter than `options.min_text_length` characters, contribute
/// nothing.
#[must_use]
pub fn score_candidates<'a>(
    nodes: &[NodeRef<'a>],
    options: &Options,
    diagnostics: &dyn Diagnostics,
) -> CandidateMap<'a> {
    let mut scores = CandidateScores::new();

    for node in nodes {
        let Some(parent) = parent_element(node) else {
            tracing::trace!("Skipping node - parent node is none.");
            continue;
        };
        let Some(grand) = parent_element(&parent) else {
            tracing::trace!("Skipping node - grand parent node is none.");
            continue;
        };

        let text = node.text();
        let inner_text = text.trim();
        if inner_text.chars().count() < options.min_text_length {
            tracing::trace!(
                min = options.min_text_length,
                "Skipping candidate because inner text is too short"
            );
            continue;
        }

        scores.ensure(parent, diagnostics);
        scores.ensure(grand, diagnostics);

        let points = paragraph_score(inner_text);
        scores.add(parent.id, points);
        scores.add(grand.id, points / 2.0);

        if diagnostics.enabled() {
            diagnostics.record(Event::ParagraphScored {
                node: describe(node),
                points,
            });
        }
    }

    scores.finalize(options.image_link_credit, diagnostics)
}

/// Classify every element of `dom` and score the scorable ones.
///
/// Returns the candidates and the nodes flagged for removal. Nothing
/// is removed here: link densities are measured on the complete tree.
#[must_use]
pub fn find_candidates<'a>(
    dom: &'a Document,
    options: &Options,
    diagnostics: &dyn Diagnostics,
) -> (CandidateMap<'a>, Vec<(NodeId, FlagReason)>) {
    let mut to_score = Vec::new();
    let mut flagged = Vec::new();

    for node in descendant_elements(&dom.root()) {
        let reason = match classify(&node, options) {
            Classification::Unlikely => FlagReason::Unlikely,
            Classification::BadLink => FlagReason::BadLink,
            Classification::Scorable => {
                to_score.push(node);
                continue;
            }
            Classification::Neutral => continue,
        };

        tracing::debug!(node = %describe(&node), ?reason, "We should drop node");
        if diagnostics.enabled() {
            diagnostics.record(Event::NodeFlagged {
                node: describe(&node),
                reason,
            });
        }
        flagged.push((node.id, reason));
    }

    (score_candidates(&to_score, options, diagnostics), flagged)
}
