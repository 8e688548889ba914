//! Diagnostics sink for extraction decisions.
//!
//! The pipeline reports what it scores, flags and drops to a [`Diagnostics`]
//! implementation passed in by the caller. Nothing here is global: the
//! default sink discards everything, [`TracingDiagnostics`] forwards to
//! `tracing`, and [`RecordingDiagnostics`] keeps events for inspection.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use crate::dom::{attr_or_empty, tag_name, NodeRef};

/// Why a node was queued for removal before scoring finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagReason {
    /// class/id matched the unlikely keywords without an override
    Unlikely,
    /// Anchor target or auto-generated permalink
    BadLink,
}

/// Why the cleaner dropped a node from the winning subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Flagged during scoring
    Flagged(FlagReason),
    /// `object`/`embed` not hosted on a trusted video site
    UntrustedEmbed,
    /// Heading with negative weight or dense links
    InsignificantHeading,
    /// `div`/`p` with no text and no children
    Empty,
    /// Failed the conditional cleaning test
    Conditional,
}

/// Why extraction left the scored path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// No node produced a candidate score
    NoCandidates,
    /// Cleaning the winner left nothing to return
    EmptyWinner,
    /// The document could not be parsed or had no content
    NoDocument,
}

/// A single extraction decision.
///
/// Nodes are identified by a short description (`tag #id .class`) since the
/// DOM does not outlive the extraction.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    CandidateCreated { node: String, initial_score: f64 },
    ParagraphScored { node: String, points: f64 },
    CandidateFinalized { node: String, link_density: f64, score: f64 },
    NodeFlagged { node: String, reason: FlagReason },
    WinnerSelected { node: String, score: f64 },
    SiblingAnnexed { node: String },
    NodeDropped { node: String, reason: DropReason },
    Fallback { reason: FallbackReason },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CandidateCreated { node, initial_score } => {
                write!(f, "candidate   {node} initial={initial_score:.1}")
            }
            Self::ParagraphScored { node, points } => write!(f, "paragraph   {node} +{points:.2}"),
            Self::CandidateFinalized { node, link_density, score } => {
                write!(f, "finalized   {node} density={link_density:.3} score={score:.3}")
            }
            Self::NodeFlagged { node, reason } => write!(f, "flagged     {node} ({reason:?})"),
            Self::WinnerSelected { node, score } => write!(f, "winner      {node} score={score:.3}"),
            Self::SiblingAnnexed { node } => write!(f, "annexed     {node}"),
            Self::NodeDropped { node, reason } => write!(f, "dropped     {node} ({reason:?})"),
            Self::Fallback { reason } => write!(f, "fallback    ({reason:?})"),
        }
    }
}

/// Receiver for extraction events.
pub trait Diagnostics: Send + Sync {
    /// Record one event.
    fn record(&self, event: Event);

    /// Whether events are wanted at all; callers skip building them when not.
    fn enabled(&self) -> bool {
        true
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn record(&self, _event: Event) {}

    fn enabled(&self) -> bool {
        false
    }
}

/// Forwards events to `tracing` at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn record(&self, event: Event) {
        tracing::debug!(target: "readable_article::diagnostics", "{event}");
    }

    fn enabled(&self) -> bool {
        tracing::enabled!(target: "readable_article::diagnostics", tracing::Level::DEBUG)
    }
}

/// Collects events in memory.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    events: Mutex<Vec<Event>>,
}

impl RecordingDiagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the events recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// One line per event, in the order they were recorded.
    #[must_use]
    pub fn report(&self) -> String {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|e| format!("{e}\n"))
            .collect()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn record(&self, event: Event) {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).push(event);
    }
}

/// Short `tag #id .class` description of a node.
#[must_use]
pub fn describe(node: &NodeRef) -> String {
    let mut out = tag_name(node).unwrap_or_else(|| "#node".to_string());
    let id = attr_or_empty(node, "id");
    if !id.is_empty() {
        out.push_str(" #");
        out.push_str(id.trim());
    }
    for class in attr_or_empty(node, "class").split_whitespace() {
        out.push_str(" .");
        out.push_str(class);
    }
    out
}
